// ABOUTME: Centralized error types for the meal-planning core
// ABOUTME: Defines AppError variants and the recovery policy for each operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

//! # Error handling
//!
//! Operation-level failures are recovered into result values: the sync
//! reconciler returns a [`crate::sync::SyncReport`] with an `error` field,
//! plan generation returns a possibly-empty plan list, and a reroll with no
//! candidates returns `None`. Only storage corruption and programming errors
//! propagate upward as `Err(AppError)`.

use crate::models::MealSlot;
use thiserror::Error;

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// All error conditions surfaced by the core
#[derive(Debug, Error)]
pub enum AppError {
    /// A sync or remote operation was invoked without credentials
    #[error("not logged in: remote sync requires a server token")]
    NotLoggedIn,

    /// The solver returned non-optimal across all relaxation tiers
    #[error("model infeasible at every tier")]
    InfeasibleModel,

    /// An active slot has zero compatible recipes
    #[error("no recipes available for the {slot} slot")]
    EmptyCategory {
        /// The slot that could not be filled
        slot: MealSlot,
    },

    /// A single remote push/pull failed; the batch continues
    #[error("remote operation failed: {context}")]
    TransientRemote { context: String },

    /// The ingredient parser could not extract a meaningful name
    #[error("ingredient text yielded no usable name")]
    ParseGiveUp,

    /// A persisted row could not be mapped onto its entity shape
    #[error("unreadable stored row: {context}")]
    SchemaMismatch { context: String },

    /// The backing store failed at the I/O level
    #[error("storage failure: {context}")]
    Storage { context: String },

    /// The MILP backend rejected the model or faulted mid-solve
    #[error("solver backend failure: {context}")]
    Solver { context: String },
}

impl AppError {
    /// Wrap a remote-service failure for per-item batch handling
    pub fn transient(context: impl Into<String>) -> Self {
        Self::TransientRemote {
            context: context.into(),
        }
    }

    /// Wrap a storage-layer failure
    pub fn storage(context: impl Into<String>) -> Self {
        Self::Storage {
            context: context.into(),
        }
    }

    /// Wrap an unreadable-row failure
    pub fn schema(context: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            context: context.into(),
        }
    }

    /// Wrap a solver-backend failure
    pub fn solver(context: impl Into<String>) -> Self {
        Self::Solver {
            context: context.into(),
        }
    }

    /// Whether this error may be swallowed by a batch loop
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TransientRemote { .. }
                | Self::InfeasibleModel
                | Self::ParseGiveUp
                | Self::EmptyCategory { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_names_the_slot() {
        let err = AppError::EmptyCategory {
            slot: MealSlot::Dinner,
        };
        assert!(err.to_string().contains("dinner"));
    }

    #[test]
    fn recoverability_matches_policy() {
        assert!(AppError::transient("timeout").is_recoverable());
        assert!(AppError::InfeasibleModel.is_recoverable());
        assert!(AppError::ParseGiveUp.is_recoverable());
        assert!(!AppError::storage("disk gone").is_recoverable());
        assert!(!AppError::schema("bad row").is_recoverable());
    }
}

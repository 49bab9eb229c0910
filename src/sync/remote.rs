// ABOUTME: Abstraction over the remote recipe service consumed by the reconciler
// ABOUTME: Implementations wrap the cloud API; tests script a fake
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{Preferences, Recipe};

/// The remote recipe service.
///
/// The host app implements this over its HTTP client; the core only needs
/// these five operations. All methods presume the caller already holds
/// valid credentials (the reconciler checks login state first).
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Fetch every recipe visible to this account
    async fn fetch_recipes(&self) -> AppResult<Vec<Recipe>>;

    /// Create a recipe the server has never seen
    async fn create_recipe(&self, recipe: &Recipe) -> AppResult<()>;

    /// Update a recipe that already exists on the server
    async fn update_recipe(&self, recipe: &Recipe) -> AppResult<()>;

    /// Fetch the account's preferences, if the server has any
    async fn fetch_preferences(&self) -> AppResult<Option<Preferences>>;

    /// Push the local preferences
    async fn push_preferences(&self, preferences: &Preferences) -> AppResult<()>;
}

// ABOUTME: Two-way sync between the local store and the remote recipe service
// ABOUTME: Re-exports the remote service trait and the reconciliation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

//! # Sync
//!
//! Last-writer-wins with divergence detection: a local row edited since its
//! last sync (`updated_at > synced_at`) is never silently overwritten by
//! the server's copy — the pair is surfaced as a [`SyncConflict`] for the
//! caller to resolve. Pull fully precedes push; preference sync follows
//! push; per-item remote failures are logged and the batch continues.

pub mod reconciler;
pub mod remote;

pub use reconciler::{ConflictChoice, SyncConflict, SyncEngine, SyncReport};
pub use remote::RemoteService;

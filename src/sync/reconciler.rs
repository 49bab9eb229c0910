// ABOUTME: Pull/push reconciliation with divergence-detecting conflict surfacing
// ABOUTME: Implements the updated_at/synced_at merge rules and caller-driven resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::remote::RemoteService;
use crate::errors::{AppError, AppResult};
use crate::models::Recipe;
use crate::storage::{RecipeRepository, SettingsRepository};

/// A local/server pair that both changed since the last successful sync
#[derive(Debug, Clone)]
pub struct SyncConflict {
    pub local: Recipe,
    pub server: Recipe,
}

/// Which side of a conflict the caller wants to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Local,
    Server,
}

/// Outcome of one sync call. Operation-level failures land in `error`
/// rather than aborting; only storage corruption escapes as `Err`.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub pulled: usize,
    pub pushed: usize,
    pub conflicts: Vec<SyncConflict>,
    pub error: Option<String>,
}

/// Whether an id names a server-side row: all-numeric ids come from the
/// server, dash-bearing UUIDs were minted locally.
#[must_use]
pub fn is_server_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}

/// Two-way merge engine over the repositories and the remote service
pub struct SyncEngine<'a> {
    recipes: &'a dyn RecipeRepository,
    settings: &'a dyn SettingsRepository,
    remote: &'a dyn RemoteService,
}

impl<'a> SyncEngine<'a> {
    #[must_use]
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        settings: &'a dyn SettingsRepository,
        remote: &'a dyn RemoteService,
    ) -> Self {
        Self {
            recipes,
            settings,
            remote,
        }
    }

    /// Run one full sync: pull, push, then preferences.
    ///
    /// `last_sync_at` is stamped only when no fatal error occurred.
    /// Without credentials the report carries an error and nothing runs.
    ///
    /// # Errors
    ///
    /// Only storage failures propagate; remote failures are folded into
    /// the report.
    pub async fn sync(&self) -> AppResult<SyncReport> {
        let mut state = self.settings.get_sync_state().await?;
        let mut report = SyncReport::default();

        if !state.is_logged_in() {
            report.error = Some(AppError::NotLoggedIn.to_string());
            return Ok(report);
        }

        let now = Utc::now();
        self.pull(now, &mut report).await?;
        self.push(now, &mut report).await?;
        self.sync_preferences().await?;

        if report.error.is_none() {
            state.last_sync_at = Some(now);
            self.settings.save_sync_state(&state).await?;
        }
        info!(
            pulled = report.pulled,
            pushed = report.pushed,
            conflicts = report.conflicts.len(),
            "sync finished"
        );
        Ok(report)
    }

    /// Pull server rows: insert unknown ids, overwrite clean rows, surface
    /// diverged rows as conflicts
    async fn pull(&self, now: DateTime<Utc>, report: &mut SyncReport) -> AppResult<()> {
        let server_recipes = match self.remote.fetch_recipes().await {
            Ok(recipes) => recipes,
            Err(err) => {
                warn!(error = %err, "pull failed");
                report.error = Some(err.to_string());
                return Ok(());
            }
        };

        for server in server_recipes {
            match self.recipes.get_recipe(&server.id).await? {
                None => {
                    self.adopt(server, None, now).await?;
                    report.pulled += 1;
                }
                Some(local) => {
                    let last_synced = local.synced_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
                    if local.updated_at > last_synced {
                        // both sides moved since the last sync
                        report.conflicts.push(SyncConflict { local, server });
                    } else {
                        self.adopt(server, Some(&local), now).await?;
                        report.pulled += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// Store the server's version locally with both stamps at `now`, so the
    /// row is neither re-pushed nor re-conflicted
    async fn adopt(
        &self,
        server: Recipe,
        local: Option<&Recipe>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut adopted = server;
        if let Some(local) = local {
            adopted.created_at = local.created_at;
        }
        adopted.updated_at = now;
        adopted.synced_at = Some(now);
        self.recipes.replace_recipe(adopted).await
    }

    /// Push locally edited rows; per-item failures are logged and skipped
    async fn push(&self, now: DateTime<Utc>, report: &mut SyncReport) -> AppResult<()> {
        let pending = self
            .recipes
            .recipes_updated_since(DateTime::<Utc>::MIN_UTC)
            .await?;

        for recipe in pending {
            let result = if is_server_id(&recipe.id) {
                self.remote.update_recipe(&recipe).await
            } else {
                self.remote.create_recipe(&recipe).await
            };
            match result {
                Ok(()) => {
                    self.recipes.mark_recipe_synced(&recipe.id, now).await?;
                    report.pushed += 1;
                }
                Err(err) => {
                    warn!(recipe = %recipe.id, error = %err, "push failed, continuing");
                }
            }
        }
        Ok(())
    }

    /// Server preferences replace local when present; local preferences are
    /// pushed afterwards. Failures here are non-fatal.
    async fn sync_preferences(&self) -> AppResult<()> {
        match self.remote.fetch_preferences().await {
            Ok(Some(preferences)) => self.settings.save_preferences(&preferences).await?,
            Ok(None) => {}
            Err(err) => warn!(error = %err, "preference pull failed"),
        }

        let local = self.settings.get_preferences().await?;
        if let Err(err) = self.remote.push_preferences(&local).await {
            warn!(error = %err, "preference push failed");
        }
        Ok(())
    }

    /// Apply the caller's decision for one conflict.
    ///
    /// Keeping the server copy overwrites the local row; keeping the local
    /// copy re-pushes it. Either way `synced_at` lands at now.
    ///
    /// # Errors
    ///
    /// Storage failures propagate; a failed re-push surfaces as
    /// `AppError::TransientRemote` so the caller can retry.
    pub async fn resolve_conflict(
        &self,
        conflict: &SyncConflict,
        keep: ConflictChoice,
    ) -> AppResult<()> {
        let now = Utc::now();
        match keep {
            ConflictChoice::Server => {
                self.adopt(conflict.server.clone(), Some(&conflict.local), now)
                    .await
            }
            ConflictChoice::Local => {
                let recipe = &conflict.local;
                if is_server_id(&recipe.id) {
                    self.remote.update_recipe(recipe).await?;
                } else {
                    self.remote.create_recipe(recipe).await?;
                }
                self.recipes.mark_recipe_synced(&recipe.id, now).await
            }
        }
    }
}

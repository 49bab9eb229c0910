// ABOUTME: Abstract persistence interface over the five entity families
// ABOUTME: Defines per-family repository traits plus filter and patch types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

//! # Persistence
//!
//! The core never talks to a database directly: it consumes the repository
//! traits below, and any backing store meeting the contract is acceptable.
//! [`memory::MemoryStore`] is the in-process reference implementation used
//! by the integration tests; an embedded-SQL adapter in the host app
//! implements the same traits over its own tables, using the row shapes in
//! [`records`].

pub mod memory;
pub mod records;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppResult;
use crate::models::{
    Macros, MealPlan, MealSlot, Preferences, Recipe, RecipeSource, ShoppingList, SyncState,
};

pub use memory::MemoryStore;

/// Optional narrowing of a recipe listing
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub category: Option<MealSlot>,
    pub source: Option<RecipeSource>,
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
}

impl RecipeFilter {
    /// Whether a recipe passes this filter
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(category) = self.category {
            if recipe.category != category {
                return false;
            }
        }
        if let Some(source) = self.source {
            if recipe.source != source {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !recipe
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Field-level patch for a recipe; `None` leaves the field untouched.
/// Applying any patch stamps `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub category: Option<MealSlot>,
    pub macros: Option<Macros>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub source_url: Option<Option<String>>,
    pub rating: Option<Option<f64>>,
    pub frequency_limit: Option<u32>,
    pub servings: Option<u32>,
}

impl RecipeUpdate {
    /// Apply this patch to a recipe, stamping `updated_at`
    pub fn apply(self, recipe: &mut Recipe, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(category) = self.category {
            recipe.category = category;
        }
        if let Some(macros) = self.macros {
            recipe.macros = macros;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = image_url;
        }
        if let Some(source_url) = self.source_url {
            recipe.source_url = source_url;
        }
        if let Some(rating) = self.rating {
            recipe.rating = rating.map(|r| r.clamp(1.0, 5.0));
        }
        if let Some(limit) = self.frequency_limit {
            recipe.frequency_limit = limit;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        recipe.updated_at = now;
    }
}

/// CRUD over the recipe library
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// List recipes, newest-created first, optionally filtered
    async fn list_recipes(&self, filter: Option<RecipeFilter>) -> AppResult<Vec<Recipe>>;

    async fn get_recipe(&self, id: &str) -> AppResult<Option<Recipe>>;

    async fn get_recipes_by_ids(&self, ids: &[String]) -> AppResult<Vec<Recipe>>;

    /// Insert a recipe; an empty id is replaced with a fresh UUID
    async fn insert_recipe(&self, recipe: Recipe) -> AppResult<Recipe>;

    /// Patch a recipe in place, stamping `updated_at`
    async fn update_recipe(&self, id: &str, update: RecipeUpdate) -> AppResult<Recipe>;

    async fn delete_recipe(&self, id: &str) -> AppResult<()>;

    /// Rows edited after `since` that have never synced or changed since
    /// their last sync
    async fn recipes_updated_since(&self, since: DateTime<Utc>) -> AppResult<Vec<Recipe>>;

    /// Store a row exactly as given, without touching any timestamp.
    /// Used by the sync reconciler when adopting the server's version.
    async fn replace_recipe(&self, recipe: Recipe) -> AppResult<()>;

    /// Stamp `synced_at` without touching `updated_at`
    async fn mark_recipe_synced(&self, id: &str, at: DateTime<Utc>) -> AppResult<()>;
}

/// CRUD over generated meal plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn list_plans(&self) -> AppResult<Vec<MealPlan>>;

    async fn get_plan(&self, id: &str) -> AppResult<Option<MealPlan>>;

    async fn insert_plan(&self, plan: MealPlan) -> AppResult<MealPlan>;

    /// Clear the selected flag on every plan, then set it on the target
    async fn select_plan(&self, id: &str) -> AppResult<()>;

    async fn delete_plan(&self, id: &str) -> AppResult<()>;

    /// The currently selected plan, if any
    async fn selected_plan(&self) -> AppResult<Option<MealPlan>>;
}

/// CRUD over derived shopping lists, keyed by plan
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    async fn lists_for_plan(&self, plan_id: &str) -> AppResult<Vec<ShoppingList>>;

    async fn insert_list(&self, list: ShoppingList) -> AppResult<ShoppingList>;

    /// Replace a stored list wholesale (item check-offs included)
    async fn update_list(&self, list: ShoppingList) -> AppResult<()>;

    async fn delete_list(&self, id: &str) -> AppResult<()>;
}

/// Singleton preferences and sync-state rows
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Stored preferences, or the defaults when none were saved yet
    async fn get_preferences(&self) -> AppResult<Preferences>;

    async fn save_preferences(&self, preferences: &Preferences) -> AppResult<()>;

    /// Reset preferences to the default row
    async fn clear_preferences(&self) -> AppResult<()>;

    /// Stored sync state, or the all-null default
    async fn get_sync_state(&self) -> AppResult<SyncState>;

    async fn save_sync_state(&self, state: &SyncState) -> AppResult<()>;

    /// Reset sync state to the all-null default
    async fn clear_sync_state(&self) -> AppResult<()>;
}

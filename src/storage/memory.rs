// ABOUTME: In-process reference implementation of all repository traits
// ABOUTME: Backs the integration tests and documents the storage contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    PlanRepository, RecipeFilter, RecipeRepository, RecipeUpdate, SettingsRepository,
    ShoppingListRepository,
};
use crate::errors::{AppError, AppResult};
use crate::models::{MealPlan, Preferences, Recipe, ShoppingList, SyncState};

#[derive(Default)]
struct Inner {
    recipes: HashMap<String, Recipe>,
    plans: HashMap<String, MealPlan>,
    shopping_lists: HashMap<String, ShoppingList>,
    preferences: Option<Preferences>,
    sync_state: Option<SyncState>,
}

/// Thread-safe in-memory store implementing every repository trait
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::storage("memory store lock poisoned"))
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn list_recipes(&self, filter: Option<RecipeFilter>) -> AppResult<Vec<Recipe>> {
        let inner = self.lock()?;
        let mut recipes: Vec<Recipe> = inner
            .recipes
            .values()
            .filter(|r| filter.as_ref().is_none_or(|f| f.matches(r)))
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn get_recipe(&self, id: &str) -> AppResult<Option<Recipe>> {
        Ok(self.lock()?.recipes.get(id).cloned())
    }

    async fn get_recipes_by_ids(&self, ids: &[String]) -> AppResult<Vec<Recipe>> {
        let inner = self.lock()?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.recipes.get(id).cloned())
            .collect())
    }

    async fn insert_recipe(&self, mut recipe: Recipe) -> AppResult<Recipe> {
        if recipe.id.is_empty() {
            recipe.id = Uuid::new_v4().to_string();
        }
        self.lock()?
            .recipes
            .insert(recipe.id.clone(), recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(&self, id: &str, update: RecipeUpdate) -> AppResult<Recipe> {
        let mut inner = self.lock()?;
        let recipe = inner
            .recipes
            .get_mut(id)
            .ok_or_else(|| AppError::storage(format!("unknown recipe {id}")))?;
        update.apply(recipe, Utc::now());
        Ok(recipe.clone())
    }

    async fn delete_recipe(&self, id: &str) -> AppResult<()> {
        self.lock()?.recipes.remove(id);
        Ok(())
    }

    async fn recipes_updated_since(&self, since: DateTime<Utc>) -> AppResult<Vec<Recipe>> {
        let inner = self.lock()?;
        let mut recipes: Vec<Recipe> = inner
            .recipes
            .values()
            .filter(|r| {
                r.updated_at > since && r.synced_at.is_none_or(|synced| r.updated_at > synced)
            })
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn replace_recipe(&self, recipe: Recipe) -> AppResult<()> {
        self.lock()?.recipes.insert(recipe.id.clone(), recipe);
        Ok(())
    }

    async fn mark_recipe_synced(&self, id: &str, at: DateTime<Utc>) -> AppResult<()> {
        let mut inner = self.lock()?;
        let recipe = inner
            .recipes
            .get_mut(id)
            .ok_or_else(|| AppError::storage(format!("unknown recipe {id}")))?;
        recipe.synced_at = Some(at);
        Ok(())
    }
}

#[async_trait]
impl PlanRepository for MemoryStore {
    async fn list_plans(&self) -> AppResult<Vec<MealPlan>> {
        let mut plans: Vec<MealPlan> = self.lock()?.plans.values().cloned().collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn get_plan(&self, id: &str) -> AppResult<Option<MealPlan>> {
        Ok(self.lock()?.plans.get(id).cloned())
    }

    async fn insert_plan(&self, plan: MealPlan) -> AppResult<MealPlan> {
        self.lock()?.plans.insert(plan.id.clone(), plan.clone());
        Ok(plan)
    }

    async fn select_plan(&self, id: &str) -> AppResult<()> {
        let mut inner = self.lock()?;
        if !inner.plans.contains_key(id) {
            return Err(AppError::storage(format!("unknown plan {id}")));
        }
        for plan in inner.plans.values_mut() {
            plan.selected = plan.id == id;
        }
        Ok(())
    }

    async fn delete_plan(&self, id: &str) -> AppResult<()> {
        self.lock()?.plans.remove(id);
        Ok(())
    }

    async fn selected_plan(&self) -> AppResult<Option<MealPlan>> {
        Ok(self
            .lock()?
            .plans
            .values()
            .find(|p| p.selected)
            .cloned())
    }
}

#[async_trait]
impl ShoppingListRepository for MemoryStore {
    async fn lists_for_plan(&self, plan_id: &str) -> AppResult<Vec<ShoppingList>> {
        let mut lists: Vec<ShoppingList> = self
            .lock()?
            .shopping_lists
            .values()
            .filter(|l| l.plan_id == plan_id)
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lists)
    }

    async fn insert_list(&self, list: ShoppingList) -> AppResult<ShoppingList> {
        self.lock()?
            .shopping_lists
            .insert(list.id.clone(), list.clone());
        Ok(list)
    }

    async fn update_list(&self, list: ShoppingList) -> AppResult<()> {
        let mut inner = self.lock()?;
        if !inner.shopping_lists.contains_key(&list.id) {
            return Err(AppError::storage(format!("unknown shopping list {}", list.id)));
        }
        inner.shopping_lists.insert(list.id.clone(), list);
        Ok(())
    }

    async fn delete_list(&self, id: &str) -> AppResult<()> {
        self.lock()?.shopping_lists.remove(id);
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn get_preferences(&self) -> AppResult<Preferences> {
        Ok(self.lock()?.preferences.clone().unwrap_or_default())
    }

    async fn save_preferences(&self, preferences: &Preferences) -> AppResult<()> {
        self.lock()?.preferences = Some(preferences.clone());
        Ok(())
    }

    async fn clear_preferences(&self) -> AppResult<()> {
        self.lock()?.preferences = None;
        Ok(())
    }

    async fn get_sync_state(&self) -> AppResult<SyncState> {
        Ok(self.lock()?.sync_state.clone().unwrap_or_default())
    }

    async fn save_sync_state(&self, state: &SyncState) -> AppResult<()> {
        self.lock()?.sync_state = Some(state.clone());
        Ok(())
    }

    async fn clear_sync_state(&self) -> AppResult<()> {
        self.lock()?.sync_state = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealSlot;

    #[tokio::test]
    async fn insert_generates_missing_ids() {
        let store = MemoryStore::new();
        let mut recipe = Recipe::new("Oats", MealSlot::Breakfast);
        recipe.id = String::new();
        let stored = store.insert_recipe(recipe).await.unwrap();
        assert!(!stored.id.is_empty());
    }

    #[tokio::test]
    async fn update_touches_updated_at() {
        let store = MemoryStore::new();
        let recipe = store
            .insert_recipe(Recipe::new("Oats", MealSlot::Breakfast))
            .await
            .unwrap();
        let before = recipe.updated_at;

        let patched = store
            .update_recipe(
                &recipe.id,
                RecipeUpdate {
                    name: Some("Overnight Oats".into()),
                    ..RecipeUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.name, "Overnight Oats");
        assert!(patched.updated_at >= before);
    }

    #[tokio::test]
    async fn select_plan_clears_other_flags() {
        let store = MemoryStore::new();
        let a = store
            .insert_plan(MealPlan::new("Plan 1", vec![], Default::default()))
            .await
            .unwrap();
        let b = store
            .insert_plan(MealPlan::new("Plan 2", vec![], Default::default()))
            .await
            .unwrap();

        store.select_plan(&a.id).await.unwrap();
        store.select_plan(&b.id).await.unwrap();

        let selected = store.selected_plan().await.unwrap().unwrap();
        assert_eq!(selected.id, b.id);
        assert!(!store.get_plan(&a.id).await.unwrap().unwrap().selected);
    }

    #[tokio::test]
    async fn updated_since_respects_sync_stamp() {
        let store = MemoryStore::new();
        let recipe = store
            .insert_recipe(Recipe::new("Oats", MealSlot::Breakfast))
            .await
            .unwrap();

        let epoch = DateTime::<Utc>::MIN_UTC;
        assert_eq!(store.recipes_updated_since(epoch).await.unwrap().len(), 1);

        store
            .mark_recipe_synced(&recipe.id, Utc::now())
            .await
            .unwrap();
        assert!(store.recipes_updated_since(epoch).await.unwrap().is_empty());
    }
}

// ABOUTME: Operation facade tying repositories to the pure engines
// ABOUTME: Implements generate-plans, reroll, shopping-list, and sync entry points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::config::SolverConfig;
use crate::errors::AppResult;
use crate::models::{MealPlan, MealSlot, Recipe, ShoppingList};
use crate::planner::{generate_plans, reroll_meal, GenerationResult, MilpBackend};
use crate::shopping::aggregate;
use crate::storage::{
    PlanRepository, RecipeRepository, SettingsRepository, ShoppingListRepository,
};
use crate::sync::{RemoteService, SyncEngine, SyncReport};

/// Request-driven entry points over a backing store and a MILP backend.
///
/// Each operation is synchronous with respect to its caller and produces a
/// fully formed result; plans are persisted only when selected, and
/// shopping lists are re-derived whenever the selected plan changes.
pub struct MealPlanService {
    recipes: Arc<dyn RecipeRepository>,
    plans: Arc<dyn PlanRepository>,
    shopping: Arc<dyn ShoppingListRepository>,
    settings: Arc<dyn SettingsRepository>,
    backend: Arc<dyn MilpBackend>,
    config: SolverConfig,
}

impl MealPlanService {
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        plans: Arc<dyn PlanRepository>,
        shopping: Arc<dyn ShoppingListRepository>,
        settings: Arc<dyn SettingsRepository>,
        backend: Arc<dyn MilpBackend>,
        config: SolverConfig,
    ) -> Self {
        Self {
            recipes,
            plans,
            shopping,
            settings,
            backend,
            config,
        }
    }

    /// Generate candidate plans from the stored library and preferences.
    ///
    /// Results are not persisted; the user picks one via [`Self::select_plan`].
    ///
    /// # Errors
    ///
    /// Storage failures only; solver issues fold into the result.
    pub async fn generate_plans(&self) -> AppResult<GenerationResult> {
        let recipes = self.recipes.list_recipes(None).await?;
        let preferences = self.settings.get_preferences().await?;
        Ok(generate_plans(
            &recipes,
            &preferences,
            &self.config,
            self.backend.as_ref(),
        ))
    }

    /// Persist a plan and mark it as the selected one
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub async fn select_plan(&self, plan: MealPlan) -> AppResult<MealPlan> {
        let stored = self.plans.insert_plan(plan).await?;
        self.plans.select_plan(&stored.id).await?;
        info!(plan = %stored.id, "plan selected");
        Ok(stored)
    }

    /// Replace one meal of a plan, preserving block consistency.
    ///
    /// Returns the updated plan and the incoming recipe, or `None` when no
    /// candidate exists. The stored plan is not touched; callers persist
    /// the returned value if they keep it.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub async fn reroll_meal<R: Rng>(
        &self,
        plan: &MealPlan,
        day_index: usize,
        slot: MealSlot,
        rng: &mut R,
    ) -> AppResult<Option<(MealPlan, Recipe)>> {
        let recipes = self.recipes.list_recipes(None).await?;
        Ok(reroll_meal(plan, day_index, slot, &recipes, rng))
    }

    /// Derive and persist a shopping list for the selected plan.
    ///
    /// Returns `None` when no plan is selected.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub async fn generate_shopping_list(&self) -> AppResult<Option<ShoppingList>> {
        let Some(plan) = self.plans.selected_plan().await? else {
            return Ok(None);
        };
        let items = aggregate(&plan);
        let list = self
            .shopping
            .insert_list(ShoppingList::new(plan.id.clone(), items))
            .await?;
        info!(plan = %plan.id, items = list.items.len(), "shopping list generated");
        Ok(Some(list))
    }

    /// Run a full sync against the remote service
    ///
    /// # Errors
    ///
    /// Storage failures; remote failures fold into the report.
    pub async fn sync(&self, remote: &dyn RemoteService) -> AppResult<SyncReport> {
        SyncEngine::new(self.recipes.as_ref(), self.settings.as_ref(), remote)
            .sync()
            .await
    }
}

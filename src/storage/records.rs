// ABOUTME: Serialized row shapes for the persisted-state layout
// ABOUTME: Keeps wire-case and map encodings out of the solver and aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

//! # Row records
//!
//! The persisted layout stores `meal_plans.plan_data` as a map of day label
//! to slot-name to recipe-id, and `preferences.macro_targets` as a
//! serialized per-macro map. These records are the only place that shape
//! exists; conversions here rebuild the domain types (rehydrating recipes
//! through a caller-supplied lookup) or fail with `SchemaMismatch`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::{
    DayPlan, Macro, MacroSummary, MacroTarget, MacroTargets, MealAssignment, MealPlan, MealSlot,
    Recipe,
};

/// Stored shape of one meal plan row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: String,
    pub label: String,
    /// day label → slot name → recipe id
    pub plan_data: BTreeMap<String, BTreeMap<String, String>>,
    pub macro_summary: MacroSummary,
    pub selected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl PlanRecord {
    /// Flatten a plan into its stored shape
    #[must_use]
    pub fn from_plan(plan: &MealPlan) -> Self {
        let plan_data = plan
            .days
            .iter()
            .map(|day| {
                let slots = day
                    .meals
                    .iter()
                    .map(|m| (m.slot.as_str().to_owned(), m.recipe.id.clone()))
                    .collect();
                (day.label.clone(), slots)
            })
            .collect();
        Self {
            id: plan.id.clone(),
            label: plan.label.clone(),
            plan_data,
            macro_summary: plan.macro_summary,
            selected: plan.selected,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            synced_at: plan.synced_at,
        }
    }

    /// Rebuild the domain plan, resolving recipe ids through `resolve`.
    ///
    /// Ids that no longer resolve (deleted recipes) drop their meal; an
    /// unknown slot name is a schema mismatch.
    ///
    /// # Errors
    ///
    /// `AppError::SchemaMismatch` when a slot name is not one of the five
    /// valid slots.
    pub fn into_plan<F>(self, resolve: F) -> AppResult<MealPlan>
    where
        F: Fn(&str) -> Option<Recipe>,
    {
        let mut days = Vec::with_capacity(self.plan_data.len());
        for (label, slots) in self.plan_data {
            let mut meals = Vec::with_capacity(slots.len());
            for (slot_name, recipe_id) in slots {
                let slot = MealSlot::parse(&slot_name).ok_or_else(|| {
                    AppError::schema(format!("unknown slot name {slot_name:?}"))
                })?;
                if let Some(recipe) = resolve(&recipe_id) {
                    meals.push(MealAssignment { slot, recipe });
                }
            }
            days.push(DayPlan::from_meals(label, meals));
        }
        Ok(MealPlan {
            id: self.id,
            label: self.label,
            days,
            macro_summary: self.macro_summary,
            selected: self.selected,
            created_at: self.created_at,
            updated_at: self.updated_at,
            synced_at: self.synced_at,
        })
    }
}

/// Stored shape of the macro-targets column: macro name → target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTargetsRecord(pub BTreeMap<String, MacroTarget>);

impl MacroTargetsRecord {
    /// Flatten targets into the stored map
    #[must_use]
    pub fn from_targets(targets: &MacroTargets) -> Self {
        let map = Macro::ALL
            .into_iter()
            .map(|m| (m.as_str().to_owned(), targets.get(m)))
            .collect();
        Self(map)
    }

    /// Rebuild the domain targets; macros missing from the map keep their
    /// defaults, unknown keys are a schema mismatch.
    ///
    /// # Errors
    ///
    /// `AppError::SchemaMismatch` when the map carries a key that is not a
    /// macro name.
    pub fn into_targets(self) -> AppResult<MacroTargets> {
        let mut targets = MacroTargets::default();
        for (key, value) in self.0 {
            let Some(m) = Macro::parse(&key) else {
                return Err(AppError::schema(format!("unknown macro name {key:?}")));
            };
            match m {
                Macro::Calories => targets.calories = value,
                Macro::Protein => targets.protein = value,
                Macro::Fat => targets.fat = value,
                Macro::Carbs => targets.carbs = value,
                Macro::Fiber => targets.fiber = value,
            }
        }
        Ok(targets)
    }
}

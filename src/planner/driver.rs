// ABOUTME: Tiered solver driver producing up to N distinct plans per call
// ABOUTME: Handles active-slot selection, relaxation fallback, and reuse tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::backend::MilpBackend;
use super::builder::{build_model, eligible_slots, PlanModel, PlanRequest, SolverTier};
use super::summary::plan_summary;
use crate::config::SolverConfig;
use crate::errors::AppError;
use crate::models::{DayPlan, MealAssignment, MealPlan, MealSlot, Preferences, Recipe};

/// Outcome of one generation call. A missing slot yields an empty plan list
/// plus a warning rather than an error; individual infeasible plans are
/// skipped silently (logged at warn).
#[derive(Debug)]
pub struct GenerationResult {
    pub plans: Vec<MealPlan>,
    pub warning: Option<AppError>,
}

/// Slots to fill, derived from preferences: the selected set intersected
/// with the valid slots (defaulting to breakfast/lunch/dinner when empty),
/// plus snack when enabled, in slot display order.
#[must_use]
pub fn active_slots(preferences: &Preferences) -> Vec<MealSlot> {
    let mut slots: Vec<MealSlot> = MealSlot::ALL
        .into_iter()
        .filter(|s| preferences.selected_slots.contains(s))
        .collect();
    if slots.is_empty() {
        slots = vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
    }
    if preferences.include_snacks && !slots.contains(&MealSlot::Snack) {
        slots.push(MealSlot::Snack);
        slots.sort();
    }
    slots
}

/// Generate up to `config.plan_count` plans.
///
/// Plans are produced strictly in index order; plan i+1's reuse-penalty set
/// contains every recipe chosen by plans 0..=i. Each plan descends through
/// the relaxation tiers until one solves; a plan infeasible at every tier
/// is skipped.
#[must_use]
pub fn generate_plans(
    recipes: &[Recipe],
    preferences: &Preferences,
    config: &SolverConfig,
    backend: &dyn MilpBackend,
) -> GenerationResult {
    let slots = active_slots(preferences);
    let num_days = preferences.num_days.clamp(1, 7) as usize;

    // Exactly-one-per-slot cannot hold if some slot has no eligible recipe
    for &slot in &slots {
        let has_candidate = recipes
            .iter()
            .any(|r| eligible_slots(r, &slots, preferences.combine_lunch_dinner).contains(&slot));
        if !has_candidate {
            warn!(slot = slot.as_str(), "no recipes available for active slot");
            return GenerationResult {
                plans: Vec::new(),
                warning: Some(AppError::EmptyCategory { slot }),
            };
        }
    }

    let tiers: &[SolverTier] = if preferences.prefer_similar_ingredients {
        &[
            SolverTier::Full,
            SolverTier::NoProteinCap,
            SolverTier::SoftOnly,
        ]
    } else {
        &[SolverTier::Full, SolverTier::SoftOnly]
    };

    let mut plans: Vec<MealPlan> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for index in 0..config.plan_count {
        let request = PlanRequest {
            recipes,
            targets: &preferences.macro_targets,
            preferences,
            active_slots: &slots,
            num_days,
            used_ids: &used,
        };

        let Some((model, solution)) = solve_tiered(&request, config, backend, tiers, index)
        else {
            continue;
        };

        let plan = extract_plan(index, num_days, recipes, &model, &solution);
        for id in plan.recipe_ids() {
            used.insert(id.to_owned());
        }
        info!(label = %plan.label, days = num_days, "plan generated");
        plans.push(plan);
    }

    GenerationResult {
        plans,
        warning: None,
    }
}

/// Descend through the tiers until one solves
fn solve_tiered(
    request: &PlanRequest<'_>,
    config: &SolverConfig,
    backend: &dyn MilpBackend,
    tiers: &[SolverTier],
    index: usize,
) -> Option<(PlanModel, super::backend::MilpSolution)> {
    for &tier in tiers {
        let model = build_model(request, config, tier);
        debug!(
            plan = index,
            ?tier,
            vars = model.spec.var_count(),
            constraints = model.spec.constraints.len(),
            "solving plan model"
        );
        match backend.solve(&model.spec, config.time_limit) {
            Ok(solution) => return Some((model, solution)),
            Err(AppError::InfeasibleModel) => {
                warn!(plan = index, ?tier, "model infeasible, relaxing");
            }
            Err(err) => {
                warn!(plan = index, ?tier, error = %err, "solver backend failed");
            }
        }
    }
    warn!(plan = index, "plan skipped: infeasible at every tier");
    None
}

/// Read the chosen assignments out of a solution and assemble the plan
fn extract_plan(
    index: usize,
    num_days: usize,
    recipes: &[Recipe],
    model: &PlanModel,
    solution: &super::backend::MilpSolution,
) -> MealPlan {
    let mut days: Vec<DayPlan> = Vec::with_capacity(num_days);
    for day in 0..num_days {
        let meals: Vec<MealAssignment> = model
            .assignments
            .iter()
            .filter(|a| a.day == day && solution.is_set(a.var))
            .map(|a| MealAssignment {
                slot: a.slot,
                recipe: recipes[a.recipe].clone(),
            })
            .collect();
        days.push(DayPlan::from_meals(format!("Day {}", day + 1), meals));
    }

    let summary = plan_summary(&days);
    MealPlan::new(format!("Plan {}", index + 1), days, summary)
}

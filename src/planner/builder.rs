// ABOUTME: Translates recipes, targets, and preferences into a MILP ProblemSpec
// ABOUTME: Implements slot eligibility, block grouping, macro bounds, and the weighted objective
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::problem::{ProblemSpec, Sense, VarId};
use super::protein::{detect_proteins, ProteinKind};
use crate::config::SolverConfig;
use crate::models::{Macro, MacroTargets, MealSlot, Preferences, Recipe};

/// Relaxation tiers, strictest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverTier {
    /// Hard macro bounds and the protein-variety cap
    Full,
    /// Hard macro bounds only
    NoProteinCap,
    /// Soft penalties alone
    SoftOnly,
}

impl SolverTier {
    /// Whether hard daily macro bounds are emitted at this tier
    #[must_use]
    pub const fn hard_bounds(self) -> bool {
        !matches!(self, Self::SoftOnly)
    }

    /// Whether the protein-type cap is emitted at this tier
    #[must_use]
    pub const fn protein_cap(self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Inputs for one model build
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    pub recipes: &'a [Recipe],
    pub targets: &'a MacroTargets,
    pub preferences: &'a Preferences,
    /// Slots to fill each day, in slot order
    pub active_slots: &'a [MealSlot],
    /// Days in the plan, already clamped to [1, 7]
    pub num_days: usize,
    /// Recipe ids chosen by earlier plans in this generation call
    pub used_ids: &'a HashSet<String>,
}

/// One assignment variable with its meaning
#[derive(Debug, Clone, Copy)]
pub struct AssignmentVar {
    pub var: VarId,
    /// Index into the request's recipe slice
    pub recipe: usize,
    pub day: usize,
    pub slot: MealSlot,
}

/// The built model plus the variable meanings the driver needs to read a
/// solution back out
#[derive(Debug, Clone)]
pub struct PlanModel {
    pub spec: ProblemSpec,
    pub assignments: Vec<AssignmentVar>,
}

/// Slots a recipe may occupy. Normally only its own category; with
/// combine-lunch-dinner enabled, lunch and dinner recipes widen to both.
#[must_use]
pub fn eligible_slots(
    recipe: &Recipe,
    active_slots: &[MealSlot],
    combine_lunch_dinner: bool,
) -> Vec<MealSlot> {
    let widened = combine_lunch_dinner
        && matches!(recipe.category, MealSlot::Lunch | MealSlot::Dinner);
    active_slots
        .iter()
        .copied()
        .filter(|&slot| {
            if widened {
                matches!(slot, MealSlot::Lunch | MealSlot::Dinner)
            } else {
                slot == recipe.category
            }
        })
        .collect()
}

/// Days grouped into contiguous blocks of
/// `min(first recipe's frequency limit, num_days)`. Assignments are forced
/// equal across each block, which is what makes leftovers land on
/// consecutive days.
#[must_use]
pub fn block_partition(recipes: &[Recipe], num_days: usize) -> Vec<Vec<usize>> {
    let first_frequency = recipes
        .first()
        .map_or(1, |r| r.frequency_limit.max(1) as usize);
    let block_size = first_frequency.min(num_days).max(1);
    (0..num_days)
        .collect::<Vec<_>>()
        .chunks(block_size)
        .map(<[usize]>::to_vec)
        .collect()
}

/// Build the MILP for one plan at one relaxation tier.
#[must_use]
pub fn build_model(request: &PlanRequest<'_>, config: &SolverConfig, tier: SolverTier) -> PlanModel {
    let prefs = request.preferences;
    let combine = prefs.combine_lunch_dinner;
    let mut spec = ProblemSpec::default();
    let mut assignments: Vec<AssignmentVar> = Vec::new();
    let mut lookup: HashMap<(usize, usize, MealSlot), VarId> = HashMap::new();

    // Decision variables: one binary per feasible (recipe, day, slot)
    for (recipe_idx, recipe) in request.recipes.iter().enumerate() {
        for slot in eligible_slots(recipe, request.active_slots, combine) {
            for day in 0..request.num_days {
                let var = spec.add_binary(format!("x_{recipe_idx}_{day}_{}", slot.as_str()));
                lookup.insert((recipe_idx, day, slot), var);
                assignments.push(AssignmentVar {
                    var,
                    recipe: recipe_idx,
                    day,
                    slot,
                });
            }
        }
    }

    // 1. Exactly one recipe per (day, slot)
    for day in 0..request.num_days {
        for &slot in request.active_slots {
            let terms: Vec<(VarId, f64)> = assignments
                .iter()
                .filter(|a| a.day == day && a.slot == slot)
                .map(|a| (a.var, 1.0))
                .collect();
            spec.constrain(terms, Sense::Eq, 1.0);
        }
    }

    // 2. Frequency limit per recipe
    for (recipe_idx, recipe) in request.recipes.iter().enumerate() {
        let terms: Vec<(VarId, f64)> = assignments
            .iter()
            .filter(|a| a.recipe == recipe_idx)
            .map(|a| (a.var, 1.0))
            .collect();
        if !terms.is_empty() {
            spec.constrain(terms, Sense::Le, f64::from(recipe.frequency_limit));
        }
    }

    // 3. Block grouping: assignments equal across each block
    for block in block_partition(request.recipes, request.num_days) {
        let first = block[0];
        for &day in &block[1..] {
            for a in &assignments {
                if a.day != day {
                    continue;
                }
                let anchor = lookup[&(a.recipe, first, a.slot)];
                spec.constrain(vec![(a.var, 1.0), (anchor, -1.0)], Sense::Eq, 0.0);
            }
        }
    }

    // 4. Combined-slot consistency: a dual-eligible recipe commits to lunch
    //    or dinner for the whole plan
    let lunch_active = request.active_slots.contains(&MealSlot::Lunch);
    let dinner_active = request.active_slots.contains(&MealSlot::Dinner);
    if combine && lunch_active && dinner_active {
        for (recipe_idx, recipe) in request.recipes.iter().enumerate() {
            if !matches!(recipe.category, MealSlot::Lunch | MealSlot::Dinner) {
                continue;
            }
            let choice = spec.add_binary(format!("slot_choice_{recipe_idx}"));
            for day in 0..request.num_days {
                if let Some(&lunch) = lookup.get(&(recipe_idx, day, MealSlot::Lunch)) {
                    spec.constrain(vec![(lunch, 1.0), (choice, -1.0)], Sense::Le, 0.0);
                }
                if let Some(&dinner) = lookup.get(&(recipe_idx, day, MealSlot::Dinner)) {
                    spec.constrain(vec![(dinner, 1.0), (choice, 1.0)], Sense::Le, 1.0);
                }
            }
        }
    }

    // 5-7. Daily macro bounds, directional caps, deviation decomposition
    for (macro_kind, target) in request.targets.enabled() {
        let rank = prefs.priority_rank(macro_kind);
        let weight = SolverConfig::deviation_weight(rank);
        let max_dev = config.max_deviation(macro_kind, rank);

        for day in 0..request.num_days {
            let day_terms: Vec<(VarId, f64)> = assignments
                .iter()
                .filter(|a| a.day == day)
                .filter_map(|a| {
                    let value = request.recipes[a.recipe].macros.get(macro_kind);
                    (value != 0.0).then_some((a.var, value))
                })
                .collect();

            if tier.hard_bounds() {
                spec.constrain(day_terms.clone(), Sense::Le, target + max_dev);
                spec.constrain(day_terms.clone(), Sense::Ge, target - max_dev);
            }

            // daily_sum - target = dev_plus - dev_minus
            let dev_plus =
                spec.add_continuous(format!("dev_plus_{}_{day}", macro_kind.as_str()));
            let dev_minus =
                spec.add_continuous(format!("dev_minus_{}_{day}", macro_kind.as_str()));
            let mut balance = day_terms.clone();
            balance.push((dev_plus, -1.0));
            balance.push((dev_minus, 1.0));
            spec.constrain(balance, Sense::Eq, target);
            spec.penalize(dev_plus, weight / target);
            spec.penalize(dev_minus, weight / target);

            // directional cap: calories/fat/carbs prefer staying under the
            // target, protein/fiber prefer staying over it
            let cap_slack =
                spec.add_continuous(format!("cap_slack_{}_{day}", macro_kind.as_str()));
            let mut capped = day_terms;
            match macro_kind {
                Macro::Calories | Macro::Fat | Macro::Carbs => {
                    capped.push((cap_slack, -1.0));
                    spec.constrain(capped, Sense::Le, target);
                }
                Macro::Protein | Macro::Fiber => {
                    capped.push((cap_slack, 1.0));
                    spec.constrain(capped, Sense::Ge, target);
                }
            }
            spec.penalize(cap_slack, config.cap_penalty / target);
        }
    }

    // Reuse and rating nudges
    for assignment in &assignments {
        let recipe = &request.recipes[assignment.recipe];
        if request.used_ids.contains(&recipe.id) {
            spec.penalize(assignment.var, config.reuse_penalty);
        }
        let rating = recipe.rating.unwrap_or(5.0);
        spec.penalize(
            assignment.var,
            config.rating_weight * (5.0 - rating) / 5.0,
        );
    }

    // 8. Protein-variety indicators
    if prefs.prefer_similar_ingredients {
        let proteins_per_recipe: Vec<BTreeSet<ProteinKind>> =
            request.recipes.iter().map(detect_proteins).collect();
        let mut indicator: BTreeMap<ProteinKind, VarId> = BTreeMap::new();
        for kinds in &proteins_per_recipe {
            for &kind in kinds {
                indicator
                    .entry(kind)
                    .or_insert_with(|| spec.add_binary(format!("use_prot_{kind:?}")));
            }
        }
        for assignment in &assignments {
            for &kind in &proteins_per_recipe[assignment.recipe] {
                let use_prot = indicator[&kind];
                spec.constrain(
                    vec![(assignment.var, 1.0), (use_prot, -1.0)],
                    Sense::Le,
                    0.0,
                );
            }
        }
        for &use_prot in indicator.values() {
            spec.penalize(use_prot, config.protein_variety_penalty);
        }
        if tier.protein_cap() && !indicator.is_empty() {
            let terms: Vec<(VarId, f64)> =
                indicator.values().map(|&v| (v, 1.0)).collect();
            spec.constrain(terms, Sense::Le, f64::from(config.max_protein_types));
        }
    }

    PlanModel { spec, assignments }
}

// ABOUTME: In-plan single-slot replacement preserving block consistency
// ABOUTME: Picks a fresh recipe near the old one's macros and swaps every block occurrence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::collections::HashSet;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::summary::plan_summary;
use crate::models::{DayPlan, MealPlan, MealSlot, Recipe};

/// Tolerance window for the random candidate pool
const CALORIE_TOLERANCE: f64 = 100.0;
const PROTEIN_TOLERANCE: f64 = 10.0;
const FAT_TOLERANCE: f64 = 10.0;
const CARB_TOLERANCE: f64 = 10.0;

/// Replace the meal at `(day_index, slot)` with a fresh recipe.
///
/// Candidates share the slot's category and do not already appear in the
/// plan. When any candidate lies within the macro tolerance window of the
/// outgoing recipe, one is picked uniformly at random; otherwise the
/// candidate with the smallest normalized squared macro drift wins. The
/// replacement is applied at every day where the outgoing recipe filled
/// this slot, so block grouping survives the swap. Day totals and the plan
/// summary are recomputed.
///
/// Returns `None` when the slot is empty or no candidate exists. The input
/// plan is never mutated; callers swap in the returned value atomically.
#[must_use]
pub fn reroll_meal<R: Rng + ?Sized>(
    plan: &MealPlan,
    day_index: usize,
    slot: MealSlot,
    recipes: &[Recipe],
    rng: &mut R,
) -> Option<(MealPlan, Recipe)> {
    let outgoing = plan.days.get(day_index)?.meal_at(slot)?.recipe.clone();

    let used: HashSet<&str> = plan.recipe_ids().collect();
    let candidates: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| r.category == slot && !used.contains(r.id.as_str()))
        .collect();
    if candidates.is_empty() {
        debug!(slot = slot.as_str(), "reroll found no candidates");
        return None;
    }

    let within_tolerance: Vec<&Recipe> = candidates
        .iter()
        .copied()
        .filter(|c| {
            (c.macros.calories - outgoing.macros.calories).abs() <= CALORIE_TOLERANCE
                && (c.macros.protein - outgoing.macros.protein).abs() <= PROTEIN_TOLERANCE
                && (c.macros.fat - outgoing.macros.fat).abs() <= FAT_TOLERANCE
                && (c.macros.carbs - outgoing.macros.carbs).abs() <= CARB_TOLERANCE
        })
        .collect();

    let chosen: &Recipe = if within_tolerance.is_empty() {
        candidates
            .iter()
            .copied()
            .min_by(|a, b| {
                macro_drift(a, &outgoing)
                    .partial_cmp(&macro_drift(b, &outgoing))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?
    } else {
        within_tolerance.choose(rng).copied()?
    };

    let mut updated = plan.clone();
    for day in &mut updated.days {
        let meals: Vec<_> = day
            .meals
            .iter()
            .map(|m| {
                let mut meal = m.clone();
                if meal.slot == slot && meal.recipe.id == outgoing.id {
                    meal.recipe = chosen.clone();
                }
                meal
            })
            .collect();
        *day = DayPlan::from_meals(day.label.clone(), meals);
    }
    updated.macro_summary = plan_summary(&updated.days);
    updated.updated_at = Utc::now();

    Some((updated, chosen.clone()))
}

/// Normalized squared macro drift between a candidate and the outgoing
/// recipe over calories, protein, fat, and carbs
fn macro_drift(candidate: &Recipe, outgoing: &Recipe) -> f64 {
    let term = |new: f64, old: f64| {
        let delta = (new - old) / old.max(1.0);
        delta * delta
    };
    term(candidate.macros.calories, outgoing.macros.calories)
        + term(candidate.macros.protein, outgoing.macros.protein)
        + term(candidate.macros.fat, outgoing.macros.fat)
        + term(candidate.macros.carbs, outgoing.macros.carbs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MacroSummary, Macros, MealAssignment};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dinner(name: &str, calories: f64) -> Recipe {
        Recipe::new(name, MealSlot::Dinner)
            .with_macros(Macros::new(calories, 40.0, 20.0, 50.0, 5.0))
    }

    fn one_day_plan(recipe: &Recipe) -> MealPlan {
        MealPlan::new(
            "Plan 1",
            vec![DayPlan::from_meals(
                "Day 1",
                vec![MealAssignment {
                    slot: MealSlot::Dinner,
                    recipe: recipe.clone(),
                }],
            )],
            MacroSummary::default(),
        )
    }

    #[test]
    fn empty_slot_returns_none() {
        let current = dinner("Current", 600.0);
        let plan = one_day_plan(&current);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(reroll_meal(&plan, 0, MealSlot::Lunch, &[], &mut rng).is_none());
    }

    #[test]
    fn no_candidates_returns_none() {
        let current = dinner("Current", 600.0);
        let plan = one_day_plan(&current);
        let pool = vec![current.clone()];
        let mut rng = StdRng::seed_from_u64(7);
        assert!(reroll_meal(&plan, 0, MealSlot::Dinner, &pool, &mut rng).is_none());
    }

    #[test]
    fn falls_back_to_closest_when_nothing_in_tolerance() {
        let current = dinner("Current", 600.0);
        let plan = one_day_plan(&current);
        let far = dinner("Far", 1200.0);
        let near = dinner("Near", 750.0);
        let pool = vec![current.clone(), far, near];

        let mut rng = StdRng::seed_from_u64(7);
        let (_, chosen) = reroll_meal(&plan, 0, MealSlot::Dinner, &pool, &mut rng).unwrap();
        assert_eq!(chosen.name, "Near");
    }

    #[test]
    fn summary_is_recomputed() {
        let current = dinner("Current", 600.0);
        let plan = one_day_plan(&current);
        let replacement = dinner("Swap", 650.0);
        let pool = vec![replacement];

        let mut rng = StdRng::seed_from_u64(7);
        let (updated, chosen) =
            reroll_meal(&plan, 0, MealSlot::Dinner, &pool, &mut rng).unwrap();
        assert_eq!(chosen.name, "Swap");
        assert!((updated.days[0].total_calories - 650.0).abs() < f64::EPSILON);
        assert!((updated.macro_summary.calories - 650.0).abs() < f64::EPSILON);
    }
}

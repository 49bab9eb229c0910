// ABOUTME: End-to-end plan generation tests through the real MILP backend
// ABOUTME: Covers layout invariants, macro bounds, tier fallback, and failure paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::time::Duration;

use platewise_core::config::SolverConfig;
use platewise_core::errors::{AppError, AppResult};
use platewise_core::models::{
    MacroTarget, MacroTargets, Macros, MealPlan, MealSlot, Preferences, Recipe,
};
use platewise_core::planner::{
    generate_plans, GoodLpBackend, MilpBackend, MilpSolution, ProblemSpec,
};

fn recipe(name: &str, slot: MealSlot, macros: Macros) -> Recipe {
    Recipe::new(name, slot).with_macros(macros)
}

/// Three recipes per main slot, all within easy reach of 1500 kcal / 80 g
fn library() -> Vec<Recipe> {
    vec![
        recipe("Oats", MealSlot::Breakfast, Macros::new(300.0, 20.0, 10.0, 30.0, 6.0)),
        recipe("Pancakes", MealSlot::Breakfast, Macros::new(400.0, 25.0, 15.0, 40.0, 4.0)),
        recipe("Scramble", MealSlot::Breakfast, Macros::new(350.0, 22.0, 12.0, 35.0, 3.0)),
        recipe("Wrap", MealSlot::Lunch, Macros::new(500.0, 30.0, 16.0, 48.0, 5.0)),
        recipe("Grain Bowl", MealSlot::Lunch, Macros::new(480.0, 28.0, 14.0, 52.0, 7.0)),
        recipe("Bento", MealSlot::Lunch, Macros::new(520.0, 32.0, 18.0, 46.0, 4.0)),
        recipe("Chili", MealSlot::Dinner, Macros::new(600.0, 40.0, 20.0, 55.0, 9.0)),
        recipe("Salmon Plate", MealSlot::Dinner, Macros::new(640.0, 44.0, 24.0, 50.0, 5.0)),
        recipe("Stir Fry", MealSlot::Dinner, Macros::new(580.0, 38.0, 18.0, 58.0, 6.0)),
    ]
}

fn preferences(num_days: u32) -> Preferences {
    Preferences {
        macro_targets: MacroTargets {
            calories: MacroTarget::new(true, 1500.0),
            protein: MacroTarget::new(true, 80.0),
            fat: MacroTarget::new(false, 0.0),
            carbs: MacroTarget::new(false, 0.0),
            fiber: MacroTarget::new(false, 0.0),
        },
        num_days,
        ..Preferences::default()
    }
}

fn frequency_counts(plan: &MealPlan) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for id in plan.recipe_ids() {
        *counts.entry(id.to_owned()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_two_day_generation_hits_calorie_window() {
    let result = generate_plans(
        &library(),
        &preferences(2),
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );

    assert!(result.warning.is_none());
    assert!(!result.plans.is_empty());

    for plan in &result.plans {
        assert_eq!(plan.days.len(), 2);
        for day in &plan.days {
            // calories 1500 at rank 1: hard window ±200
            assert!(
                (1300.0..=1700.0).contains(&day.total_calories),
                "day calories {} outside window",
                day.total_calories
            );
        }
        for (_, count) in frequency_counts(plan) {
            assert!(count <= 3);
        }
    }
}

#[test]
fn test_every_day_fills_every_active_slot_once() {
    let result = generate_plans(
        &library(),
        &preferences(3),
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );

    for plan in &result.plans {
        for day in &plan.days {
            let slots: Vec<MealSlot> = day.meals.iter().map(|m| m.slot).collect();
            let mut deduped = slots.clone();
            deduped.dedup();
            assert_eq!(slots.len(), 3, "one meal per active slot");
            assert_eq!(slots, deduped, "no duplicate slots in a day");
            assert_eq!(
                slots,
                vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]
            );
        }
    }
}

#[test]
fn test_blocks_share_assignments_across_days() {
    // first recipe frequency 3, two days: one block, both days identical
    let result = generate_plans(
        &library(),
        &preferences(2),
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );

    for plan in &result.plans {
        let first: Vec<(MealSlot, &str)> = plan.days[0]
            .meals
            .iter()
            .map(|m| (m.slot, m.recipe.id.as_str()))
            .collect();
        let second: Vec<(MealSlot, &str)> = plan.days[1]
            .meals
            .iter()
            .map(|m| (m.slot, m.recipe.id.as_str()))
            .collect();
        assert_eq!(first, second);
    }
}

#[test]
fn test_plan_labels_are_sequential() {
    let result = generate_plans(
        &library(),
        &preferences(2),
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );

    let labels: Vec<&str> = result.plans.iter().map(|p| p.label.as_str()).collect();
    let expected: Vec<String> = (1..=labels.len()).map(|i| format!("Plan {i}")).collect();
    assert_eq!(labels, expected);
}

#[test]
fn test_combined_lunch_dinner_never_reuses_across_both_slots() {
    let recipes = vec![
        recipe("Wrap", MealSlot::Lunch, Macros::new(500.0, 30.0, 16.0, 48.0, 5.0)),
        recipe("Grain Bowl", MealSlot::Lunch, Macros::new(480.0, 28.0, 14.0, 52.0, 7.0)),
        recipe("Chili", MealSlot::Dinner, Macros::new(520.0, 32.0, 18.0, 46.0, 4.0)),
        recipe("Stir Fry", MealSlot::Dinner, Macros::new(490.0, 29.0, 15.0, 50.0, 6.0)),
    ];
    let prefs = Preferences {
        macro_targets: MacroTargets {
            calories: MacroTarget::new(true, 1000.0),
            protein: MacroTarget::new(true, 60.0),
            fat: MacroTarget::new(false, 0.0),
            carbs: MacroTarget::new(false, 0.0),
            fiber: MacroTarget::new(false, 0.0),
        },
        num_days: 2,
        combine_lunch_dinner: true,
        selected_slots: vec![MealSlot::Lunch, MealSlot::Dinner],
        ..Preferences::default()
    };

    let result = generate_plans(
        &recipes,
        &prefs,
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );
    assert!(!result.plans.is_empty());

    for plan in &result.plans {
        let mut lunch_ids = Vec::new();
        let mut dinner_ids = Vec::new();
        for day in &plan.days {
            for meal in &day.meals {
                match meal.slot {
                    MealSlot::Lunch => lunch_ids.push(meal.recipe.id.clone()),
                    MealSlot::Dinner => dinner_ids.push(meal.recipe.id.clone()),
                    _ => {}
                }
            }
        }
        for id in &lunch_ids {
            assert!(!dinner_ids.contains(id), "recipe {id} in both slots");
        }
    }
}

#[test]
fn test_tier_fallback_relaxes_hard_bounds() {
    // a single 300 kcal breakfast against a 1000 kcal target: the hard
    // window [800, 1200] is unreachable, the soft tier still assigns
    let recipes = vec![recipe(
        "Oats",
        MealSlot::Breakfast,
        Macros::new(300.0, 20.0, 10.0, 30.0, 6.0),
    )];
    let prefs = Preferences {
        macro_targets: MacroTargets {
            calories: MacroTarget::new(true, 1000.0),
            protein: MacroTarget::new(false, 0.0),
            fat: MacroTarget::new(false, 0.0),
            carbs: MacroTarget::new(false, 0.0),
            fiber: MacroTarget::new(false, 0.0),
        },
        num_days: 1,
        selected_slots: vec![MealSlot::Breakfast],
        ..Preferences::default()
    };

    let result = generate_plans(
        &recipes,
        &prefs,
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );

    assert!(!result.plans.is_empty());
    assert_eq!(result.plans[0].days[0].meals[0].recipe.name, "Oats");
}

#[test]
fn test_empty_slot_returns_warning_and_no_plans() {
    // library without any dinner recipe
    let recipes: Vec<Recipe> = library()
        .into_iter()
        .filter(|r| r.category != MealSlot::Dinner)
        .collect();

    let result = generate_plans(
        &recipes,
        &preferences(2),
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );

    assert!(result.plans.is_empty());
    assert!(matches!(
        result.warning,
        Some(AppError::EmptyCategory {
            slot: MealSlot::Dinner
        })
    ));
}

/// Backend that always faults, for the skip-on-failure path
struct BrokenBackend;

impl MilpBackend for BrokenBackend {
    fn solve(&self, _spec: &ProblemSpec, _time_limit: Duration) -> AppResult<MilpSolution> {
        Err(AppError::solver("backend unavailable"))
    }
}

#[test]
fn test_backend_failure_skips_plans_without_warning() {
    let result = generate_plans(
        &library(),
        &preferences(2),
        &SolverConfig::default(),
        &BrokenBackend,
    );

    assert!(result.plans.is_empty());
    assert!(result.warning.is_none());
}

#[test]
fn test_num_days_is_clamped() {
    let result = generate_plans(
        &library(),
        &preferences(12),
        &SolverConfig::default(),
        &GoodLpBackend::new(),
    );

    for plan in &result.plans {
        assert_eq!(plan.days.len(), 7);
    }
}

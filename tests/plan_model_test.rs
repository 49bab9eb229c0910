// ABOUTME: Structural tests for the LP problem builder
// ABOUTME: Asserts constraint shapes, tier differences, and objective weights on the pure spec
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use platewise_core::config::SolverConfig;
use platewise_core::models::{
    MacroTarget, MacroTargets, Macros, MealSlot, Preferences, Recipe,
};
use platewise_core::planner::{build_model, PlanRequest, Sense, SolverTier};

fn recipe(name: &str, slot: MealSlot, calories: f64, protein: f64) -> Recipe {
    Recipe::new(name, slot).with_macros(Macros::new(calories, protein, 10.0, 30.0, 5.0))
}

fn targets(calories: f64, protein: f64) -> MacroTargets {
    MacroTargets {
        calories: MacroTarget::new(true, calories),
        protein: MacroTarget::new(true, protein),
        fat: MacroTarget::new(false, 0.0),
        carbs: MacroTarget::new(false, 0.0),
        fiber: MacroTarget::new(false, 0.0),
    }
}

fn basic_recipes() -> Vec<Recipe> {
    vec![
        recipe("Oats", MealSlot::Breakfast, 300.0, 20.0),
        recipe("Toast", MealSlot::Breakfast, 400.0, 25.0),
        recipe("Wrap", MealSlot::Lunch, 500.0, 30.0),
        recipe("Soup", MealSlot::Lunch, 450.0, 28.0),
        recipe("Chili", MealSlot::Dinner, 600.0, 40.0),
        recipe("Salmon", MealSlot::Dinner, 650.0, 45.0),
    ]
}

const SLOTS: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

#[test]
fn test_exactly_one_constraint_per_day_and_slot() {
    let recipes = basic_recipes();
    let prefs = Preferences::default();
    let t = targets(1500.0, 80.0);
    let used = HashSet::new();
    let request = PlanRequest {
        recipes: &recipes,
        targets: &t,
        preferences: &prefs,
        active_slots: &SLOTS,
        num_days: 3,
        used_ids: &used,
    };

    let model = build_model(&request, &SolverConfig::default(), SolverTier::Full);

    let exactly_one = model
        .spec
        .constraints
        .iter()
        .filter(|c| {
            c.sense == Sense::Eq
                && (c.rhs - 1.0).abs() < f64::EPSILON
                && c.terms.iter().all(|(_, coef)| (coef - 1.0).abs() < f64::EPSILON)
        })
        .count();
    assert_eq!(exactly_one, 3 * SLOTS.len());
}

#[test]
fn test_frequency_constraint_per_recipe() {
    let recipes = vec![
        recipe("Oats", MealSlot::Breakfast, 300.0, 20.0).with_frequency_limit(2),
        recipe("Toast", MealSlot::Breakfast, 400.0, 25.0),
    ];
    let prefs = Preferences::default();
    let t = targets(400.0, 25.0);
    let used = HashSet::new();
    let request = PlanRequest {
        recipes: &recipes,
        targets: &t,
        preferences: &prefs,
        active_slots: &[MealSlot::Breakfast],
        num_days: 4,
        used_ids: &used,
    };

    let model = build_model(&request, &SolverConfig::default(), SolverTier::Full);

    // one ≤ freq constraint per recipe covering all of its 4 day-vars
    let freq_rhs: Vec<f64> = model
        .spec
        .constraints
        .iter()
        .filter(|c| c.sense == Sense::Le && c.terms.len() == 4)
        .map(|c| c.rhs)
        .collect();
    assert!(freq_rhs.contains(&2.0));
    assert!(freq_rhs.contains(&3.0));
}

#[test]
fn test_block_grouping_ties_days_together() {
    // first recipe frequency 2 over 4 days: blocks {0,1} and {2,3}
    let recipes = vec![recipe("Chili", MealSlot::Dinner, 600.0, 40.0).with_frequency_limit(2)];
    let prefs = Preferences::default();
    let t = targets(600.0, 40.0);
    let used = HashSet::new();
    let request = PlanRequest {
        recipes: &recipes,
        targets: &t,
        preferences: &prefs,
        active_slots: &[MealSlot::Dinner],
        num_days: 4,
        used_ids: &used,
    };

    let model = build_model(&request, &SolverConfig::default(), SolverTier::Full);

    // x[r,1,s] = x[r,0,s] and x[r,3,s] = x[r,2,s]: two pairwise equalities
    let pair_equalities = model
        .spec
        .constraints
        .iter()
        .filter(|c| {
            c.sense == Sense::Eq && c.rhs.abs() < f64::EPSILON && c.terms.len() == 2
        })
        .count();
    assert_eq!(pair_equalities, 2);
}

#[test]
fn test_combined_slot_widens_eligibility_and_adds_choice() {
    let recipes = vec![
        recipe("Wrap", MealSlot::Lunch, 500.0, 30.0),
        recipe("Oats", MealSlot::Breakfast, 300.0, 20.0),
    ];
    let prefs = Preferences {
        combine_lunch_dinner: true,
        ..Preferences::default()
    };
    let t = targets(1400.0, 80.0);
    let used = HashSet::new();
    let request = PlanRequest {
        recipes: &recipes,
        targets: &t,
        preferences: &prefs,
        active_slots: &SLOTS,
        num_days: 2,
        used_ids: &used,
    };

    let model = build_model(&request, &SolverConfig::default(), SolverTier::Full);

    // the lunch recipe gets vars in both lunch and dinner slots
    let wrap_slots: HashSet<MealSlot> = model
        .assignments
        .iter()
        .filter(|a| a.recipe == 0)
        .map(|a| a.slot)
        .collect();
    assert!(wrap_slots.contains(&MealSlot::Lunch));
    assert!(wrap_slots.contains(&MealSlot::Dinner));

    // the breakfast recipe does not widen
    let oats_slots: HashSet<MealSlot> = model
        .assignments
        .iter()
        .filter(|a| a.recipe == 1)
        .map(|a| a.slot)
        .collect();
    assert_eq!(oats_slots, HashSet::from([MealSlot::Breakfast]));
}

#[test]
fn test_hard_bounds_present_only_below_soft_tier() {
    let recipes = basic_recipes();
    let prefs = Preferences::default();
    let t = targets(1500.0, 80.0);
    let used = HashSet::new();
    let request = PlanRequest {
        recipes: &recipes,
        targets: &t,
        preferences: &prefs,
        active_slots: &SLOTS,
        num_days: 1,
        used_ids: &used,
    };
    let config = SolverConfig::default();

    let full = build_model(&request, &config, SolverTier::Full);
    let soft = build_model(&request, &config, SolverTier::SoftOnly);

    // calories at rank 1: hard ceiling 1500 + 200
    let has_cal_ceiling = |model: &platewise_core::planner::PlanModel| {
        model
            .spec
            .constraints
            .iter()
            .any(|c| c.sense == Sense::Le && (c.rhs - 1700.0).abs() < f64::EPSILON)
    };
    assert!(has_cal_ceiling(&full));
    assert!(!has_cal_ceiling(&soft));

    // protein at rank 2: base 20 widened to 30, hard floor 80 - 30
    assert!(full
        .spec
        .constraints
        .iter()
        .any(|c| c.sense == Sense::Ge && (c.rhs - 50.0).abs() < f64::EPSILON));
}

#[test]
fn test_reuse_and_rating_objective_terms() {
    let reused = recipe("Chili", MealSlot::Dinner, 600.0, 40.0);
    let rated = recipe("Salmon", MealSlot::Dinner, 650.0, 45.0).with_rating(4.0);
    let reused_id = reused.id.clone();
    let recipes = vec![reused, rated];

    let prefs = Preferences::default();
    let t = targets(600.0, 40.0);
    let used = HashSet::from([reused_id]);
    let request = PlanRequest {
        recipes: &recipes,
        targets: &t,
        preferences: &prefs,
        active_slots: &[MealSlot::Dinner],
        num_days: 1,
        used_ids: &used,
    };

    let model = build_model(&request, &SolverConfig::default(), SolverTier::Full);

    let var_of = |recipe_idx: usize| {
        model
            .assignments
            .iter()
            .find(|a| a.recipe == recipe_idx)
            .unwrap()
            .var
    };

    // reused, unrated: flat 30
    assert!((model.spec.objective_coefficient(var_of(0)) - 30.0).abs() < 1e-9);
    // fresh, rated 4: 8 * (5-4)/5
    assert!((model.spec.objective_coefficient(var_of(1)) - 1.6).abs() < 1e-9);
}

#[test]
fn test_protein_cap_only_at_full_tier() {
    let recipes = vec![
        recipe("Chicken Bowl", MealSlot::Dinner, 600.0, 40.0)
            .with_ingredients(vec!["1 lb chicken breast".into()]),
        recipe("Beef Tacos", MealSlot::Dinner, 620.0, 42.0)
            .with_ingredients(vec!["1 lb ground beef".into()]),
        recipe("Salmon Plate", MealSlot::Dinner, 640.0, 44.0)
            .with_ingredients(vec!["2 salmon fillets".into()]),
    ];
    let prefs = Preferences {
        prefer_similar_ingredients: true,
        ..Preferences::default()
    };
    let t = targets(620.0, 42.0);
    let used = HashSet::new();
    let request = PlanRequest {
        recipes: &recipes,
        targets: &t,
        preferences: &prefs,
        active_slots: &[MealSlot::Dinner],
        num_days: 3,
        used_ids: &used,
    };
    let config = SolverConfig::default();

    let cap_constraint = |model: &platewise_core::planner::PlanModel| {
        model
            .spec
            .constraints
            .iter()
            .any(|c| c.sense == Sense::Le && (c.rhs - 2.0).abs() < f64::EPSILON && c.terms.len() == 3)
    };

    let full = build_model(&request, &config, SolverTier::Full);
    let relaxed = build_model(&request, &config, SolverTier::NoProteinCap);

    assert!(cap_constraint(&full));
    assert!(!cap_constraint(&relaxed));

    // indicator linkage: x - use_prot ≤ 0 exists for each protein recipe
    let linkage = full
        .spec
        .constraints
        .iter()
        .filter(|c| {
            c.sense == Sense::Le
                && c.rhs.abs() < f64::EPSILON
                && c.terms.len() == 2
                && c.terms.iter().any(|(_, coef)| (coef + 1.0).abs() < f64::EPSILON)
        })
        .count();
    // 3 recipes × 3 days, one protein each
    assert_eq!(linkage, 9);
}

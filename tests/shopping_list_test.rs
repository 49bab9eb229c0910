// ABOUTME: Integration tests for shopping-list aggregation and formatting
// ABOUTME: Covers scaling, merging, skip-list filtering, and traversal-order independence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]

use platewise_core::models::{
    DayPlan, IngredientCategory, MacroSummary, MealAssignment, MealPlan, MealSlot, Recipe,
};
use platewise_core::shopping::{aggregate, format_clipboard};

fn recipe(name: &str, slot: MealSlot, ingredients: &[&str]) -> Recipe {
    Recipe::new(name, slot)
        .with_ingredients(ingredients.iter().map(|s| (*s).to_string()).collect())
}

fn plan_from_days(days: Vec<DayPlan>) -> MealPlan {
    MealPlan::new("Plan 1", days, MacroSummary::default())
}

fn day(label: &str, recipes: Vec<Recipe>) -> DayPlan {
    DayPlan::from_meals(
        label,
        recipes
            .into_iter()
            .map(|r| MealAssignment {
                slot: r.category,
                recipe: r,
            })
            .collect(),
    )
}

#[test]
fn test_garlic_merges_and_water_is_skipped() {
    let lunch = recipe(
        "Stir Fry",
        MealSlot::Lunch,
        &["1 clove garlic, minced", "2 cups water"],
    );
    let dinner = recipe("Pasta", MealSlot::Dinner, &["1 clove garlic, minced"]);
    let plan = plan_from_days(vec![day("Day 1", vec![lunch, dinner])]);

    let items = aggregate(&plan);

    assert_eq!(items.len(), 1);
    let garlic = &items[0];
    assert_eq!(garlic.name, "garlic");
    assert!((garlic.quantity - 2.0).abs() < 1e-9);
    assert_eq!(garlic.unit, "clove");
    assert_eq!(garlic.category, IngredientCategory::Produce);
}

#[test]
fn test_salt_and_pepper_are_skipped() {
    let dinner = recipe(
        "Roast",
        MealSlot::Dinner,
        &["salt and pepper to taste", "1 lb potatoes", "cooking spray"],
    );
    let plan = plan_from_days(vec![day("Day 1", vec![dinner])]);

    let names: Vec<String> = aggregate(&plan).into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["potato"]);
}

#[test]
fn test_servings_scale_quantities() {
    let dinner = recipe("Batch Chili", MealSlot::Dinner, &["4 cups black beans"])
        .with_servings(4);
    let plan = plan_from_days(vec![
        day("Day 1", vec![dinner.clone()]),
        day("Day 2", vec![dinner]),
    ]);

    let items = aggregate(&plan);
    assert_eq!(items.len(), 1);
    // 4 cups / 4 servings, twice
    assert!((items[0].quantity - 2.0).abs() < 1e-9);
}

#[test]
fn test_aggregation_is_order_independent() {
    let a = recipe(
        "Breakfast",
        MealSlot::Breakfast,
        &["2 eggs", "1 cup spinach", "1 slice bread"],
    );
    let b = recipe(
        "Lunch",
        MealSlot::Lunch,
        &["1 cup spinach", "1/2 cup rice", "1 clove garlic"],
    );
    let c = recipe(
        "Dinner",
        MealSlot::Dinner,
        &["2 cloves garlic", "1 cup rice", "2 eggs"],
    );

    let forward = plan_from_days(vec![
        day("Day 1", vec![a.clone(), b.clone()]),
        day("Day 2", vec![c.clone()]),
    ]);
    let reversed = plan_from_days(vec![
        day("Day 2", vec![c]),
        day("Day 1", vec![b, a]),
    ]);

    let lhs: Vec<_> = aggregate(&forward)
        .into_iter()
        .map(|i| (i.name, i.quantity, i.unit, i.category))
        .collect();
    let rhs: Vec<_> = aggregate(&reversed)
        .into_iter()
        .map(|i| (i.name, i.quantity, i.unit, i.category))
        .collect();

    assert_eq!(lhs, rhs);
}

#[test]
fn test_category_upgrade_from_other() {
    // "xanthan gum" categorizes as other; a later specific hit must not be
    // downgraded, and an other-first merge upgrades
    let a = recipe("Bake A", MealSlot::Breakfast, &["1 tsp xanthan gum"]);
    let plan = plan_from_days(vec![day("Day 1", vec![a])]);
    let items = aggregate(&plan);
    assert_eq!(items[0].category, IngredientCategory::Other);
}

#[test]
fn test_items_sorted_alphabetically_with_rounded_quantities() {
    let dinner = recipe(
        "Dinner",
        MealSlot::Dinner,
        &["1 zucchini", "2 apples", "1 cup rice"],
    )
    .with_servings(3);
    let plan = plan_from_days(vec![day("Day 1", vec![dinner])]);

    let items = aggregate(&plan);
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["apple", "rice", "zucchini"]);
    assert!((items[0].quantity - 0.67).abs() < 1e-9);
    assert!((items[1].quantity - 0.33).abs() < 1e-9);
}

#[test]
fn test_clipboard_sections_and_lines() {
    let dinner = recipe(
        "Dinner",
        MealSlot::Dinner,
        &["2 cloves garlic", "1 1/2 cups flour", "1 cup milk"],
    );
    let plan = plan_from_days(vec![day("Day 1", vec![dinner])]);

    let text = format_clipboard(&aggregate(&plan));

    let dairy = text.find("--- DAIRY ---").unwrap();
    let grains = text.find("--- GRAINS ---").unwrap();
    let produce = text.find("--- PRODUCE ---").unwrap();
    assert!(dairy < grains && grains < produce);

    assert!(text.contains("[ ] garlic — 2 cloves"));
    assert!(text.contains("[ ] flour — 1.5 cups"));
    assert!(text.contains("[ ] milk — 1 cup"));
}

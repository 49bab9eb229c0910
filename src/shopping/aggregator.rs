// ABOUTME: Scales, parses, and merges ingredient lines across all meals of a plan
// ABOUTME: Produces alphabetically sorted ShoppingItems with 2-decimal quantities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use uuid::Uuid;

use crate::ingredient::{self, is_skipped};
use crate::models::{IngredientCategory, MealPlan, ShoppingItem};

/// Accumulator for one normalized ingredient name
struct PendingItem {
    quantity: f64,
    unit: String,
    category: IngredientCategory,
}

/// Collapse all ingredients of all meals in a plan into sorted items.
///
/// Each line is scaled by `1 / servings` of its recipe (quantities are
/// assumed to scale linearly with servings). Merging sums quantities,
/// adopts the first non-empty unit, and upgrades the category from
/// `Other` to any specific category seen. Names on the skip list (water,
/// salt/pepper, and the like) are dropped. Keys come back alphabetically
/// sorted with quantities rounded to 2 decimals.
#[must_use]
pub fn aggregate(plan: &MealPlan) -> Vec<ShoppingItem> {
    let mut merged: BTreeMap<String, PendingItem> = BTreeMap::new();

    for day in &plan.days {
        for meal in &day.meals {
            let scale = 1.0 / f64::from(meal.recipe.servings.max(1));
            for line in &meal.recipe.ingredients {
                let Some(parsed) = ingredient::parse(line) else {
                    continue;
                };
                if is_skipped(&parsed.name) {
                    continue;
                }
                let scaled = parsed.quantity * scale;
                match merged.entry(parsed.name) {
                    Entry::Occupied(mut entry) => {
                        let existing = entry.get_mut();
                        existing.quantity += scaled;
                        if existing.unit.is_empty() && !parsed.unit.is_empty() {
                            existing.unit = parsed.unit;
                        }
                        if existing.category == IngredientCategory::Other {
                            existing.category = parsed.category;
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(PendingItem {
                            quantity: scaled,
                            unit: parsed.unit,
                            category: parsed.category,
                        });
                    }
                }
            }
        }
    }

    merged
        .into_iter()
        .map(|(name, item)| ShoppingItem {
            id: Uuid::new_v4().to_string(),
            name,
            quantity: round2(item.quantity),
            unit: item.unit,
            checked: false,
            category: item.category,
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ABOUTME: Macro summary helpers shared by the driver and the reroll engine
// ABOUTME: Computes daily-average macros across the days of a plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use crate::models::{DayPlan, MacroSummary, Macros};

/// Daily-average macros over a set of days.
///
/// Sums every meal's per-serving macros (the day totals cache only four of
/// the five fields, so fiber is re-read from the recipes) and divides by
/// the day count.
#[must_use]
pub fn plan_summary(days: &[DayPlan]) -> MacroSummary {
    let mut totals = Macros::default();
    for day in days {
        for meal in &day.meals {
            totals.add(&meal.recipe.macros);
        }
    }
    MacroSummary::from(totals.averaged_over(days.len()))
}

// ABOUTME: Solver configuration surface with the tunable penalty and bound constants
// ABOUTME: Changing these values changes observed plan quality and test expectations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use crate::models::Macro;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base hard-bound half-widths per macro, widened by priority rank.
///
/// A macro at rank r is allowed `base * (1 + 0.5 * (r - 1))` of daily
/// deviation before the hard bounds cut the solution off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseMaxDeviation {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl BaseMaxDeviation {
    /// Read the base half-width for one macro
    #[must_use]
    pub const fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
            Macro::Fiber => self.fiber,
        }
    }
}

impl Default for BaseMaxDeviation {
    fn default() -> Self {
        Self {
            calories: 200.0,
            protein: 20.0,
            fat: 20.0,
            carbs: 40.0,
            fiber: 15.0,
        }
    }
}

/// Tunable solver constants.
///
/// These defaults are part of the planner's observable contract: macro
/// deviation dominates reuse (a 200 kcal miss costs about 200 objective
/// units against 30 per reused slot), reuse dominates rating (30 vs at most
/// 8), and wrong-direction movement roughly doubles the cost of the same
/// magnitude in the preferred direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Penalty per unit of directional-cap violation, scaled by 1/target
    pub cap_penalty: f64,
    /// Flat penalty per assignment of a recipe already used by earlier plans
    pub reuse_penalty: f64,
    /// Scale of the rating nudge `(5 - rating) / 5` per assignment
    pub rating_weight: f64,
    /// Penalty per distinct protein category used in the plan
    pub protein_variety_penalty: f64,
    /// Hard-bound half-widths before rank widening
    pub base_max_dev: BaseMaxDeviation,
    /// Protein-category cap enforced at the strictest tier
    pub max_protein_types: u32,
    /// Per-solve wall-clock limit handed to the backend
    pub time_limit: Duration,
    /// Number of plans one generation call attempts to produce
    pub plan_count: usize,
}

impl SolverConfig {
    /// Deviation weight for a macro at 1-based priority rank `rank`
    #[must_use]
    pub fn deviation_weight(rank: usize) -> f64 {
        let weight = 1000.0 - 200.0 * (rank as f64 - 1.0);
        weight.max(200.0)
    }

    /// Hard-bound half-width for a macro at 1-based priority rank `rank`
    #[must_use]
    pub fn max_deviation(&self, m: Macro, rank: usize) -> f64 {
        self.base_max_dev.get(m) * (1.0 + 0.5 * (rank as f64 - 1.0))
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cap_penalty: 1000.0,
            reuse_penalty: 30.0,
            rating_weight: 8.0,
            protein_variety_penalty: 500.0,
            base_max_dev: BaseMaxDeviation::default(),
            max_protein_types: 2,
            time_limit: Duration::from_secs(10),
            plan_count: 3,
        }
    }
}

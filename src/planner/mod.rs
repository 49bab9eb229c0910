// ABOUTME: Constrained meal-plan generation: model builder, solver driver, and reroll
// ABOUTME: Re-exports the MILP problem spec, backend trait, and plan engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

//! # Plan generation
//!
//! Plan generation is a mixed-integer program built declaratively and handed
//! to a swappable backend:
//!
//! - [`problem`] holds the pure-data [`problem::ProblemSpec`] (variables,
//!   linear constraints, minimization objective).
//! - [`builder`] translates recipes, targets, and preferences into the spec:
//!   one binary per feasible (recipe, day, slot) triple, block-grouping
//!   equalities so leftovers land on consecutive days, hard daily macro
//!   bounds widened by priority rank, soft directional caps, and deviation
//!   decomposition feeding the weighted objective.
//! - [`backend`] defines the [`backend::MilpBackend`] seam plus the default
//!   `good_lp`/microlp implementation.
//! - [`driver`] runs the three-tier relaxation loop per plan and extracts
//!   [`crate::models::MealPlan`] values, threading the reuse set between
//!   plans so consecutive plans differ.
//! - [`reroll`] swaps a single slot inside an existing plan while keeping
//!   block consistency and macro proximity.
//! - [`protein`] detects protein categories for the variety penalty.

pub mod backend;
pub mod builder;
pub mod driver;
pub mod problem;
pub mod protein;
pub mod reroll;
pub mod summary;

pub use backend::{GoodLpBackend, MilpBackend, MilpSolution};
pub use builder::{build_model, PlanModel, PlanRequest, SolverTier};
pub use driver::{generate_plans, GenerationResult};
pub use problem::{LinearConstraint, ProblemSpec, Sense, VarId, VarKind};
pub use protein::{detect_proteins, ProteinKind};
pub use reroll::reroll_meal;

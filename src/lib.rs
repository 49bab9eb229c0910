// ABOUTME: Library entry point for the Platewise meal-planning core
// ABOUTME: Exposes the planner, ingredient, shopping, storage, and sync subsystems
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

#![deny(unsafe_code)]

//! # Platewise core
//!
//! The engine behind the Platewise mobile app: given a library of recipes
//! and daily macronutrient targets, it produces a small number of distinct
//! weekly meal plans that satisfy the meal-layout constraints, track the
//! targets closely, and differ from one another.
//!
//! ## Subsystems
//!
//! - **Planner**: a declaratively built mixed-integer program per plan,
//!   solved through a swappable backend at three progressively relaxed
//!   tiers, plus a single-slot reroll engine.
//! - **Ingredients & shopping**: a free-text ingredient parser/normalizer
//!   feeding a scaling, merging shopping-list aggregator.
//! - **Sync**: a pull/push reconciler over the remote recipe service with
//!   last-writer-wins semantics and divergence conflicts.
//! - **Storage**: abstract repositories over the five entity families; the
//!   host app provides the embedded-database implementation.
//!
//! ## Example
//!
//! ```rust
//! use platewise_core::config::SolverConfig;
//! use platewise_core::models::{MacroTarget, Macros, MealSlot, Preferences, Recipe};
//! use platewise_core::planner::{generate_plans, GoodLpBackend};
//!
//! let recipes = vec![
//!     Recipe::new("Overnight Oats", MealSlot::Breakfast)
//!         .with_macros(Macros::new(350.0, 20.0, 10.0, 45.0, 8.0)),
//!     Recipe::new("Chicken Wrap", MealSlot::Lunch)
//!         .with_macros(Macros::new(550.0, 35.0, 18.0, 50.0, 6.0)),
//!     Recipe::new("Salmon Bowl", MealSlot::Dinner)
//!         .with_macros(Macros::new(650.0, 45.0, 25.0, 55.0, 7.0)),
//! ];
//!
//! let mut preferences = Preferences::default();
//! preferences.num_days = 2;
//! preferences.macro_targets.calories = MacroTarget::new(true, 1550.0);
//! preferences.macro_targets.protein = MacroTarget::new(true, 100.0);
//!
//! let result = generate_plans(
//!     &recipes,
//!     &preferences,
//!     &SolverConfig::default(),
//!     &GoodLpBackend::new(),
//! );
//! assert!(!result.plans.is_empty());
//! ```

/// Solver configuration surface: the tunable penalty and bound constants
pub mod config;

/// Centralized error types and the recovery policy
pub mod errors;

/// Free-text ingredient parsing, normalization, and categorization
pub mod ingredient;

/// Structured logging setup
pub mod logging;

/// Core domain entities shared by every subsystem
pub mod models;

/// Constrained plan generation, the MILP backend seam, and reroll
pub mod planner;

/// Request-driven operation facade over a backing store
pub mod service;

/// Shopping-list aggregation and clipboard formatting
pub mod shopping;

/// Abstract persistence interface and the in-memory reference store
pub mod storage;

/// Two-way sync with the remote recipe service
pub mod sync;

// ABOUTME: Ingredient text pipeline: free-text lines to structured quantities and names
// ABOUTME: Re-exports the parser, name normalizer, and category assignment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

//! # Ingredient parsing
//!
//! Converts one free-text ingredient line (for example `"1 1/2 cups
//! all-purpose flour, sifted"`) into a structured
//! `(quantity, unit, name, category)` record. The pipeline runs in three
//! stages:
//!
//! 1. [`parser`] consumes a leading quantity (mixed/plain/unicode fractions,
//!    decimals) and a unit token, folding plural unit forms to canonical
//!    singular.
//! 2. [`normalize`] reduces the remaining text to a stable noun phrase:
//!    parentheticals, trailing qualifier phrases, embedded measurements,
//!    preparation words, and plural suffixes are removed. The result is
//!    idempotent under re-normalization.
//! 3. [`categorize`] assigns a shopping-aisle category by keyword
//!    containment.
//!
//! Lines whose normalized name collapses to a single character or less are
//! treated as unparseable and dropped by the aggregator.

pub mod categorize;
pub mod normalize;
pub mod parser;

pub use categorize::{categorize, is_skipped};
pub use normalize::normalize_name;
pub use parser::{parse, ParsedIngredient};

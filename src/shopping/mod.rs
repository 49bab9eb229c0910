// ABOUTME: Shopping-list derivation from a meal plan
// ABOUTME: Re-exports the ingredient aggregator and the clipboard formatter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

//! # Shopping lists
//!
//! [`aggregate`] walks every meal of a plan, scales each ingredient line by
//! `1 / servings`, parses and normalizes it, and merges quantities by
//! normalized name. Aggregation is order-independent: any traversal order of
//! the (day, slot) grid produces the same items. [`format_clipboard`]
//! renders the result as plain text grouped by aisle category.

pub mod aggregator;
pub mod clipboard;

pub use aggregator::aggregate;
pub use clipboard::format_clipboard;

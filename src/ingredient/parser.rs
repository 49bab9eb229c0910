// ABOUTME: Quantity and unit grammar for free-text ingredient lines
// ABOUTME: Handles mixed/plain/unicode fractions, decimals, and plural unit folding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::sync::LazyLock;

use regex::Regex;

use super::categorize::categorize;
use super::normalize::normalize_name;
use crate::models::IngredientCategory;

/// A structured ingredient extracted from one free-text line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    /// Parsed quantity; 1.0 when the line carried none
    pub quantity: f64,
    /// Canonical singular unit, or empty when the line carried none
    pub unit: String,
    /// Normalized noun phrase
    pub name: String,
    /// Shopping-aisle category
    pub category: IngredientCategory,
}

/// Unicode vulgar fractions accepted in quantity position
const VULGAR_FRACTIONS: [(char, f64); 15] = [
    ('½', 0.5),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Alias → canonical singular unit. "lb" wins over "pound"; abbreviations
/// and written-out forms stay distinct canonicals.
const UNIT_ALIASES: [(&str, &str); 44] = [
    ("cup", "cup"),
    ("cups", "cup"),
    ("tbsp", "tbsp"),
    ("tablespoon", "tablespoon"),
    ("tablespoons", "tablespoon"),
    ("tsp", "tsp"),
    ("teaspoon", "teaspoon"),
    ("teaspoons", "teaspoon"),
    ("oz", "oz"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("lb", "lb"),
    ("lbs", "lb"),
    ("pound", "lb"),
    ("pounds", "lb"),
    ("g", "g"),
    ("gram", "g"),
    ("grams", "g"),
    ("kg", "kg"),
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("ml", "ml"),
    ("liter", "liter"),
    ("liters", "liter"),
    ("litre", "liter"),
    ("litres", "liter"),
    ("clove", "clove"),
    ("cloves", "clove"),
    ("can", "can"),
    ("cans", "can"),
    ("bunch", "bunch"),
    ("bunches", "bunch"),
    ("pinch", "pinch"),
    ("dash", "dash"),
    ("slice", "slice"),
    ("slices", "slice"),
    ("piece", "piece"),
    ("pieces", "piece"),
    ("stalk", "stalk"),
    ("stalks", "stalk"),
    ("head", "head"),
    ("heads", "head"),
    ("sprig", "sprig"),
    ("sprigs", "sprig"),
];

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern"));
static MIXED_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)").expect("mixed fraction pattern"));
static PLAIN_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*/\s*(\d+)").expect("plain fraction pattern"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)").expect("decimal pattern"));

/// Parse one free-text ingredient line.
///
/// Returns `None` when the normalized name collapses to a single character
/// or less (nothing meaningful left to aggregate).
#[must_use]
pub fn parse(raw: &str) -> Option<ParsedIngredient> {
    let stripped = PARENTHETICAL.replace_all(raw, "");
    let text = stripped.trim();

    let (quantity, rest) = take_quantity(text);
    let (unit, rest) = take_unit(rest);

    let name = normalize_name(rest);
    if name.is_empty() {
        return None;
    }
    let category = categorize(&name);

    Some(ParsedIngredient {
        quantity,
        unit,
        name,
        category,
    })
}

/// Look up a vulgar-fraction character
fn vulgar_value(c: char) -> Option<f64> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, v)| *v)
}

/// Consume a leading quantity. Priority: mixed fraction, plain fraction,
/// decimal (summed with an immediately following vulgar fraction), vulgar
/// fraction. Defaults to 1.0 when nothing matches.
fn take_quantity(text: &str) -> (f64, &str) {
    if let Some(caps) = MIXED_FRACTION.captures(text) {
        let whole: f64 = caps[1].parse().unwrap_or(0.0);
        let num: f64 = caps[2].parse().unwrap_or(0.0);
        let den: f64 = caps[3].parse().unwrap_or(1.0);
        let rest = &text[caps.get(0).map_or(0, |m| m.end())..];
        if den > 0.0 {
            return (whole + num / den, rest.trim_start());
        }
        return (whole, rest.trim_start());
    }

    if let Some(caps) = PLAIN_FRACTION.captures(text) {
        let num: f64 = caps[1].parse().unwrap_or(0.0);
        let den: f64 = caps[2].parse().unwrap_or(1.0);
        let rest = &text[caps.get(0).map_or(0, |m| m.end())..];
        if den > 0.0 {
            return (num / den, rest.trim_start());
        }
        return (1.0, rest.trim_start());
    }

    if let Some(caps) = DECIMAL.captures(text) {
        let mut value: f64 = caps[1].parse().unwrap_or(1.0);
        let mut rest = &text[caps.get(0).map_or(0, |m| m.end())..];
        // "1½" reads as 1 + 1/2
        if let Some(c) = rest.chars().next() {
            if let Some(extra) = vulgar_value(c) {
                value += extra;
                rest = &rest[c.len_utf8()..];
            }
        }
        return (value, rest.trim_start());
    }

    if let Some(c) = text.chars().next() {
        if let Some(value) = vulgar_value(c) {
            return (value, text[c.len_utf8()..].trim_start());
        }
    }

    (1.0, text)
}

/// Consume a unit token if the next word is a known unit (optionally with a
/// trailing period). A following "of" is discarded.
fn take_unit(text: &str) -> (String, &str) {
    let Some(token) = text.split_whitespace().next() else {
        return (String::new(), text);
    };

    let candidate = token.trim_end_matches('.').to_lowercase();
    let Some(&(_, canonical)) = UNIT_ALIASES.iter().find(|(alias, _)| *alias == candidate) else {
        return (String::new(), text);
    };

    let mut rest = text[token.len()..].trim_start();
    if let Some(next) = rest.split_whitespace().next() {
        if next.eq_ignore_ascii_case("of") {
            rest = rest[next.len()..].trim_start();
        }
    }
    (canonical.to_string(), rest)
}

// ABOUTME: Noun-phrase normalization for ingredient names
// ABOUTME: Strips qualifiers, preparation words, and plural suffixes; idempotent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::sync::LazyLock;

use regex::Regex;

/// Tokens removed wherever they appear: preparation verbs, size adjectives,
/// freshness markers, and connective words.
const STRIP_WORDS: &[&str] = &[
    // preparation
    "chopped",
    "diced",
    "minced",
    "sliced",
    "grated",
    "shredded",
    "crushed",
    "mashed",
    "melted",
    "softened",
    "beaten",
    "whisked",
    "cooked",
    "uncooked",
    "toasted",
    "roasted",
    "grilled",
    "steamed",
    "boiled",
    "rinsed",
    "drained",
    "peeled",
    "seeded",
    "pitted",
    "stemmed",
    "trimmed",
    "halved",
    "quartered",
    "cubed",
    "julienned",
    "packed",
    "sifted",
    "zested",
    "juiced",
    "crumbled",
    "torn",
    "thawed",
    "washed",
    "cored",
    "deveined",
    "shelled",
    // size
    "large",
    "small",
    "medium",
    "big",
    "thin",
    "thick",
    "jumbo",
    "baby",
    // freshness and state
    "fresh",
    "freshly",
    "frozen",
    "ripe",
    "raw",
    "organic",
    "cold",
    "warm",
    "hot",
    "chilled",
    "boneless",
    "skinless",
    "lean",
    "unsalted",
    "salted",
    "unsweetened",
    // adverbs of degree
    "finely",
    "thinly",
    "coarsely",
    "roughly",
    "lightly",
    "firmly",
    "loosely",
    // connectives
    "of",
    "into",
    "about",
    "approximately",
    "and",
    "or",
];

/// Irregular plurals resolved before the suffix rules
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("halves", "half"),
    ("knives", "knife"),
    ("cookies", "cookie"),
    ("molasses", "molasses"),
];

/// Conjunctions dropped only from the front of the phrase
const LEADING_CONJUNCTIONS: &[&str] = &["and", "or", "then", "plus"];

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern"));

// Qualifier phrases that run to the end of the line once they start
static TRAILING_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[,\s]*\b(?:to taste|divided|or more|as needed|plus more|at room temperature|cut into|like|such as|for|preferably|store-bought|if available)\b.*$",
    )
    .expect("trailing phrase pattern")
});

// Embedded measurements such as "8 oz" or "2 cups"
static EMBEDDED_MEASUREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s*(?:oz|ounces?|cups?|lbs?|pounds?|grams?|g|kg|ml|tablespoons?|tbsp|teaspoons?|tsp)\b\.?",
    )
    .expect("embedded measurement pattern")
});

/// Reduce raw ingredient text to a stable lowercase noun phrase.
///
/// The result is idempotent: normalizing an already-normalized name returns
/// it unchanged. Returns an empty string when nothing meaningful remains
/// (one character or less after trimming).
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let text = PARENTHETICAL.replace_all(raw, "");
    let text = TRAILING_PHRASE.replace(&text, "");
    let text = text.split(',').next().unwrap_or("").to_owned();
    let text = EMBEDDED_MEASUREMENT.replace_all(&text, "");
    let text = text.to_lowercase();

    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    while let Some(first) = tokens.first() {
        if LEADING_CONJUNCTIONS.contains(first) {
            tokens.remove(0);
        } else {
            break;
        }
    }

    let words: Vec<String> = tokens
        .into_iter()
        .filter(|t| !STRIP_WORDS.contains(t))
        .filter(|t| !is_bare_number(t))
        .map(singularize)
        .collect();

    let name = words.join(" ").trim().to_owned();
    if name.chars().count() <= 1 {
        return String::new();
    }
    name
}

/// Whether a token is only digits, dots, slashes, and vulgar fractions
fn is_bare_number(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| {
            c.is_ascii_digit() || c == '.' || c == '/' || "½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞".contains(c)
        })
}

/// Reduce one plural token to singular: irregular table first, then suffix
/// rules (ies→y, oes→o, ches→ch, shes→sh, ses→s, trailing s except after
/// ss/us).
#[must_use]
pub fn singularize(token: &str) -> String {
    for (plural, singular) in IRREGULAR_PLURALS {
        if token == *plural {
            return (*singular).to_owned();
        }
    }

    if let Some(stem) = token.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = token.strip_suffix("oes") {
        if !stem.is_empty() {
            return format!("{stem}o");
        }
    }
    if let Some(stem) = token.strip_suffix("ches") {
        return format!("{stem}ch");
    }
    if let Some(stem) = token.strip_suffix("shes") {
        return format!("{stem}sh");
    }
    if let Some(stem) = token.strip_suffix("ses") {
        return format!("{stem}s");
    }
    if token.ends_with('s') && !token.ends_with("ss") && !token.ends_with("us") {
        return token[..token.len() - 1].to_owned();
    }
    token.to_owned()
}

// ABOUTME: Keyword-based detection of protein categories within a recipe
// ABOUTME: Feeds the protein-variety indicators of the plan model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Recipe;

/// Protein categories the variety penalty discriminates between
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProteinKind {
    Chicken,
    Beef,
    Pork,
    Turkey,
    Fish,
    Seafood,
    Egg,
    Tofu,
    Legume,
}

/// Keywords per protein kind, matched by containment against the recipe
/// name and every ingredient line (lowercased)
const PROTEIN_KEYWORDS: &[(ProteinKind, &[&str])] = &[
    (ProteinKind::Chicken, &["chicken"]),
    (ProteinKind::Beef, &["beef", "steak", "brisket"]),
    (
        ProteinKind::Pork,
        &["pork", "bacon", "ham", "sausage", "prosciutto"],
    ),
    (ProteinKind::Turkey, &["turkey"]),
    (
        ProteinKind::Fish,
        &["salmon", "tuna", "cod", "tilapia", "halibut", "trout", "fish"],
    ),
    (
        ProteinKind::Seafood,
        &["shrimp", "prawn", "scallop", "crab", "lobster", "mussel", "clam"],
    ),
    (ProteinKind::Egg, &["egg"]),
    (ProteinKind::Tofu, &["tofu", "tempeh", "seitan"]),
    (
        ProteinKind::Legume,
        &["lentil", "chickpea", "black bean", "kidney bean", "edamame"],
    ),
];

/// Detect every protein category appearing in a recipe
#[must_use]
pub fn detect_proteins(recipe: &Recipe) -> BTreeSet<ProteinKind> {
    let mut haystack = recipe.name.to_lowercase();
    for line in &recipe.ingredients {
        haystack.push(' ');
        haystack.push_str(&line.to_lowercase());
    }

    PROTEIN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(kind, _)| *kind)
        .collect()
}

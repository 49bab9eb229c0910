// ABOUTME: Plain-text rendering of a shopping list for clipboard export
// ABOUTME: Groups items by category with checkbox lines and pluralized units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::collections::BTreeMap;

use crate::models::ShoppingItem;

/// Render items as clipboard text: one section per category (alphabetical),
/// header `--- CATEGORY ---`, one `[ ] name — Q UNIT` line per item.
/// Quantities drop trailing zeros; units pluralize when Q > 1.
#[must_use]
pub fn format_clipboard(items: &[ShoppingItem]) -> String {
    let mut sections: BTreeMap<&str, Vec<&ShoppingItem>> = BTreeMap::new();
    for item in items {
        sections.entry(item.category.as_str()).or_default().push(item);
    }

    let mut out = String::new();
    for (category, entries) in sections {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("--- {} ---\n", category.to_uppercase()));
        for item in entries {
            out.push_str(&format_line(item));
            out.push('\n');
        }
    }
    out
}

fn format_line(item: &ShoppingItem) -> String {
    let quantity = format_quantity(item.quantity);
    if item.unit.is_empty() {
        format!("[ ] {} — {quantity}", item.name)
    } else {
        let unit = if item.quantity > 1.0 {
            pluralize_unit(&item.unit)
        } else {
            item.unit.clone()
        };
        format!("[ ] {} — {quantity} {unit}", item.name)
    }
}

/// Format a quantity without trailing zeros ("2", "1.5", "0.33")
fn format_quantity(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn pluralize_unit(unit: &str) -> String {
    if unit.ends_with('s') {
        return unit.to_owned();
    }
    if unit.ends_with("ch") || unit.ends_with("sh") {
        return format!("{unit}es");
    }
    format!("{unit}s")
}

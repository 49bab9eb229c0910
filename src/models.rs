// ABOUTME: Core domain entities for recipes, meal plans, shopping lists, and settings
// ABOUTME: Defines Recipe, MealPlan, DayPlan, Preferences, SyncState, and shared enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Meal slot within a day, doubling as the recipe category.
///
/// A recipe is eligible for the slot matching its own category; the
/// combine-lunch-dinner preference widens lunch/dinner recipes to both
/// slots. Declaration order is the display order of meals within a day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

impl MealSlot {
    /// All slots in display order
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Snack,
        Self::Dessert,
    ];

    /// Wire/display name for this slot
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Dessert => "dessert",
        }
    }

    /// Parse a slot from its wire name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a recipe originally came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSource {
    Notion,
    Web,
    #[default]
    Manual,
}

impl RecipeSource {
    /// Wire name for this source
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Web => "web",
            Self::Manual => "manual",
        }
    }
}

/// Shopping aisle category assigned to a normalized ingredient
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Produce,
    Protein,
    Dairy,
    Grains,
    Pantry,
    #[default]
    Other,
}

impl IngredientCategory {
    /// Display name used in clipboard section headers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Produce => "produce",
            Self::Protein => "protein",
            Self::Dairy => "dairy",
            Self::Grains => "grains",
            Self::Pantry => "pantry",
            Self::Other => "other",
        }
    }
}

/// One of the five tracked macronutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macro {
    Calories,
    Protein,
    Fat,
    Carbs,
    Fiber,
}

impl Macro {
    /// All macros, in the default priority order
    pub const ALL: [Self; 5] = [
        Self::Calories,
        Self::Protein,
        Self::Fat,
        Self::Carbs,
        Self::Fiber,
    ];

    /// Wire/display name for this macro
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Fat => "fat",
            Self::Carbs => "carbs",
            Self::Fiber => "fiber",
        }
    }

    /// Parse a macro from its wire name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

/// Per-serving macro values carried by every recipe.
///
/// Zero is the missing-value sentinel: imported recipes without nutrition
/// data store zeros rather than nulls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl Macros {
    /// Construct from the five values in canonical order
    #[must_use]
    pub const fn new(calories: f64, protein: f64, fat: f64, carbs: f64, fiber: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
            fiber,
        }
    }

    /// Read a single macro value
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

    /// Accumulate another set of values into this one
    pub fn add(&mut self, other: &Self) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.fat += other.fat;
        self.carbs += other.carbs;
        self.fiber += other.fiber;
    }

    /// Divide every field by a day count, yielding daily averages
    #[must_use]
    pub fn averaged_over(&self, days: usize) -> Self {
        if days == 0 {
            return *self;
        }
        let n = days as f64;
        Self {
            calories: self.calories / n,
            protein: self.protein / n,
            fat: self.fat / n,
            carbs: self.carbs / n,
            fiber: self.fiber / n,
        }
    }
}

/// A recipe in the user's library.
///
/// Ids are stable across the recipe's lifetime. Locally created recipes get
/// a UUID; rows that originate on the server keep the server's numeric id
/// (the sync reconciler relies on that shape difference).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier (UUID for local rows, numeric string for server rows)
    pub id: String,
    /// Display name
    pub name: String,
    /// Category, which is also the slot this recipe can fill
    pub category: MealSlot,
    /// Per-serving macro values (zeros when unknown)
    pub macros: Macros,
    /// Free-text ingredient lines, in recipe order
    pub ingredients: Vec<String>,
    /// Optional preparation instructions
    pub instructions: Option<String>,
    /// Optional image reference
    pub image_url: Option<String>,
    /// Import origin
    pub source: RecipeSource,
    /// Optional source URL for imported recipes
    pub source_url: Option<String>,
    /// Optional external note-system page reference
    pub external_page_id: Option<String>,
    /// Optional user rating in [1, 5]
    pub rating: Option<f64>,
    /// Maximum total assignments of this recipe across a plan
    pub frequency_limit: u32,
    /// Number of servings the ingredient quantities yield
    pub servings: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last successful sync, or `None` if never synced
    pub synced_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Default frequency limit for new recipes
    pub const DEFAULT_FREQUENCY_LIMIT: u32 = 3;

    /// Create a recipe with a fresh UUID and defaulted fields
    #[must_use]
    pub fn new(name: impl Into<String>, category: MealSlot) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            macros: Macros::default(),
            ingredients: Vec::new(),
            instructions: None,
            image_url: None,
            source: RecipeSource::Manual,
            source_url: None,
            external_page_id: None,
            rating: None,
            frequency_limit: Self::DEFAULT_FREQUENCY_LIMIT,
            servings: 1,
            created_at: now,
            updated_at: now,
            synced_at: None,
        }
    }

    /// Set per-serving macro values
    #[must_use]
    pub const fn with_macros(mut self, macros: Macros) -> Self {
        self.macros = macros;
        self
    }

    /// Set the ingredient lines
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// Set the rating (clamped to [1, 5])
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating.clamp(1.0, 5.0));
        self
    }

    /// Set the per-plan frequency limit
    #[must_use]
    pub const fn with_frequency_limit(mut self, limit: u32) -> Self {
        self.frequency_limit = limit;
        self
    }

    /// Set the servings count
    #[must_use]
    pub const fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Set the import origin
    #[must_use]
    pub const fn with_source(mut self, source: RecipeSource) -> Self {
        self.source = source;
        self
    }
}

/// A recipe assigned to one slot of one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealAssignment {
    pub slot: MealSlot,
    pub recipe: Recipe,
}

/// One day of a plan, with cached macro totals over its meals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// Display label, e.g. "Day 1"
    pub label: String,
    /// Meals in slot display order; slot values are unique within a day
    pub meals: Vec<MealAssignment>,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_carbs: f64,
}

impl DayPlan {
    /// Build a day, sorting meals into slot order and caching totals
    #[must_use]
    pub fn from_meals(label: impl Into<String>, mut meals: Vec<MealAssignment>) -> Self {
        meals.sort_by_key(|m| m.slot);
        let mut totals = Macros::default();
        for meal in &meals {
            totals.add(&meal.recipe.macros);
        }
        Self {
            label: label.into(),
            meals,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_fat: totals.fat,
            total_carbs: totals.carbs,
        }
    }

    /// Find the assignment at a slot, if any
    #[must_use]
    pub fn meal_at(&self, slot: MealSlot) -> Option<&MealAssignment> {
        self.meals.iter().find(|m| m.slot == slot)
    }
}

/// Daily-average macro values for a whole plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroSummary {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl From<Macros> for MacroSummary {
    fn from(m: Macros) -> Self {
        Self {
            calories: m.calories,
            protein: m.protein,
            fat: m.fat,
            carbs: m.carbs,
            fiber: m.fiber,
        }
    }
}

/// A generated weekly meal plan.
///
/// At most one persisted plan carries `selected = true`; the plan
/// repository's select operation maintains that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    /// Display label, e.g. "Plan 1"
    pub label: String,
    pub days: Vec<DayPlan>,
    /// Daily-average macros across all days
    pub macro_summary: MacroSummary,
    pub selected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl MealPlan {
    /// Create a plan with a fresh UUID and current timestamps
    #[must_use]
    pub fn new(label: impl Into<String>, days: Vec<DayPlan>, summary: MacroSummary) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            days,
            macro_summary: summary,
            selected: false,
            created_at: now,
            updated_at: now,
            synced_at: None,
        }
    }

    /// Iterate every recipe id used anywhere in the plan
    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.days
            .iter()
            .flat_map(|d| d.meals.iter())
            .map(|m| m.recipe.id.as_str())
    }
}

/// One aggregated line of a shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    /// Normalized ingredient name
    pub name: String,
    /// Aggregated quantity, rounded to 2 decimals
    pub quantity: f64,
    /// Canonical unit (empty when the source lines carried none)
    pub unit: String,
    pub checked: bool,
    pub category: IngredientCategory,
}

/// A shopping list derived from one plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: String,
    /// The plan this list was derived from
    pub plan_id: String,
    pub items: Vec<ShoppingItem>,
    pub created_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Create a list with a fresh UUID and the current timestamp
    #[must_use]
    pub fn new(plan_id: impl Into<String>, items: Vec<ShoppingItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            plan_id: plan_id.into(),
            items,
            created_at: Utc::now(),
        }
    }
}

/// One macro target: a value plus whether the solver should chase it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub enabled: bool,
    pub value: f64,
}

impl MacroTarget {
    #[must_use]
    pub const fn new(enabled: bool, value: f64) -> Self {
        Self { enabled, value }
    }
}

/// Daily macro targets, one per tracked macro
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: MacroTarget,
    pub protein: MacroTarget,
    pub fat: MacroTarget,
    pub carbs: MacroTarget,
    pub fiber: MacroTarget,
}

impl MacroTargets {
    /// Read the target for a single macro
    #[must_use]
    pub const fn get(&self, m: Macro) -> MacroTarget {
        match m {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
            Macro::Fiber => self.fiber,
        }
    }

    /// Enabled macros with a positive target, in canonical order
    #[must_use]
    pub fn enabled(&self) -> Vec<(Macro, f64)> {
        Macro::ALL
            .into_iter()
            .filter_map(|m| {
                let t = self.get(m);
                (t.enabled && t.value > 0.0).then_some((m, t.value))
            })
            .collect()
    }
}

impl Default for MacroTargets {
    fn default() -> Self {
        Self {
            calories: MacroTarget::new(true, 2000.0),
            protein: MacroTarget::new(true, 100.0),
            fat: MacroTarget::new(false, 70.0),
            carbs: MacroTarget::new(false, 250.0),
            fiber: MacroTarget::new(false, 30.0),
        }
    }
}

/// Plan-generation knobs plus macro targets; a singleton row in storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub macro_targets: MacroTargets,
    /// Frequency limit applied to newly imported recipes
    pub default_frequency: u32,
    /// Days per plan, clamped by the driver to [1, 7]
    pub num_days: u32,
    pub include_snacks: bool,
    pub combine_lunch_dinner: bool,
    pub prefer_similar_ingredients: bool,
    /// Slots the user wants planned; empty falls back to breakfast/lunch/dinner
    pub selected_slots: Vec<MealSlot>,
    /// Permutation of the five macros, most important first
    pub priority_order: Vec<Macro>,
}

impl Preferences {
    /// 1-based priority rank of a macro; unlisted macros rank last
    #[must_use]
    pub fn priority_rank(&self, m: Macro) -> usize {
        self.priority_order
            .iter()
            .position(|&p| p == m)
            .map_or(self.priority_order.len() + 1, |i| i + 1)
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            macro_targets: MacroTargets::default(),
            default_frequency: Recipe::DEFAULT_FREQUENCY_LIMIT,
            num_days: 7,
            include_snacks: false,
            combine_lunch_dinner: false,
            prefer_similar_ingredients: false,
            selected_slots: vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner],
            priority_order: Macro::ALL.to_vec(),
        }
    }
}

/// Sync credentials and bookkeeping; a singleton row in storage
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncState {
    pub email: Option<String>,
    /// Bearer token for the recipe service; `None` means not logged in
    pub server_token: Option<String>,
    /// External note-system integration token
    pub notion_token: Option<String>,
    /// External note-system database holding recipes
    pub notion_database_id: Option<String>,
    pub last_sync_at: Option<DateTime<Utc>>,
}

impl SyncState {
    /// Whether remote sync can run at all
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.server_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_round_trips_through_wire_name() {
        for slot in MealSlot::ALL {
            assert_eq!(MealSlot::parse(slot.as_str()), Some(slot));
        }
        assert_eq!(MealSlot::parse("brunch"), None);
    }

    #[test]
    fn day_plan_sorts_meals_and_caches_totals() {
        let dinner = Recipe::new("Chili", MealSlot::Dinner)
            .with_macros(Macros::new(600.0, 40.0, 20.0, 55.0, 8.0));
        let breakfast = Recipe::new("Oats", MealSlot::Breakfast)
            .with_macros(Macros::new(300.0, 12.0, 6.0, 50.0, 7.0));

        let day = DayPlan::from_meals(
            "Day 1",
            vec![
                MealAssignment {
                    slot: MealSlot::Dinner,
                    recipe: dinner,
                },
                MealAssignment {
                    slot: MealSlot::Breakfast,
                    recipe: breakfast,
                },
            ],
        );

        assert_eq!(day.meals[0].slot, MealSlot::Breakfast);
        assert_eq!(day.meals[1].slot, MealSlot::Dinner);
        assert!((day.total_calories - 900.0).abs() < f64::EPSILON);
        assert!((day.total_protein - 52.0).abs() < f64::EPSILON);
    }

    #[test]
    fn priority_rank_is_one_based() {
        let prefs = Preferences::default();
        assert_eq!(prefs.priority_rank(Macro::Calories), 1);
        assert_eq!(prefs.priority_rank(Macro::Fiber), 5);
    }

    #[test]
    fn rating_is_clamped() {
        let r = Recipe::new("Cake", MealSlot::Dessert).with_rating(9.0);
        assert_eq!(r.rating, Some(5.0));
    }
}

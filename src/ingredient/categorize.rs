// ABOUTME: Shopping-aisle category assignment via keyword containment
// ABOUTME: Holds the category keyword lists and the aggregator skip list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use crate::models::IngredientCategory;

/// Produce keywords, checked first
const PRODUCE: &[&str] = &[
    "apple",
    "banana",
    "orange",
    "lemon",
    "lime",
    "berry",
    "strawberry",
    "blueberry",
    "raspberry",
    "grape",
    "melon",
    "mango",
    "pineapple",
    "peach",
    "pear",
    "plum",
    "cherry",
    "avocado",
    "tomato",
    "potato",
    "onion",
    "garlic",
    "ginger",
    "carrot",
    "celery",
    "broccoli",
    "cauliflower",
    "spinach",
    "kale",
    "lettuce",
    "arugula",
    "cabbage",
    "cucumber",
    "zucchini",
    "squash",
    "bell pepper",
    "jalapeno",
    "mushroom",
    "green bean",
    "asparagus",
    "eggplant",
    "leek",
    "scallion",
    "shallot",
    "cilantro",
    "parsley",
    "basil",
    "mint",
    "thyme",
    "rosemary",
    "dill",
    "chive",
    "beet",
    "radish",
    "turnip",
    "pumpkin",
    "kiwi",
    "apricot",
    "fig",
];

/// Protein keywords, checked second
const PROTEIN: &[&str] = &[
    "chicken",
    "beef",
    "steak",
    "pork",
    "bacon",
    "ham",
    "sausage",
    "turkey",
    "lamb",
    "duck",
    "salmon",
    "tuna",
    "cod",
    "tilapia",
    "halibut",
    "trout",
    "shrimp",
    "prawn",
    "scallop",
    "crab",
    "lobster",
    "fish",
    "egg",
    "tofu",
    "tempeh",
    "seitan",
    "lentil",
    "chickpea",
    "black bean",
    "kidney bean",
    "bean",
    "edamame",
    "peanut",
    "almond",
    "cashew",
    "walnut",
    "pecan",
    "pistachio",
    "whey",
    "protein powder",
];

/// Dairy keywords, checked third
const DAIRY: &[&str] = &[
    "milk",
    "cheese",
    "yogurt",
    "butter",
    "cream",
    "mozzarella",
    "cheddar",
    "parmesan",
    "feta",
    "ricotta",
    "buttermilk",
    "ghee",
    "kefir",
];

/// Grains keywords, checked fourth
const GRAINS: &[&str] = &[
    "flour",
    "bread",
    "rice",
    "pasta",
    "noodle",
    "oat",
    "quinoa",
    "barley",
    "couscous",
    "tortilla",
    "cereal",
    "granola",
    "cracker",
    "bagel",
    "pita",
    "cornmeal",
    "breadcrumb",
    "panko",
    "spaghetti",
    "macaroni",
    "penne",
    "orzo",
    "farro",
    "bulgur",
    "wheat",
];

/// Pantry keywords, checked last before the fallback
const PANTRY: &[&str] = &[
    "oil",
    "vinegar",
    "soy sauce",
    "salt",
    "pepper",
    "sugar",
    "honey",
    "maple syrup",
    "vanilla",
    "baking powder",
    "baking soda",
    "yeast",
    "cinnamon",
    "cumin",
    "paprika",
    "oregano",
    "chili powder",
    "curry",
    "turmeric",
    "nutmeg",
    "saffron",
    "cocoa",
    "chocolate",
    "broth",
    "stock",
    "salsa",
    "mustard",
    "ketchup",
    "mayonnaise",
    "mayo",
    "syrup",
    "jam",
    "jelly",
    "tahini",
    "sesame",
    "spice",
    "seasoning",
    "extract",
    "molasses",
    "cornstarch",
    "sriracha",
    "worcestershire",
    "sauce",
];

/// Normalized names dropped by the shopping-list aggregator
const SKIP_LIST: &[&str] = &[
    "water",
    "ice",
    "salt",
    "pepper",
    "salt pepper",
    "black pepper",
    "kosher salt",
    "sea salt",
    "cooking spray",
    "nonstick cooking spray",
];

/// Assign a category to a normalized ingredient name.
///
/// Keyword containment over the five category lists in order produce,
/// protein, dairy, grains, pantry; first match wins; unmatched names fall
/// through to [`IngredientCategory::Other`].
#[must_use]
pub fn categorize(name: &str) -> IngredientCategory {
    let groups: [(&[&str], IngredientCategory); 5] = [
        (PRODUCE, IngredientCategory::Produce),
        (PROTEIN, IngredientCategory::Protein),
        (DAIRY, IngredientCategory::Dairy),
        (GRAINS, IngredientCategory::Grains),
        (PANTRY, IngredientCategory::Pantry),
    ];
    for (keywords, category) in groups {
        if keywords.iter().any(|k| name.contains(k)) {
            return category;
        }
    }
    IngredientCategory::Other
}

/// Whether the aggregator should drop this normalized name entirely
#[must_use]
pub fn is_skipped(name: &str) -> bool {
    SKIP_LIST.contains(&name)
}

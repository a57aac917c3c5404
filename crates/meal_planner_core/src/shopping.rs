//! crates/meal_planner_core/src/shopping.rs
//!
//! Ingredient aggregation for a date range.

use crate::domain::{IngredientCategory, IngredientItem, MealRecord, ShoppingList};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Keyword buckets, checked in order; the first bucket with a match wins.
const CATEGORY_KEYWORDS: [(IngredientCategory, &[&str]); 5] = [
    (IngredientCategory::Grains, &["rice", "wheat", "flour", "bread"]),
    (
        IngredientCategory::Vegetables,
        &["onion", "tomato", "potato", "carrot", "peas", "beans"],
    ),
    (IngredientCategory::Protein, &["chicken", "fish", "meat", "egg"]),
    (IngredientCategory::Dairy, &["milk", "cheese", "yogurt", "butter"]),
    (IngredientCategory::Pantry, &["oil", "ghee", "salt", "sugar", "spice"]),
];

/// Counts how many meals between `start` and `end` list each ingredient.
///
/// Ingredient names are compared verbatim: "Tomato" and "tomato" are two items.
pub fn build_list(meals: &[MealRecord], start: NaiveDate, end: NaiveDate) -> ShoppingList {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for meal in meals {
        for ingredient in &meal.dish.ingredients {
            *counts.entry(ingredient.as_str()).or_default() += 1;
        }
    }

    let ingredients: Vec<IngredientItem> = counts
        .into_iter()
        .map(|(name, count)| IngredientItem {
            name: name.to_string(),
            quantity: quantity_label(count),
            category: categorize(name),
            count,
        })
        .collect();

    ShoppingList {
        total_items: ingredients.len(),
        ingredients,
        date_range: format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
    }
}

/// Case-insensitive substring match against the keyword buckets.
pub fn categorize(ingredient: &str) -> IngredientCategory {
    let lowered = ingredient.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(IngredientCategory::Others)
}

fn quantity_label(count: usize) -> String {
    if count > 1 {
        format!("{count} units")
    } else {
        "1 unit".to_string()
    }
}

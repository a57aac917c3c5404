//! crates/meal_planner_core/src/analytics.rs
//!
//! Meal analytics over a period: distributions, dish popularity, nutrition
//! totals and a per-day trend.

use crate::domain::{
    AnalyticsResult, DailyMealCount, DishPopularity, MealRecord, NutritionAnalytics,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// How many entries `top_dishes` keeps.
pub const TOP_DISHES_LIMIT: usize = 10;

/// Aggregates `meals` eaten over the last `period` days.
///
/// `period` is expected to be already clamped to `1..=365` by the caller.
pub fn analyze(meals: &[MealRecord], period: u32) -> AnalyticsResult {
    let mut meal_type_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut cuisine_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut popularity: HashMap<Uuid, DishPopularity> = HashMap::new();
    let mut daily: BTreeMap<NaiveDate, DailyMealCount> = BTreeMap::new();
    let mut summary = NutritionAnalytics::default();

    for meal in meals {
        let dish = &meal.dish;
        let calories = i64::from(dish.calories);

        *meal_type_distribution
            .entry(meal.meal_type.as_str().to_string())
            .or_default() += 1;
        // Cuisine strings are counted verbatim, empty included.
        *cuisine_distribution.entry(dish.cuisine.clone()).or_default() += 1;

        popularity
            .entry(dish.id)
            .or_insert_with(|| DishPopularity {
                dish_id: dish.id,
                dish_name: dish.name.clone(),
                count: 0,
                calories: dish.calories,
                cuisine: dish.cuisine.clone(),
            })
            .count += 1;

        summary.total_calories += calories;
        summary.total_protein += i64::from(dish.nutrition.protein);
        summary.total_carbs += i64::from(dish.nutrition.carbs);
        summary.total_fat += i64::from(dish.nutrition.fat);
        summary.total_fiber += i64::from(dish.nutrition.fiber);

        let day = daily.entry(meal.day()).or_insert_with(|| DailyMealCount {
            date: meal.day(),
            meal_count: 0,
            calories: 0,
        });
        day.meal_count += 1;
        day.calories += calories;
    }

    let meal_count = meals.len();
    summary.avg_calories = average(summary.total_calories, meal_count);
    summary.avg_protein = average(summary.total_protein, meal_count);
    summary.avg_carbs = average(summary.total_carbs, meal_count);
    summary.avg_fat = average(summary.total_fat, meal_count);

    AnalyticsResult {
        total_meals: meal_count,
        avg_calories_per_day: average(summary.total_calories, period as usize),
        meal_type_distribution,
        cuisine_distribution,
        top_dishes: rank_dishes(popularity.into_values().collect()),
        nutrition_summary: summary,
        weekly_trend: daily.into_values().collect(),
        period,
    }
}

/// Most eaten first; ties broken by name, then id, so the output is stable.
fn rank_dishes(mut dishes: Vec<DishPopularity>) -> Vec<DishPopularity> {
    dishes.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.dish_name.cmp(&b.dish_name))
            .then_with(|| a.dish_id.cmp(&b.dish_id))
    });
    dishes.truncate(TOP_DISHES_LIMIT);
    dishes
}

/// `total / count`, or 0 when there is nothing to divide by.
pub(crate) fn average(total: i64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

//! crates/meal_planner_core/src/nutrition.rs
//!
//! Daily nutrition totals and goal achievement.

use crate::analytics::average;
use crate::domain::{DailyNutrition, DailyTargets, MealRecord, NutritionProgress, ProgressSummary};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Buckets `meals` per calendar day and scores each day against `goals`.
///
/// A goal counts as met when the day's total is greater than or equal to it,
/// for calories as well as protein.
pub fn progress(meals: &[MealRecord], goals: DailyTargets, period: u32) -> NutritionProgress {
    let mut days: BTreeMap<NaiveDate, DailyNutrition> = BTreeMap::new();

    for meal in meals {
        let n = &meal.dish.nutrition;
        let day = days.entry(meal.day()).or_insert_with(|| DailyNutrition {
            date: meal.day(),
            ..DailyNutrition::default()
        });
        day.calories += i64::from(meal.dish.calories);
        day.protein += i64::from(n.protein);
        day.carbs += i64::from(n.carbs);
        day.fat += i64::from(n.fat);
        day.fiber += i64::from(n.fiber);
        day.sodium += i64::from(n.sodium);
        day.meal_count += 1;
    }

    let progress: Vec<DailyNutrition> = days.into_values().collect();
    let summary = summarize(&progress, &goals);

    NutritionProgress {
        period,
        progress,
        goals,
        summary,
    }
}

fn summarize(days: &[DailyNutrition], goals: &DailyTargets) -> ProgressSummary {
    // An empty range still reports one day so the averages stay finite.
    let total_days = days.len().max(1);

    let sum = |f: fn(&DailyNutrition) -> i64| days.iter().map(f).sum::<i64>();

    let calorie_goal_met = days
        .iter()
        .filter(|d| d.calories >= i64::from(goals.daily_calories))
        .count();
    let protein_goal_met = days
        .iter()
        .filter(|d| d.protein >= i64::from(goals.protein))
        .count();

    ProgressSummary {
        avg_calories: average(sum(|d| d.calories), total_days),
        avg_protein: average(sum(|d| d.protein), total_days),
        avg_carbs: average(sum(|d| d.carbs), total_days),
        avg_fat: average(sum(|d| d.fat), total_days),
        avg_fiber: average(sum(|d| d.fiber), total_days),
        total_days,
        calorie_goal_met,
        protein_goal_met,
        goal_percentage: calorie_goal_met as f64 / total_days as f64 * 100.0,
    }
}

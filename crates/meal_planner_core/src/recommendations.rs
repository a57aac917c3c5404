//! crates/meal_planner_core/src/recommendations.rs
//!
//! Scores catalog dishes the user has not eaten recently for a given meal type.

use crate::domain::{DishSnapshot, MealRecord, MealType, RecommendedDish, Recommendations};
use crate::window::DateWindow;
use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

/// How many dishes a single response carries.
pub const MAX_RECOMMENDATIONS: usize = 5;

const BASE_SCORE: f64 = 0.6;
const CUISINE_MATCH_BONUS: f64 = 0.3;
const LIGHT_MEAL_BONUS: f64 = 0.1;
const LIGHT_MEAL_CALORIES: i32 = 600;
const FALLBACK_SCORE: f64 = 0.5;
const FALLBACK_REASON: &str = "Popular dish to try";

/// What the user ate for one meal type inside the lookback window.
#[derive(Debug, Default)]
struct Preferences {
    dish_ids: HashMap<Uuid, usize>,
    cuisines: HashMap<String, usize>,
}

impl Preferences {
    fn from_history(meals: &[MealRecord], meal_type: MealType, window: &DateWindow) -> Self {
        let mut prefs = Preferences::default();
        for meal in meals
            .iter()
            .filter(|m| m.meal_type == meal_type && window.contains(&m.date))
        {
            *prefs.dish_ids.entry(meal.dish.id).or_default() += 1;
            *prefs.cuisines.entry(meal.dish.cuisine.clone()).or_default() += 1;
        }
        prefs
    }

    fn has_eaten(&self, dish_id: &Uuid) -> bool {
        self.dish_ids.contains_key(dish_id)
    }

    fn likes_cuisine(&self, cuisine: &str) -> bool {
        self.cuisines.contains_key(cuisine)
    }
}

/// Recommends up to `max_results` dishes from `candidates` for `meal_type` on `date`.
///
/// Dishes eaten for the same meal type within the lookback window are never
/// suggested. The rest are ranked by score, highest first, keeping catalog order
/// among equal scores. If nothing is left, the head of the catalog is returned
/// with a flat fallback score.
pub fn recommend(
    recent_meals: &[MealRecord],
    candidates: &[DishSnapshot],
    meal_type: MealType,
    date: NaiveDate,
    max_results: usize,
) -> Recommendations {
    let window = DateWindow::lookback(date);
    let prefs = Preferences::from_history(recent_meals, meal_type, &window);

    let mut scored: Vec<RecommendedDish> = candidates
        .iter()
        .filter(|dish| !prefs.has_eaten(&dish.id))
        .map(|dish| score_candidate(dish, &prefs))
        .collect();
    // `sort_by` is stable, so catalog order survives among equal scores.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_results);

    let recommendations = if scored.is_empty() {
        candidates
            .iter()
            .take(max_results)
            .map(|dish| to_recommended(dish, FALLBACK_SCORE, FALLBACK_REASON.to_string()))
            .collect()
    } else {
        scored
    };

    let has_history = recent_meals.iter().any(|m| window.contains(&m.date));
    let reason = if has_history {
        format!("Recommendations for {meal_type} based on your recent meal history")
    } else {
        format!("Popular {meal_type} recommendations to get you started")
    };

    Recommendations {
        recommendations,
        reason,
    }
}

fn score_candidate(dish: &DishSnapshot, prefs: &Preferences) -> RecommendedDish {
    let cuisine_match = prefs.likes_cuisine(&dish.cuisine);

    let mut score = BASE_SCORE;
    if cuisine_match {
        score += CUISINE_MATCH_BONUS;
    }
    if dish.calories > 0 && dish.calories < LIGHT_MEAL_CALORIES {
        score += LIGHT_MEAL_BONUS;
    }

    let reason = if cuisine_match {
        format!("You enjoyed {} cuisine recently", dish.cuisine)
    } else {
        "Trying something new based on your dietary patterns".to_string()
    };

    to_recommended(dish, score.clamp(0.0, 1.0), reason)
}

fn to_recommended(dish: &DishSnapshot, score: f64, reason: String) -> RecommendedDish {
    RecommendedDish {
        dish_id: dish.id,
        dish_name: dish.name.clone(),
        cuisine: dish.cuisine.clone(),
        calories: dish.calories,
        score,
        reason,
        image: dish.image.clone(),
        prep_time: dish.prep_time,
        difficulty: dish.difficulty.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dish, meal};

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 31).unwrap()
    }

    #[test]
    fn eaten_dishes_are_never_recommended() {
        let dosa = dish("Masala Dosa", "South Indian", 380);
        let idli = dish("Idli", "South Indian", 150);
        let paratha = dish("Aloo Paratha", "Punjabi", 620);
        let history = vec![meal(2024, 8, 20, MealType::Breakfast, &dosa)];
        let catalog = vec![dosa.clone(), idli.clone(), paratha.clone()];

        let result = recommend(&history, &catalog, MealType::Breakfast, target(), MAX_RECOMMENDATIONS);

        assert!(result.recommendations.iter().all(|r| r.dish_id != dosa.id));
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(
            result.reason,
            "Recommendations for breakfast based on your recent meal history"
        );
    }

    #[test]
    fn scores_combine_cuisine_and_light_meal_bonuses() {
        let dosa = dish("Masala Dosa", "South Indian", 380);
        let idli = dish("Idli", "South Indian", 150);
        let uttapam = dish("Uttapam", "South Indian", 700);
        let paratha = dish("Aloo Paratha", "Punjabi", 620);
        let poha = dish("Poha", "Maharashtrian", 250);
        let history = vec![meal(2024, 8, 30, MealType::Breakfast, &dosa)];
        let catalog = vec![paratha.clone(), poha.clone(), uttapam.clone(), idli.clone()];

        let result = recommend(&history, &catalog, MealType::Breakfast, target(), MAX_RECOMMENDATIONS);

        let ranked: Vec<_> = result
            .recommendations
            .iter()
            .map(|r| (r.dish_name.as_str(), r.score))
            .collect();
        assert_eq!(ranked[0].0, "Idli");
        assert!((ranked[0].1 - 1.0).abs() < 1e-9);
        assert_eq!(ranked[1].0, "Uttapam");
        assert!((ranked[1].1 - 0.9).abs() < 1e-9);
        assert_eq!(ranked[2].0, "Poha");
        assert!((ranked[2].1 - 0.7).abs() < 1e-9);
        assert_eq!(ranked[3], ("Aloo Paratha", 0.6));
        assert_eq!(result.recommendations[0].reason, "You enjoyed South Indian cuisine recently");
        assert_eq!(
            result.recommendations[3].reason,
            "Trying something new based on your dietary patterns"
        );
    }

    #[test]
    fn other_meal_types_do_not_exclude_or_boost() {
        let biryani = dish("Biryani", "Hyderabadi", 650);
        let history = vec![meal(2024, 8, 25, MealType::Dinner, &biryani)];

        let result = recommend(&history, &[biryani.clone()], MealType::Lunch, target(), MAX_RECOMMENDATIONS);

        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].dish_id, biryani.id);
        assert_eq!(result.recommendations[0].score, 0.6);
    }

    #[test]
    fn meals_outside_lookback_window_are_ignored() {
        let khichdi = dish("Khichdi", "Gujarati", 300);
        let history = vec![meal(2024, 7, 31, MealType::Dinner, &khichdi)];

        let result = recommend(&history, &[khichdi.clone()], MealType::Dinner, target(), MAX_RECOMMENDATIONS);

        assert_eq!(result.recommendations[0].dish_id, khichdi.id);
        assert_eq!(result.recommendations[0].reason, "Trying something new based on your dietary patterns");
        assert_eq!(result.reason, "Popular dinner recommendations to get you started");
    }

    #[test]
    fn falls_back_to_catalog_head_when_everything_was_eaten() {
        let catalog: Vec<_> = (0..7).map(|i| dish(&format!("Dish {i}"), "Bengali", 400)).collect();
        let history: Vec<_> = catalog
            .iter()
            .map(|d| meal(2024, 8, 15, MealType::Lunch, d))
            .collect();

        let result = recommend(&history, &catalog, MealType::Lunch, target(), MAX_RECOMMENDATIONS);

        assert_eq!(result.recommendations.len(), MAX_RECOMMENDATIONS);
        for (rec, dish) in result.recommendations.iter().zip(&catalog) {
            assert_eq!(rec.dish_id, dish.id);
            assert_eq!(rec.score, 0.5);
            assert_eq!(rec.reason, "Popular dish to try");
        }
    }

    #[test]
    fn results_are_capped_and_scores_bounded() {
        let catalog: Vec<_> = (0..9)
            .map(|i| dish(&format!("Dish {i}"), "Kerala", 100 * (i + 1)))
            .collect();

        let result = recommend(&[], &catalog, MealType::Snack, target(), MAX_RECOMMENDATIONS);

        assert_eq!(result.recommendations.len(), MAX_RECOMMENDATIONS);
        assert!(result
            .recommendations
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn empty_catalog_yields_no_recommendations() {
        let result = recommend(&[], &[], MealType::Breakfast, target(), MAX_RECOMMENDATIONS);
        assert!(result.recommendations.is_empty());
    }
}

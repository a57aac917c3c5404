//! Drives `InsightsService` end to end against an in-memory repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use meal_planner_core::{
    DishFilter, DishSnapshot, InsightsError, InsightsService, MealEntry, MealRepository, MealType,
    Nutrition, NutritionGoals, PortError, PortResult,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct InMemoryRepo {
    meals: Vec<(Uuid, MealEntry)>,
    dishes: Vec<DishSnapshot>,
    goals: Mutex<HashMap<Uuid, NutritionGoals>>,
    dish_lookups: Mutex<usize>,
    fail: bool,
}

#[async_trait]
impl MealRepository for InMemoryRepo {
    async fn meals_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PortResult<Vec<MealEntry>> {
        if self.fail {
            return Err(PortError::Unexpected("connection reset".to_string()));
        }
        Ok(self
            .meals
            .iter()
            .filter(|(owner, m)| *owner == user_id && m.date >= start && m.date <= end)
            .map(|(_, m)| m.clone())
            .collect())
    }

    async fn dishes_by_ids(&self, ids: &[Uuid]) -> PortResult<Vec<DishSnapshot>> {
        *self.dish_lookups.lock().unwrap() += 1;
        Ok(self
            .dishes
            .iter()
            .filter(|d| ids.contains(&d.id))
            .cloned()
            .collect())
    }

    async fn dish_catalog(
        &self,
        _filter: &DishFilter,
        page: u32,
        limit: u32,
    ) -> PortResult<Vec<DishSnapshot>> {
        let skip = ((page.max(1) - 1) * limit) as usize;
        Ok(self
            .dishes
            .iter()
            .skip(skip)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn nutrition_goals(&self, user_id: Uuid) -> PortResult<NutritionGoals> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or_default())
    }

    async fn update_nutrition_goals(
        &self,
        user_id: Uuid,
        goals: NutritionGoals,
    ) -> PortResult<NutritionGoals> {
        self.goals.lock().unwrap().insert(user_id, goals);
        Ok(goals)
    }
}

fn dish(name: &str, cuisine: &str, calories: i32, ingredients: &[&str]) -> DishSnapshot {
    DishSnapshot {
        id: Uuid::new_v4(),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        calories,
        nutrition: Nutrition {
            protein: 12,
            carbs: 30,
            fat: 8,
            fiber: 6,
            sugar: 3,
            sodium: 500,
        },
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        prep_time: 25,
        difficulty: "medium".to_string(),
        image: format!("/images/{}.jpg", name.to_lowercase().replace(' ', "-")),
    }
}

fn entry(date: DateTime<Utc>, meal_type: MealType, dish_id: Uuid) -> MealEntry {
    MealEntry {
        id: Uuid::new_v4(),
        date,
        meal_type,
        dish_id,
        notes: String::new(),
        rating: 4,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn analytics_skips_meals_with_deleted_dishes() {
    let user = Uuid::new_v4();
    let dal = dish("Dal Tadka", "North Indian", 230, &["lentils", "ghee", "onion"]);
    let deleted_dish = Uuid::new_v4();
    let repo = InMemoryRepo {
        meals: vec![
            (user, entry(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(), MealType::Breakfast, dal.id)),
            (user, entry(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(), MealType::Breakfast, dal.id)),
            (user, entry(Utc.with_ymd_and_hms(2024, 1, 2, 20, 0, 0).unwrap(), MealType::Dinner, dal.id)),
            (user, entry(Utc.with_ymd_and_hms(2024, 1, 2, 13, 0, 0).unwrap(), MealType::Lunch, deleted_dish)),
        ],
        dishes: vec![dal.clone()],
        ..InMemoryRepo::default()
    };
    let repo = Arc::new(repo);
    let service = InsightsService::new(repo.clone());

    let result = service.analytics(user, 2, day(2024, 1, 2)).await.unwrap();

    assert_eq!(result.total_meals, 3);
    assert_eq!(result.cuisine_distribution.get("North Indian"), Some(&3));
    assert_eq!(result.top_dishes[0].count, 3);
    assert_eq!(result.avg_calories_per_day, 345.0);
    assert!(result.meal_type_distribution.get("lunch").is_none());
    // Dishes are resolved in one batch, not per meal.
    assert_eq!(*repo.dish_lookups.lock().unwrap(), 1);
}

#[tokio::test]
async fn analytics_window_excludes_older_meals() {
    let user = Uuid::new_v4();
    let poha = dish("Poha", "Maharashtrian", 250, &["poha"]);
    let repo = InMemoryRepo {
        meals: vec![
            (user, entry(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(), MealType::Breakfast, poha.id)),
            (user, entry(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap(), MealType::Breakfast, poha.id)),
        ],
        dishes: vec![poha],
        ..InMemoryRepo::default()
    };
    let service = InsightsService::new(Arc::new(repo));

    let result = service.analytics(user, 7, day(2024, 3, 10)).await.unwrap();

    assert_eq!(result.total_meals, 1);
    assert_eq!(result.weekly_trend.len(), 1);
}

#[tokio::test]
async fn nutrition_progress_uses_stored_goals_with_defaults() {
    let user = Uuid::new_v4();
    let thali = dish("Thali", "Gujarati", 900, &["rice", "dal"]);
    let repo = InMemoryRepo {
        meals: vec![(
            user,
            entry(Utc.with_ymd_and_hms(2024, 5, 5, 13, 0, 0).unwrap(), MealType::Lunch, thali.id),
        )],
        dishes: vec![thali],
        ..InMemoryRepo::default()
    };
    let service = InsightsService::new(Arc::new(repo));

    service
        .update_nutrition_goals(user, NutritionGoals::from_zero_sentinel(900, 0, 0, 0, 0, 0))
        .await
        .unwrap();
    let progress = service.nutrition_progress(user, 7, day(2024, 5, 5)).await.unwrap();

    assert_eq!(progress.goals.daily_calories, 900);
    assert_eq!(progress.goals.protein, 150);
    assert_eq!(progress.summary.calorie_goal_met, 1);
    assert_eq!(progress.summary.protein_goal_met, 0);
    assert_eq!(progress.summary.goal_percentage, 100.0);
}

#[tokio::test]
async fn shopping_list_counts_ingredients_across_meals() {
    let user = Uuid::new_v4();
    let pulao = dish("Veg Pulao", "North Indian", 350, &["rice", "peas", "ghee"]);
    let jeera = dish("Jeera Rice", "North Indian", 300, &["rice", "cumin"]);
    let repo = InMemoryRepo {
        meals: vec![
            (user, entry(Utc.with_ymd_and_hms(2024, 7, 1, 13, 0, 0).unwrap(), MealType::Lunch, pulao.id)),
            (user, entry(Utc.with_ymd_and_hms(2024, 7, 2, 20, 0, 0).unwrap(), MealType::Dinner, jeera.id)),
            (user, entry(Utc.with_ymd_and_hms(2024, 7, 3, 23, 30, 0).unwrap(), MealType::Dinner, pulao.id)),
            (user, entry(Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap(), MealType::Breakfast, pulao.id)),
        ],
        dishes: vec![pulao, jeera],
        ..InMemoryRepo::default()
    };
    let service = InsightsService::new(Arc::new(repo));

    let list = service
        .shopping_list(user, day(2024, 7, 1), day(2024, 7, 3))
        .await
        .unwrap();

    let rice = list.ingredients.iter().find(|i| i.name == "rice").unwrap();
    assert_eq!(rice.count, 3);
    assert_eq!(list.ingredients.iter().filter(|i| i.name == "rice").count(), 1);
    assert_eq!(list.total_items, 4);
    assert_eq!(list.date_range, "2024-07-01 to 2024-07-03");
}

#[tokio::test]
async fn recommendations_exclude_dishes_eaten_for_that_meal() {
    let user = Uuid::new_v4();
    let dosa = dish("Masala Dosa", "South Indian", 380, &["rice", "potato"]);
    let idli = dish("Idli", "South Indian", 150, &["rice"]);
    let chole = dish("Chole Bhature", "Punjabi", 700, &["chickpeas", "flour"]);
    let repo = InMemoryRepo {
        meals: vec![(
            user,
            entry(Utc.with_ymd_and_hms(2024, 8, 28, 8, 0, 0).unwrap(), MealType::Breakfast, dosa.id),
        )],
        dishes: vec![dosa.clone(), chole.clone(), idli.clone()],
        ..InMemoryRepo::default()
    };
    let service = InsightsService::new(Arc::new(repo));

    let recs = service
        .recommendations(user, MealType::Breakfast, day(2024, 8, 31))
        .await
        .unwrap();

    let ids: Vec<_> = recs.recommendations.iter().map(|r| r.dish_id).collect();
    assert_eq!(ids, vec![idli.id, chole.id]);
    assert!(recs.reason.contains("based on your recent meal history"));
}

#[tokio::test]
async fn recommendations_candidate_pool_is_capped() {
    let user = Uuid::new_v4();
    let dishes: Vec<_> = (0..4)
        .map(|i| dish(&format!("Dish {i}"), "Bengali", 800, &[]))
        .collect();
    let repo = InMemoryRepo {
        dishes: dishes.clone(),
        ..InMemoryRepo::default()
    };
    let service = InsightsService::new(Arc::new(repo)).with_catalog_sample_size(2);

    let recs = service
        .recommendations(user, MealType::Snack, day(2024, 8, 31))
        .await
        .unwrap();

    assert_eq!(recs.recommendations.len(), 2);
    assert_eq!(recs.reason, "Popular snack recommendations to get you started");
}

#[tokio::test]
async fn upstream_failures_propagate_without_partial_results() {
    let repo = InMemoryRepo {
        fail: true,
        ..InMemoryRepo::default()
    };
    let service = InsightsService::new(Arc::new(repo));

    let err = service
        .analytics(Uuid::new_v4(), 30, day(2024, 1, 31))
        .await
        .unwrap_err();

    assert!(matches!(err, InsightsError::Upstream { operation: "analytics", .. }));
    assert_eq!(err.to_string(), "failed to get analytics");
}

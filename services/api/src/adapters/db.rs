//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `MealRepository` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_planner_core::domain::{
    DishFilter, DishSnapshot, MealEntry, MealType, Nutrition, NutritionGoals,
};
use meal_planner_core::ports::{MealRepository, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `MealRepository` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct MealRow {
    id: Uuid,
    date: DateTime<Utc>,
    meal_type: String,
    dish_id: Uuid,
    notes: Option<String>,
    rating: i16,
}
impl MealRow {
    fn to_domain(self) -> PortResult<MealEntry> {
        let meal_type = self
            .meal_type
            .parse::<MealType>()
            .map_err(|e| PortError::Unexpected(format!("Meal {}: {}", self.id, e)))?;
        Ok(MealEntry {
            id: self.id,
            date: self.date,
            meal_type,
            dish_id: self.dish_id,
            notes: self.notes.unwrap_or_default(),
            rating: self.rating.clamp(0, 5) as u8,
        })
    }
}

#[derive(FromRow)]
struct DishRow {
    id: Uuid,
    name: String,
    cuisine: String,
    calories: i32,
    protein: i32,
    carbs: i32,
    fat: i32,
    fiber: i32,
    sugar: i32,
    sodium: i32,
    ingredients: Vec<String>,
    prep_time: i32,
    difficulty: String,
    image: Option<String>,
}
impl DishRow {
    fn to_domain(self) -> DishSnapshot {
        DishSnapshot {
            id: self.id,
            name: self.name,
            cuisine: self.cuisine,
            calories: self.calories,
            nutrition: Nutrition {
                protein: self.protein,
                carbs: self.carbs,
                fat: self.fat,
                fiber: self.fiber,
                sugar: self.sugar,
                sodium: self.sodium,
            },
            ingredients: self.ingredients,
            prep_time: self.prep_time,
            difficulty: self.difficulty,
            image: self.image.unwrap_or_default(),
        }
    }
}

#[derive(FromRow)]
struct GoalsRow {
    daily_calories: Option<i32>,
    protein: Option<i32>,
    carbs: Option<i32>,
    fat: Option<i32>,
    fiber: Option<i32>,
    sodium: Option<i32>,
}
impl GoalsRow {
    fn to_domain(self) -> NutritionGoals {
        NutritionGoals {
            daily_calories: self.daily_calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            sodium: self.sodium,
        }
    }
}

const DISH_COLUMNS: &str = "id, name, cuisine, calories, protein, carbs, fat, fiber, sugar, \
     sodium, ingredients, prep_time, difficulty, image";

//=========================================================================================
// `MealRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl MealRepository for DbAdapter {
    async fn meals_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PortResult<Vec<MealEntry>> {
        let records = sqlx::query_as::<_, MealRow>(
            "SELECT id, date, meal_type, dish_id, notes, rating FROM meals \
             WHERE user_id = $1 AND date >= $2 AND date <= $3 \
             ORDER BY date ASC, meal_type ASC",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn dishes_by_ids(&self, ids: &[Uuid]) -> PortResult<Vec<DishSnapshot>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = ANY($1)");
        let records = sqlx::query_as::<_, DishRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn dish_catalog(
        &self,
        filter: &DishFilter,
        page: u32,
        limit: u32,
    ) -> PortResult<Vec<DishSnapshot>> {
        let offset = i64::from(page.max(1) - 1) * i64::from(limit);
        let sql = format!(
            "SELECT {DISH_COLUMNS} FROM dishes \
             WHERE ($1::text IS NULL OR cuisine = $1) \
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
             ORDER BY name ASC, id ASC \
             LIMIT $3 OFFSET $4"
        );
        let records = sqlx::query_as::<_, DishRow>(&sql)
            .bind(filter.cuisine.as_deref())
            .bind(filter.search.as_deref())
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn nutrition_goals(&self, user_id: Uuid) -> PortResult<NutritionGoals> {
        let record = sqlx::query_as::<_, GoalsRow>(
            "SELECT daily_calories, protein, carbs, fat, fiber, sodium \
             FROM nutrition_goals WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(GoalsRow::to_domain).unwrap_or_default())
    }

    async fn update_nutrition_goals(
        &self,
        user_id: Uuid,
        goals: NutritionGoals,
    ) -> PortResult<NutritionGoals> {
        let record = sqlx::query_as::<_, GoalsRow>(
            "INSERT INTO nutrition_goals \
                 (user_id, daily_calories, protein, carbs, fat, fiber, sodium, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW()) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 daily_calories = EXCLUDED.daily_calories, \
                 protein = EXCLUDED.protein, \
                 carbs = EXCLUDED.carbs, \
                 fat = EXCLUDED.fat, \
                 fiber = EXCLUDED.fiber, \
                 sodium = EXCLUDED.sodium, \
                 updated_at = NOW() \
             RETURNING daily_calories, protein, carbs, fat, fiber, sodium",
        )
        .bind(user_id)
        .bind(goals.daily_calories)
        .bind(goals.protein)
        .bind(goals.carbs)
        .bind(goals.fat)
        .bind(goals.fiber)
        .bind(goals.sodium)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }
}

//! services/api/src/web/protocol.rs
//!
//! Defines the JSON shapes exchanged with the client. Every successful response is
//! wrapped in `{ "success": true, "data": ... }`, every failure in
//! `{ "success": false, "error": "..." }`.

use chrono::NaiveDate;
use meal_planner_core::domain::{
    AnalyticsResult, DailyMealCount, DailyNutrition, DailyTargets, DishPopularity,
    IngredientItem, NutritionAnalytics, NutritionGoals, NutritionProgress, ProgressSummary,
    RecommendedDish, Recommendations, ShoppingList,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

//=========================================================================================
// Envelopes
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

//=========================================================================================
// Query Parameters
//=========================================================================================
// Raw strings so that the handlers decide how malformed values are treated.
//=========================================================================================

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// Number of days to look back over.
    pub period: Option<String>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ShoppingListQuery {
    /// First day, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct RecommendationsQuery {
    /// One of `breakfast`, `lunch`, `dinner`, `snack`.
    pub meal_type: Option<String>,
    /// Target day, `YYYY-MM-DD`.
    pub date: Option<String>,
}

//=========================================================================================
// Analytics
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_meals: usize,
    pub avg_calories_per_day: f64,
    pub meal_type_distribution: BTreeMap<String, usize>,
    pub cuisine_distribution: BTreeMap<String, usize>,
    pub top_dishes: Vec<DishPopularityDto>,
    pub nutrition_summary: NutritionAnalyticsDto,
    pub weekly_trend: Vec<DailyMealCountDto>,
    pub period: u32,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishPopularityDto {
    pub dish_id: Uuid,
    pub dish_name: String,
    pub count: usize,
    pub calories: i32,
    pub cuisine: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionAnalyticsDto {
    pub total_calories: i64,
    pub avg_calories: f64,
    pub total_protein: i64,
    pub total_carbs: i64,
    pub total_fat: i64,
    pub total_fiber: i64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealCountDto {
    pub date: NaiveDate,
    pub meal_count: usize,
    pub calories: i64,
}

impl From<AnalyticsResult> for AnalyticsResponse {
    fn from(r: AnalyticsResult) -> Self {
        Self {
            total_meals: r.total_meals,
            avg_calories_per_day: r.avg_calories_per_day,
            meal_type_distribution: r.meal_type_distribution,
            cuisine_distribution: r.cuisine_distribution,
            top_dishes: r.top_dishes.into_iter().map(Into::into).collect(),
            nutrition_summary: r.nutrition_summary.into(),
            weekly_trend: r.weekly_trend.into_iter().map(Into::into).collect(),
            period: r.period,
        }
    }
}

impl From<DishPopularity> for DishPopularityDto {
    fn from(d: DishPopularity) -> Self {
        Self {
            dish_id: d.dish_id,
            dish_name: d.dish_name,
            count: d.count,
            calories: d.calories,
            cuisine: d.cuisine,
        }
    }
}

impl From<NutritionAnalytics> for NutritionAnalyticsDto {
    fn from(n: NutritionAnalytics) -> Self {
        Self {
            total_calories: n.total_calories,
            avg_calories: n.avg_calories,
            total_protein: n.total_protein,
            total_carbs: n.total_carbs,
            total_fat: n.total_fat,
            total_fiber: n.total_fiber,
            avg_protein: n.avg_protein,
            avg_carbs: n.avg_carbs,
            avg_fat: n.avg_fat,
        }
    }
}

impl From<DailyMealCount> for DailyMealCountDto {
    fn from(d: DailyMealCount) -> Self {
        Self {
            date: d.date,
            meal_count: d.meal_count,
            calories: d.calories,
        }
    }
}

//=========================================================================================
// Nutrition Progress and Goals
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionProgressResponse {
    pub period: u32,
    pub progress: Vec<DailyNutritionDto>,
    pub goals: NutritionGoalsDto,
    pub summary: ProgressSummaryDto,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutritionDto {
    pub date: NaiveDate,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub fiber: i64,
    pub sodium: i64,
    pub meal_count: usize,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummaryDto {
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
    pub avg_fiber: f64,
    pub total_days: usize,
    pub calorie_goal_met: usize,
    pub protein_goal_met: usize,
    pub goal_percentage: f64,
}

/// Resolved daily targets; unset goals already carry their defaults.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionGoalsDto {
    pub daily_calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub fiber: i32,
    pub sodium: i32,
}

/// New goals. Zero or an omitted field means "use the default".
#[derive(Deserialize, ToSchema, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionGoalsRequest {
    pub daily_calories: i32,
    pub daily_protein: i32,
    pub daily_carbs: i32,
    pub daily_fat: i32,
    pub daily_fiber: i32,
    pub daily_sodium: i32,
}

impl NutritionGoalsRequest {
    /// Name of the first negative field, if any.
    pub fn first_negative(&self) -> Option<&'static str> {
        [
            ("dailyCalories", self.daily_calories),
            ("dailyProtein", self.daily_protein),
            ("dailyCarbs", self.daily_carbs),
            ("dailyFat", self.daily_fat),
            ("dailyFiber", self.daily_fiber),
            ("dailySodium", self.daily_sodium),
        ]
        .into_iter()
        .find(|(_, v)| *v < 0)
        .map(|(name, _)| name)
    }

    pub fn to_goals(&self) -> NutritionGoals {
        NutritionGoals::from_zero_sentinel(
            self.daily_calories,
            self.daily_protein,
            self.daily_carbs,
            self.daily_fat,
            self.daily_fiber,
            self.daily_sodium,
        )
    }
}

impl From<NutritionProgress> for NutritionProgressResponse {
    fn from(p: NutritionProgress) -> Self {
        Self {
            period: p.period,
            progress: p.progress.into_iter().map(Into::into).collect(),
            goals: p.goals.into(),
            summary: p.summary.into(),
        }
    }
}

impl From<DailyNutrition> for DailyNutritionDto {
    fn from(d: DailyNutrition) -> Self {
        Self {
            date: d.date,
            calories: d.calories,
            protein: d.protein,
            carbs: d.carbs,
            fat: d.fat,
            fiber: d.fiber,
            sodium: d.sodium,
            meal_count: d.meal_count,
        }
    }
}

impl From<ProgressSummary> for ProgressSummaryDto {
    fn from(s: ProgressSummary) -> Self {
        Self {
            avg_calories: s.avg_calories,
            avg_protein: s.avg_protein,
            avg_carbs: s.avg_carbs,
            avg_fat: s.avg_fat,
            avg_fiber: s.avg_fiber,
            total_days: s.total_days,
            calorie_goal_met: s.calorie_goal_met,
            protein_goal_met: s.protein_goal_met,
            goal_percentage: s.goal_percentage,
        }
    }
}

impl From<DailyTargets> for NutritionGoalsDto {
    fn from(t: DailyTargets) -> Self {
        Self {
            daily_calories: t.daily_calories,
            protein: t.protein,
            carbs: t.carbs,
            fat: t.fat,
            fiber: t.fiber,
            sodium: t.sodium,
        }
    }
}

//=========================================================================================
// Shopping List
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResponse {
    pub ingredients: Vec<IngredientItemDto>,
    pub total_items: usize,
    pub date_range: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientItemDto {
    pub name: String,
    pub quantity: String,
    pub category: String,
    /// Number of meals that use this ingredient.
    pub count: usize,
}

impl From<ShoppingList> for ShoppingListResponse {
    fn from(l: ShoppingList) -> Self {
        Self {
            ingredients: l.ingredients.into_iter().map(Into::into).collect(),
            total_items: l.total_items,
            date_range: l.date_range,
        }
    }
}

impl From<IngredientItem> for IngredientItemDto {
    fn from(i: IngredientItem) -> Self {
        Self {
            name: i.name,
            quantity: i.quantity,
            category: i.category.as_str().to_string(),
            count: i.count,
        }
    }
}

//=========================================================================================
// Recommendations
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendedDishDto>,
    pub reason: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedDishDto {
    pub dish_id: Uuid,
    pub dish_name: String,
    pub cuisine: String,
    pub calories: i32,
    pub score: f64,
    pub reason: String,
    pub image: String,
    pub prep_time: i32,
    pub difficulty: String,
}

impl From<Recommendations> for RecommendationsResponse {
    fn from(r: Recommendations) -> Self {
        Self {
            recommendations: r.recommendations.into_iter().map(Into::into).collect(),
            reason: r.reason,
        }
    }
}

impl From<RecommendedDish> for RecommendedDishDto {
    fn from(d: RecommendedDish) -> Self {
        Self {
            dish_id: d.dish_id,
            dish_name: d.dish_name,
            cuisine: d.cuisine,
            calories: d.calories,
            score: d.score,
            reason: d.reason,
            image: d.image,
            prep_time: d.prep_time,
            difficulty: d.difficulty,
        }
    }
}

//=========================================================================================
// Health
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

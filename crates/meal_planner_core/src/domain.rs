//! crates/meal_planner_core/src/domain.rs
//!
//! Defines the pure, core data structures for the meal planner.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// Meals and Dishes
//=========================================================================================

/// The slot of the day a meal was eaten in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown meal type: '{0}'")]
pub struct UnknownMealType(pub String);

impl FromStr for MealType {
    type Err = UnknownMealType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownMealType(s.to_string()))
    }
}

/// Per-dish nutrient amounts. Grams, except sodium in milligrams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nutrition {
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub fiber: i32,
    pub sugar: i32,
    pub sodium: i32,
}

/// A catalog dish as it looked at the time of the query.
#[derive(Debug, Clone, PartialEq)]
pub struct DishSnapshot {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub calories: i32,
    pub nutrition: Nutrition,
    pub ingredients: Vec<String>,
    /// Minutes.
    pub prep_time: i32,
    pub difficulty: String,
    pub image: String,
}

/// A persisted meal. It only references its dish by id.
#[derive(Debug, Clone, PartialEq)]
pub struct MealEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub meal_type: MealType,
    pub dish_id: Uuid,
    pub notes: String,
    /// 0 means "not rated".
    pub rating: u8,
}

/// A meal entry with its dish resolved at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    pub meal_id: Uuid,
    pub date: DateTime<Utc>,
    pub meal_type: MealType,
    pub dish: DishSnapshot,
    pub notes: String,
    pub rating: u8,
}

impl MealRecord {
    /// The calendar day this meal is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Narrowing options for a catalog read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishFilter {
    pub cuisine: Option<String>,
    pub search: Option<String>,
}

//=========================================================================================
// Nutrition Goals
//=========================================================================================

/// A user's daily targets as stored. `None` means the user never set the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NutritionGoals {
    pub daily_calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
    pub fiber: Option<i32>,
    pub sodium: Option<i32>,
}

impl NutritionGoals {
    /// Builds goals from the zero-means-unset wire representation.
    pub fn from_zero_sentinel(
        daily_calories: i32,
        protein: i32,
        carbs: i32,
        fat: i32,
        fiber: i32,
        sodium: i32,
    ) -> Self {
        let set = |v: i32| (v > 0).then_some(v);
        Self {
            daily_calories: set(daily_calories),
            protein: set(protein),
            carbs: set(carbs),
            fat: set(fat),
            fiber: set(fiber),
            sodium: set(sodium),
        }
    }

    /// Fills every unset field from [`DailyTargets::DEFAULT`].
    pub fn resolve(&self) -> DailyTargets {
        let d = DailyTargets::DEFAULT;
        DailyTargets {
            daily_calories: self.daily_calories.unwrap_or(d.daily_calories),
            protein: self.protein.unwrap_or(d.protein),
            carbs: self.carbs.unwrap_or(d.carbs),
            fat: self.fat.unwrap_or(d.fat),
            fiber: self.fiber.unwrap_or(d.fiber),
            sodium: self.sodium.unwrap_or(d.sodium),
        }
    }
}

/// Concrete daily targets with no unset fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTargets {
    pub daily_calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub fiber: i32,
    pub sodium: i32,
}

impl DailyTargets {
    pub const DEFAULT: DailyTargets = DailyTargets {
        daily_calories: 2000,
        protein: 150,
        carbs: 250,
        fat: 65,
        fiber: 25,
        sodium: 2300,
    };
}

impl Default for DailyTargets {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//=========================================================================================
// Analytics
//=========================================================================================

/// Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResult {
    pub total_meals: usize,
    pub avg_calories_per_day: f64,
    pub meal_type_distribution: BTreeMap<String, usize>,
    pub cuisine_distribution: BTreeMap<String, usize>,
    pub top_dishes: Vec<DishPopularity>,
    pub nutrition_summary: NutritionAnalytics,
    /// One entry per day that has meals, oldest first.
    pub weekly_trend: Vec<DailyMealCount>,
    pub period: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DishPopularity {
    pub dish_id: Uuid,
    pub dish_name: String,
    pub count: usize,
    pub calories: i32,
    pub cuisine: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionAnalytics {
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_carbs: i64,
    pub total_fat: i64,
    pub total_fiber: i64,
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMealCount {
    pub date: NaiveDate,
    pub meal_count: usize,
    pub calories: i64,
}

//=========================================================================================
// Nutrition Progress
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionProgress {
    pub period: u32,
    /// One entry per day that has meals, oldest first.
    pub progress: Vec<DailyNutrition>,
    pub goals: DailyTargets,
    pub summary: ProgressSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub fiber: i64,
    pub sodium: i64,
    pub meal_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSummary {
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

//=========================================================================================
// Shopping List
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingList {
    pub ingredients: Vec<IngredientItem>,
    pub total_items: usize,
    /// `"YYYY-MM-DD to YYYY-MM-DD"`, for display only.
    pub date_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientItem {
    pub name: String,
    pub quantity: String,
    pub category: IngredientCategory,
    /// Number of meals in the range that listed this ingredient.
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IngredientCategory {
    Grains,
    Vegetables,
    Protein,
    Dairy,
    Pantry,
    Others,
}

impl IngredientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Grains => "Grains",
            IngredientCategory::Vegetables => "Vegetables",
            IngredientCategory::Protein => "Protein",
            IngredientCategory::Dairy => "Dairy",
            IngredientCategory::Pantry => "Pantry",
            IngredientCategory::Others => "Others",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Recommendations
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub recommendations: Vec<RecommendedDish>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedDish {
    pub dish_id: Uuid,
    pub dish_name: String,
    pub cuisine: String,
    pub calories: i32,
    /// Always within `[0.0, 1.0]`.
    pub score: f64,
    pub reason: String,
    pub image: String,
    pub prep_time: i32,
    pub difficulty: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_parses_lowercase_names_only() {
        assert_eq!("dinner".parse::<MealType>(), Ok(MealType::Dinner));
        assert!("Dinner".parse::<MealType>().is_err());
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn unset_goal_fields_take_defaults() {
        let goals = NutritionGoals {
            daily_calories: Some(1800),
            ..NutritionGoals::default()
        };
        let targets = goals.resolve();
        assert_eq!(targets.daily_calories, 1800);
        assert_eq!(targets.protein, 150);
        assert_eq!(targets.sodium, 2300);
    }

    #[test]
    fn zero_sentinel_means_unset() {
        let goals = NutritionGoals::from_zero_sentinel(0, 120, 0, 0, 30, 0);
        assert_eq!(goals.daily_calories, None);
        assert_eq!(goals.protein, Some(120));
        assert_eq!(goals.fiber, Some(30));
        assert_eq!(goals.resolve().daily_calories, 2000);
    }
}

pub mod analytics;
pub mod domain;
pub mod join;
pub mod nutrition;
pub mod ports;
pub mod recommendations;
pub mod service;
pub mod shopping;
pub mod window;

#[cfg(test)]
mod test_support;

pub use domain::{
    AnalyticsResult, DailyMealCount, DailyNutrition, DailyTargets, DishFilter, DishPopularity,
    DishSnapshot, IngredientCategory, IngredientItem, MealEntry, MealRecord, MealType, Nutrition,
    NutritionAnalytics, NutritionGoals, NutritionProgress, ProgressSummary, RecommendedDish,
    Recommendations, ShoppingList,
};
pub use ports::{MealRepository, PortError, PortResult};
pub use service::{InsightsError, InsightsResult, InsightsService};

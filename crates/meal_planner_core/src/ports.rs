//! crates/meal_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) the insights engine depends on.
//! The engine itself never touches storage; everything it reads arrives
//! through these ports.

use crate::domain::{DishFilter, DishSnapshot, MealEntry, NutritionGoals};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait MealRepository: Send + Sync {
    // --- Meals ---
    /// Meals of `user_id` whose timestamp lies in `[start, end]`, oldest first.
    async fn meals_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PortResult<Vec<MealEntry>>;

    // --- Dishes ---
    /// Resolves a set of dish ids in one round trip. Unknown ids are simply absent.
    async fn dishes_by_ids(&self, ids: &[Uuid]) -> PortResult<Vec<DishSnapshot>>;

    /// One page of the catalog in its natural order. `page` is 1-based.
    async fn dish_catalog(
        &self,
        filter: &DishFilter,
        page: u32,
        limit: u32,
    ) -> PortResult<Vec<DishSnapshot>>;

    // --- Nutrition Goals ---
    /// Stored goals; a user who never set any gets `NutritionGoals::default()`.
    async fn nutrition_goals(&self, user_id: Uuid) -> PortResult<NutritionGoals>;

    async fn update_nutrition_goals(
        &self,
        user_id: Uuid,
        goals: NutritionGoals,
    ) -> PortResult<NutritionGoals>;
}

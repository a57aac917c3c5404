//! crates/meal_planner_core/src/service.rs
//!
//! Request-level orchestration: fetch once through the repository port, join,
//! then hand the in-memory records to the matching reducer.

use crate::analytics;
use crate::domain::{
    AnalyticsResult, DailyTargets, DishFilter, MealRecord, MealType, NutritionGoals,
    NutritionProgress, Recommendations, ShoppingList,
};
use crate::join::{distinct_dish_ids, join_meals};
use crate::nutrition;
use crate::ports::{MealRepository, PortError};
use crate::recommendations::{self, MAX_RECOMMENDATIONS};
use crate::shopping;
use crate::window::DateWindow;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

/// Catalog entries considered as recommendation candidates by default.
pub const DEFAULT_CATALOG_SAMPLE_SIZE: u32 = 20;

#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    /// A read or write through the repository failed. Never retried.
    #[error("failed to get {operation}")]
    Upstream {
        operation: &'static str,
        #[source]
        source: PortError,
    },
}

pub type InsightsResult<T> = Result<T, InsightsError>;

/// Runs the insight reducers for one user at a time.
#[derive(Clone)]
pub struct InsightsService {
    repo: Arc<dyn MealRepository>,
    catalog_sample_size: u32,
}

impl InsightsService {
    pub fn new(repo: Arc<dyn MealRepository>) -> Self {
        Self {
            repo,
            catalog_sample_size: DEFAULT_CATALOG_SAMPLE_SIZE,
        }
    }

    pub fn with_catalog_sample_size(mut self, size: u32) -> Self {
        self.catalog_sample_size = size.max(1);
        self
    }

    /// Analytics over the `period` days ending with `today`.
    pub async fn analytics(
        &self,
        user_id: Uuid,
        period: u32,
        today: NaiveDate,
    ) -> InsightsResult<AnalyticsResult> {
        const OP: &str = "analytics";
        let window = DateWindow::trailing(today, period);
        let meals = self.joined_meals(user_id, &window, OP).await?;
        Ok(analytics::analyze(&meals, period))
    }

    /// Daily nutrition against the user's goals over the `period` days ending with `today`.
    pub async fn nutrition_progress(
        &self,
        user_id: Uuid,
        period: u32,
        today: NaiveDate,
    ) -> InsightsResult<NutritionProgress> {
        const OP: &str = "nutrition progress";
        let goals = self.nutrition_goals(user_id).await?;
        let window = DateWindow::trailing(today, period);
        let meals = self.joined_meals(user_id, &window, OP).await?;
        Ok(nutrition::progress(&meals, goals, period))
    }

    /// Ingredients needed for the meals logged from `start` through `end`.
    pub async fn shopping_list(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InsightsResult<ShoppingList> {
        const OP: &str = "meals for shopping list";
        let window = DateWindow::new(start, end);
        let meals = self.joined_meals(user_id, &window, OP).await?;
        Ok(shopping::build_list(&meals, start, end))
    }

    /// Dishes to try for `meal_type` on `date`.
    pub async fn recommendations(
        &self,
        user_id: Uuid,
        meal_type: MealType,
        date: NaiveDate,
    ) -> InsightsResult<Recommendations> {
        const OP: &str = "recommendations";
        let window = DateWindow::lookback(date);
        let recent = self.joined_meals(user_id, &window, OP).await?;
        let candidates = self
            .repo
            .dish_catalog(&DishFilter::default(), 1, self.catalog_sample_size)
            .await
            .map_err(|e| upstream(OP, user_id, e))?;

        debug!(
            %user_id,
            meal_type = %meal_type,
            recent = recent.len(),
            candidates = candidates.len(),
            "Scoring recommendation candidates"
        );
        Ok(recommendations::recommend(
            &recent,
            &candidates,
            meal_type,
            date,
            MAX_RECOMMENDATIONS,
        ))
    }

    /// The user's goals with defaults filled in.
    pub async fn nutrition_goals(&self, user_id: Uuid) -> InsightsResult<DailyTargets> {
        let goals = self
            .repo
            .nutrition_goals(user_id)
            .await
            .map_err(|e| upstream("nutrition goals", user_id, e))?;
        Ok(goals.resolve())
    }

    /// Stores `goals` as given and returns them with defaults filled in.
    pub async fn update_nutrition_goals(
        &self,
        user_id: Uuid,
        goals: NutritionGoals,
    ) -> InsightsResult<DailyTargets> {
        let stored = self
            .repo
            .update_nutrition_goals(user_id, goals)
            .await
            .map_err(|e| upstream("updated nutrition goals", user_id, e))?;
        Ok(stored.resolve())
    }

    /// Meals in `window` with dishes resolved by a single batch lookup.
    async fn joined_meals(
        &self,
        user_id: Uuid,
        window: &DateWindow,
        operation: &'static str,
    ) -> InsightsResult<Vec<MealRecord>> {
        let entries = self
            .repo
            .meals_in_range(user_id, window.start(), window.end())
            .await
            .map_err(|e| upstream(operation, user_id, e))?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let dishes = self
            .repo
            .dishes_by_ids(&distinct_dish_ids(&entries))
            .await
            .map_err(|e| upstream(operation, user_id, e))?;

        let outcome = join_meals(entries, dishes);
        debug!(
            %user_id,
            joined = outcome.records.len(),
            skipped = outcome.skipped,
            "Joined meals with dishes"
        );
        Ok(outcome.records)
    }
}

fn upstream(operation: &'static str, user_id: Uuid, source: PortError) -> InsightsError {
    error!(%user_id, error = %source, "Failed to get {}", operation);
    InsightsError::Upstream { operation, source }
}

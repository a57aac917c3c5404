//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use meal_planner_core::ports::MealRepository;
use meal_planner_core::InsightsService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub insights: InsightsService,
}

impl AppState {
    /// Wires the insights service to a repository implementation.
    pub fn new(repo: Arc<dyn MealRepository>, catalog_sample_size: u32) -> Self {
        Self {
            insights: InsightsService::new(repo).with_catalog_sample_size(catalog_sample_size),
        }
    }
}

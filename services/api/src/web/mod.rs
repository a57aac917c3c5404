pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

pub use middleware::require_user;
pub use rest::{
    analytics_handler, get_nutrition_goals_handler, health_handler, nutrition_progress_handler,
    recommendations_handler, shopping_list_handler, update_nutrition_goals_handler,
};

use axum::{middleware as axum_middleware, routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the API router. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Protected routes (user id required)
    let protected_routes = Router::new()
        .route("/api/analytics/meals", get(analytics_handler))
        .route("/api/nutrition/progress", get(nutrition_progress_handler))
        .route(
            "/api/nutrition/goals",
            get(get_nutrition_goals_handler).put(update_nutrition_goals_handler),
        )
        .route("/api/shopping-list", get(shopping_list_handler))
        .route("/api/recommendations", get(recommendations_handler))
        .layer(axum_middleware::from_fn(require_user));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

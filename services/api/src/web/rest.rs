//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    AnalyticsResponse, ApiResponse, DailyMealCountDto, DailyNutritionDto, DishPopularityDto,
    ErrorResponse, HealthResponse, IngredientItemDto, NutritionAnalyticsDto, NutritionGoalsDto,
    NutritionGoalsRequest, NutritionProgressResponse, PeriodQuery, ProgressSummaryDto,
    RecommendationsQuery, RecommendationsResponse, RecommendedDishDto, ShoppingListQuery,
    ShoppingListResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{NaiveDate, Utc};
use meal_planner_core::{InsightsError, MealType};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        analytics_handler,
        nutrition_progress_handler,
        get_nutrition_goals_handler,
        update_nutrition_goals_handler,
        shopping_list_handler,
        recommendations_handler,
        health_handler,
    ),
    components(
        schemas(
            ErrorResponse, AnalyticsResponse, DishPopularityDto, NutritionAnalyticsDto,
            DailyMealCountDto, NutritionProgressResponse, DailyNutritionDto, ProgressSummaryDto,
            NutritionGoalsDto, NutritionGoalsRequest, ShoppingListResponse, IngredientItemDto,
            RecommendationsResponse, RecommendedDishDto, HealthResponse
        )
    ),
    tags(
        (name = "Meal Planner API", description = "Analytics, nutrition progress, shopping lists and recommendations over a user's meal history.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Request Parsing Helpers
//=========================================================================================

pub const DEFAULT_ANALYTICS_PERIOD: u32 = 30;
pub const MAX_ANALYTICS_PERIOD: u32 = 365;
pub const DEFAULT_PROGRESS_PERIOD: u32 = 7;

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn internal(err: InsightsError) -> HandlerError {
    error!("Request failed: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.to_string())),
    )
}

/// Out-of-range or unparsable periods fall back to the default instead of failing.
fn analytics_period(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| (1..=MAX_ANALYTICS_PERIOD).contains(p))
        .unwrap_or(DEFAULT_ANALYTICS_PERIOD)
}

fn progress_period(raw: Option<&str>) -> Result<u32, HandlerError> {
    match raw {
        None => Ok(DEFAULT_PROGRESS_PERIOD),
        Some(p) => p
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| bad_request("Invalid period parameter")),
    }
}

fn parse_day(raw: &str, field: &str) -> Result<NaiveDate, HandlerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| bad_request(format!("Invalid {field} format. Use YYYY-MM-DD")))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Meal analytics for the last `period` days.
#[utoipa::path(
    get,
    path = "/api/analytics/meals",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Analytics computed", body = ApiResponse<AnalyticsResponse>),
        (status = 401, description = "Missing or invalid x-user-id header"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn analytics_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let period = analytics_period(query.period.as_deref());
    let today = Utc::now().date_naive();

    let analytics = app_state
        .insights
        .analytics(user_id, period, today)
        .await
        .map_err(internal)?;

    info!(%user_id, period, total_meals = analytics.total_meals, "Served meal analytics");
    Ok(Json(ApiResponse::ok(AnalyticsResponse::from(analytics))))
}

/// Daily nutrition totals and goal achievement for the last `period` days.
#[utoipa::path(
    get,
    path = "/api/nutrition/progress",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Progress computed", body = ApiResponse<NutritionProgressResponse>),
        (status = 400, description = "Invalid period parameter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn nutrition_progress_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let period = progress_period(query.period.as_deref())?;
    let today = Utc::now().date_naive();

    let progress = app_state
        .insights
        .nutrition_progress(user_id, period, today)
        .await
        .map_err(internal)?;

    Ok(Json(ApiResponse::ok(NutritionProgressResponse::from(progress))))
}

/// The user's daily nutrition goals, with defaults for unset fields.
#[utoipa::path(
    get,
    path = "/api/nutrition/goals",
    responses(
        (status = 200, description = "Current goals", body = ApiResponse<NutritionGoalsDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_nutrition_goals_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let goals = app_state
        .insights
        .nutrition_goals(user_id)
        .await
        .map_err(internal)?;
    Ok(Json(ApiResponse::ok(NutritionGoalsDto::from(goals))))
}

/// Replaces the user's daily nutrition goals.
#[utoipa::path(
    put,
    path = "/api/nutrition/goals",
    request_body = NutritionGoalsRequest,
    responses(
        (status = 200, description = "Goals updated", body = ApiResponse<NutritionGoalsDto>),
        (status = 400, description = "Negative goal value", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_nutrition_goals_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<NutritionGoalsRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Some(field) = req.first_negative() {
        return Err(bad_request(format!("{field} must not be negative")));
    }

    let goals = app_state
        .insights
        .update_nutrition_goals(user_id, req.to_goals())
        .await
        .map_err(internal)?;

    info!(%user_id, "Updated nutrition goals");
    Ok(Json(ApiResponse::ok(NutritionGoalsDto::from(goals))))
}

/// Ingredients needed for the meals planned between two dates, both inclusive.
#[utoipa::path(
    get,
    path = "/api/shopping-list",
    params(ShoppingListQuery),
    responses(
        (status = 200, description = "Shopping list built", body = ApiResponse<ShoppingListResponse>),
        (status = 400, description = "Missing or malformed dates", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn shopping_list_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<ShoppingListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(start_raw), Some(end_raw)) = (query.start_date, query.end_date) else {
        return Err(bad_request("startDate and endDate parameters are required"));
    };
    let start = parse_day(&start_raw, "startDate")?;
    let end = parse_day(&end_raw, "endDate")?;
    if end < start {
        return Err(bad_request("endDate must not be before startDate"));
    }

    let list = app_state
        .insights
        .shopping_list(user_id, start, end)
        .await
        .map_err(internal)?;

    Ok(Json(ApiResponse::ok(ShoppingListResponse::from(list))))
}

/// Up to five dishes to try for a meal slot on a given day.
#[utoipa::path(
    get,
    path = "/api/recommendations",
    params(RecommendationsQuery),
    responses(
        (status = 200, description = "Recommendations ranked", body = ApiResponse<RecommendationsResponse>),
        (status = 400, description = "Missing or malformed parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn recommendations_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(meal_type_raw), Some(date_raw)) = (query.meal_type, query.date) else {
        return Err(bad_request("mealType and date parameters are required"));
    };
    let meal_type = meal_type_raw
        .trim()
        .parse::<MealType>()
        .map_err(|e| bad_request(e.to_string()))?;
    let date = parse_day(&date_raw, "date")?;

    let recommendations = app_state
        .insights
        .recommendations(user_id, meal_type, date)
        .await
        .map_err(internal)?;

    Ok(Json(ApiResponse::ok(RecommendationsResponse::from(
        recommendations,
    ))))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

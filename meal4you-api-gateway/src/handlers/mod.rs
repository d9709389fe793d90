pub mod precision;
pub mod recall;
pub mod restaurant;
pub mod restriction;

use axum::{Json, Router, extract::rejection::JsonRejection, routing::get};
use meal4you_proto::recommender_service::{
    UserPayload, recommender_service_client::RecommenderServiceClient,
};
use tonic::transport::Channel;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiError;
use crate::models::{HealthResponse, UserRequest};

#[derive(Clone)]
pub struct AppState {
    pub recommender_client: RecommenderServiceClient<Channel>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(recall::router())
        .merge(precision::router())
        .merge(restaurant::router())
        .merge(restriction::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Rejects malformed bodies before the recommender service is contacted.
fn user_payload(
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<UserPayload, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    Ok(UserPayload {
        user_id: request.user_id,
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Gateway is running", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        recall::recall,
        precision::rank_by_score,
        precision::rank_by_rating,
        precision::rank_by_review_count,
        restaurant::rank_restaurants,
        restaurant::rank_restaurants_composite,
        restriction::list_user_restrictions,
        restriction::list_meal_restrictions,
    ),
    components(
        schemas(
            crate::models::UserRequest,
            crate::models::RecallResponse,
            crate::models::RankedMeal,
            crate::models::RankedMealsResponse,
            crate::models::RestaurantMealCount,
            crate::models::RankedRestaurantsResponse,
            crate::models::CompatibleMeal,
            crate::models::CompositeRestaurant,
            crate::models::CompositeRestaurantsResponse,
            crate::models::UserRestrictionsResponse,
            crate::models::IngredientInfo,
            crate::models::RestrictionInfo,
            crate::models::MealRestrictionsResponse,
            crate::models::HealthResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "recall", description = "Restriction-based meal filtering"),
        (name = "precision", description = "Meal ranking endpoints"),
        (name = "restaurants", description = "Restaurant compatibility ranking"),
        (name = "restrictions", description = "Dietary restriction lookups"),
        (name = "health", description = "Liveness endpoint")
    ),
    info(
        title = "Meal4You Recommender API",
        description = "HTTP gateway for the Meal4You recommender service",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, user_payload};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants/rank", post(rank_restaurants))
        .route("/restaurants/rank/composite", post(rank_restaurants_composite))
}

#[utoipa::path(
    post,
    path = "/restaurants/rank",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Restaurants by number of compatible meals", body = RankedRestaurantsResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn rank_restaurants(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<RankedRestaurantsResponse>, ApiError> {
    let request = tonic::Request::new(user_payload(payload)?);

    let mut recommender_client = state.recommender_client.clone();
    let response = recommender_client.rank_restaurants(request).await?;

    Ok(Json(response.into_inner().into()))
}

#[utoipa::path(
    post,
    path = "/restaurants/rank/composite",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Restaurants by composite compatibility score", body = CompositeRestaurantsResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn rank_restaurants_composite(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<CompositeRestaurantsResponse>, ApiError> {
    let request = tonic::Request::new(user_payload(payload)?);

    let mut recommender_client = state.recommender_client.clone();
    let response = recommender_client
        .rank_restaurants_composite(request)
        .await?;

    Ok(Json(response.into_inner().into()))
}

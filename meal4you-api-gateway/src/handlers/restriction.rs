use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, post},
};
use meal4you_proto::recommender_service::MealPayload;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, user_payload};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restrictions/user", post(list_user_restrictions))
        .route("/restrictions/meals/{meal_id}", get(list_meal_restrictions))
}

#[utoipa::path(
    post,
    path = "/restrictions/user",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Restrictions declared by the user", body = UserRestrictionsResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "restrictions"
)]
#[instrument(skip(state))]
pub async fn list_user_restrictions(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<UserRestrictionsResponse>, ApiError> {
    let request = tonic::Request::new(user_payload(payload)?);

    let mut recommender_client = state.recommender_client.clone();
    let response = recommender_client
        .list_user_restrictions(request)
        .await?
        .into_inner();

    Ok(Json(UserRestrictionsResponse {
        user_id: response.user_id,
        restriction_ids: response.restriction_ids,
    }))
}

#[utoipa::path(
    get,
    path = "/restrictions/meals/{meal_id}",
    responses(
        (status = 200, description = "Ingredients of the meal and the restrictions they carry", body = MealRestrictionsResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    params(
        ("meal_id" = i64, Path, description = "Meal ID")
    ),
    tag = "restrictions"
)]
#[instrument(skip(state))]
pub async fn list_meal_restrictions(
    State(state): State<AppState>,
    meal_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MealRestrictionsResponse>, ApiError> {
    let Path(meal_id) = meal_id.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let mut recommender_client = state.recommender_client.clone();
    let response = recommender_client
        .list_meal_restrictions(tonic::Request::new(MealPayload { meal_id }))
        .await?;

    Ok(Json(response.into_inner().into()))
}

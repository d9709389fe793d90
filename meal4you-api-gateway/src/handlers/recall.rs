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
    Router::new().route("/recall", post(recall))
}

#[utoipa::path(
    post,
    path = "/recall",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Meals compatible with the user's restrictions", body = RecallResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "recall"
)]
#[instrument(skip(state))]
pub async fn recall(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<RecallResponse>, ApiError> {
    let request = tonic::Request::new(user_payload(payload)?);

    let mut recommender_client = state.recommender_client.clone();
    let response = recommender_client.recall(request).await?;

    Ok(Json(RecallResponse {
        candidate_meal_ids: response.into_inner().candidate_meal_ids,
    }))
}

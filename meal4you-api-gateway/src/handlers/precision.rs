use std::future::Future;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use meal4you_proto::recommender_service::{
    self as proto, UserPayload, recommender_service_client::RecommenderServiceClient,
};
use tonic::transport::Channel;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, user_payload};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/precision/score", post(rank_by_score))
        .route("/precision/rating", post(rank_by_rating))
        .route("/precision/review-count", post(rank_by_review_count))
}

#[utoipa::path(
    post,
    path = "/precision/score",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Compatible meals ranked by weighted score", body = RankedMealsResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "precision"
)]
#[instrument(skip(state))]
pub async fn rank_by_score(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<RankedMealsResponse>, ApiError> {
    ranked_meals(state, payload, |mut client, request| async move {
        client.rank_meals_by_score(request).await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/precision/rating",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Compatible meals ranked by mean rating", body = RankedMealsResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "precision"
)]
#[instrument(skip(state))]
pub async fn rank_by_rating(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<RankedMealsResponse>, ApiError> {
    ranked_meals(state, payload, |mut client, request| async move {
        client.rank_meals_by_rating(request).await
    })
    .await
}

#[utoipa::path(
    post,
    path = "/precision/review-count",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Compatible meals ranked by number of reviews", body = RankedMealsResponse),
        (status = 400, description = "Bad request", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "precision"
)]
#[instrument(skip(state))]
pub async fn rank_by_review_count(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<RankedMealsResponse>, ApiError> {
    ranked_meals(state, payload, |mut client, request| async move {
        client.rank_meals_by_review_count(request).await
    })
    .await
}

/// Shared body of the ranking handlers; `rank` issues the RPC for one sort key.
async fn ranked_meals<F, Fut>(
    state: AppState,
    payload: Result<Json<UserRequest>, JsonRejection>,
    rank: F,
) -> Result<Json<RankedMealsResponse>, ApiError>
where
    F: FnOnce(RecommenderServiceClient<Channel>, tonic::Request<UserPayload>) -> Fut,
    Fut: Future<Output = Result<tonic::Response<proto::RankedMealsResponse>, tonic::Status>>,
{
    let request = tonic::Request::new(user_payload(payload)?);

    let response = rank(state.recommender_client.clone(), request).await?;

    Ok(Json(response.into_inner().into()))
}

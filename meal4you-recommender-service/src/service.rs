use std::sync::Arc;

use meal4you_proto::common::Money;
use meal4you_proto::recommender_service::recommender_service_server::RecommenderService;
use meal4you_proto::recommender_service::{
    CompatibleMeal, CompositeRestaurant, CompositeRestaurantsResponse, MealPayload,
    MealRestrictionsResponse, NamedId, RankedMeal, RankedMealsResponse, RankedRestaurantsResponse,
    RecallResponse, RestaurantMealCount, UserPayload, UserRestrictionsResponse,
};
use tonic::{Request, Response, Status};
use tracing::{error, instrument};

use crate::error::RecommenderError;
use crate::rating::{self, RankKey, RatingTable};
use crate::recall::recall;
use crate::restaurant;
use crate::restriction::{self, RestrictionIndex};
use crate::snapshot::{Snapshot, SnapshotSource};

pub struct RecommenderServiceImpl {
    source: Arc<dyn SnapshotSource>,
}

impl RecommenderServiceImpl {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    async fn snapshot(&self) -> Result<Snapshot, Status> {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(RecommenderError::from)
            .and_then(|loaded| loaded)
            .map_err(|err| {
                error!(error = %err, "failed to load snapshot");
                Status::from(err)
            })
    }

    async fn ranked_meals(
        &self,
        payload: UserPayload,
        key: RankKey,
    ) -> Result<Response<RankedMealsResponse>, Status> {
        let user_id = parse_id(payload.user_id, "user_id")?;
        let snapshot = self.snapshot().await?;

        let candidates = recall(&snapshot, &RestrictionIndex::new(&snapshot), user_id);
        let ranked = rating::rank_meals(&RatingTable::new(&snapshot), &candidates, key);

        Ok(Response::new(RankedMealsResponse {
            user_id: user_id.into(),
            no_results: ranked.is_empty(),
            meals: ranked.into_iter().map(ranked_meal_to_proto).collect(),
        }))
    }
}

#[tonic::async_trait]
impl RecommenderService for RecommenderServiceImpl {
    #[instrument(skip_all, fields(user_id = request.get_ref().user_id))]
    async fn recall(
        &self,
        request: Request<UserPayload>,
    ) -> Result<Response<RecallResponse>, Status> {
        let user_id = parse_id(request.into_inner().user_id, "user_id")?;
        let snapshot = self.snapshot().await?;

        let candidates = recall(&snapshot, &RestrictionIndex::new(&snapshot), user_id);

        Ok(Response::new(RecallResponse {
            candidate_meal_ids: candidates.into_iter().map(i64::from).collect(),
        }))
    }

    #[instrument(skip_all, fields(user_id = request.get_ref().user_id))]
    async fn rank_meals_by_score(
        &self,
        request: Request<UserPayload>,
    ) -> Result<Response<RankedMealsResponse>, Status> {
        self.ranked_meals(request.into_inner(), RankKey::Score).await
    }

    #[instrument(skip_all, fields(user_id = request.get_ref().user_id))]
    async fn rank_meals_by_rating(
        &self,
        request: Request<UserPayload>,
    ) -> Result<Response<RankedMealsResponse>, Status> {
        self.ranked_meals(request.into_inner(), RankKey::Rating).await
    }

    #[instrument(skip_all, fields(user_id = request.get_ref().user_id))]
    async fn rank_meals_by_review_count(
        &self,
        request: Request<UserPayload>,
    ) -> Result<Response<RankedMealsResponse>, Status> {
        self.ranked_meals(request.into_inner(), RankKey::ReviewCount)
            .await
    }

    #[instrument(skip_all, fields(user_id = request.get_ref().user_id))]
    async fn rank_restaurants(
        &self,
        request: Request<UserPayload>,
    ) -> Result<Response<RankedRestaurantsResponse>, Status> {
        let user_id = parse_id(request.into_inner().user_id, "user_id")?;
        let snapshot = self.snapshot().await?;

        let candidates = recall(&snapshot, &RestrictionIndex::new(&snapshot), user_id);
        let ranked = restaurant::rank_restaurants(&snapshot, &candidates);

        Ok(Response::new(RankedRestaurantsResponse {
            user_id: user_id.into(),
            restaurants: ranked
                .into_iter()
                .map(|r| RestaurantMealCount {
                    restaurant_id: r.restaurant_id.into(),
                    name: r.name,
                    compatible_meal_count: r.compatible_meal_count as u32,
                })
                .collect(),
        }))
    }

    #[instrument(skip_all, fields(user_id = request.get_ref().user_id))]
    async fn rank_restaurants_composite(
        &self,
        request: Request<UserPayload>,
    ) -> Result<Response<CompositeRestaurantsResponse>, Status> {
        let user_id = parse_id(request.into_inner().user_id, "user_id")?;
        let snapshot = self.snapshot().await?;

        let candidates = recall(&snapshot, &RestrictionIndex::new(&snapshot), user_id);
        let ranked = restaurant::rank_restaurants_composite(
            &snapshot,
            &RatingTable::new(&snapshot),
            &candidates,
        );

        Ok(Response::new(CompositeRestaurantsResponse {
            user_id: user_id.into(),
            restaurants: ranked
                .into_iter()
                .map(composite_restaurant_to_proto)
                .collect(),
        }))
    }

    #[instrument(skip_all, fields(user_id = request.get_ref().user_id))]
    async fn list_user_restrictions(
        &self,
        request: Request<UserPayload>,
    ) -> Result<Response<UserRestrictionsResponse>, Status> {
        let user_id = parse_id(request.into_inner().user_id, "user_id")?;
        let snapshot = self.snapshot().await?;

        let restriction_ids = RestrictionIndex::new(&snapshot).restrictions_of(user_id);

        Ok(Response::new(UserRestrictionsResponse {
            user_id: user_id.into(),
            restriction_ids: restriction_ids.into_iter().map(i64::from).collect(),
        }))
    }

    #[instrument(skip_all, fields(meal_id = request.get_ref().meal_id))]
    async fn list_meal_restrictions(
        &self,
        request: Request<MealPayload>,
    ) -> Result<Response<MealRestrictionsResponse>, Status> {
        let meal_id = parse_id(request.into_inner().meal_id, "meal_id")?;
        let snapshot = self.snapshot().await?;

        let result = RestrictionIndex::new(&snapshot).meal_restrictions(meal_id);

        Ok(Response::new(MealRestrictionsResponse {
            meal_id: result.meal_id.into(),
            ingredients: result.ingredients.into_iter().map(named_id_to_proto).collect(),
            restrictions: result
                .restrictions
                .into_iter()
                .map(named_id_to_proto)
                .collect(),
        }))
    }
}

/// Identifiers are stored as 32-bit integers; anything outside that range
/// can never match a row and is rejected as malformed.
fn parse_id(value: i64, field: &str) -> Result<i32, Status> {
    i32::try_from(value).map_err(|_| Status::invalid_argument(format!("Invalid {field}")))
}

fn ranked_meal_to_proto(meal: rating::RankedMeal) -> RankedMeal {
    RankedMeal {
        meal_id: meal.meal_id.into(),
        name: meal.name,
        mean_rating: meal.mean_rating,
        review_count: meal.review_count,
        score: meal.score,
        price: Some(Money {
            amount: meal.price.to_string(),
        }),
    }
}

fn composite_restaurant_to_proto(r: restaurant::CompositeRestaurant) -> CompositeRestaurant {
    CompositeRestaurant {
        restaurant_id: r.restaurant_id.into(),
        name: r.name,
        coverage_percent: r.coverage_percent,
        composite_score: r.composite_score,
        compatible_meal_count: r.compatible_meal_count as u32,
        total_meal_count: r.total_meal_count as u32,
        weighted_avg_rating: r.weighted_avg_rating,
        total_reviews: r.total_reviews,
        meals: r
            .meals
            .into_iter()
            .map(|m| CompatibleMeal {
                meal_id: m.meal_id.into(),
                name: m.name,
                mean_rating: m.mean_rating,
                review_count: m.review_count,
                price: Some(Money {
                    amount: m.price.to_string(),
                }),
            })
            .collect(),
    }
}

fn named_id_to_proto(named: restriction::NamedId) -> NamedId {
    NamedId {
        id: named.id.into(),
        name: named.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    struct UnavailableSource;

    impl SnapshotSource for UnavailableSource {
        fn load(&self) -> Result<Snapshot, RecommenderError> {
            Err(RecommenderError::Connection(
                diesel::ConnectionError::BadConnection("connection refused".to_string()),
            ))
        }
    }

    fn service_with(snapshot: Snapshot) -> RecommenderServiceImpl {
        RecommenderServiceImpl::new(Arc::new(snapshot))
    }

    fn user(user_id: i64) -> Request<UserPayload> {
        Request::new(UserPayload { user_id })
    }

    #[tokio::test]
    async fn test_recall() {
        let service = service_with(fixtures::scenario());

        let response = service.recall(user(1000)).await.unwrap().into_inner();

        assert_eq!(response.candidate_meal_ids, vec![502, 504, 505]);
    }

    #[tokio::test]
    async fn test_recall_invalid_user_id() {
        let service = service_with(fixtures::scenario());

        let response = service.recall(user(i64::MAX)).await;

        assert!(response.is_err());
        assert_eq!(response.unwrap_err().code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let service = RecommenderServiceImpl::new(Arc::new(UnavailableSource));

        let response = service.rank_meals_by_score(user(1000)).await;

        assert_eq!(response.unwrap_err().code(), tonic::Code::Internal);
    }

    #[tokio::test]
    async fn test_rank_meals_by_score() {
        let service = service_with(fixtures::scenario());

        let response = service
            .rank_meals_by_score(user(1001))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.user_id, 1001);
        assert!(!response.no_results);
        assert_eq!(
            response.meals.iter().map(|m| m.meal_id).collect::<Vec<_>>(),
            vec![501, 502, 505]
        );
        assert!(response.meals.iter().all(|m| m.score.is_some()));
        assert_eq!(
            response.meals[0].price,
            Some(Money {
                amount: "32.50".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_rank_meals_by_rating_and_review_count() {
        let service = service_with(fixtures::scenario());

        let by_rating = service
            .rank_meals_by_rating(user(1001))
            .await
            .unwrap()
            .into_inner();
        let by_reviews = service
            .rank_meals_by_review_count(user(1001))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(
            by_rating.meals.iter().map(|m| m.meal_id).collect::<Vec<_>>(),
            vec![502, 501, 505]
        );
        assert_eq!(
            by_reviews.meals.iter().map(|m| m.meal_id).collect::<Vec<_>>(),
            vec![501, 505, 502]
        );
        assert!(by_rating.meals.iter().all(|m| m.score.is_none()));
    }

    #[tokio::test]
    async fn test_rank_meals_without_ratings_reports_no_results() {
        let mut snapshot = fixtures::scenario();
        snapshot.meal_ratings.clear();
        let service = service_with(snapshot);

        let response = service
            .rank_meals_by_score(user(1000))
            .await
            .unwrap()
            .into_inner();

        assert!(response.no_results);
        assert!(response.meals.is_empty());
    }

    #[tokio::test]
    async fn test_rank_restaurants() {
        let service = service_with(fixtures::scenario());

        let response = service
            .rank_restaurants(user(1000))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(
            response.restaurants,
            vec![
                RestaurantMealCount {
                    restaurant_id: 1,
                    name: Some("Cantina".to_string()),
                    compatible_meal_count: 3,
                },
                RestaurantMealCount {
                    restaurant_id: 2,
                    name: Some("Verde".to_string()),
                    compatible_meal_count: 2,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_rank_restaurants_composite() {
        let service = service_with(fixtures::scenario());

        let response = service
            .rank_restaurants_composite(user(1000))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(
            response
                .restaurants
                .iter()
                .map(|r| r.restaurant_id)
                .collect::<Vec<_>>(),
            vec![2, 1]
        );
        assert_eq!(response.restaurants[0].name.as_deref(), Some("Verde"));
        assert_eq!(response.restaurants[1].meals.len(), 3);
    }

    #[tokio::test]
    async fn test_list_user_restrictions() {
        let service = service_with(fixtures::scenario());

        let known = service
            .list_user_restrictions(user(1002))
            .await
            .unwrap()
            .into_inner();
        let unknown = service
            .list_user_restrictions(user(7))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(known.restriction_ids, vec![1, 2]);
        assert!(unknown.restriction_ids.is_empty());
    }

    #[tokio::test]
    async fn test_list_meal_restrictions() {
        let service = service_with(fixtures::scenario());

        let response = service
            .list_meal_restrictions(Request::new(MealPayload { meal_id: 501 }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.meal_id, 501);
        assert_eq!(
            response.ingredients,
            vec![
                NamedId {
                    id: 101,
                    name: Some("Rice".to_string()),
                },
                NamedId {
                    id: 105,
                    name: Some("Milk".to_string()),
                },
            ]
        );
        assert_eq!(
            response.restrictions,
            vec![NamedId {
                id: 1,
                name: Some("Lactose".to_string()),
            }]
        );
    }
}

use meal4you_proto::recommender_service as proto;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NO_RESULTS_MESSAGE: &str = "No eligible meals found after filtering and rating.";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRequest {
    /// Identifier of the user
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecallResponse {
    /// Meals free of the user's restricted ingredients, ascending by id
    pub candidate_meal_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RankedMeal {
    pub meal_id: i64,
    pub name: String,
    pub mean_rating: f64,
    pub review_count: i32,
    /// Weighted score, only present when ranking by score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Price of the meal (as string)
    pub price: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RankedMealsResponse {
    pub user_id: i64,
    pub total_count: usize,
    pub ranked_meals: Vec<RankedMeal>,
    /// Set when no candidate survived filtering or none of them is rated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantMealCount {
    pub restaurant_id: i64,
    pub name: Option<String>,
    /// Number of distinct meals compatible with the user's restrictions
    pub compatible_meal_count: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RankedRestaurantsResponse {
    pub user_id: i64,
    pub ranked_restaurants: Vec<RestaurantMealCount>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompatibleMeal {
    pub meal_id: i64,
    pub name: String,
    /// Absent when the meal has no reviews
    pub mean_rating: Option<f64>,
    pub review_count: i32,
    pub price: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompositeRestaurant {
    pub restaurant_id: i64,
    pub name: Option<String>,
    /// Share of the menu compatible with the user, in percent
    pub coverage_percent: f64,
    /// Blend of coverage, normalized rating and normalized review volume
    pub composite_score: f64,
    pub compatible_meal_count: u32,
    pub total_meal_count: u32,
    /// Review-weighted mean rating of the compatible meals
    pub weighted_avg_rating: f64,
    pub total_reviews: i64,
    pub meals: Vec<CompatibleMeal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompositeRestaurantsResponse {
    pub user_id: i64,
    pub total_count: usize,
    pub ranked_restaurants: Vec<CompositeRestaurant>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRestrictionsResponse {
    pub user_id: i64,
    pub restriction_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientInfo {
    pub ingredient_id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestrictionInfo {
    pub restriction_id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MealRestrictionsResponse {
    pub meal_id: i64,
    pub ingredients: Vec<IngredientInfo>,
    pub restrictions: Vec<RestrictionInfo>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

fn price_of(price: Option<meal4you_proto::common::Money>) -> String {
    price.map(|p| p.amount).unwrap_or_default()
}

impl From<proto::RankedMealsResponse> for RankedMealsResponse {
    fn from(response: proto::RankedMealsResponse) -> Self {
        let ranked_meals: Vec<RankedMeal> = response
            .meals
            .into_iter()
            .map(|m| RankedMeal {
                meal_id: m.meal_id,
                name: m.name,
                mean_rating: m.mean_rating,
                review_count: m.review_count,
                score: m.score,
                price: price_of(m.price),
            })
            .collect();

        Self {
            user_id: response.user_id,
            total_count: ranked_meals.len(),
            ranked_meals,
            message: response
                .no_results
                .then(|| NO_RESULTS_MESSAGE.to_string()),
        }
    }
}

impl From<proto::RankedRestaurantsResponse> for RankedRestaurantsResponse {
    fn from(response: proto::RankedRestaurantsResponse) -> Self {
        Self {
            user_id: response.user_id,
            ranked_restaurants: response
                .restaurants
                .into_iter()
                .map(|r| RestaurantMealCount {
                    restaurant_id: r.restaurant_id,
                    name: r.name,
                    compatible_meal_count: r.compatible_meal_count,
                })
                .collect(),
        }
    }
}

impl From<proto::CompositeRestaurantsResponse> for CompositeRestaurantsResponse {
    fn from(response: proto::CompositeRestaurantsResponse) -> Self {
        let ranked_restaurants: Vec<CompositeRestaurant> = response
            .restaurants
            .into_iter()
            .map(|r| CompositeRestaurant {
                restaurant_id: r.restaurant_id,
                name: r.name,
                coverage_percent: r.coverage_percent,
                composite_score: r.composite_score,
                compatible_meal_count: r.compatible_meal_count,
                total_meal_count: r.total_meal_count,
                weighted_avg_rating: r.weighted_avg_rating,
                total_reviews: r.total_reviews,
                meals: r
                    .meals
                    .into_iter()
                    .map(|m| CompatibleMeal {
                        meal_id: m.meal_id,
                        name: m.name,
                        mean_rating: m.mean_rating,
                        review_count: m.review_count,
                        price: price_of(m.price),
                    })
                    .collect(),
            })
            .collect();

        Self {
            user_id: response.user_id,
            total_count: ranked_restaurants.len(),
            ranked_restaurants,
        }
    }
}

impl From<proto::MealRestrictionsResponse> for MealRestrictionsResponse {
    fn from(response: proto::MealRestrictionsResponse) -> Self {
        Self {
            meal_id: response.meal_id,
            ingredients: response
                .ingredients
                .into_iter()
                .map(|i| IngredientInfo {
                    ingredient_id: i.id,
                    name: i.name,
                })
                .collect(),
            restrictions: response
                .restrictions
                .into_iter()
                .map(|r| RestrictionInfo {
                    restriction_id: r.id,
                    name: r.name,
                })
                .collect(),
        }
    }
}

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use bigdecimal::BigDecimal;

use crate::rating::RatingTable;
use crate::snapshot::Snapshot;

pub const COVERAGE_WEIGHT: f64 = 0.6;
pub const AVG_RATING_WEIGHT: f64 = 0.2;
pub const REVIEW_VOLUME_WEIGHT: f64 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct RestaurantMealCount {
    pub restaurant_id: i32,
    pub name: Option<String>,
    pub compatible_meal_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompatibleMeal {
    pub meal_id: i32,
    pub name: String,
    pub mean_rating: Option<f64>,
    pub review_count: i32,
    pub price: BigDecimal,
}

/// A restaurant ranked by how well its menu fits a user.
///
/// `coverage_percent`, `composite_score` and `weighted_avg_rating` are
/// rounded for presentation; the ranking itself uses unrounded values.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeRestaurant {
    pub restaurant_id: i32,
    pub name: Option<String>,
    pub coverage_percent: f64,
    pub composite_score: f64,
    pub compatible_meal_count: usize,
    pub total_meal_count: usize,
    pub weighted_avg_rating: f64,
    pub total_reviews: i64,
    pub meals: Vec<CompatibleMeal>,
}

struct Aggregate {
    restaurant_id: i32,
    total_meal_count: usize,
    compatible: Vec<i32>,
    coverage: f64,
    weighted_avg_rating: f64,
    total_reviews: i64,
}

/// Distinct meals offered per restaurant, ascending by restaurant id.
fn offerings(snapshot: &Snapshot) -> BTreeMap<i32, BTreeSet<i32>> {
    let mut offerings: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
    for offer in &snapshot.meal_restaurants {
        offerings
            .entry(offer.restaurant_id)
            .or_default()
            .insert(offer.meal_id);
    }
    offerings
}

fn restaurant_names(snapshot: &Snapshot) -> HashMap<i32, &str> {
    snapshot
        .restaurants
        .iter()
        .map(|r| (r.id, r.name.as_str()))
        .collect()
}

/// Restaurants offering at least one candidate, by descending count of
/// distinct candidates offered. Ties are ordered by restaurant id.
pub fn rank_restaurants(snapshot: &Snapshot, candidates: &[i32]) -> Vec<RestaurantMealCount> {
    let candidates: HashSet<i32> = candidates.iter().copied().collect();
    let names = restaurant_names(snapshot);

    let mut ranked: Vec<RestaurantMealCount> = offerings(snapshot)
        .into_iter()
        .filter_map(|(restaurant_id, meals)| {
            let count = meals.iter().filter(|m| candidates.contains(m)).count();
            (count > 0).then(|| RestaurantMealCount {
                restaurant_id,
                name: names.get(&restaurant_id).map(|n| n.to_string()),
                compatible_meal_count: count,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.compatible_meal_count.cmp(&a.compatible_meal_count));
    ranked
}

/// Restaurants ranked by
/// `0.6 * coverage + 0.2 * normalized weighted rating + 0.2 * normalized reviews`.
///
/// Coverage is the share of the restaurant's distinct meals that are
/// candidates. The weighted rating is min-max normalized across the ranked
/// restaurants, the review total is divided by the largest total.
pub fn rank_restaurants_composite(
    snapshot: &Snapshot,
    table: &RatingTable,
    candidates: &[i32],
) -> Vec<CompositeRestaurant> {
    let candidates: HashSet<i32> = candidates.iter().copied().collect();
    let names = restaurant_names(snapshot);

    let aggregates: Vec<Aggregate> = offerings(snapshot)
        .into_iter()
        .filter_map(|(restaurant_id, meals)| {
            let compatible: Vec<i32> = meals
                .iter()
                .copied()
                .filter(|m| candidates.contains(m))
                .collect();
            if compatible.is_empty() {
                return None;
            }

            let (weighted_sum, total_reviews) = compatible
                .iter()
                .filter_map(|&m| table.rating(m))
                .fold((0.0, 0_i64), |(sum, reviews), r| {
                    (
                        sum + r.mean_rating * f64::from(r.review_count),
                        reviews + i64::from(r.review_count),
                    )
                });
            let weighted_avg_rating = if total_reviews > 0 {
                weighted_sum / total_reviews as f64
            } else {
                0.0
            };

            Some(Aggregate {
                restaurant_id,
                total_meal_count: meals.len(),
                coverage: compatible.len() as f64 / meals.len() as f64,
                compatible,
                weighted_avg_rating,
                total_reviews,
            })
        })
        .collect();

    let (min_avg, max_avg) = aggregates
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), a| {
            (lo.min(a.weighted_avg_rating), hi.max(a.weighted_avg_rating))
        });
    let max_reviews = aggregates
        .iter()
        .map(|a| a.total_reviews)
        .max()
        .unwrap_or(0);

    let mut ranked: Vec<(f64, CompositeRestaurant)> = aggregates
        .into_iter()
        .map(|a| {
            let avg_norm = normalize(a.weighted_avg_rating, min_avg, max_avg);
            let reviews_norm = if max_reviews > 0 {
                a.total_reviews as f64 / max_reviews as f64
            } else {
                0.0
            };
            let composite = COVERAGE_WEIGHT * a.coverage
                + AVG_RATING_WEIGHT * avg_norm
                + REVIEW_VOLUME_WEIGHT * reviews_norm;

            let restaurant = CompositeRestaurant {
                restaurant_id: a.restaurant_id,
                name: names.get(&a.restaurant_id).map(|n| n.to_string()),
                coverage_percent: round_to(a.coverage * 100.0, 1),
                composite_score: round_to(composite, 2),
                compatible_meal_count: a.compatible.len(),
                total_meal_count: a.total_meal_count,
                weighted_avg_rating: round_to(a.weighted_avg_rating, 2),
                total_reviews: a.total_reviews,
                meals: compatible_meals(table, &a.compatible),
            };
            (composite, restaurant)
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.into_iter().map(|(_, restaurant)| restaurant).collect()
}

/// Min-max rescale into [0, 1]. When every value is equal the result is 1
/// for positive values and 0 otherwise.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else if value > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// `meal_ids` must be ascending; equal (rating, reviews) keep that order.
fn compatible_meals(table: &RatingTable, meal_ids: &[i32]) -> Vec<CompatibleMeal> {
    let mut meals: Vec<CompatibleMeal> = meal_ids
        .iter()
        .filter_map(|&id| {
            let meal = table.meal(id)?;
            let rating = table.rating(id);
            Some(CompatibleMeal {
                meal_id: id,
                name: meal.name.clone(),
                mean_rating: rating.map(|r| r.mean_rating),
                review_count: rating.map(|r| r.review_count).unwrap_or(0),
                price: meal.price.clone(),
            })
        })
        .collect();
    meals.sort_by(|a, b| {
        let a_rating = a.mean_rating.unwrap_or(0.0);
        let b_rating = b.mean_rating.unwrap_or(0.0);
        b_rating
            .total_cmp(&a_rating)
            .then_with(|| b.review_count.cmp(&a.review_count))
    });
    meals
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10_f64.powi(digits);
    (value * factor).round() / factor
}

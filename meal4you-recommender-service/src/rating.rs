use std::collections::HashMap;

use bigdecimal::BigDecimal;

use crate::models::{Meal, MealRating};
use crate::snapshot::Snapshot;

pub const RATING_WEIGHT: f64 = 0.7;
pub const REVIEW_VOLUME_WEIGHT: f64 = 0.3;
/// Upper bound of the rating scale. Rescales the review volume term so both
/// terms share the same range.
pub const RATING_SCALE: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankKey {
    /// Weighted blend of mean rating and relative review volume.
    Score,
    Rating,
    ReviewCount,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedMeal {
    pub meal_id: i32,
    pub name: String,
    pub mean_rating: f64,
    pub review_count: i32,
    pub score: Option<f64>,
    pub price: BigDecimal,
}

/// Meals and their rating aggregates keyed by meal id.
pub struct RatingTable<'a> {
    meals: HashMap<i32, &'a Meal>,
    ratings: HashMap<i32, &'a MealRating>,
}

impl<'a> RatingTable<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            meals: snapshot.meals.iter().map(|m| (m.id, m)).collect(),
            ratings: snapshot.meal_ratings.iter().map(|r| (r.meal_id, r)).collect(),
        }
    }

    pub fn meal(&self, meal_id: i32) -> Option<&'a Meal> {
        self.meals.get(&meal_id).copied()
    }

    pub fn rating(&self, meal_id: i32) -> Option<&'a MealRating> {
        self.ratings.get(&meal_id).copied()
    }

    /// Inner join of `candidates` with meals and ratings, in candidate order.
    fn join(&self, candidates: &[i32]) -> Vec<(&'a Meal, &'a MealRating)> {
        candidates
            .iter()
            .filter_map(|&id| Some((self.meal(id)?, self.rating(id)?)))
            .collect()
    }
}

/// Score of a meal relative to the most reviewed meal of the same request.
pub fn score(rating: &MealRating, max_review_count: i32) -> f64 {
    let volume = if max_review_count > 0 {
        f64::from(rating.review_count) / f64::from(max_review_count)
    } else {
        0.0
    };
    rating.mean_rating * RATING_WEIGHT + volume * REVIEW_VOLUME_WEIGHT * RATING_SCALE
}

/// Rated candidates sorted descending by `key`.
///
/// Ties keep candidate order. An empty result means no candidate has a
/// rating.
pub fn rank_meals(table: &RatingTable, candidates: &[i32], key: RankKey) -> Vec<RankedMeal> {
    let joined = table.join(candidates);
    let max_review_count = joined
        .iter()
        .map(|(_, r)| r.review_count)
        .max()
        .unwrap_or(0);

    let mut keyed: Vec<(f64, RankedMeal)> = joined
        .into_iter()
        .map(|(meal, rating)| {
            let meal_score = (key == RankKey::Score).then(|| score(rating, max_review_count));
            let sort_value = match key {
                RankKey::Score => meal_score.unwrap_or_default(),
                RankKey::Rating => rating.mean_rating,
                RankKey::ReviewCount => f64::from(rating.review_count),
            };
            let ranked = RankedMeal {
                meal_id: meal.id,
                name: meal.name.clone(),
                mean_rating: rating.mean_rating,
                review_count: rating.review_count,
                score: meal_score,
                price: meal.price.clone(),
            };
            (sort_value, ranked)
        })
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    keyed.into_iter().map(|(_, ranked)| ranked).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, rating};

    fn ids(ranked: &[RankedMeal]) -> Vec<i32> {
        ranked.iter().map(|m| m.meal_id).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_rank_by_score_weights_rating_and_volume() {
        let snapshot = fixtures::scenario();
        let table = RatingTable::new(&snapshot);

        let ranked = rank_meals(&table, &[501, 502], RankKey::Score);

        assert_eq!(ids(&ranked), vec![501, 502]);
        assert_close(ranked[0].score.unwrap(), 4.3);
        assert_close(ranked[1].score.unwrap(), 3.8);
        assert_eq!(ranked[0].name, "Creamy risotto");
        assert_eq!(ranked[1].price.to_string(), "24.90");
    }

    #[test]
    fn test_score_normalization_is_relative_to_candidates() {
        let snapshot = fixtures::scenario();
        let table = RatingTable::new(&snapshot);

        // Without 501 the most reviewed candidate is 505 with 4 reviews.
        let ranked = rank_meals(&table, &[502, 504, 505], RankKey::Score);

        assert_eq!(ids(&ranked), vec![502, 505]);
        assert_close(ranked[0].score.unwrap(), 4.25);
        assert_close(ranked[1].score.unwrap(), 3.6);
    }

    #[test]
    fn test_score_with_no_reviews_is_explicit_zero_volume() {
        let zero = rating(1, 4.0, 0);

        let value = score(&zero, 0);

        assert!(!value.is_nan());
        assert_close(value, 2.8);
    }

    #[test]
    fn test_score_is_monotonic_in_rating() {
        let low = rating(1, 3.5, 7);
        let high = rating(2, 4.5, 7);

        assert!(score(&high, 20) >= score(&low, 20));
        assert!(score(&high, 0) >= score(&low, 0));
    }

    #[test]
    fn test_rank_by_rating_and_review_count() {
        let snapshot = fixtures::scenario();
        let table = RatingTable::new(&snapshot);
        let candidates = [501, 502, 504, 505];

        let by_rating = rank_meals(&table, &candidates, RankKey::Rating);
        let by_reviews = rank_meals(&table, &candidates, RankKey::ReviewCount);

        assert_eq!(ids(&by_rating), vec![502, 501, 505]);
        assert_eq!(ids(&by_reviews), vec![501, 505, 502]);
        assert!(by_rating.iter().all(|m| m.score.is_none()));
        assert!(by_reviews.iter().all(|m| m.score.is_none()));
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let mut snapshot = fixtures::scenario();
        snapshot.meal_ratings = vec![
            rating(501, 4.0, 3),
            rating(502, 4.0, 3),
            rating(505, 4.0, 3),
        ];
        let table = RatingTable::new(&snapshot);

        for key in [RankKey::Score, RankKey::Rating, RankKey::ReviewCount] {
            let ranked = rank_meals(&table, &[501, 502, 505], key);
            assert_eq!(ids(&ranked), vec![501, 502, 505]);
        }
    }

    #[test]
    fn test_unrated_candidates_yield_no_results() {
        let snapshot = fixtures::scenario();
        let table = RatingTable::new(&snapshot);

        assert!(rank_meals(&table, &[504], RankKey::Score).is_empty());
        assert!(rank_meals(&table, &[], RankKey::Rating).is_empty());
    }
}

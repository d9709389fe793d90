use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::models::*;
use crate::snapshot::Snapshot;

pub fn meal(id: i32, name: &str, price: &str, available: bool) -> Meal {
    Meal {
        id,
        name: name.to_string(),
        description: None,
        price: BigDecimal::from_str(price).unwrap(),
        available,
    }
}

pub fn restaurant(id: i32, name: &str) -> Restaurant {
    Restaurant {
        id,
        name: name.to_string(),
        address: format!("Rua {id}, 100"),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        cuisine: "Brasileira".to_string(),
    }
}

pub fn rating(meal_id: i32, mean_rating: f64, review_count: i32) -> MealRating {
    MealRating {
        meal_id,
        mean_rating,
        review_count,
    }
}

pub fn offers(restaurant_id: i32, meal_ids: &[i32]) -> Vec<MealRestaurant> {
    meal_ids
        .iter()
        .map(|&meal_id| MealRestaurant {
            meal_id,
            restaurant_id,
        })
        .collect()
}

fn composed(meal_id: i32, ingredient_ids: &[i32]) -> Vec<MealIngredient> {
    ingredient_ids
        .iter()
        .map(|&ingredient_id| MealIngredient {
            meal_id,
            ingredient_id,
        })
        .collect()
}

/// Users 1000 (lactose), 1001 (none), 1002 (lactose + gluten) and 1003
/// (beef, which no ingredient carries).
///
/// Meal 503 is unavailable, 504 has no ingredients and no rating.
/// Restaurant 1 offers 501, 502, 504, 505; restaurant 2 offers 502, 504;
/// restaurant 3 offers 501 only.
pub fn scenario() -> Snapshot {
    Snapshot {
        meals: vec![
            meal(501, "Creamy risotto", "32.50", true),
            meal(502, "Grilled vegetables", "24.90", true),
            meal(503, "Bread pudding", "12.00", false),
            meal(504, "Fruit salad", "15.00", true),
            meal(505, "Pasta al pomodoro", "28.00", true),
        ],
        restrictions: vec![
            Restriction {
                id: 1,
                name: "Lactose".to_string(),
            },
            Restriction {
                id: 2,
                name: "Gluten".to_string(),
            },
            Restriction {
                id: 5,
                name: "Beef".to_string(),
            },
        ],
        ingredients: vec![
            Ingredient {
                id: 101,
                name: "Rice".to_string(),
            },
            Ingredient {
                id: 105,
                name: "Milk".to_string(),
            },
            Ingredient {
                id: 110,
                name: "Wheat flour".to_string(),
            },
        ],
        restaurants: vec![
            restaurant(1, "Cantina"),
            restaurant(2, "Verde"),
            restaurant(3, "Laticínios"),
        ],
        user_restrictions: vec![
            UserRestriction {
                user_id: 1000,
                restriction_id: 1,
            },
            UserRestriction {
                user_id: 1002,
                restriction_id: 1,
            },
            UserRestriction {
                user_id: 1002,
                restriction_id: 2,
            },
            UserRestriction {
                user_id: 1003,
                restriction_id: 5,
            },
        ],
        ingredient_restrictions: vec![
            IngredientRestriction {
                ingredient_id: 105,
                restriction_id: 1,
            },
            IngredientRestriction {
                ingredient_id: 110,
                restriction_id: 2,
            },
        ],
        meal_ingredients: [
            composed(501, &[101, 105]),
            composed(502, &[101]),
            composed(503, &[110]),
            composed(505, &[110]),
        ]
        .concat(),
        meal_ratings: vec![
            rating(501, 4.0, 10),
            rating(502, 5.0, 2),
            rating(505, 3.0, 4),
        ],
        meal_restaurants: [
            offers(1, &[501, 502, 504, 505]),
            offers(2, &[502, 504]),
            offers(3, &[501]),
        ]
        .concat(),
    }
}

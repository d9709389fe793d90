use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::schema::{
    ingredient_restrictions, ingredients, meal_ingredients, meal_ratings, meal_restaurants, meals,
    restaurants, restrictions, user_restrictions,
};

#[derive(Queryable, Selectable, Identifiable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = meals)]
pub struct Meal {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub available: bool,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = restrictions)]
pub struct Restriction {
    pub id: i32,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = ingredients)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub cuisine: String,
}

#[derive(Queryable, Selectable, Insertable, Clone, Copy, Debug, PartialEq)]
#[diesel(table_name = user_restrictions)]
pub struct UserRestriction {
    pub user_id: i32,
    pub restriction_id: i32,
}

#[derive(Queryable, Selectable, Insertable, Clone, Copy, Debug, PartialEq)]
#[diesel(table_name = ingredient_restrictions)]
pub struct IngredientRestriction {
    pub ingredient_id: i32,
    pub restriction_id: i32,
}

#[derive(Queryable, Selectable, Insertable, Clone, Copy, Debug, PartialEq)]
#[diesel(table_name = meal_ingredients)]
pub struct MealIngredient {
    pub meal_id: i32,
    pub ingredient_id: i32,
}

/// Aggregated review statistics of a meal.
#[derive(Queryable, Selectable, Insertable, Clone, Copy, Debug, PartialEq)]
#[diesel(table_name = meal_ratings)]
pub struct MealRating {
    pub meal_id: i32,
    pub mean_rating: f64,
    pub review_count: i32,
}

#[derive(Queryable, Selectable, Insertable, Clone, Copy, Debug, PartialEq)]
#[diesel(table_name = meal_restaurants)]
pub struct MealRestaurant {
    pub meal_id: i32,
    pub restaurant_id: i32,
}

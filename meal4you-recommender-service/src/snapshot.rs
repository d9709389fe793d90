use diesel::prelude::*;

use crate::error::RecommenderError;
use crate::{establish_connection, models, schema};

/// Supplies the base relations for a single request.
pub trait SnapshotSource: Send + Sync {
    fn load(&self) -> Result<Snapshot, RecommenderError>;
}

/// In-memory copy of every relation the recommender reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub meals: Vec<models::Meal>,
    pub restrictions: Vec<models::Restriction>,
    pub ingredients: Vec<models::Ingredient>,
    pub restaurants: Vec<models::Restaurant>,
    pub user_restrictions: Vec<models::UserRestriction>,
    pub ingredient_restrictions: Vec<models::IngredientRestriction>,
    pub meal_ingredients: Vec<models::MealIngredient>,
    pub meal_ratings: Vec<models::MealRating>,
    pub meal_restaurants: Vec<models::MealRestaurant>,
}

impl SnapshotSource for Snapshot {
    fn load(&self) -> Result<Snapshot, RecommenderError> {
        Ok(self.clone())
    }
}

pub struct PgSnapshotSource {
    database_url: String,
}

impl PgSnapshotSource {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

impl SnapshotSource for PgSnapshotSource {
    fn load(&self) -> Result<Snapshot, RecommenderError> {
        use schema::*;

        let conn = &mut establish_connection(&self.database_url)?;
        // Every table is read inside one repeatable-read transaction so joins
        // never mix rows from different commits.
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, RecommenderError, _>(|conn| {
                Ok(Snapshot {
                    meals: meals::table
                        .select(models::Meal::as_select())
                        .order_by(meals::id.asc())
                        .load(conn)?,
                    restrictions: restrictions::table
                        .select(models::Restriction::as_select())
                        .order_by(restrictions::id.asc())
                        .load(conn)?,
                    ingredients: ingredients::table
                        .select(models::Ingredient::as_select())
                        .order_by(ingredients::id.asc())
                        .load(conn)?,
                    restaurants: restaurants::table
                        .select(models::Restaurant::as_select())
                        .order_by(restaurants::id.asc())
                        .load(conn)?,
                    user_restrictions: user_restrictions::table
                        .select(models::UserRestriction::as_select())
                        .order_by((
                            user_restrictions::user_id.asc(),
                            user_restrictions::restriction_id.asc(),
                        ))
                        .load(conn)?,
                    ingredient_restrictions: ingredient_restrictions::table
                        .select(models::IngredientRestriction::as_select())
                        .order_by((
                            ingredient_restrictions::ingredient_id.asc(),
                            ingredient_restrictions::restriction_id.asc(),
                        ))
                        .load(conn)?,
                    meal_ingredients: meal_ingredients::table
                        .select(models::MealIngredient::as_select())
                        .order_by((
                            meal_ingredients::meal_id.asc(),
                            meal_ingredients::ingredient_id.asc(),
                        ))
                        .load(conn)?,
                    meal_ratings: meal_ratings::table
                        .select(models::MealRating::as_select())
                        .order_by(meal_ratings::meal_id.asc())
                        .load(conn)?,
                    meal_restaurants: meal_restaurants::table
                        .select(models::MealRestaurant::as_select())
                        .order_by((
                            meal_restaurants::restaurant_id.asc(),
                            meal_restaurants::meal_id.asc(),
                        ))
                        .load(conn)?,
                })
            })
    }
}

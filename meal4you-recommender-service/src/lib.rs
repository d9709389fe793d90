use diesel::{Connection, PgConnection};

pub mod config;
pub mod error;
pub mod models;
pub mod rating;
pub mod recall;
pub mod restaurant;
pub mod restriction;
pub mod schema;
pub mod service;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod fixtures;

use error::RecommenderError;

pub fn establish_connection(database_url: &str) -> Result<PgConnection, RecommenderError> {
    Ok(PgConnection::establish(database_url)?)
}

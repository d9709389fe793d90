use thiserror::Error;
use tonic::Status;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("{0} must be set")]
    MissingConfig(&'static str),
    #[error("invalid {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("cannot connect to database")]
    Connection(#[from] diesel::ConnectionError),
    #[error("database error")]
    Store(#[from] diesel::result::Error),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("snapshot loading task failed")]
    Join(#[from] tokio::task::JoinError),
}

impl From<RecommenderError> for Status {
    fn from(err: RecommenderError) -> Self {
        match err {
            RecommenderError::MissingConfig(_) | RecommenderError::InvalidConfig { .. } => {
                Status::failed_precondition(err.to_string())
            }
            _ => Status::internal("Cannot load recommendation data"),
        }
    }
}

use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid user record: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("User {0} not found")]
    NotFound(Uuid),

    #[error("User {0} already exists")]
    Duplicate(Uuid),

    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),
}

//! Storage for member records.
//!
//! [`UserRepository`] is the seam between the domain and a document-store
//! collection of users. Two implementations are provided:
//! - [`DocumentUserRepository`]: one JSONB document per row in PostgreSQL
//! - [`InMemoryUserRepository`]: an insertion-ordered collection held in process

use async_trait::async_trait;
use uuid::Uuid;

use crate::{errors::RepositoryError, models::User};

mod document;
mod memory;

pub use document::DocumentUserRepository;
pub use memory::InMemoryUserRepository;

/// Create, list and delete operations against a collection of users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Validates and stores a new user. Returns the stored record.
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError>;

    /// Returns every user in the collection, oldest first.
    async fn get_all_users(&self) -> Result<Vec<User>, RepositoryError>;

    /// Removes a user. Fails with [`RepositoryError::NotFound`] if no such user exists.
    async fn delete_user_by_id(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<R: UserRepository + ?Sized> UserRepository for std::sync::Arc<R> {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        (**self).create_user(user).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>, RepositoryError> {
        (**self).get_all_users().await
    }

    async fn delete_user_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        (**self).delete_user_by_id(id).await
    }
}

/// Collection names are interpolated into SQL, so only lowercase identifiers are accepted.
pub fn is_valid_collection_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

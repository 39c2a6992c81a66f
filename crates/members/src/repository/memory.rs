use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use super::UserRepository;
use crate::{errors::RepositoryError, models::User};

/// A user collection held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already contains `users`, skipping validation.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        user.validate()?;

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(RepositoryError::Duplicate(user.id));
        }
        users.push(user.clone());

        Ok(user.clone())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.read().await.clone())
    }

    async fn delete_user_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(RepositoryError::NotFound(id))?;
        users.remove(index);

        Ok(())
    }
}

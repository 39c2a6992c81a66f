//! Clearing and seeding the user collection.

use members::{
    errors::RepositoryError,
    models::User,
    repository::{DocumentUserRepository, UserRepository},
};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::{debug, info, trace};
use validator::{Validate, ValidationErrors};

use crate::config::{ConfigError, StoreConfig};
use crate::fixtures::sample_users;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database is not clear")]
    NotCleared,
    #[error("Invalid sample user {email}: {source}")]
    Validation {
        email: String,
        #[source]
        source: ValidationErrors,
    },
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Clears the user collection and fills it with the sample users.
///
/// Seeding is only allowed once the collection has been cleared by this
/// seeder (or the caller has vouched for it with
/// [`with_database_cleared`](Self::with_database_cleared)). Neither step is
/// transactional: a failure part way leaves whatever was already written.
pub struct Seeder<R> {
    repository: R,
    database_cleared: bool,
}

impl Seeder<DocumentUserRepository> {
    /// Creates a seeder backed by the configured PostgreSQL collection.
    ///
    /// The pool connects lazily, so this fails only on bad configuration.
    pub fn connect(config: &StoreConfig) -> Result<Self, SeedError> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy_with(options);
        let repository = DocumentUserRepository::new(pool, config.collection.clone())?;

        Self::new(config, repository)
    }
}

impl<R: UserRepository> Seeder<R> {
    /// Creates a seeder over `repository` after validating `config`.
    pub fn new(config: &StoreConfig, repository: R) -> Result<Self, SeedError> {
        config.validate()?;

        debug!("Database seeder construction complete");
        Ok(Self {
            repository,
            database_cleared: false,
        })
    }

    /// Marks the collection as already clear.
    pub fn with_database_cleared(mut self, database_cleared: bool) -> Self {
        self.database_cleared = database_cleared;
        self
    }

    pub fn is_database_cleared(&self) -> bool {
        self.database_cleared
    }

    /// Inserts the sample users, in order.
    ///
    /// Stops at the first user that fails validation or cannot be created;
    /// users before it stay in the collection.
    pub async fn seed(&self) -> Result<(), SeedError> {
        if !self.database_cleared {
            return Err(SeedError::NotCleared);
        }

        self.seed_users(&sample_users()).await?;

        info!("Database seeding complete");
        Ok(())
    }

    async fn seed_users(&self, users: &[User]) -> Result<(), SeedError> {
        debug!("Adding {} users to the database", users.len());

        for user in users {
            user.validate().map_err(|source| SeedError::Validation {
                email: user.email.clone(),
                source,
            })?;
            trace!(
                "Creating user with id {} and email {} in the database",
                user.id, user.email
            );

            self.repository.create_user(user).await?;
        }

        Ok(())
    }

    /// Deletes every user in the collection, in listing order.
    ///
    /// Safe to call again after a failure; it deletes whatever remains.
    pub async fn clear(&mut self) -> Result<(), SeedError> {
        let users = self.repository.get_all_users().await?;

        debug!("Removing {} users from the database", users.len());

        for user in &users {
            trace!("Removing user with id {} from the database", user.id);
            self.repository.delete_user_by_id(user.id).await?;
        }

        self.database_cleared = true;

        info!("Database clearing complete");
        Ok(())
    }

    /// Returns a reference to the repository for advanced usage.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use members::repository::InMemoryUserRepository;
    use uuid::Uuid;

    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            endpoint: "postgres://localhost:5432".to_string(),
            username: "members".to_string(),
            password: "password".to_string(),
            database: "member_database".to_string(),
            collection: "users".to_string(),
        }
    }

    fn without_id(mut user: User) -> User {
        user.id = Uuid::nil();
        user
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(String),
        List,
        Delete(Uuid),
    }

    /// Wraps the in-memory repository, recording calls and failing on demand.
    #[derive(Default)]
    struct ScriptedRepository {
        inner: InMemoryUserRepository,
        calls: Mutex<Vec<Call>>,
        fail_create_at: Option<usize>,
        fail_delete_at: Option<usize>,
    }

    impl ScriptedRepository {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                inner: InMemoryUserRepository::with_users(users),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
            self.calls().iter().filter(|c| matches(c)).count()
        }
    }

    #[async_trait]
    impl UserRepository for ScriptedRepository {
        async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
            let attempt = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(Call::Create(user.email.clone()));
                calls.iter().filter(|c| matches!(c, Call::Create(_))).count() - 1
            };
            if self.fail_create_at == Some(attempt) {
                return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
            }
            self.inner.create_user(user).await
        }

        async fn get_all_users(&self) -> Result<Vec<User>, RepositoryError> {
            self.calls.lock().unwrap().push(Call::List);
            self.inner.get_all_users().await
        }

        async fn delete_user_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
            let attempt = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(Call::Delete(id));
                calls.iter().filter(|c| matches!(c, Call::Delete(_))).count() - 1
            };
            if self.fail_delete_at == Some(attempt) {
                return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
            }
            self.inner.delete_user_by_id(id).await
        }
    }

    #[test]
    fn test_new_starts_uncleared() {
        let seeder = Seeder::new(&config(), InMemoryUserRepository::new()).unwrap();
        assert!(!seeder.is_database_cleared());

        let seeder = seeder.with_database_cleared(true);
        assert!(seeder.is_database_cleared());
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_any_io() {
        let mut config = config();
        config.endpoint = String::new();
        let repo = Arc::new(ScriptedRepository::default());

        let result = Seeder::new(&config, repo.clone());

        assert!(matches!(
            result,
            Err(SeedError::Config(ConfigError::Empty("endpoint")))
        ));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let mut config = config();
        config.collection = "users; DROP TABLE users".to_string();

        let result = Seeder::connect(&config);
        assert!(matches!(
            result,
            Err(SeedError::Config(ConfigError::InvalidCollection(_)))
        ));
    }

    #[tokio::test]
    async fn test_connect_does_not_touch_network() {
        let seeder = Seeder::connect(&config()).unwrap();

        assert_eq!(seeder.repository().collection(), "users");
        assert!(!seeder.is_database_cleared());
    }

    #[tokio::test]
    async fn test_seed_before_clear_fails_without_writes() {
        let repo = Arc::new(ScriptedRepository::default());
        let seeder = Seeder::new(&config(), repo.clone()).unwrap();

        let result = seeder.seed().await;

        assert!(matches!(result, Err(SeedError::NotCleared)));
        assert!(repo.calls().is_empty());
        assert!(repo.inner.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_then_seed_stores_sample_users() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut seeder = Seeder::new(&config(), repo.clone()).unwrap();

        seeder.clear().await.unwrap();
        assert!(seeder.is_database_cleared());
        seeder.seed().await.unwrap();

        let stored: Vec<User> = repo
            .get_all_users()
            .await
            .unwrap()
            .into_iter()
            .map(without_id)
            .collect();
        let expected: Vec<User> = sample_users().into_iter().map(without_id).collect();
        assert_eq!(stored, expected);
    }

    #[tokio::test]
    async fn test_seeded_admin_keeps_positions() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut seeder = Seeder::new(&config(), repo.clone()).unwrap();

        seeder.clear().await.unwrap();
        seeder.seed().await.unwrap();

        let users = repo.get_all_users().await.unwrap();
        assert_eq!(users.len(), 2);

        let admin = users.iter().find(|u| u.admin).unwrap();
        assert_eq!(admin.email, "admin@admin.com");
        assert_eq!(admin.positions, sample_users()[1].positions);

        let member = users.iter().find(|u| !u.admin).unwrap();
        assert_eq!(member.email, "user@user.com");
        assert!(member.positions.is_empty());
    }

    #[tokio::test]
    async fn test_seed_creates_in_declared_order() {
        let repo = Arc::new(ScriptedRepository::default());
        let seeder = Seeder::new(&config(), repo.clone())
            .unwrap()
            .with_database_cleared(true);

        seeder.seed().await.unwrap();

        let expected: Vec<Call> = sample_users()
            .into_iter()
            .map(|u| Call::Create(u.email))
            .collect();
        assert_eq!(repo.calls(), expected);
    }

    #[tokio::test]
    async fn test_seed_failure_keeps_earlier_users() {
        let repo = Arc::new(ScriptedRepository {
            fail_create_at: Some(1),
            ..Default::default()
        });
        let seeder = Seeder::new(&config(), repo.clone())
            .unwrap()
            .with_database_cleared(true);

        let result = seeder.seed().await;

        assert!(matches!(
            result,
            Err(SeedError::Repository(RepositoryError::Database(
                sqlx::Error::PoolTimedOut
            )))
        ));
        let stored = repo.inner.get_all_users().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "user@user.com");
        assert_eq!(repo.count(|c| matches!(c, Call::Create(_))), 2);
    }

    #[tokio::test]
    async fn test_invalid_user_stops_seeding() {
        let repo = Arc::new(ScriptedRepository::default());
        let seeder = Seeder::new(&config(), repo.clone())
            .unwrap()
            .with_database_cleared(true);

        let mut users = sample_users();
        let mut invalid = users[0].clone();
        invalid.id = Uuid::new_v4();
        invalid.email = "not-an-email".to_string();
        users.insert(1, invalid);

        let result = seeder.seed_users(&users).await;

        assert!(matches!(
            result,
            Err(SeedError::Validation { ref email, .. }) if email == "not-an-email"
        ));
        assert_eq!(repo.count(|c| matches!(c, Call::Create(_))), 1);
        let stored = repo.inner.get_all_users().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "user@user.com");
    }

    #[tokio::test]
    async fn test_clear_removes_existing_users() {
        let existing: Vec<User> = (0..5)
            .map(|i| {
                let mut user = sample_users().remove(0);
                user.email = format!("member{i}@example.com");
                user
            })
            .collect();
        let ids: Vec<Uuid> = existing.iter().map(|u| u.id).collect();
        let repo = Arc::new(ScriptedRepository::with_users(existing));
        let mut seeder = Seeder::new(&config(), repo.clone()).unwrap();

        seeder.clear().await.unwrap();

        assert!(repo.inner.get_all_users().await.unwrap().is_empty());
        let deleted: Vec<Call> = ids.into_iter().map(Call::Delete).collect();
        assert_eq!(repo.calls()[0], Call::List);
        assert_eq!(&repo.calls()[1..], deleted.as_slice());
    }

    #[tokio::test]
    async fn test_clear_twice_succeeds() {
        let repo = Arc::new(InMemoryUserRepository::with_users(sample_users()));
        let mut seeder = Seeder::new(&config(), repo.clone()).unwrap();

        seeder.clear().await.unwrap();
        assert!(repo.is_empty().await);

        seeder.clear().await.unwrap();
        assert!(repo.is_empty().await);
        assert!(seeder.is_database_cleared());
    }

    #[tokio::test]
    async fn test_failed_clear_blocks_seeding_until_retried() {
        let repo = Arc::new(ScriptedRepository {
            inner: InMemoryUserRepository::with_users(sample_users()),
            fail_delete_at: Some(1),
            ..Default::default()
        });
        let mut seeder = Seeder::new(&config(), repo.clone()).unwrap();

        let result = seeder.clear().await;
        assert!(matches!(result, Err(SeedError::Repository(_))));
        assert!(!seeder.is_database_cleared());
        assert_eq!(repo.inner.len().await, 1);

        assert!(matches!(seeder.seed().await, Err(SeedError::NotCleared)));
        assert_eq!(repo.count(|c| matches!(c, Call::Create(_))), 0);

        // Only the second delete fails, so the retry clears what is left.
        seeder.clear().await.unwrap();
        assert!(seeder.is_database_cleared());
        assert!(repo.inner.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_propagates_list_failure() {
        struct Unreachable;

        #[async_trait]
        impl UserRepository for Unreachable {
            async fn create_user(&self, _user: &User) -> Result<User, RepositoryError> {
                Err(RepositoryError::Database(sqlx::Error::PoolClosed))
            }

            async fn get_all_users(&self) -> Result<Vec<User>, RepositoryError> {
                Err(RepositoryError::Database(sqlx::Error::PoolClosed))
            }

            async fn delete_user_by_id(&self, _id: Uuid) -> Result<(), RepositoryError> {
                Err(RepositoryError::Database(sqlx::Error::PoolClosed))
            }
        }

        let mut seeder = Seeder::new(&config(), Unreachable).unwrap();

        assert!(seeder.clear().await.is_err());
        assert!(!seeder.is_database_cleared());
    }
}

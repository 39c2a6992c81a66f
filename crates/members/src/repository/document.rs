use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;
use validator::Validate;

use super::{UserRepository, is_valid_collection_name};
use crate::{errors::RepositoryError, models::User};

/// A user collection stored as JSONB documents in PostgreSQL.
///
/// Each collection is its own table; `seq` preserves insertion order so
/// listings come back in the order users were created.
#[derive(Clone, Debug)]
pub struct DocumentUserRepository {
    pool: PgPool,
    collection: String,
}

impl DocumentUserRepository {
    pub fn new(pool: PgPool, collection: impl Into<String>) -> Result<Self, RepositoryError> {
        let collection = collection.into();
        if !is_valid_collection_name(&collection) {
            return Err(RepositoryError::InvalidCollection(collection));
        }
        Ok(Self { pool, collection })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Creates the collection table if it does not exist yet.
    pub async fn ensure_collection(&self) -> Result<(), RepositoryError> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                seq BIGSERIAL PRIMARY KEY,
                id UUID NOT NULL UNIQUE,
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.collection
        );
        sqlx::query(&sql).execute(&self.pool).await?;

        tracing::debug!("Collection {} is ready", self.collection);
        Ok(())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        user.validate()?;

        let sql = format!(
            r#"
            INSERT INTO {} (id, document, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO NOTHING
            "#,
            self.collection
        );
        let result = sqlx::query(&sql)
            .bind(user.id)
            .bind(Json(user))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Duplicate(user.id));
        }

        Ok(user.clone())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, RepositoryError> {
        let sql = format!("SELECT document FROM {} ORDER BY seq", self.collection);
        let rows: Vec<(Json<User>,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(|(Json(user),)| user).collect())
    }

    async fn delete_user_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.collection);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }
}

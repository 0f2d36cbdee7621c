use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::records::models::Record;

/// Persistence operations over the `records` table
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn create(&self, name: &str, age: i32, file_url: &str) -> Result<Record>;

    /// All records, newest first
    async fn find_all(&self) -> Result<Vec<Record>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Record>>;

    /// Only `name` and `age` are ever changed. `None` when no row has `id`.
    async fn update(&self, id: i32, name: &str, age: i32) -> Result<Option<Record>>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i32) -> Result<bool>;
}

/// PostgreSQL-backed repository
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn create(&self, name: &str, age: i32, file_url: &str) -> Result<Record> {
        sqlx::query_as::<_, Record>(
            r#"
            INSERT INTO records (name, age, file_url)
            VALUES ($1, $2, $3)
            RETURNING id, name, age, file_url, created_at
            "#,
        )
        .bind(name)
        .bind(age)
        .bind(file_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert record: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_all(&self) -> Result<Vec<Record>> {
        sqlx::query_as::<_, Record>(
            r#"
            SELECT id, name, age, file_url, created_at
            FROM records
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list records: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Record>> {
        sqlx::query_as::<_, Record>(
            r#"
            SELECT id, name, age, file_url, created_at
            FROM records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch record {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: i32, name: &str, age: i32) -> Result<Option<Record>> {
        sqlx::query_as::<_, Record>(
            r#"
            UPDATE records
            SET name = $2, age = $3
            WHERE id = $1
            RETURNING id, name, age, file_url, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(age)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update record {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete record {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

use crate::db::sqlite::connection::SqliteConnection;
use async_trait::async_trait;
use sqlx::Error as SqlxError;
use std::sync::Arc;

#[async_trait]
pub trait TraitHealthCheckRepository {
    async fn check(&self) -> Result<bool, SqlxError>;
}

pub struct StructHealthCheckRepository {
    connection: Arc<SqliteConnection>,
}

impl StructHealthCheckRepository {
    pub fn new(connection: Arc<SqliteConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl TraitHealthCheckRepository for StructHealthCheckRepository {
    async fn check(&self) -> Result<bool, SqlxError> {
        let pool = self.connection.get_pool();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(pool)
            .await?;

        Ok(result == 1)
    }
}

use crate::env_config::models::app_setting::AppSettings;
use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct SqliteConnection {
    pool: Pool<Sqlite>,
}

impl SqliteConnection {
    pub async fn new(settings: Arc<AppSettings>) -> Result<Self, sqlx::Error> {
        Self::connect(
            &settings.app_env.database_url,
            settings.app_config.database.max_connections,
            settings.app_config.database.acquire_timeout(),
        )
        .await
    }

    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite connection to {}", database_url);

        // An in-memory database lives and dies with its connection
        let in_memory = database_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { max_connections })
            .acquire_timeout(acquire_timeout)
            .idle_timeout(if in_memory { None } else { Some(Duration::from_secs(600)) })
            .max_lifetime(if in_memory { None } else { Some(Duration::from_secs(1800)) })
            .connect(database_url)
            .await?;

        debug!("Executing test query on SQLite");
        match sqlx::query("SELECT 1").execute(&pool).await {
            Ok(_) => info!("SQLite connection successful"),
            Err(e) => {
                error!("Failed to connect to SQLite: {}", e);
                return Err(e);
            }
        }

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

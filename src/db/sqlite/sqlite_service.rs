use crate::db::sqlite::{
    connection::SqliteConnection,
    repository::{
        health_check_repository::{StructHealthCheckRepository, TraitHealthCheckRepository},
        quote_repository::{StructQuoteRepository, TraitQuoteRepository},
    },
};
use crate::env_config::models::app_setting::AppSettings;
use std::sync::Arc;
use tracing::{error, info};

pub struct SqliteService {
    // Connection
    pub connection: Arc<SqliteConnection>,

    // Repositories
    pub repository_health_check: Arc<dyn TraitHealthCheckRepository + Send + Sync>,
    pub repository_quote: Arc<dyn TraitQuoteRepository + Send + Sync>,
}

impl SqliteService {
    pub async fn new(settings: &Arc<AppSettings>) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing SQLite service components");

        let sqlite_connection = match SqliteConnection::new(settings.clone()).await {
            Ok(conn) => {
                info!("SQLite connection established successfully");
                Arc::new(conn)
            }
            Err(e) => {
                error!("Failed to establish SQLite connection: {}", e);
                return Err(Box::new(e));
            }
        };

        Self::from_connection(sqlite_connection).await
    }

    /// Wires the repositories and resets the quote table.
    pub async fn from_connection(
        sqlite_connection: Arc<SqliteConnection>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing repositories");

        let quote_repository = StructQuoteRepository::new(sqlite_connection.clone());
        if let Err(e) = quote_repository.recreate_table().await {
            error!("Failed to recreate quote table: {}", e);
            return Err(Box::new(e));
        }

        let health_check_repository = Arc::new(StructHealthCheckRepository::new(
            sqlite_connection.clone(),
        )) as Arc<dyn TraitHealthCheckRepository + Send + Sync>;

        info!("SQLite service initialized successfully");
        Ok(Self {
            connection: sqlite_connection,
            repository_health_check: health_check_repository,
            repository_quote: Arc::new(quote_repository),
        })
    }
}

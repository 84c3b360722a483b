use crate::db::sqlite::sqlite_service::SqliteService;
use crate::env_config::models::app_setting::AppSettings;
use crate::services::quotes::quote_service::QuoteService;

use std::sync::Arc;

pub struct AppState {
    pub settings: Arc<AppSettings>,
    pub sqlite_service: Arc<SqliteService>,
    pub quote_service: Arc<QuoteService>,
}

impl AppState {
    pub fn new(
        settings: Arc<AppSettings>,
        sqlite_service: Arc<SqliteService>,
        quote_service: Arc<QuoteService>,
    ) -> Self {
        Self {
            settings,
            sqlite_service,
            quote_service,
        }
    }
}

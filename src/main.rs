use cotacao::{
    api::create_router,
    app_state::models::AppState,
    db::sqlite::sqlite_service::SqliteService,
    env_config::models::app_setting::AppSettings,
    logger,
    services::{
        quotes::{provider::UpstreamQuoteProvider, quote_service::QuoteService},
        transport::ReqwestTransport,
    },
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Настройки и логирование
    let settings: Arc<AppSettings> = Arc::new(initialize_application()?);

    // Подключение к базе данных (таблица пересоздаётся при каждом старте)
    let sqlite_service = Arc::new(initialize_database_connection(settings.clone()).await?);

    let server_address: SocketAddr = format!(
        "{}:{}",
        settings.app_env.server_address, settings.app_env.server_port,
    )
    .parse()?;

    info!("Server will listen on: {}", server_address);

    let quote_service = Arc::new(initialize_quote_service(&settings, &sqlite_service)?);

    let app_state: Arc<AppState> = Arc::new(AppState::new(
        settings.clone(),
        sqlite_service,
        quote_service,
    ));

    let app_router = create_router(app_state);

    start_http_server(app_router, server_address).await
}

/// Loads settings and installs the logger
fn initialize_application() -> Result<AppSettings, Box<dyn std::error::Error>> {
    let app_settings = match AppSettings::load() {
        Ok(settings) => settings,
        Err(err) => {
            // Configured logger is not available yet
            if logger::init_logger("info", "plain", true).is_ok() {
                error!("Failed to load configuration: {}", err);
            } else {
                eprintln!("Failed to load configuration: {}", err);
            }
            return Err(err.into());
        }
    };

    logger::init_logger(
        &app_settings.app_config.log.level,
        &app_settings.app_config.log.format,
        app_settings.app_env.is_local(),
    )?;

    info!("Starting Cotacao Service application...");
    info!("Current environment: {}", app_settings.app_env.env);

    if app_settings.app_env.is_local() {
        info!("Running in local development mode");
        debug!("Configuration details: {:#?}", app_settings);
    } else {
        info!("Running in production mode");
    }

    Ok(app_settings)
}

async fn initialize_database_connection(
    settings: Arc<AppSettings>,
) -> Result<SqliteService, Box<dyn std::error::Error>> {
    info!("Initializing database connection...");

    match SqliteService::new(&settings).await {
        Ok(service) => {
            info!("SQLite connection established successfully");
            Ok(service)
        }
        Err(err) => {
            error!("Failed to connect to SQLite: {}", err);
            Err(err)
        }
    }
}

fn initialize_quote_service(
    settings: &AppSettings,
    sqlite_service: &SqliteService,
) -> Result<QuoteService, Box<dyn std::error::Error>> {
    let config = &settings.app_config;
    let transport = Arc::new(ReqwestTransport::new()?);
    let provider = UpstreamQuoteProvider::new(transport, config.upstream.url.clone());

    info!(
        "Quote provider {} with {}ms upstream and {}ms write budget",
        provider.url(),
        config.upstream.timeout_ms,
        config.database.write_timeout_ms
    );

    Ok(QuoteService::new(
        provider,
        sqlite_service.repository_quote.clone(),
        config.upstream.timeout(),
        config.database.write_timeout(),
    ))
}

async fn start_http_server(
    app: axum::Router,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting HTTP server on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind to address {}: {}", addr, err);
            return Err(err.into());
        }
    };

    info!("Server started successfully, now accepting connections");

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
        return Err(err.into());
    }

    Ok(())
}

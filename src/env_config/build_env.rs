use super::error::ConfigError;
use super::models::app_env::{AppEnv, Env};
use std::env;
use std::str::FromStr;

const DEFAULT_ENV: &str = "local";
const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: &str = "8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://cambio.db?mode=rwc";

impl AppEnv {
    pub fn new() -> Result<AppEnv, ConfigError> {
        let port = get_env_var("SERVER_PORT", DEFAULT_SERVER_PORT);

        Ok(AppEnv {
            env: Env::from_str(&get_env_var("ENV", DEFAULT_ENV))?,
            server_port: port.parse().map_err(|_| ConfigError::InvalidVar {
                name: "SERVER_PORT",
                value: port.clone(),
            })?,
            server_address: get_env_var("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            database_url: get_env_var("DATABASE_URL", DEFAULT_DATABASE_URL),
        })
    }
}

fn get_env_var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

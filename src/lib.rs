pub mod api;
pub mod app_state;
pub mod db;
pub mod env_config;
pub mod error;
pub mod layers;
pub mod logger;
pub mod services;
pub mod utils;

pub mod models;
pub mod provider;
pub mod quote_service;

pub mod health_check_repository;
pub mod quote_repository;

pub mod connection;
pub mod repository;
pub mod sqlite_service;

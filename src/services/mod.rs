pub mod fetcher;
pub mod quotes;
pub mod transport;

mod config;

pub use config::{LogFormat, init_logger};

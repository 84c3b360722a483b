use std::fmt;
use std::io::{Error, ErrorKind};
use tracing_subscriber::{
    EnvFilter,
    fmt::{format::FmtSpan, time::ChronoLocal},
};

/// Supported log format types
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Plain => write!(f, "plain"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl From<&str> for LogFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Plain,
        }
    }
}

fn build_filter(log_level: &str) -> Result<EnvFilter, Error> {
    EnvFilter::try_new(log_level)
        .map_err(|e| Error::new(ErrorKind::InvalidInput, format!("Invalid log level: {}", e)))
}

/// Installs the global subscriber.
///
/// `with_time` adds local timestamps, for interactive runs. Hosted environments stamp
/// lines themselves, so there the target is printed instead.
pub fn init_logger(log_level: &str, log_format: &str, with_time: bool) -> Result<(), Error> {
    let filter = build_filter(log_level)?;
    let format = LogFormat::from(log_format);

    let result = if with_time {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_timer(ChronoLocal::rfc_3339())
            .with_span_events(FmtSpan::CLOSE);

        match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Plain => builder.try_init(),
        }
    } else {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_span_events(FmtSpan::CLOSE)
            .without_time();

        match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Plain => builder.try_init(),
        }
    };

    result.map_err(|e| Error::new(ErrorKind::AlreadyExists, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::from("json"), LogFormat::Json);
        assert_eq!(LogFormat::from("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from("plain"), LogFormat::Plain);
        assert_eq!(LogFormat::from("invalid"), LogFormat::Plain);
    }

    #[test]
    fn test_build_filter() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("info,sqlx=warn").is_ok());
    }

    #[test]
    fn test_init_logger_twice() {
        // Other tests may have installed a subscriber already
        let _ = init_logger("info", "plain", true);
        let err = init_logger("info", "json", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }
}

//! Error types shared by the origin service and the fetch client.
//!
//! Every pipeline failure is a [`QuoteError`] tagged with the [`Stage`] that produced
//! it. Timeouts are always [`QuoteError::DeadlineExceeded`] and print the same fixed
//! message whatever the stage, so the client can show it to the user as-is.
use crate::utils::deadline::Deadline;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message reported for every elapsed deadline.
pub const TIMEOUT_MESSAGE: &str = "process timed out";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Origin service -> quote provider
    Upstream,
    /// Provider body -> `QuoteRecord`
    Parse,
    /// `QuoteRecord` -> database row
    Persist,
    /// Fetch client -> origin service
    Origin,
    /// Origin body -> bid
    Decode,
    /// Bid -> output file
    Sink,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Upstream => write!(f, "upstream call"),
            Stage::Parse => write!(f, "response parse"),
            Stage::Persist => write!(f, "persistence write"),
            Stage::Origin => write!(f, "origin request"),
            Stage::Decode => write!(f, "response decode"),
            Stage::Sink => write!(f, "sink write"),
        }
    }
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("process timed out")]
    DeadlineExceeded { stage: Stage },

    #[error("{stage}: failed to make request: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    #[error("{stage}: server returned status: {status}")]
    UnexpectedStatus { stage: Stage, status: String },

    #[error("{stage}: failed to parse JSON: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    #[error("{stage}: JSON does not contain '{field}' field")]
    MissingField { stage: Stage, field: &'static str },

    #[error("failed to write to database: {0}")]
    Persistence(#[from] PersistenceFailure),

    #[error("failed to write {}: {source}", .path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Persistence failures share one [`QuoteError`] variant; the cause is kept for logs.
#[derive(Debug, Error)]
pub enum PersistenceFailure {
    #[error("write deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("write task did not finish: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

impl QuoteError {
    /// Classifies a transport failure raised while `deadline` was running.
    ///
    /// The client may surface its own timeout (reqwest's `is_timeout`) or a connection
    /// reset that races the deadline. Both count as a timeout once the deadline is gone.
    pub fn from_transport(stage: Stage, deadline: &Deadline, source: BoxError) -> Self {
        let transport_timeout = source
            .downcast_ref::<reqwest::Error>()
            .is_some_and(|e| e.is_timeout());

        if deadline.is_expired() || transport_timeout {
            QuoteError::DeadlineExceeded { stage }
        } else {
            QuoteError::Transport { stage, source }
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            QuoteError::DeadlineExceeded { stage }
            | QuoteError::Transport { stage, .. }
            | QuoteError::UnexpectedStatus { stage, .. }
            | QuoteError::Decode { stage, .. }
            | QuoteError::MissingField { stage, .. } => *stage,
            QuoteError::Persistence(_) => Stage::Persist,
            QuoteError::Sink { .. } => Stage::Sink,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, QuoteError::DeadlineExceeded { .. })
    }
}

// File: src/services/fetcher/quote_fetcher.rs
use super::sink::{FetchedLine, TraitSink};
use crate::error::{QuoteError, Stage};
use crate::services::transport::{TraitHttpTransport, get_within};
use crate::utils::deadline::Deadline;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ORIGIN_URL: &str = "http://localhost:8080/cotacao";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300);

#[derive(Debug, Deserialize)]
struct OriginBody {
    bid: Option<String>,
}

/// One fetch from the origin service, saved to a sink.
pub struct QuoteFetcher {
    transport: Arc<dyn TraitHttpTransport>,
    url: String,
}

impl QuoteFetcher {
    pub fn new(transport: Arc<dyn TraitHttpTransport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    /// Fetches the bid and replaces the sink content with it.
    ///
    /// `deadline` is started by the caller when the invocation begins and covers the
    /// request and body download.
    pub async fn fetch_and_save(
        &self,
        deadline: &Deadline,
        sink: &dyn TraitSink,
    ) -> Result<FetchedLine, QuoteError> {
        let bid = self.fetch_bid(deadline).await?;

        let line = FetchedLine::new(&bid);
        sink.replace(&line).await.map_err(|source| QuoteError::Sink {
            path: sink.location().to_path_buf(),
            source,
        })?;

        Ok(line)
    }

    pub async fn fetch_bid(&self, deadline: &Deadline) -> Result<String, QuoteError> {
        let reply = get_within(self.transport.as_ref(), &self.url, deadline, Stage::Origin).await?;
        debug!("Origin replied with {} bytes", reply.body.len());
        extract_bid(&reply.body)
    }
}

/// Pulls `bid` out of `{"bid": "..."}`.
///
/// A body that decodes but has no `bid` is `MissingField`, not `Decode`.
pub fn extract_bid(body: &[u8]) -> Result<String, QuoteError> {
    let body: OriginBody = serde_json::from_slice(body).map_err(|source| QuoteError::Decode {
        stage: Stage::Decode,
        source,
    })?;

    body.bid.ok_or(QuoteError::MissingField {
        stage: Stage::Decode,
        field: "bid",
    })
}

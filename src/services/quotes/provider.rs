// File: src/services/quotes/provider.rs
use super::models::{QuoteRecord, parse_quote};
use crate::error::{QuoteError, Stage};
use crate::services::transport::{TraitHttpTransport, get_within};
use crate::utils::deadline::Deadline;
use std::sync::Arc;
use tracing::debug;

/// Read-only client for the exchange-rate provider.
pub struct UpstreamQuoteProvider {
    transport: Arc<dyn TraitHttpTransport>,
    url: String,
}

impl UpstreamQuoteProvider {
    pub fn new(transport: Arc<dyn TraitHttpTransport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Calls the provider under `deadline` and parses the reply.
    pub async fn fetch_quote(&self, deadline: Deadline) -> Result<QuoteRecord, QuoteError> {
        debug!(
            "Requesting quote from {} ({:?} left)",
            self.url,
            deadline.remaining()
        );

        let reply = get_within(self.transport.as_ref(), &self.url, &deadline, Stage::Upstream)
            .await?;

        parse_quote(&reply.body)
    }
}

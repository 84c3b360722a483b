// File: src/services/quotes/quote_service.rs
use super::models::{QuoteProjection, QuoteRecord};
use super::provider::UpstreamQuoteProvider;
use crate::db::sqlite::repository::quote_repository::TraitQuoteRepository;
use crate::error::{PersistenceFailure, QuoteError};
use crate::utils::deadline::Deadline;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Upstream call -> parse -> insert, each step bounded by its own deadline.
pub struct QuoteService {
    provider: UpstreamQuoteProvider,
    repository: Arc<dyn TraitQuoteRepository + Send + Sync>,
    upstream_timeout: Duration,
    write_timeout: Duration,
}

impl QuoteService {
    pub fn new(
        provider: UpstreamQuoteProvider,
        repository: Arc<dyn TraitQuoteRepository + Send + Sync>,
        upstream_timeout: Duration,
        write_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            repository,
            upstream_timeout,
            write_timeout,
        }
    }

    /// Fetches the current quote, stores it and returns its projection.
    ///
    /// The upstream deadline is a child of `inbound`; the write deadline is not, and the
    /// insert keeps running if the caller goes away.
    pub async fn fetch_and_store(&self, inbound: &Deadline) -> Result<QuoteProjection, QuoteError> {
        let upstream_deadline = inbound.child(self.upstream_timeout);
        let record = self.provider.fetch_quote(upstream_deadline).await?;

        debug!(
            "Parsed quote {}-{} bid={} ask={}",
            record.code, record.code_in, record.bid, record.ask
        );

        let projection = record.projection();
        let write_deadline = Deadline::after(self.write_timeout);
        let id = self.persist(record, write_deadline).await?;

        info!("Quote stored as row {} with bid {}", id, projection.bid);
        Ok(projection)
    }

    async fn persist(&self, record: QuoteRecord, deadline: Deadline) -> Result<i64, QuoteError> {
        let repository = self.repository.clone();

        // Spawned so that dropping the request future does not cancel the write
        let write = tokio::spawn(async move { repository.insert(&record, &deadline).await });

        match write.await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(failure)) => Err(failure.into()),
            Err(e) => Err(PersistenceFailure::Aborted(e).into()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use crate::utils::deadline::Expired;
    use sqlx::Error as SqlxError;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// In-memory repository with a configurable write latency. Rows land only when the
    /// write finishes before its deadline.
    #[derive(Default)]
    pub struct FakeQuoteRepository {
        pub rows: Mutex<Vec<QuoteRecord>>,
        pub started: Notify,
        latency: Duration,
        fail: bool,
    }

    impl FakeQuoteRepository {
        pub fn with_latency(latency: Duration) -> Self {
            Self {
                latency,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TraitQuoteRepository for FakeQuoteRepository {
        async fn insert(&self, record: &QuoteRecord, deadline: &Deadline) -> Result<i64, PersistenceFailure> {
            self.started.notify_one();
            if let Err(Expired) = deadline.run(tokio::time::sleep(self.latency)).await {
                return Err(PersistenceFailure::DeadlineExceeded);
            }
            if self.fail {
                return Err(SqlxError::PoolTimedOut.into());
            }
            let mut rows = self.rows.lock().unwrap();
            rows.push(record.clone());
            Ok(rows.len() as i64)
        }
    }
}

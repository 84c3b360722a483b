// File: src/services/transport.rs
use crate::error::{BoxError, QuoteError, Stage};
use crate::utils::deadline::{Deadline, Expired};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// Status and full body of a GET response.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Outbound HTTP used by both the origin service and the fetch client.
///
/// Owned by whichever component issues requests, so tests can swap in a fake.
#[async_trait]
pub trait TraitHttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpReply, BoxError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TraitHttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, BoxError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpReply { status, body })
    }
}

/// GETs `url` under `deadline` and requires a 200.
///
/// Body download counts against the same deadline as the headers.
pub async fn get_within(
    transport: &dyn TraitHttpTransport,
    url: &str,
    deadline: &Deadline,
    stage: Stage,
) -> Result<HttpReply, QuoteError> {
    let reply = match deadline.run(transport.get(url)).await {
        Ok(Ok(reply)) => reply,
        Ok(Err(source)) => return Err(QuoteError::from_transport(stage, deadline, source)),
        Err(Expired) => return Err(QuoteError::DeadlineExceeded { stage }),
    };

    if reply.status != StatusCode::OK {
        return Err(QuoteError::UnexpectedStatus {
            stage,
            status: reply.status.to_string(),
        });
    }

    Ok(reply)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers every GET with a canned reply after an optional delay.
    pub struct FakeTransport {
        reply: Result<HttpReply, String>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl FakeTransport {
        pub fn ok(body: &str) -> Self {
            Self::reply(StatusCode::OK, body)
        }

        pub fn reply(status: StatusCode, body: &str) -> Self {
            Self {
                reply: Ok(HttpReply {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TraitHttpTransport for FakeTransport {
        async fn get(&self, _url: &str) -> Result<HttpReply, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.reply.clone().map_err(BoxError::from)
        }
    }
}

// File: src/utils/deadline.rs
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Returned by [`Deadline::run`] when the deadline passes before the future completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline exceeded")]
pub struct Expired;

/// Absolute point in time after which an in-flight operation is abandoned.
///
/// Deadlines are plain values handed to each stage of a pipeline. A stage that must
/// outlive its caller starts a fresh one with [`Deadline::after`] instead of deriving
/// it with [`Deadline::child`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A new root deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// A deadline `budget` from now, never later than `self`.
    pub fn child(&self, budget: Duration) -> Self {
        Self {
            at: self.at.min(Instant::now() + budget),
        }
    }

    pub fn at(&self) -> Instant {
        self.at
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Drives `fut` until it completes or the deadline passes, whichever comes first.
    ///
    /// An already expired deadline fails without polling `fut` at all.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Expired>
    where
        F: Future,
    {
        if self.is_expired() {
            return Err(Expired);
        }
        tokio::time::timeout_at(self.at, fut)
            .await
            .map_err(|_| Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_child_is_clamped_to_parent() {
        let parent = Deadline::after(Duration::from_millis(50));
        let child = parent.child(Duration::from_millis(200));
        assert_eq!(child.at(), parent.at());

        let parent = Deadline::after(Duration::from_secs(1));
        let child = parent.child(Duration::from_millis(200));
        assert!(child.at() < parent.at());
        assert_eq!(child.remaining(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_root_deadline_ignores_expired_parent() {
        let parent = Deadline::after(Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(parent.is_expired());
        assert!(parent.child(Duration::from_millis(10)).is_expired());

        let fresh = Deadline::after(Duration::from_millis(10));
        assert!(!fresh.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out_slow_future() {
        let deadline = Deadline::after(Duration::from_millis(200));
        let result = deadline
            .run(tokio::time::sleep(Duration::from_millis(500)))
            .await;
        assert_eq!(result, Err(Expired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_output_within_budget() {
        let deadline = Deadline::after(Duration::from_millis(200));
        let result = deadline
            .run(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                7
            })
            .await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_never_polls() {
        let deadline = Deadline::after(Duration::ZERO);
        let polled = AtomicBool::new(false);
        let result = deadline
            .run(async {
                polled.store(true, Ordering::SeqCst);
            })
            .await;
        assert_eq!(result, Err(Expired));
        assert!(!polled.load(Ordering::SeqCst));
    }
}

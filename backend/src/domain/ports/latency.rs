//! Driven port for the artificial delay applied before store operations.

use std::time::Duration;

use async_trait::async_trait;

/// Async sleeping abstraction so tests can run without wall-clock delays.
#[async_trait]
pub trait LatencySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl LatencySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Sleeper that returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLatency;

#[async_trait]
impl LatencySleeper for NoLatency {
    async fn sleep(&self, _duration: Duration) {}
}

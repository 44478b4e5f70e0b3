//! Production time handler

use async_trait::async_trait;
use mingle_core::effects::TimeEffects;
use mingle_core::time::EpochMs;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Real time handler for production use.
///
/// Stateless; delegates to the operating system clock and tokio's timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TimeEffects for RealTimeHandler {
    async fn now_ms(&self) -> EpochMs {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as u64
    }

    async fn sleep_ms(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

//! Simulated time handler for deterministic tests

use async_trait::async_trait;
use mingle_core::effects::TimeEffects;
use mingle_core::time::EpochMs;
use parking_lot::Mutex;
use std::sync::Arc;

/// Simulated time handler running on a virtual clock.
///
/// `sleep_ms` advances the clock immediately instead of waiting, so a test
/// can drive delivery-status and typing-indicator timers without real delays.
/// Cloning shares the underlying clock.
#[derive(Debug, Clone)]
pub struct SimulatedTimeHandler {
    current_ms: Arc<Mutex<EpochMs>>,
}

impl SimulatedTimeHandler {
    /// Create a handler starting at the given virtual time.
    pub fn new(start_ms: EpochMs) -> Self {
        Self {
            current_ms: Arc::new(Mutex::new(start_ms)),
        }
    }

    /// Create a handler starting at the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::new(0)
    }

    /// Advance the virtual clock.
    pub fn advance(&self, ms: u64) {
        *self.current_ms.lock() += ms;
    }

    /// Set the absolute virtual time.
    pub fn set(&self, ms: EpochMs) {
        *self.current_ms.lock() = ms;
    }

    /// Read the virtual clock without suspending.
    pub fn now(&self) -> EpochMs {
        *self.current_ms.lock()
    }
}

impl Default for SimulatedTimeHandler {
    fn default() -> Self {
        Self::at_epoch()
    }
}

#[async_trait]
impl TimeEffects for SimulatedTimeHandler {
    async fn now_ms(&self) -> EpochMs {
        self.now()
    }

    async fn sleep_ms(&self, ms: u64) {
        self.advance(ms);
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

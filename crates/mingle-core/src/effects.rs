//! Time effect trait
//!
//! Screens never read the system clock directly. They are handed a clock
//! through this trait so tests can substitute a simulated handler and advance
//! virtual time deterministically.

use crate::time::EpochMs;
use async_trait::async_trait;

/// Access to the current time and cooperative delays.
///
/// Production code uses `mingle_effects::RealTimeHandler`; tests use
/// `mingle_effects::SimulatedTimeHandler`.
#[async_trait]
pub trait TimeEffects: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    async fn now_ms(&self) -> EpochMs;

    /// Suspend for at least `ms` milliseconds.
    async fn sleep_ms(&self, ms: u64);

    /// Whether this handler runs on a virtual clock.
    fn is_simulated(&self) -> bool {
        false
    }
}

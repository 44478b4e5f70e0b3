//! # Mingle Effects
//!
//! Handler implementations for the effect traits declared in `mingle-core`,
//! plus the delayed-task queue that screens use for their scoped timers.
//!
//! Two time handlers are provided: [`RealTimeHandler`] delegates to the
//! system clock and tokio's sleep, [`SimulatedTimeHandler`] runs on a virtual
//! clock that tests advance by hand.

pub mod scheduler;
pub mod time;

pub use scheduler::{TaskHandle, TaskQueue};
pub use time::{RealTimeHandler, SimulatedTimeHandler};

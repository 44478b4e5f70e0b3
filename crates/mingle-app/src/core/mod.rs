//! # Core Application Module
//!
//! The intent/reducer pipeline:
//!
//! - [`Intent`]: User actions emitted by screen components
//! - [`AppState`]: The whole application's view state
//! - [`Command`]: Side effects the host executes (navigate, backend call,
//!   toast)
//! - [`DirectoryRequest`] / [`DirectoryEvent`]: the backend round-trip

mod intent;
mod reducer;

pub use intent::{Intent, Screen};
pub use reducer::{AppState, Command, DirectoryEvent, DirectoryRequest};

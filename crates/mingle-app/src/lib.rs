//! # Mingle App
//!
//! Headless view-state core for the Mingle social client. Each screen owns
//! its state exclusively; child components receive read-only projections and
//! emit [`Intent`](core::Intent)s, which the reducer applies synchronously,
//! emitting [`Command`](core::Command)s for the host shell to execute.
//!
//! The crate performs no I/O of its own: backend calls go through the
//! [`Directory`](directory::Directory) trait, and every time-dependent
//! computation takes the clock as an argument, so the whole core runs
//! deterministically on a simulated clock in tests.
//!
//! ## Screens
//!
//! - [`views::roster`]: friend discovery, requests, and the friends list
//! - [`views::gallery`]: media browsing, filtering, and the full-screen
//!   viewer
//! - [`views::chat`]: one conversation's message log with simulated delivery
//!   and presence

pub mod core;
pub mod directory;
pub mod errors;
pub mod session;
pub mod views;

pub use crate::core::{AppState, Command, DirectoryEvent, DirectoryRequest, Intent, Screen};
pub use directory::{Directory, DirectoryError, InMemoryDirectory};
pub use errors::ErrorCategory;
pub use session::{Sender, Session};

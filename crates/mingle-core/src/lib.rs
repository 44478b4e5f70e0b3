//! # Mingle Core
//!
//! Foundation layer for the Mingle client: identifier newtypes, millisecond
//! epoch time helpers, the time effect trait, and the shared error type.
//!
//! This crate is interface-only: it carries no handler implementations and no
//! runtime coupling. Production and simulated handlers live in
//! `mingle-effects`.

pub mod effects;
pub mod errors;
pub mod identifiers;
pub mod time;

pub use effects::TimeEffects;
pub use errors::CoreError;
pub use identifiers::{
    AlbumId, ConversationId, FriendshipId, MediaId, MessageId, RequestId, UserId,
};
pub use time::EpochMs;

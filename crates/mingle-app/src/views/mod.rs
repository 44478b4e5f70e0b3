//! # View State Module
//!
//! Per-screen view state for the Mingle client. These types are plain data:
//!
//! - Serializable for debugging and host hand-off
//! - Mutated only through their own operations and the reducer
//! - Free of I/O; every time-dependent query takes the clock as an argument

mod collection;

pub mod chat;
pub mod gallery;
pub mod notifications;
pub mod roster;

pub use collection::WorkingSet;

// Re-export state types for convenience
pub use chat::{
    ChatState, ChatTimings, Conversation, ConversationMember, DeliveryStatus, Lightbox, Message,
    MessageKind, MessagePayload, MessageSearch, Reaction, ReplyContext,
};
pub use gallery::{
    Album, DateRange, GalleryState, MediaFilter, MediaItem, MediaKind, MediaTypeFilter, Privacy,
    PrivacyFilter, SortBy, ViewerCursor, PAGE_SIZE,
};
pub use notifications::{Toast, ToastLevel};
pub use roster::{
    FriendRequest, Friendship, RequestDirection, RosterFilter, RosterState, RosterTab, RosterView,
    UserProfile,
};

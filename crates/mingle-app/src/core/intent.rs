//! # Intents: User Actions
//!
//! An intent is a user action emitted by a screen component. The reducer
//! applies it to the owned view state and emits commands for the host.
//!
//! ## Flow
//!
//! ```text
//! Intent → Reduce → View state + Commands (navigate / directory / toast)
//! ```

use crate::views::chat::Conversation;
use crate::views::gallery::MediaFilter;
use crate::views::roster::{RosterFilter, RosterTab, UserProfile};
use mingle_core::identifiers::{AlbumId, FriendshipId, MediaId, MessageId, RequestId, UserId};
use serde::{Deserialize, Serialize};

/// Screen identifier for navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Login screen
    #[default]
    Login,
    /// Registration screen
    Registration,
    /// Friend discovery and management
    FriendDiscovery,
    /// Real-time chat
    Chat,
    /// Media gallery and viewer
    MediaGallery,
    /// Own profile
    Profile,
}

/// A user action emitted by a screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Intent {
    // =========================================================================
    // Session and navigation
    // =========================================================================
    /// Log in with a resolved profile
    LogIn(UserProfile),
    /// Log out and drop session state
    LogOut,
    /// Navigate to a screen
    NavigateTo(Screen),

    // =========================================================================
    // Roster (friend discovery)
    // =========================================================================
    /// Switch the active roster tab
    SwitchRosterTab(RosterTab),
    /// Set the roster search term
    SetRosterSearch(String),
    /// Replace the advanced filter set
    SetRosterFilter(RosterFilter),
    /// Reset the advanced filter set to identity
    ClearRosterFilter,
    /// Send a friend request to a discoverable user
    SendFriendRequest {
        /// Target user
        user: UserId,
    },
    /// Accept an incoming friend request
    AcceptFriendRequest {
        /// The pending request
        request: RequestId,
    },
    /// Decline an incoming friend request
    DeclineFriendRequest {
        /// The pending request
        request: RequestId,
    },
    /// End a friendship
    Unfriend {
        /// The friendship record
        friendship: FriendshipId,
    },
    /// Block a user everywhere
    BlockUser {
        /// The user to block
        user: UserId,
    },
    /// Open a chat with a friend
    MessageFriend {
        /// The friend to message
        user: UserId,
    },

    // =========================================================================
    // Gallery
    // =========================================================================
    /// Select an album, or `None` for all media
    SelectAlbum(Option<AlbumId>),
    /// Set the gallery search query
    SetGallerySearch(String),
    /// Replace the gallery filter/sort set
    SetMediaFilter(MediaFilter),
    /// Enter or leave multi-select mode
    ToggleSelectionMode,
    /// Toggle one item's membership in the selection
    ToggleMediaSelected(MediaId),
    /// Delete every selected item
    DeleteSelectedMedia,
    /// Create a new empty album
    CreateAlbum {
        /// Album display name
        name: String,
    },
    /// Delete an album (items survive under "all media")
    DeleteAlbum {
        /// The album to delete
        album: AlbumId,
    },
    /// Reveal the next page of visible media
    LoadMoreMedia,
    /// Open the full-screen viewer at an item
    OpenMediaViewer(MediaId),
    /// Step the viewer forward (wraps)
    MediaViewerNext,
    /// Step the viewer backward (wraps)
    MediaViewerPrevious,
    /// Close the viewer
    CloseMediaViewer,

    // =========================================================================
    // Chat
    // =========================================================================
    /// Open a conversation
    OpenConversation(Conversation),
    /// Leave the chat screen, dropping pending timers
    LeaveConversation,
    /// Send the composer draft
    SendChatMessage {
        /// Raw draft text
        draft: String,
    },
    /// Attach a file to the conversation
    AttachFile {
        /// Original file name
        name: String,
        /// Media type, e.g. "image/png"
        mime_type: String,
        /// Size in bytes
        size_bytes: u64,
        /// Upload URL
        url: String,
    },
    /// React to a message with an emoji
    ReactToMessage {
        /// Target message
        message: MessageId,
        /// The emoji
        emoji: String,
    },
    /// Begin replying to a message
    ReplyToMessage {
        /// The message being answered
        message: MessageId,
    },
    /// Cancel the pending reply
    CancelReply,
    /// Start voice recording
    StartRecording,
    /// Stop recording and send the voice note
    StopRecording,
    /// Open or update message search
    SetMessageSearch {
        /// The query
        query: String,
    },
    /// Close message search
    CloseMessageSearch,
    /// Move the search cursor forward (stops at the end)
    MessageSearchNext,
    /// Move the search cursor backward (stops at the start)
    MessageSearchPrevious,
    /// Open the image lightbox at a message
    OpenChatLightbox(MessageId),
    /// Step the lightbox forward (wraps)
    ChatLightboxNext,
    /// Step the lightbox backward (wraps)
    ChatLightboxPrevious,
    /// Close the lightbox
    CloseChatLightbox,
}

//! Identifier types used across the Mingle client
//!
//! Each entity gets its own uuid-backed newtype so that a user id can never
//! be passed where a message id is expected. Display output is prefixed with
//! the entity kind for log readability.

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID.
            pub fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| CoreError::InvalidId(s.to_string()))
            }
        }
    };
}

entity_id!(
    /// Identifies a user account, whether the current user or a peer.
    UserId,
    "user"
);

entity_id!(
    /// Identifies a pending friend request.
    RequestId,
    "request"
);

entity_id!(
    /// Identifies a confirmed friendship.
    FriendshipId,
    "friendship"
);

entity_id!(
    /// Identifies a media item in the gallery.
    MediaId,
    "media"
);

entity_id!(
    /// Identifies an album partition of the gallery.
    AlbumId,
    "album"
);

entity_id!(
    /// Identifies a chat message.
    MessageId,
    "message"
);

entity_id!(
    /// Identifies a conversation.
    ConversationId,
    "conversation"
);

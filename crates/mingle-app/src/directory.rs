//! User directory backend.
//!
//! The screens never talk to a server directly; they emit
//! [`DirectoryRequest`](crate::core::DirectoryRequest) commands and the host
//! drives an implementation of [`Directory`]. [`InMemoryDirectory`] is the
//! mutex-guarded mock used by tests and demo hosts.

use crate::views::roster::{FriendRequest, Friendship, RequestDirection, UserProfile};
use async_trait::async_trait;
use mingle_core::identifiers::{FriendshipId, RequestId, UserId};
use mingle_core::time::EpochMs;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Directory operation failure.
///
/// Every variant carries a human-readable message: the reducer surfaces these
/// verbatim as error toasts and never retries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(String),
    /// The referenced request does not exist.
    #[error("friend request not found: {0}")]
    RequestNotFound(String),
    /// A request to this user is already pending.
    #[error("a friend request to {0} is already pending")]
    AlreadyRequested(String),
    /// The backend could not be reached.
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    /// Error category for toast severity routing.
    #[must_use]
    pub fn category(&self) -> crate::errors::ErrorCategory {
        use crate::errors::ErrorCategory;
        match self {
            Self::UserNotFound(_) | Self::RequestNotFound(_) => ErrorCategory::NotFound,
            Self::AlreadyRequested(_) => ErrorCategory::Input,
            Self::Unavailable(_) => ErrorCategory::Network,
        }
    }
}

/// Async directory operations the client depends on.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Users discoverable by `viewer`, excluding the viewer themself.
    async fn list_discoverable_users(
        &self,
        viewer: &UserId,
    ) -> Result<Vec<UserProfile>, DirectoryError>;

    /// Users whose name or location matches `text`.
    async fn search_users(&self, text: &str) -> Result<Vec<UserProfile>, DirectoryError>;

    /// Confirmed friends of `user`.
    async fn get_friends(&self, user: &UserId) -> Result<Vec<Friendship>, DirectoryError>;

    /// Send a friend request from `from` to `target`.
    async fn send_friend_request(
        &self,
        from: &UserId,
        target: &UserId,
    ) -> Result<FriendRequest, DirectoryError>;

    /// Accept a pending request, promoting it to a friendship.
    async fn accept_friend_request(
        &self,
        request: &RequestId,
    ) -> Result<Friendship, DirectoryError>;

    /// Reject a pending request, discarding it.
    async fn reject_friend_request(&self, request: &RequestId) -> Result<(), DirectoryError>;

    /// Requests pending for `user`, in either direction.
    async fn list_pending_requests(
        &self,
        user: &UserId,
    ) -> Result<Vec<FriendRequest>, DirectoryError>;

    /// Record a user's online status.
    async fn set_online_status(&self, user: &UserId, online: bool)
        -> Result<(), DirectoryError>;
}

#[derive(Debug, Default)]
struct DirectoryStore {
    users: Vec<UserProfile>,
    requests: Vec<(UserId, FriendRequest)>,
    friendships: Vec<(UserId, Friendship)>,
}

/// In-memory [`Directory`] for tests and demo hosts.
///
/// State lives behind a mutex so the handle is cheaply cloneable and can be
/// shared with the host side of a test.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    store: Arc<Mutex<DirectoryStore>>,
    now: EpochMs,
}

impl InMemoryDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-seeded with profiles, stamping requests at `now`.
    pub fn with_users(users: Vec<UserProfile>, now: EpochMs) -> Self {
        Self {
            store: Arc::new(Mutex::new(DirectoryStore {
                users,
                ..DirectoryStore::default()
            })),
            now,
        }
    }

    /// Register a profile after construction.
    pub fn add_user(&self, profile: UserProfile) {
        self.store.lock().users.push(profile);
    }

    fn profile(store: &DirectoryStore, id: &UserId) -> Result<UserProfile, DirectoryError> {
        store
            .users
            .iter()
            .find(|u| u.id == *id)
            .cloned()
            .ok_or_else(|| DirectoryError::UserNotFound(id.to_string()))
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn list_discoverable_users(
        &self,
        viewer: &UserId,
    ) -> Result<Vec<UserProfile>, DirectoryError> {
        let store = self.store.lock();
        Ok(store
            .users
            .iter()
            .filter(|u| u.id != *viewer)
            .cloned()
            .collect())
    }

    async fn search_users(&self, text: &str) -> Result<Vec<UserProfile>, DirectoryError> {
        let needle = text.to_lowercase();
        let store = self.store.lock();
        Ok(store
            .users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.location
                        .as_deref()
                        .is_some_and(|l| l.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn get_friends(&self, user: &UserId) -> Result<Vec<Friendship>, DirectoryError> {
        let store = self.store.lock();
        Ok(store
            .friendships
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, f)| f.clone())
            .collect())
    }

    async fn send_friend_request(
        &self,
        from: &UserId,
        target: &UserId,
    ) -> Result<FriendRequest, DirectoryError> {
        let mut store = self.store.lock();
        let subject = Self::profile(&store, target)?;
        let duplicate = store
            .requests
            .iter()
            .any(|(owner, r)| owner == from && r.subject.id == *target);
        if duplicate {
            return Err(DirectoryError::AlreadyRequested(subject.name));
        }
        tracing::debug!(%from, %target, "friend request sent");
        let request = FriendRequest {
            id: RequestId::new(),
            subject,
            direction: RequestDirection::Outgoing,
            requested_at: self.now,
        };
        store.requests.push((*from, request.clone()));
        Ok(request)
    }

    async fn accept_friend_request(
        &self,
        request: &RequestId,
    ) -> Result<Friendship, DirectoryError> {
        let mut store = self.store.lock();
        let position = store
            .requests
            .iter()
            .position(|(_, r)| r.id == *request)
            .ok_or_else(|| DirectoryError::RequestNotFound(request.to_string()))?;
        let (owner, pending) = store.requests.remove(position);
        let friendship = Friendship {
            id: FriendshipId::new(),
            is_online: pending.subject.is_online,
            last_active: pending.subject.last_active,
            subject: pending.subject,
        };
        tracing::debug!(request = %request, "friend request accepted");
        store.friendships.push((owner, friendship.clone()));
        Ok(friendship)
    }

    async fn reject_friend_request(&self, request: &RequestId) -> Result<(), DirectoryError> {
        let mut store = self.store.lock();
        let position = store
            .requests
            .iter()
            .position(|(_, r)| r.id == *request)
            .ok_or_else(|| DirectoryError::RequestNotFound(request.to_string()))?;
        store.requests.remove(position);
        Ok(())
    }

    async fn list_pending_requests(
        &self,
        user: &UserId,
    ) -> Result<Vec<FriendRequest>, DirectoryError> {
        let store = self.store.lock();
        Ok(store
            .requests
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn set_online_status(
        &self,
        user: &UserId,
        online: bool,
    ) -> Result<(), DirectoryError> {
        let mut store = self.store.lock();
        let profile = store
            .users
            .iter_mut()
            .find(|u| u.id == *user)
            .ok_or_else(|| DirectoryError::UserNotFound(user.to_string()))?;
        profile.is_online = online;
        Ok(())
    }
}

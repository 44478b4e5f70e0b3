//! # Reducer
//!
//! Applies intents to the owned view state and emits commands for the host:
//!
//! ```text
//! Intent → [Reduce] → View state + Commands
//! ```
//!
//! The reducer is synchronous and pure apart from the state it owns. Backend
//! work is never awaited here; it is emitted as a [`DirectoryRequest`]
//! command, and the host applies the outcome back through
//! [`AppState::apply_directory_event`]. Backend failures become toasts with
//! the error's own message, and are never retried.

use crate::core::intent::{Intent, Screen};
use crate::directory::DirectoryError;
use crate::session::Session;
use crate::views::chat::ChatState;
use crate::views::gallery::GalleryState;
use crate::views::notifications::Toast;
use crate::views::roster::{FriendRequest, Friendship, RequestDirection, RosterState, UserProfile};
use mingle_core::identifiers::{RequestId, UserId};
use mingle_core::time::EpochMs;

/// A backend call the host should fire on behalf of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryRequest {
    /// Load discoverable users for the current user.
    LoadDiscoverableUsers,
    /// Load the current user's friends.
    LoadFriends,
    /// Load pending requests for the current user.
    LoadPendingRequests,
    /// Send a friend request.
    SendFriendRequest {
        /// Target user.
        target: UserId,
    },
    /// Accept a pending request.
    AcceptFriendRequest {
        /// The request.
        request: RequestId,
    },
    /// Reject a pending request.
    RejectFriendRequest {
        /// The request.
        request: RequestId,
    },
}

/// Outcome of a backend call, applied by the host.
#[derive(Debug, Clone)]
pub enum DirectoryEvent {
    /// Discoverable users arrived.
    UsersLoaded(Vec<UserProfile>),
    /// Friendships arrived.
    FriendsLoaded(Vec<Friendship>),
    /// Pending requests arrived.
    RequestsLoaded(Vec<FriendRequest>),
    /// A friend request was recorded remotely.
    RequestSent(FriendRequest),
    /// A request was accepted and promoted.
    RequestAccepted {
        /// The request that was consumed.
        request: RequestId,
        /// The resulting friendship.
        friendship: Friendship,
    },
    /// A request was rejected and discarded.
    RequestRejected(RequestId),
    /// The call failed.
    Failed(DirectoryError),
}

/// Side effect emitted by the reducer for the host to execute.
#[derive(Debug, Clone)]
pub enum Command {
    /// Navigate to a screen, optionally carrying a subject user.
    Navigate {
        /// Target screen.
        screen: Screen,
        /// Subject context, e.g. the friend a chat was opened for.
        context: Option<UserId>,
    },
    /// Fire a backend call.
    Directory(DirectoryRequest),
    /// Show a toast.
    Toast(Toast),
}

/// The whole application's view state: one session plus one state per screen.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The screen currently shown.
    pub screen: Screen,
    /// Login session.
    pub session: Session,
    /// Friend discovery screen.
    pub roster: RosterState,
    /// Media gallery screen.
    pub gallery: GalleryState,
    /// Chat screen.
    pub chat: ChatState,
}

impl AppState {
    /// Fresh state: logged out, on the login screen.
    pub fn new() -> Self {
        Self {
            gallery: GalleryState::new(),
            ..Self::default()
        }
    }

    /// Apply one intent at `now`, returning the commands it produced.
    ///
    /// Malformed intents (stale ids, empty names) are silently ignored; the
    /// record they referenced is already gone and there is nothing to show.
    pub fn reduce(&mut self, intent: Intent, now: EpochMs) -> Vec<Command> {
        tracing::debug!(?intent, "reduce");
        match intent {
            // ─── Session and navigation ──────────────────────
            Intent::LogIn(profile) => {
                self.session.login(profile);
                let mut commands = self.navigate(Screen::FriendDiscovery, None);
                commands.push(Command::Directory(DirectoryRequest::LoadDiscoverableUsers));
                commands.push(Command::Directory(DirectoryRequest::LoadFriends));
                commands.push(Command::Directory(DirectoryRequest::LoadPendingRequests));
                commands
            }
            Intent::LogOut => {
                self.session.logout();
                self.navigate(Screen::Login, None)
            }
            Intent::NavigateTo(screen) => self.navigate(screen, None),

            // ─── Roster ──────────────────────────────────────
            Intent::SwitchRosterTab(tab) => {
                self.roster.active_tab = tab;
                Vec::new()
            }
            Intent::SetRosterSearch(term) => {
                self.roster.search_term = term;
                Vec::new()
            }
            Intent::SetRosterFilter(filter) => {
                self.roster.filter = filter;
                Vec::new()
            }
            Intent::ClearRosterFilter => {
                self.roster.filter = Default::default();
                Vec::new()
            }
            Intent::SendFriendRequest { user } => {
                if self.roster.record_outgoing_request(&user, now).is_none() {
                    return Vec::new();
                }
                vec![Command::Directory(DirectoryRequest::SendFriendRequest {
                    target: user,
                })]
            }
            Intent::AcceptFriendRequest { request } => {
                if self.roster.accept_request(&request).is_none() {
                    return Vec::new();
                }
                vec![
                    Command::Directory(DirectoryRequest::AcceptFriendRequest { request }),
                    Command::Toast(Toast::success("Friend request accepted")),
                ]
            }
            Intent::DeclineFriendRequest { request } => {
                if self.roster.decline_request(&request).is_none() {
                    return Vec::new();
                }
                vec![Command::Directory(DirectoryRequest::RejectFriendRequest {
                    request,
                })]
            }
            Intent::Unfriend { friendship } => {
                self.roster.unfriend(&friendship);
                Vec::new()
            }
            Intent::BlockUser { user } => {
                self.roster.block(&user);
                Vec::new()
            }
            Intent::MessageFriend { user } => self.navigate(Screen::Chat, Some(user)),

            // ─── Gallery ─────────────────────────────────────
            Intent::SelectAlbum(album) => {
                self.gallery.selected_album = album;
                self.gallery.reset_window();
                Vec::new()
            }
            Intent::SetGallerySearch(query) => {
                self.gallery.search_query = query;
                self.gallery.reset_window();
                Vec::new()
            }
            Intent::SetMediaFilter(filter) => {
                self.gallery.filter = filter;
                self.gallery.reset_window();
                Vec::new()
            }
            Intent::ToggleSelectionMode => {
                if self.gallery.selection_mode {
                    self.gallery.clear_selection();
                } else {
                    self.gallery.selection_mode = true;
                }
                Vec::new()
            }
            Intent::ToggleMediaSelected(id) => {
                self.gallery.toggle_selected(id);
                Vec::new()
            }
            Intent::DeleteSelectedMedia => {
                let deleted = self.gallery.delete_selected();
                if deleted.is_empty() {
                    Vec::new()
                } else {
                    vec![Command::Toast(Toast::success(format!(
                        "{} item(s) deleted",
                        deleted.len()
                    )))]
                }
            }
            Intent::CreateAlbum { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Vec::new();
                }
                self.gallery.create_album(name, now);
                vec![Command::Toast(Toast::success(format!(
                    "Album \"{name}\" created"
                )))]
            }
            Intent::DeleteAlbum { album } => {
                self.gallery.delete_album(&album);
                Vec::new()
            }
            Intent::LoadMoreMedia => {
                self.gallery.load_more();
                Vec::new()
            }
            Intent::OpenMediaViewer(id) => {
                self.gallery.open_viewer(id, now);
                Vec::new()
            }
            Intent::MediaViewerNext => {
                self.gallery.viewer_next(now);
                Vec::new()
            }
            Intent::MediaViewerPrevious => {
                self.gallery.viewer_previous(now);
                Vec::new()
            }
            Intent::CloseMediaViewer => {
                self.gallery.close_viewer();
                Vec::new()
            }

            // ─── Chat ────────────────────────────────────────
            Intent::OpenConversation(conversation) => {
                self.chat.open(conversation, now);
                Vec::new()
            }
            Intent::LeaveConversation => {
                self.chat.teardown();
                Vec::new()
            }
            Intent::SendChatMessage { draft } => {
                let sender = self.session.sender();
                self.chat.send_message(&draft, &sender, now);
                Vec::new()
            }
            Intent::AttachFile {
                name,
                mime_type,
                size_bytes,
                url,
            } => {
                let sender = self.session.sender();
                self.chat
                    .attach_file(&name, &mime_type, size_bytes, &url, &sender, now);
                Vec::new()
            }
            Intent::ReactToMessage { message, emoji } => {
                self.chat.react(&message, &emoji);
                Vec::new()
            }
            Intent::ReplyToMessage { message } => {
                self.chat.set_reply(&message);
                Vec::new()
            }
            Intent::CancelReply => {
                self.chat.cancel_reply();
                Vec::new()
            }
            Intent::StartRecording => {
                self.chat.start_recording();
                Vec::new()
            }
            Intent::StopRecording => {
                let sender = self.session.sender();
                self.chat.stop_recording(&sender, now);
                Vec::new()
            }
            Intent::SetMessageSearch { query } => {
                self.chat.set_search_query(&query);
                Vec::new()
            }
            Intent::CloseMessageSearch => {
                self.chat.close_search();
                Vec::new()
            }
            Intent::MessageSearchNext => {
                if let Some(search) = self.chat.search.as_mut() {
                    search.next();
                }
                Vec::new()
            }
            Intent::MessageSearchPrevious => {
                if let Some(search) = self.chat.search.as_mut() {
                    search.previous();
                }
                Vec::new()
            }
            Intent::OpenChatLightbox(message) => {
                self.chat.open_lightbox(&message);
                Vec::new()
            }
            Intent::ChatLightboxNext => {
                if let Some(lightbox) = self.chat.lightbox.as_mut() {
                    lightbox.next();
                }
                Vec::new()
            }
            Intent::ChatLightboxPrevious => {
                if let Some(lightbox) = self.chat.lightbox.as_mut() {
                    lightbox.previous();
                }
                Vec::new()
            }
            Intent::CloseChatLightbox => {
                self.chat.close_lightbox();
                Vec::new()
            }
        }
    }

    /// Apply the outcome of a backend call.
    ///
    /// Failures become a single toast carrying the error's own message, at
    /// the severity of its category. No retry is ever issued.
    pub fn apply_directory_event(&mut self, event: DirectoryEvent) -> Vec<Command> {
        match event {
            DirectoryEvent::UsersLoaded(users) => {
                self.roster.users = users.into_iter().map(|u| (u.id, u)).collect();
                Vec::new()
            }
            DirectoryEvent::FriendsLoaded(friends) => {
                self.roster.friends = friends.into_iter().map(|f| (f.id, f)).collect();
                Vec::new()
            }
            DirectoryEvent::RequestsLoaded(requests) => {
                self.roster.requests = requests.into_iter().map(|r| (r.id, r)).collect();
                Vec::new()
            }
            DirectoryEvent::RequestSent(request) => {
                // Replace the optimistic local record with the remote one.
                let subject = request.subject.id;
                self.roster.requests.retain(|_, r| {
                    r.direction != RequestDirection::Outgoing || r.subject.id != subject
                });
                self.roster.requests.apply(request.id, request);
                Vec::new()
            }
            DirectoryEvent::RequestAccepted {
                request,
                friendship,
            } => {
                self.roster.requests.remove(&request);
                self.roster.friends.apply(friendship.id, friendship);
                Vec::new()
            }
            DirectoryEvent::RequestRejected(request) => {
                self.roster.requests.remove(&request);
                Vec::new()
            }
            DirectoryEvent::Failed(error) => {
                tracing::warn!(%error, "directory call failed");
                vec![Command::Toast(Toast {
                    level: error.category().toast_severity(),
                    message: error.to_string(),
                })]
            }
        }
    }

    fn navigate(&mut self, screen: Screen, context: Option<UserId>) -> Vec<Command> {
        // Leaving the chat screen drops its pending timers.
        if self.screen == Screen::Chat && screen != Screen::Chat {
            self.chat.teardown();
        }
        self.screen = screen;
        vec![Command::Navigate { screen, context }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mingle_core::identifiers::MediaId;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            id: UserId::new(),
            name: name.to_string(),
            avatar_url: None,
            is_online: true,
            last_active: None,
            location: None,
            workplace: None,
            education: None,
            mutual_friends: 0,
        }
    }

    #[test]
    fn login_navigates_and_requests_initial_loads() {
        let mut app = AppState::new();
        let commands = app.reduce(Intent::LogIn(profile("Alex")), 0);

        assert_eq!(app.screen, Screen::FriendDiscovery);
        assert_matches!(
            commands[0],
            Command::Navigate {
                screen: Screen::FriendDiscovery,
                context: None
            }
        );
        let loads = commands
            .iter()
            .filter(|c| matches!(c, Command::Directory(_)))
            .count();
        assert_eq!(loads, 3);
    }

    #[test]
    fn message_friend_navigates_to_chat_with_the_friend() {
        let mut app = AppState::new();
        let friend = UserId::new();
        let commands = app.reduce(Intent::MessageFriend { user: friend }, 0);
        assert_matches!(
            commands[..],
            [Command::Navigate {
                screen: Screen::Chat,
                context: Some(user)
            }] if user == friend
        );
    }

    #[test]
    fn send_friend_request_is_optimistic_and_fires_the_backend() {
        let mut app = AppState::new();
        let target = profile("Emma");
        let target_id = target.id;
        app.roster.users.apply(target_id, target);

        let commands = app.reduce(Intent::SendFriendRequest { user: target_id }, 5);
        assert_eq!(app.roster.requests.len(), 1);
        assert_matches!(
            commands[..],
            [Command::Directory(DirectoryRequest::SendFriendRequest { target })]
                if target == target_id
        );
    }

    #[test]
    fn stale_accept_is_silently_ignored() {
        let mut app = AppState::new();
        let commands = app.reduce(
            Intent::AcceptFriendRequest {
                request: RequestId::new(),
            },
            0,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn filter_changes_reset_the_gallery_window() {
        let mut app = AppState::new();
        app.gallery.load_more();
        assert!(app.gallery.revealed > crate::views::gallery::PAGE_SIZE);

        app.reduce(Intent::SetGallerySearch("x".to_string()), 0);
        assert_eq!(app.gallery.revealed, crate::views::gallery::PAGE_SIZE);
    }

    #[test]
    fn leaving_selection_mode_clears_the_selection() {
        let mut app = AppState::new();
        app.reduce(Intent::ToggleSelectionMode, 0);
        app.gallery.toggle_selected(MediaId::new());
        app.reduce(Intent::ToggleSelectionMode, 0);
        assert!(!app.gallery.selection_mode);
        assert!(app.gallery.selected.is_empty());
    }

    #[test]
    fn empty_album_name_is_ignored() {
        let mut app = AppState::new();
        let commands = app.reduce(
            Intent::CreateAlbum {
                name: "   ".to_string(),
            },
            0,
        );
        assert!(commands.is_empty());
        assert!(app.gallery.albums.is_empty());
    }

    #[test]
    fn navigating_away_from_chat_drops_timers() {
        let mut app = AppState::new();
        app.reduce(Intent::NavigateTo(Screen::Chat), 0);
        let sender = app.session.sender();
        app.chat.send_message("hi", &sender, 0);
        assert!(app.chat.pending_tasks() > 0);

        app.reduce(Intent::NavigateTo(Screen::MediaGallery), 10);
        assert_eq!(app.chat.pending_tasks(), 0);
    }

    #[test]
    fn backend_failure_becomes_a_verbatim_toast() {
        let mut app = AppState::new();
        let error = DirectoryError::Unavailable("connection refused".to_string());
        let message = error.to_string();
        let commands = app.apply_directory_event(DirectoryEvent::Failed(error));

        assert_matches!(
            &commands[..],
            [Command::Toast(toast)] if toast.message == message
        );
    }

    #[test]
    fn remote_request_replaces_the_optimistic_record() {
        let mut app = AppState::new();
        let target = profile("Emma");
        let target_id = target.id;
        app.roster.users.apply(target_id, target.clone());
        app.reduce(Intent::SendFriendRequest { user: target_id }, 0);

        let remote = FriendRequest {
            id: RequestId::new(),
            subject: target,
            direction: RequestDirection::Outgoing,
            requested_at: 0,
        };
        let remote_id = remote.id;
        app.apply_directory_event(DirectoryEvent::RequestSent(remote));

        assert_eq!(app.roster.requests.len(), 1);
        assert!(app.roster.requests.contains(&remote_id));
    }
}

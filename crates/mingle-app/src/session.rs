//! Current-user session.
//!
//! The core only cares whether someone is logged in and how to attribute
//! outgoing messages. Authentication itself happens elsewhere.

use crate::views::roster::UserProfile;
use mingle_core::identifiers::UserId;
use serde::{Deserialize, Serialize};

/// Message attribution for the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// The sending user.
    pub id: UserId,
    /// Display name shown next to outgoing messages.
    pub name: String,
}

/// Login session state.
///
/// `current_user` is `None` before login. Outgoing messages still need a
/// sender, so [`Session::sender`] falls back to a synthetic "You" identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in user's profile, if any.
    pub current_user: Option<UserProfile>,
}

impl Session {
    /// Session with no one logged in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Log a user in, replacing any previous session.
    pub fn login(&mut self, profile: UserProfile) {
        self.current_user = Some(profile);
    }

    /// Log out.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// Sender identity for outgoing messages.
    ///
    /// Falls back to a fresh placeholder named "You" when no one is logged
    /// in, so the chat screen keeps working in demo hosts.
    #[must_use]
    pub fn sender(&self) -> Sender {
        match &self.current_user {
            Some(profile) => Sender {
                id: profile.id,
                name: profile.name.clone(),
            },
            None => Sender {
                id: UserId::new(),
                name: "You".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn logged_in_sender_uses_the_profile() {
        let mut session = Session::new();
        assert!(!session.is_logged_in());

        let me = profile("Alex Johnson");
        let id = me.id;
        session.login(me);
        let sender = session.sender();
        assert_eq!(sender.id, id);
        assert_eq!(sender.name, "Alex Johnson");
    }

    #[test]
    fn logged_out_sender_is_the_placeholder() {
        let session = Session::new();
        assert_eq!(session.sender().name, "You");
    }

    #[test]
    fn logout_clears_the_profile() {
        let mut session = Session::new();
        session.login(profile("Alex"));
        session.logout();
        assert!(!session.is_logged_in());
    }
}

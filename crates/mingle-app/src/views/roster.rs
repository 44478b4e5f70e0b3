//! # Roster View State
//!
//! Drives the Friend Discovery screen: three working sets (discoverable
//! users, pending requests, confirmed friends), a free-text search term, and
//! an advanced filter set. The visible list for the active tab is recomputed
//! as a pure derivation; relationship changes (accept, decline, unfriend,
//! block) are applied by the owning screen's reducer, never from here.

use crate::views::collection::WorkingSet;
use mingle_core::identifiers::{FriendshipId, RequestId, UserId};
use mingle_core::time::EpochMs;
use serde::{Deserialize, Serialize};

// ============================================================================
// Records
// ============================================================================

/// A user as shown on roster cards.
///
/// Read-only projection of backend data; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar image reference.
    pub avatar_url: Option<String>,
    /// Whether the user is currently online.
    pub is_online: bool,
    /// Last activity (ms since epoch), when known.
    pub last_active: Option<EpochMs>,
    /// Free-text location.
    pub location: Option<String>,
    /// Workplace.
    pub workplace: Option<String>,
    /// Education.
    pub education: Option<String>,
    /// Number of mutual friends with the current user.
    pub mutual_friends: u32,
}

/// Direction of a pending friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestDirection {
    /// Someone asked the current user.
    Incoming,
    /// The current user asked someone.
    Outgoing,
}

/// A pending friend request.
///
/// Created on request send; removed on accept or decline. Accept promotes the
/// subject to a [`Friendship`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    /// Request identifier.
    pub id: RequestId,
    /// The other party.
    pub subject: UserProfile,
    /// Whether the request is incoming or outgoing.
    pub direction: RequestDirection,
    /// When the request was sent (ms since epoch).
    pub requested_at: EpochMs,
}

/// A confirmed friendship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    /// Friendship identifier.
    pub id: FriendshipId,
    /// The friend.
    pub subject: UserProfile,
    /// Whether the friend is currently online.
    pub is_online: bool,
    /// Last activity (ms since epoch), when known.
    pub last_active: Option<EpochMs>,
}

// ============================================================================
// Filter
// ============================================================================

/// Active tab of the Friend Discovery screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RosterTab {
    /// Discoverable users.
    #[default]
    Discover,
    /// Pending requests.
    Requests,
    /// Confirmed friends.
    Friends,
}

/// Advanced filter set for the discover tab.
///
/// Unset fields impose no constraint: the default value is the identity
/// predicate. Fields are AND-combined.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterFilter {
    /// Location substring (case-insensitive).
    pub location: Option<String>,
    /// Workplace substring (case-insensitive).
    pub workplace: Option<String>,
    /// Education substring (case-insensitive).
    pub education: Option<String>,
    /// Retain only users with at least one mutual friend.
    pub mutual_friends_only: bool,
    /// Age range collected by the filter UI. Never evaluated: no age field
    /// exists on [`UserProfile`], so this is dead input pending product
    /// clarification.
    pub age_range: Option<(u8, u8)>,
}

impl RosterFilter {
    /// Whether no advanced constraint is set.
    ///
    /// The unenforced `age_range` does not count as a constraint.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.location.is_none()
            && self.workplace.is_none()
            && self.education.is_none()
            && !self.mutual_friends_only
    }

    fn matches(&self, user: &UserProfile) -> bool {
        if let Some(wanted) = &self.location {
            if !contains_ci_opt(user.location.as_deref(), wanted) {
                return false;
            }
        }
        if let Some(wanted) = &self.workplace {
            if !contains_ci_opt(user.workplace.as_deref(), wanted) {
                return false;
            }
        }
        if let Some(wanted) = &self.education {
            if !contains_ci_opt(user.education.as_deref(), wanted) {
                return false;
            }
        }
        if self.mutual_friends_only && user.mutual_friends == 0 {
            return false;
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn contains_ci_opt(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| contains_ci(h, needle))
}

/// Search match against name and location. A record without a location is
/// retained only on a name match.
fn search_matches(term: &str, name: &str, location: Option<&str>) -> bool {
    contains_ci(name, term) || contains_ci_opt(location, term)
}

// ============================================================================
// RosterState
// ============================================================================

/// The visible list for the active tab, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterView<'a> {
    /// Discover tab result.
    Discover(Vec<&'a UserProfile>),
    /// Requests tab result, partitioned by direction for display.
    Requests {
        /// Requests addressed to the current user.
        incoming: Vec<&'a FriendRequest>,
        /// Requests the current user sent.
        outgoing: Vec<&'a FriendRequest>,
    },
    /// Friends tab result.
    Friends(Vec<&'a Friendship>),
}

impl RosterView<'_> {
    /// Total number of visible records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Discover(users) => users.len(),
            Self::Requests { incoming, outgoing } => incoming.len() + outgoing.len(),
            Self::Friends(friends) => friends.len(),
        }
    }

    /// Whether nothing is visible (the screen renders an empty state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Friend Discovery screen state.
///
/// The screen exclusively owns its collections; child components receive
/// read-only projections from [`RosterState::visible`] and emit intents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterState {
    /// Active tab.
    pub active_tab: RosterTab,
    /// Free-text search term, matched against name and location.
    pub search_term: String,
    /// Advanced filter set (discover tab only).
    pub filter: RosterFilter,
    /// Discoverable users.
    pub users: WorkingSet<UserId, UserProfile>,
    /// Pending friend requests.
    pub requests: WorkingSet<RequestId, FriendRequest>,
    /// Confirmed friends.
    pub friends: WorkingSet<FriendshipId, Friendship>,
}

impl RosterState {
    /// Compute the visible list for the active tab.
    ///
    /// Pure: selects the base collection for the tab, applies the search term
    /// to name/location, and on the discover tab additionally applies the
    /// advanced filter set. Source order is preserved; collections are never
    /// mixed.
    #[must_use]
    pub fn visible(&self) -> RosterView<'_> {
        match self.active_tab {
            RosterTab::Discover => RosterView::Discover(self.visible_users()),
            RosterTab::Requests => {
                let (incoming, outgoing) = self.visible_requests();
                RosterView::Requests { incoming, outgoing }
            }
            RosterTab::Friends => RosterView::Friends(self.visible_friends()),
        }
    }

    /// Visible discoverable users (search term plus advanced filters).
    #[must_use]
    pub fn visible_users(&self) -> Vec<&UserProfile> {
        self.users
            .iter()
            .filter(|u| self.search_retains(&u.name, u.location.as_deref()))
            .filter(|u| self.filter.is_identity() || self.filter.matches(u))
            .collect()
    }

    /// Visible pending requests, partitioned into (incoming, outgoing).
    ///
    /// Only the search term applies here; advanced filters are a discover-tab
    /// concern.
    #[must_use]
    pub fn visible_requests(&self) -> (Vec<&FriendRequest>, Vec<&FriendRequest>) {
        self.requests
            .iter()
            .filter(|r| self.search_retains(&r.subject.name, r.subject.location.as_deref()))
            .partition(|r| r.direction == RequestDirection::Incoming)
    }

    /// Visible confirmed friends.
    #[must_use]
    pub fn visible_friends(&self) -> Vec<&Friendship> {
        self.friends
            .iter()
            .filter(|f| self.search_retains(&f.subject.name, f.subject.location.as_deref()))
            .collect()
    }

    fn search_retains(&self, name: &str, location: Option<&str>) -> bool {
        self.search_term.is_empty() || search_matches(&self.search_term, name, location)
    }

    /// Count of incoming requests, shown as the tab badge.
    #[must_use]
    pub fn incoming_request_count(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| r.direction == RequestDirection::Incoming)
            .count()
    }

    // ─── Record migrations (invoked by the screen reducer) ───

    /// Accept a request: remove it and promote the subject to a friendship.
    ///
    /// Returns the new friendship id, or `None` if the request was gone.
    pub fn accept_request(&mut self, request_id: &RequestId) -> Option<FriendshipId> {
        let request = self.requests.remove(request_id)?;
        let friendship = Friendship {
            id: FriendshipId::new(),
            is_online: request.subject.is_online,
            last_active: request.subject.last_active,
            subject: request.subject,
        };
        let id = friendship.id;
        self.friends.apply(id, friendship);
        Some(id)
    }

    /// Decline a request: remove it from the working set.
    pub fn decline_request(&mut self, request_id: &RequestId) -> Option<FriendRequest> {
        self.requests.remove(request_id)
    }

    /// Record an outgoing request for a discoverable user.
    ///
    /// The user stays discoverable until the other party accepts; the request
    /// appears on the requests tab as outgoing.
    pub fn record_outgoing_request(&mut self, target: &UserId, now: EpochMs) -> Option<RequestId> {
        let subject = self.users.get(target)?.clone();
        let request = FriendRequest {
            id: RequestId::new(),
            subject,
            direction: RequestDirection::Outgoing,
            requested_at: now,
        };
        let id = request.id;
        self.requests.apply(id, request);
        Some(id)
    }

    /// Remove a friendship. Terminal: the record leaves the working set.
    pub fn unfriend(&mut self, friendship_id: &FriendshipId) -> Option<Friendship> {
        self.friends.remove(friendship_id)
    }

    /// Block a user: drop them from every collection they appear in.
    pub fn block(&mut self, user: &UserId) {
        self.users.remove(user);
        self.requests.retain(|_, r| r.subject.id != *user);
        self.friends.retain(|_, f| f.subject.id != *user);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, location: Option<&str>) -> UserProfile {
        UserProfile {
            id: UserId::new(),
            name: name.to_string(),
            avatar_url: None,
            is_online: false,
            last_active: None,
            location: location.map(str::to_string),
            workplace: None,
            education: None,
            mutual_friends: 0,
        }
    }

    fn state_with_users(users: Vec<UserProfile>) -> RosterState {
        RosterState {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            ..RosterState::default()
        }
    }

    #[test]
    fn empty_filter_and_search_is_identity() {
        let state = state_with_users(vec![
            user("Sarah", Some("NY")),
            user("Mike", Some("SF")),
            user("Nadia", None),
        ]);
        assert!(state.filter.is_identity());
        assert_eq!(state.visible_users().len(), 3);
    }

    #[test]
    fn search_matches_name_or_location() {
        // Scenario from the product notes: "sa" matches Sarah by name only.
        let mut state = state_with_users(vec![user("Sarah", Some("NY")), user("Mike", Some("SF"))]);
        state.search_term = "sa".to_string();
        let visible = state.visible_users();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Sarah");
    }

    #[test]
    fn search_is_case_insensitive_on_location() {
        let mut state = state_with_users(vec![user("Mike", Some("San Francisco"))]);
        state.search_term = "FRANCISCO".to_string();
        assert_eq!(state.visible_users().len(), 1);
    }

    #[test]
    fn record_without_location_needs_name_match() {
        let mut state = state_with_users(vec![user("Drifter", None)]);
        state.search_term = "nowhere".to_string();
        assert!(state.visible_users().is_empty());
        state.search_term = "drift".to_string();
        assert_eq!(state.visible_users().len(), 1);
    }

    #[test]
    fn advanced_filters_and_combine() {
        let mut a = user("Ada", Some("London"));
        a.workplace = Some("Analytical Engines Ltd".to_string());
        a.mutual_friends = 2;
        let mut b = user("Brin", Some("London"));
        b.workplace = Some("Search Co".to_string());
        b.mutual_friends = 0;

        let mut state = state_with_users(vec![a, b]);
        state.filter.location = Some("london".to_string());
        state.filter.workplace = Some("engines".to_string());
        let visible = state.visible_users();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Ada");

        state.filter.workplace = None;
        state.filter.mutual_friends_only = true;
        let visible = state.visible_users();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Ada");
    }

    #[test]
    fn age_range_is_never_enforced() {
        let mut state = state_with_users(vec![user("Sarah", Some("NY"))]);
        state.filter.age_range = Some((90, 99));
        assert!(state.filter.is_identity());
        assert_eq!(state.visible_users().len(), 1);
    }

    #[test]
    fn advanced_filters_do_not_apply_off_discover() {
        let friend = Friendship {
            id: FriendshipId::new(),
            subject: user("Ada", Some("London")),
            is_online: true,
            last_active: None,
        };
        let mut state = RosterState {
            active_tab: RosterTab::Friends,
            friends: [(friend.id, friend)].into_iter().collect(),
            ..RosterState::default()
        };
        state.filter.location = Some("mars".to_string());
        match state.visible() {
            RosterView::Friends(friends) => assert_eq!(friends.len(), 1),
            other => panic!("expected friends view, got {other:?}"),
        }
    }

    #[test]
    fn requests_partition_by_direction_in_order() {
        let mk = |name: &str, direction| FriendRequest {
            id: RequestId::new(),
            subject: user(name, None),
            direction,
            requested_at: 0,
        };
        let reqs = vec![
            mk("first-in", RequestDirection::Incoming),
            mk("out", RequestDirection::Outgoing),
            mk("second-in", RequestDirection::Incoming),
        ];
        let state = RosterState {
            active_tab: RosterTab::Requests,
            requests: reqs.into_iter().map(|r| (r.id, r)).collect(),
            ..RosterState::default()
        };
        let (incoming, outgoing) = state.visible_requests();
        let names: Vec<_> = incoming.iter().map(|r| r.subject.name.as_str()).collect();
        assert_eq!(names, vec!["first-in", "second-in"]);
        assert_eq!(outgoing.len(), 1);
    }

    #[test]
    fn accept_promotes_and_removes() {
        let request = FriendRequest {
            id: RequestId::new(),
            subject: user("Lisa", Some("Boston")),
            direction: RequestDirection::Incoming,
            requested_at: 42,
        };
        let req_id = request.id;
        let mut state = RosterState {
            requests: [(req_id, request)].into_iter().collect(),
            ..RosterState::default()
        };

        let friendship_id = state.accept_request(&req_id).unwrap();
        assert!(state.requests.is_empty());
        let friendship = state.friends.get(&friendship_id).unwrap();
        assert_eq!(friendship.subject.name, "Lisa");

        // Accepting again is a no-op.
        assert!(state.accept_request(&req_id).is_none());
    }

    #[test]
    fn block_sweeps_every_collection() {
        let target = user("Mallory", None);
        let target_id = target.id;
        let request = FriendRequest {
            id: RequestId::new(),
            subject: target.clone(),
            direction: RequestDirection::Incoming,
            requested_at: 0,
        };
        let friendship = Friendship {
            id: FriendshipId::new(),
            subject: target.clone(),
            is_online: false,
            last_active: None,
        };
        let mut state = RosterState {
            users: [(target_id, target)].into_iter().collect(),
            requests: [(request.id, request)].into_iter().collect(),
            friends: [(friendship.id, friendship)].into_iter().collect(),
            ..RosterState::default()
        };

        state.block(&target_id);
        assert!(state.users.is_empty());
        assert!(state.requests.is_empty());
        assert!(state.friends.is_empty());
    }

    #[test]
    fn empty_collections_yield_empty_views() {
        let state = RosterState::default();
        assert!(state.visible().is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_user() -> impl Strategy<Value = UserProfile> {
            ("[a-zA-Z ]{0,12}", proptest::option::of("[a-zA-Z ]{0,12}")).prop_map(
                |(name, location)| {
                    let mut u = user(&name, None);
                    u.location = location;
                    u
                },
            )
        }

        proptest! {
            #[test]
            fn identity_law(users in proptest::collection::vec(arb_user(), 0..12)) {
                let expected = users.len();
                let state = state_with_users(users);
                prop_assert_eq!(state.visible_users().len(), expected);
            }

            #[test]
            fn search_is_sound_and_complete(
                users in proptest::collection::vec(arb_user(), 0..12),
                term in "[a-zA-Z]{1,4}",
            ) {
                let mut state = state_with_users(users);
                state.search_term = term.clone();
                let visible_ids: Vec<UserId> =
                    state.visible_users().iter().map(|u| u.id).collect();
                for u in state.users.iter() {
                    let matches = search_matches(&term, &u.name, u.location.as_deref());
                    prop_assert_eq!(visible_ids.contains(&u.id), matches);
                }
            }
        }
    }
}

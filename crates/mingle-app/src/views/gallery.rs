//! # Gallery View State
//!
//! Drives the Media Gallery screen: a flat media working set, an album
//! partition, a free-text query, and a structured filter/sort set. The
//! visible list is a pure derivation; selection, bulk actions and the viewer
//! cursor are screen state layered over it.
//!
//! The date windows deliberately mix comparison bases: `today` and the
//! month/year windows compare calendar fields, while `week` is a trailing
//! elapsed duration. See [`mingle_core::time`].

use crate::views::collection::WorkingSet;
use mingle_core::identifiers::{AlbumId, MediaId};
use mingle_core::time::{self, EpochMs};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Items revealed per "load more" press.
pub const PAGE_SIZE: usize = 20;

// ============================================================================
// Records
// ============================================================================

/// Kind of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

/// Visibility of a media item or album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Privacy {
    /// Visible to everyone.
    #[default]
    Public,
    /// Visible only to the owner.
    Private,
}

/// A media item in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Media identifier.
    pub id: MediaId,
    /// Title, matched by free-text search.
    pub title: String,
    /// Image or video.
    pub kind: MediaKind,
    /// Content URL.
    pub url: String,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Creation time (ms since epoch).
    pub created_at: EpochMs,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Visibility.
    pub privacy: Privacy,
    /// Album the item belongs to, if any.
    pub album: Option<AlbumId>,
    /// Free-text location.
    pub location: Option<String>,
    /// Tags, matched by free-text search.
    pub tags: Vec<String>,
}

/// An album partition of the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Album identifier.
    pub id: AlbumId,
    /// Display name.
    pub name: String,
    /// Number of items, maintained by the owning screen.
    pub media_count: u32,
    /// Creation time (ms since epoch).
    pub created_at: EpochMs,
    /// Visibility.
    pub privacy: Privacy,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
}

// ============================================================================
// Filter
// ============================================================================

/// Media-kind dimension of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaTypeFilter {
    /// No constraint.
    #[default]
    All,
    /// Images only.
    Image,
    /// Videos only.
    Video,
}

/// Creation-time dimension of the filter, relative to evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateRange {
    /// No constraint.
    #[default]
    All,
    /// Same calendar day as evaluation time.
    Today,
    /// Within the trailing 7×24 h.
    Week,
    /// Within one calendar month, by year/month/day arithmetic.
    Month,
    /// Within one calendar year, by year/month/day arithmetic.
    Year,
}

/// Privacy dimension of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrivacyFilter {
    /// No constraint.
    #[default]
    All,
    /// Public items only.
    Public,
    /// Private items only.
    Private,
}

/// Ordering of the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortBy {
    /// Creation time, newest first.
    #[default]
    Newest,
    /// Creation time, oldest first.
    Oldest,
    /// Title, lexicographic ascending.
    Name,
    /// Size descending, largest first. There is no ascending size order.
    Size,
}

/// Structured filter/sort set for the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaFilter {
    /// Media-kind constraint.
    pub media_type: MediaTypeFilter,
    /// Creation-time constraint.
    pub date_range: DateRange,
    /// Privacy constraint.
    pub privacy: PrivacyFilter,
    /// Ordering applied after filtering.
    pub sort_by: SortBy,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn in_date_range(range: DateRange, created_at: EpochMs, now: EpochMs) -> bool {
    match range {
        DateRange::All => true,
        DateRange::Today => time::same_calendar_day(created_at, now),
        DateRange::Week => created_at >= now.saturating_sub(time::WEEK_MS),
        DateRange::Month => created_at >= time::one_calendar_month_back(now),
        DateRange::Year => created_at >= time::one_calendar_year_back(now),
    }
}

// ============================================================================
// Viewer cursor
// ============================================================================

/// Full-screen viewer position over the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerCursor {
    /// The item currently shown.
    pub current: MediaId,
}

// ============================================================================
// GalleryState
// ============================================================================

/// Media Gallery screen state.
///
/// The screen exclusively owns its collections; album selection is an
/// orthogonal filter dimension (`None` means "all media").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryState {
    /// All media items.
    pub items: WorkingSet<MediaId, MediaItem>,
    /// Albums.
    pub albums: WorkingSet<AlbumId, Album>,
    /// Selected album, or `None` for all media.
    pub selected_album: Option<AlbumId>,
    /// Free-text query, matched against title and tags.
    pub search_query: String,
    /// Structured filter/sort set.
    pub filter: MediaFilter,
    /// Whether multi-select mode is active.
    pub selection_mode: bool,
    /// Selected item ids, in selection order.
    pub selected: Vec<MediaId>,
    /// Reveal count for display windowing. Monotonically increasing until a
    /// filter change resets it.
    pub revealed: usize,
    /// Viewer cursor, when the full-screen viewer is open.
    pub viewer: Option<ViewerCursor>,
}

impl GalleryState {
    /// Create a state with the default reveal window.
    pub fn new() -> Self {
        Self {
            revealed: PAGE_SIZE,
            ..Self::default()
        }
    }

    /// Compute the ordered visible list at `now`.
    ///
    /// Filters short-circuit AND in source order (album, search, kind,
    /// privacy, date window) and the survivors are sorted per
    /// [`MediaFilter::sort_by`]. Pure: never mutates the collection.
    #[must_use]
    pub fn visible(&self, now: EpochMs) -> Vec<&MediaItem> {
        let mut result: Vec<&MediaItem> = self
            .items
            .iter()
            .filter(|item| self.retains(item, now))
            .collect();
        self.sort(&mut result);
        result
    }

    fn retains(&self, item: &MediaItem, now: EpochMs) -> bool {
        if let Some(album) = self.selected_album {
            if item.album != Some(album) {
                return false;
            }
        }
        if !self.search_query.is_empty() {
            let q = &self.search_query;
            if !contains_ci(&item.title, q) && !item.tags.iter().any(|t| contains_ci(t, q)) {
                return false;
            }
        }
        match self.filter.media_type {
            MediaTypeFilter::All => {}
            MediaTypeFilter::Image if item.kind != MediaKind::Image => return false,
            MediaTypeFilter::Video if item.kind != MediaKind::Video => return false,
            _ => {}
        }
        match self.filter.privacy {
            PrivacyFilter::All => {}
            PrivacyFilter::Public if item.privacy != Privacy::Public => return false,
            PrivacyFilter::Private if item.privacy != Privacy::Private => return false,
            _ => {}
        }
        in_date_range(self.filter.date_range, item.created_at, now)
    }

    fn sort(&self, items: &mut [&MediaItem]) {
        match self.filter.sort_by {
            SortBy::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Oldest => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortBy::Name => items.sort_by(|a, b| compare_titles(&a.title, &b.title)),
            SortBy::Size => items.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes)),
        }
    }

    /// The display window: the first `revealed` items of the visible list.
    #[must_use]
    pub fn visible_window(&self, now: EpochMs) -> Vec<&MediaItem> {
        let mut visible = self.visible(now);
        visible.truncate(self.revealed.max(PAGE_SIZE));
        visible
    }

    /// Whether more items remain beyond the current window.
    #[must_use]
    pub fn has_more(&self, now: EpochMs) -> bool {
        self.visible(now).len() > self.revealed.max(PAGE_SIZE)
    }

    /// Reveal another page. Monotonic; never shrinks the window.
    pub fn load_more(&mut self) {
        self.revealed = self.revealed.max(PAGE_SIZE).saturating_add(PAGE_SIZE);
    }

    /// Reset the reveal window, e.g. after a filter change.
    pub fn reset_window(&mut self) {
        self.revealed = PAGE_SIZE;
    }

    // ─── Selection ───────────────────────────────────────────

    /// Toggle an item in the selection set.
    pub fn toggle_selected(&mut self, id: MediaId) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    /// Leave selection mode and drop the selection set.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.selection_mode = false;
    }

    /// Remove the selected items from the working set.
    ///
    /// Returns the removed ids. Album counts are adjusted for items that
    /// belonged to one.
    pub fn delete_selected(&mut self) -> Vec<MediaId> {
        let removed: Vec<MediaId> = std::mem::take(&mut self.selected);
        for id in &removed {
            if let Some(item) = self.items.remove(id) {
                if let Some(album) = item.album {
                    self.albums.update(&album, |a| {
                        a.media_count = a.media_count.saturating_sub(1);
                    });
                }
            }
        }
        self.selection_mode = false;
        removed
    }

    // ─── Albums ──────────────────────────────────────────────

    /// Create a new empty public album.
    pub fn create_album(&mut self, name: impl Into<String>, now: EpochMs) -> AlbumId {
        let album = Album {
            id: AlbumId::new(),
            name: name.into(),
            media_count: 0,
            created_at: now,
            privacy: Privacy::Public,
            thumbnail_url: None,
        };
        let id = album.id;
        self.albums.apply(id, album);
        id
    }

    /// Delete an album, clearing the album selection if it was active.
    ///
    /// Items that referenced the album keep existing under "all media".
    pub fn delete_album(&mut self, id: &AlbumId) -> Option<Album> {
        if self.selected_album == Some(*id) {
            self.selected_album = None;
            self.reset_window();
        }
        self.albums.remove(id)
    }

    // ─── Viewer ──────────────────────────────────────────────

    /// Open the viewer at an item, if it is currently visible.
    pub fn open_viewer(&mut self, id: MediaId, now: EpochMs) -> bool {
        if self.visible(now).iter().any(|item| item.id == id) {
            self.viewer = Some(ViewerCursor { current: id });
            true
        } else {
            false
        }
    }

    /// Advance the viewer to the next visible item, wrapping at the end.
    pub fn viewer_next(&mut self, now: EpochMs) {
        self.step_viewer(now, 1);
    }

    /// Move the viewer to the previous visible item, wrapping at the start.
    pub fn viewer_previous(&mut self, now: EpochMs) {
        self.step_viewer(now, -1);
    }

    /// Close the viewer.
    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    fn step_viewer(&mut self, now: EpochMs, step: isize) {
        let Some(cursor) = self.viewer else {
            return;
        };
        let visible = self.visible(now);
        if visible.is_empty() {
            self.viewer = None;
            return;
        }
        let len = visible.len() as isize;
        let current = visible
            .iter()
            .position(|item| item.id == cursor.current)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.viewer = Some(ViewerCursor {
            current: visible[next].id,
        });
    }
}

/// Title ordering: case-insensitive lexicographic, title text as tiebreak.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// ============================================================================
// Tests
// ============================================================================

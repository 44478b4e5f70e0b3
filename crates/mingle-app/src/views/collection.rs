//! # Working Set
//!
//! An insertion-ordered collection for the record sets a screen owns.
//!
//! Every view contract in this crate preserves source order, so the backing
//! store is an [`IndexMap`]: O(1) lookup by id without giving up the order
//! records arrived in. Selection and filter state never live here; those are
//! screen concerns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// An insertion-ordered domain collection with id-based access.
///
/// # Type Parameters
///
/// - `Id`: the identifier type (`Eq + Hash + Clone`)
/// - `Item`: the record type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingSet<Id, Item>
where
    Id: Eq + Hash + Clone,
{
    items: IndexMap<Id, Item>,
}

impl<Id, Item> Default for WorkingSet<Id, Item>
where
    Id: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, Item> WorkingSet<Id, Item>
where
    Id: Eq + Hash + Clone,
{
    /// Create an empty working set.
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Create from an iterator of (id, item) pairs, keeping iteration order.
    pub fn from_pairs(iter: impl IntoIterator<Item = (Id, Item)>) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }

    // ─── Queries ─────────────────────────────────────────────

    /// Get an item by id.
    pub fn get(&self, id: &Id) -> Option<&Item> {
        self.items.get(id)
    }

    /// Get a mutable reference to an item by id.
    pub fn get_mut(&mut self, id: &Id) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    /// Whether an item exists.
    pub fn contains(&self, id: &Id) -> bool {
        self.items.contains_key(id)
    }

    /// All items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.items.keys()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ─── Mutations ───────────────────────────────────────────

    /// Insert or replace an item. A replaced item keeps its original position.
    pub fn apply(&mut self, id: Id, item: Item) -> Option<Item> {
        self.items.insert(id, item)
    }

    /// Remove an item, preserving the order of the remainder.
    pub fn remove(&mut self, id: &Id) -> Option<Item> {
        self.items.shift_remove(id)
    }

    /// Update an item in place. Returns `true` if it existed.
    pub fn update(&mut self, id: &Id, f: impl FnOnce(&mut Item)) -> bool {
        if let Some(item) = self.items.get_mut(id) {
            f(item);
            true
        } else {
            false
        }
    }

    /// Retain only items matching a predicate, preserving order.
    pub fn retain(&mut self, mut f: impl FnMut(&Id, &Item) -> bool) {
        self.items.retain(|id, item| f(id, item));
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<Id, Item> FromIterator<(Id, Item)> for WorkingSet<Id, Item>
where
    Id: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (Id, Item)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

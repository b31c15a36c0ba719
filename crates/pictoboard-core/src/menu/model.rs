//! Menu collection domain models.

use serde::{Deserialize, Serialize};

use crate::pictogram::PictogramDescriptor;

/// Title a menu carries until the user renames it.
pub const DEFAULT_MENU_TITLE: &str = "Mi menú";

/// Identifier of an entry within a menu collection.
///
/// Minted from a monotonic source at insertion time; unique within one
/// collection but not a deduplication key (see
/// [`PictogramDescriptor::dedup_key`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub u64);

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly monotonic source of [`MenuId`] values.
///
/// Seeds from the current Unix-epoch milliseconds, but never reuses a tick:
/// two mints within the same millisecond still yield strictly increasing
/// ids.
#[derive(Debug, Default)]
pub struct MenuIdGenerator {
    last: u64,
}

impl MenuIdGenerator {
    /// Creates a generator seeded below the current wall clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that will mint ids strictly greater than every
    /// id already present in `entries`. Used when rehydrating a collection
    /// so fresh ids never collide with persisted ones.
    pub fn resuming_after(entries: &[MenuEntry]) -> Self {
        Self {
            last: entries.iter().map(|e| e.menu_id.0).max().unwrap_or(0),
        }
    }

    /// Mints the next id: the current wall clock in milliseconds, bumped
    /// past the previous mint when the clock has not advanced.
    pub fn mint(&mut self) -> MenuId {
        let now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.last = now_ms.max(self.last + 1);
        MenuId(self.last)
    }
}

/// A pictogram descriptor plus its collection-local identifier.
///
/// Only `pictogram.original_text` may change after insertion (via rename);
/// `menu_id` and `pictogram.id` are fixed for the life of the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Unique within the collection, assigned at insertion time.
    pub menu_id: MenuId,
    /// The descriptor this entry was created from.
    #[serde(flatten)]
    pub pictogram: PictogramDescriptor,
}

impl MenuEntry {
    /// The caption shown under the pictogram: the edited/original text when
    /// present, otherwise the display name.
    pub fn caption(&self) -> &str {
        if self.pictogram.original_text.is_empty() {
            &self.pictogram.display_name
        } else {
            &self.pictogram.original_text
        }
    }
}

/// The user-curated ordered set of pictograms being assembled into a
/// communication board. Insertion order is display and sentence-assembly
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCollection {
    entries: Vec<MenuEntry>,
}

impl MenuCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a collection from persisted entries, preserving order.
    pub fn from_entries(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by its collection-local id.
    pub fn get(&self, menu_id: MenuId) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.menu_id == menu_id)
    }

    /// Whether a descriptor with the same dedup key is already present.
    pub fn contains(&self, descriptor: &PictogramDescriptor) -> bool {
        self.entries
            .iter()
            .any(|e| e.pictogram.dedup_key() == descriptor.dedup_key())
    }

    /// Appends an entry. The caller is responsible for the dedup check.
    pub fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry with `menu_id`. Returns `false` when no entry
    /// matched (which is not an error).
    pub fn remove(&mut self, menu_id: MenuId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.menu_id != menu_id);
        self.entries.len() != before
    }

    /// Replaces `original_text` on the entry with `menu_id`, leaving its
    /// pictogram id and menu id untouched. Returns `false` when no entry
    /// matched.
    pub fn rename(&mut self, menu_id: MenuId, new_text: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.menu_id == menu_id) {
            Some(entry) => {
                entry.pictogram.original_text = new_text.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//! Menu collection manager.
//!
//! Owns the ordered pictogram collection and its title, enforces the dedup
//! and insertion-order invariants, and mirrors every mutation to the
//! persistent store.

use std::sync::Arc;

use crate::error::Result;
use crate::menu::model::{
    DEFAULT_MENU_TITLE, MenuCollection, MenuEntry, MenuId, MenuIdGenerator,
};
use crate::pictogram::PictogramDescriptor;
use crate::storage::{self, KeyValueStore, keys};

/// Owner of the menu collection and title.
///
/// Every successful mutation triggers a store write: `insert`/`remove`/
/// `clear` write (or remove) the collection key, `set_title` writes the
/// title key. An empty collection is persisted as an absent key, which
/// distinguishes "cleared" from "never created".
pub struct MenuManager {
    store: Arc<dyn KeyValueStore>,
    collection: MenuCollection,
    title: String,
    ids: MenuIdGenerator,
}

impl MenuManager {
    /// Rehydrates the collection and title from storage.
    ///
    /// Absent or undecodable values fall back to an empty collection and
    /// the default title; a fault in storage never propagates from here.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let entries: Vec<MenuEntry> = storage::read_json_or_default(store.as_ref(), keys::MENU_ITEMS);
        let title = storage::read_json::<String>(store.as_ref(), keys::MENU_TITLE)
            .unwrap_or_else(|| DEFAULT_MENU_TITLE.to_string());
        let ids = MenuIdGenerator::resuming_after(&entries);

        Self {
            store,
            collection: MenuCollection::from_entries(entries),
            title,
            ids,
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        self.collection.entries()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn get(&self, menu_id: MenuId) -> Option<&MenuEntry> {
        self.collection.get(menu_id)
    }

    /// Appends a new entry for `descriptor` with a freshly minted id.
    ///
    /// Inserting a descriptor whose `(id, original_text)` pair is already
    /// present is an idempotent no-op; `None` is returned and nothing is
    /// persisted.
    pub fn insert(&mut self, descriptor: &PictogramDescriptor) -> Result<Option<MenuId>> {
        if self.collection.contains(descriptor) {
            tracing::debug!(
                "duplicate insert ignored for pictogram '{}' ('{}')",
                descriptor.id,
                descriptor.original_text
            );
            return Ok(None);
        }

        let menu_id = self.ids.mint();
        self.collection.push(MenuEntry {
            menu_id,
            pictogram: descriptor.clone(),
        });
        self.persist_entries()?;
        Ok(Some(menu_id))
    }

    /// Removes the entry with `menu_id`, if present.
    ///
    /// Removing an unknown id is a no-op. When the removal empties the
    /// collection its persisted key is removed entirely.
    pub fn remove(&mut self, menu_id: MenuId) -> Result<bool> {
        if !self.collection.remove(menu_id) {
            return Ok(false);
        }
        self.persist_entries()?;
        Ok(true)
    }

    /// Empties the collection and removes its persisted key.
    pub fn clear(&mut self) -> Result<()> {
        self.collection.clear();
        self.persist_entries()
    }

    /// Updates only `original_text` on the entry with `menu_id`.
    ///
    /// Renaming an unknown id is a no-op.
    pub fn rename(&mut self, menu_id: MenuId, new_text: &str) -> Result<bool> {
        if !self.collection.rename(menu_id, new_text) {
            return Ok(false);
        }
        self.persist_entries()?;
        Ok(true)
    }

    /// Replaces the title and persists it immediately, even when empty.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = title.to_string();
        storage::write_json(self.store.as_ref(), keys::MENU_TITLE, &self.title)
    }

    fn persist_entries(&self) -> Result<()> {
        if self.collection.is_empty() {
            self.store.remove(keys::MENU_ITEMS)
        } else {
            storage::write_json(self.store.as_ref(), keys::MENU_ITEMS, &self.collection.entries())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl MapStore {
        fn contains(&self, key: &str) -> bool {
            self.values.lock().unwrap().contains_key(key)
        }
    }

    impl KeyValueStore for MapStore {
        fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn descriptor(id: &str, name: &str, text: &str) -> PictogramDescriptor {
        PictogramDescriptor::new(id, name, text)
    }

    #[test]
    fn test_insert_is_idempotent_on_dedup_key() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store);

        let apple = descriptor("42", "apple", "manzana");
        assert!(manager.insert(&apple).unwrap().is_some());
        assert_eq!(manager.entries().len(), 1);

        // Same (id, originalText) pair: defined as a no-op.
        assert!(manager.insert(&apple).unwrap().is_none());
        assert_eq!(manager.entries().len(), 1);

        // Same id with a different caption is a distinct menu item.
        assert!(manager.insert(&descriptor("42", "apple", "una manzana")).unwrap().is_some());
        assert_eq!(manager.entries().len(), 2);
    }

    #[test]
    fn test_insert_preserves_insertion_order() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store);

        manager.insert(&descriptor("1", "a", "uno")).unwrap();
        manager.insert(&descriptor("2", "b", "dos")).unwrap();
        manager.insert(&descriptor("3", "c", "tres")).unwrap();

        let ids: Vec<&str> = manager.entries().iter().map(|e| e.pictogram.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_removing_last_entry_removes_persisted_key() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store.clone());

        let menu_id = manager.insert(&descriptor("42", "apple", "manzana")).unwrap().unwrap();
        assert!(store.contains(keys::MENU_ITEMS));

        assert!(manager.remove(menu_id).unwrap());
        assert!(manager.is_empty());
        assert!(!store.contains(keys::MENU_ITEMS));
    }

    #[test]
    fn test_remove_and_rename_unknown_id_are_noops() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store);
        manager.insert(&descriptor("42", "apple", "manzana")).unwrap();

        assert!(!manager.remove(MenuId(9999)).unwrap());
        assert!(!manager.rename(MenuId(9999), "pera").unwrap());
        assert_eq!(manager.entries().len(), 1);
        assert_eq!(manager.entries()[0].pictogram.original_text, "manzana");
    }

    #[test]
    fn test_clear_removes_persisted_key() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store.clone());
        manager.insert(&descriptor("1", "a", "uno")).unwrap();
        manager.insert(&descriptor("2", "b", "dos")).unwrap();

        manager.clear().unwrap();
        assert!(manager.is_empty());
        assert!(!store.contains(keys::MENU_ITEMS));
    }

    #[test]
    fn test_rename_persists_and_keeps_ids() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store.clone());
        let menu_id = manager.insert(&descriptor("42", "apple", "manzana")).unwrap().unwrap();

        assert!(manager.rename(menu_id, "manzana verde").unwrap());

        // A fresh manager over the same store sees the rename.
        let reloaded = MenuManager::restore(store);
        let entry = reloaded.get(menu_id).unwrap();
        assert_eq!(entry.pictogram.original_text, "manzana verde");
        assert_eq!(entry.pictogram.id, "42");
        assert_eq!(entry.menu_id, menu_id);
    }

    #[test]
    fn test_set_title_persists_even_when_empty() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store.clone());
        assert_eq!(manager.title(), DEFAULT_MENU_TITLE);

        manager.set_title("Desayuno").unwrap();
        assert_eq!(MenuManager::restore(store.clone()).title(), "Desayuno");

        manager.set_title("").unwrap();
        assert_eq!(MenuManager::restore(store).title(), "");
    }

    #[test]
    fn test_restore_tolerates_corrupt_collection() {
        let store = Arc::new(MapStore::default());
        store.write(keys::MENU_ITEMS, "{definitely not a list").unwrap();
        store.write(keys::MENU_TITLE, "\"Cena\"").unwrap();

        let manager = MenuManager::restore(store);
        assert!(manager.is_empty());
        assert_eq!(manager.title(), "Cena");
    }

    #[test]
    fn test_restore_round_trips_order() {
        let store = Arc::new(MapStore::default());
        let mut manager = MenuManager::restore(store.clone());
        manager.insert(&descriptor("1", "a", "uno")).unwrap();
        manager.insert(&descriptor("2", "b", "dos")).unwrap();

        let reloaded = MenuManager::restore(store);
        assert_eq!(reloaded.entries(), manager.entries());
    }
}

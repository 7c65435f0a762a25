//! Persistent item store
//!
//! The store keeps the whole list in memory and writes the full collection to
//! its storage slot after every mutation. Reads that fail or do not parse yield
//! an empty list; writes that fail are logged and otherwise ignored.
//!
//! [`FileStorage`] stages each snapshot in a sibling `.tmp` file and renames it
//! over the target, so the previous snapshot stays intact until the new one is
//! complete.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::SmartcartError;
use crate::types::Item;

/// A single named slot holding the serialized item list
pub trait Storage {
    /// Return the stored contents, or `None` if the slot is empty
    fn read(&self) -> Result<Option<String>, SmartcartError>;

    /// Replace the stored contents
    fn write(&self, contents: &str) -> Result<(), SmartcartError>;
}

/// Storage backed by one JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next snapshot is written to before it replaces `path`
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_staged(staging: &Path, contents: &str) -> std::io::Result<()> {
        let mut file = File::create(staging)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>, SmartcartError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&self, contents: &str) -> Result<(), SmartcartError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let staging = self.staging_path();
        if let Err(e) = Self::write_staged(&staging, contents) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// In-process storage slot
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(contents.into())),
        }
    }

    /// Current raw contents of the slot
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, SmartcartError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<(), SmartcartError> {
        *self.slot.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self) -> Result<Option<String>, SmartcartError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), SmartcartError> {
        (**self).write(contents)
    }
}

/// Ordered collection of items bound to a storage slot
#[derive(Debug)]
pub struct ItemStore<S: Storage> {
    items: Vec<Item>,
    storage: S,
}

impl<S: Storage> ItemStore<S> {
    /// Load the persisted collection.
    ///
    /// Never fails: a missing, unreadable, or undecodable slot gives an empty
    /// store.
    pub fn load(storage: S) -> Self {
        let items = match storage.read() {
            Ok(Some(contents)) => match serde_json::from_str::<Vec<Item>>(&contents) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "stored items failed to parse, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read stored items, starting empty");
                Vec::new()
            }
        };
        debug!(count = items.len(), "loaded items");
        Self { items, storage }
    }

    /// Current items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// True if at least one item is checked
    pub fn has_completed(&self) -> bool {
        self.items.iter().any(|item| item.checked)
    }

    /// Distinct item names in first-seen order
    pub fn unique_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|item| seen.insert(item.name.as_str()))
            .map(|item| item.name.clone())
            .collect()
    }

    /// Resolve a full id or a unique id prefix to the full id
    pub fn resolve_id(&self, prefix: &str) -> Result<String, SmartcartError> {
        if let Some(item) = self.get(prefix) {
            return Ok(item.id.clone());
        }
        let matches: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| !prefix.is_empty() && item.id.starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [item] => Ok(item.id.clone()),
            [] => Err(SmartcartError::ItemNotFound {
                id: prefix.to_string(),
            }),
            many => Err(SmartcartError::AmbiguousId {
                prefix: prefix.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// Append one item
    pub fn add(&mut self, item: Item) {
        self.items.push(item);
        self.persist();
    }

    /// Append a batch in order with a single write
    pub fn add_many(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
        self.persist();
    }

    /// Flip `checked` on the matching item. Returns false if no item matched.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.checked = !item.checked;
        self.persist();
        true
    }

    /// Delete the matching item, returning it if one existed
    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        self.persist();
        Some(removed)
    }

    /// Replace categories for items whose lowercased name is in `mapping`.
    ///
    /// Returns how many items actually changed category.
    pub fn recategorize(&mut self, mapping: &HashMap<String, String>) -> usize {
        let mut changed = 0;
        for item in &mut self.items {
            if let Some(category) = mapping.get(&item.name.to_lowercase()) {
                if item.category != *category {
                    item.category = category.clone();
                    changed += 1;
                }
            }
        }
        self.persist();
        changed
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Remove checked items, keeping the rest in order. Returns the count removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.checked);
        self.persist();
        before - self.items.len()
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.items)
            .map_err(SmartcartError::from)
            .and_then(|contents| self.storage.write(&contents));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist items");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, category: &str, checked: bool, created_at: i64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            checked,
            created_at,
        }
    }

    fn snapshot(storage: &MemoryStorage) -> Vec<Item> {
        serde_json::from_str(&storage.contents().unwrap()).unwrap()
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn read(&self) -> Result<Option<String>, SmartcartError> {
            Err(SmartcartError::Io(std::io::Error::other("disk gone")))
        }

        fn write(&self, _contents: &str) -> Result<(), SmartcartError> {
            Err(SmartcartError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn test_load_empty_slot() {
        let storage = MemoryStorage::new();
        let store = ItemStore::load(&storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_slot_is_empty() {
        let storage = MemoryStorage::with_contents("{not json");
        let store = ItemStore::load(&storage);
        assert!(store.is_empty());

        let storage = MemoryStorage::with_contents(r#"{"id":"x"}"#);
        let store = ItemStore::load(&storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        let store = ItemStore::load(FailingStorage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_is_ignored() {
        let mut store = ItemStore::load(FailingStorage);
        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_round_trips_after_each_mutation() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);

        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));
        assert_eq!(snapshot(&storage), store.items());

        store.add(item("2", "Milk", "Dairy & Eggs", false, 1));
        assert_eq!(snapshot(&storage), store.items());

        assert!(store.toggle("1"));
        assert_eq!(snapshot(&storage), store.items());

        assert!(store.remove("2").is_some());
        assert_eq!(snapshot(&storage), store.items());

        let reloaded = ItemStore::load(&storage);
        assert_eq!(reloaded.items(), store.items());
    }

    #[test]
    fn test_add_many_preserves_order() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add(item("1", "Eggs", "Dairy & Eggs", false, 1));
        store.add_many(vec![
            item("2", "Apples", "Fruits & Vegetables", false, 2),
            item("3", "Soap", "Household", false, 2),
        ]);
        let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(snapshot(&storage).len(), 3);
    }

    #[test]
    fn test_toggle_and_remove_missing_are_noops() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));

        assert!(!store.toggle("nope"));
        assert!(store.remove("nope").is_none());
        assert_eq!(store.len(), 1);
        assert!(!store.items()[0].checked);
    }

    #[test]
    fn test_toggle_flips_back_and_forth() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));
        store.toggle("1");
        assert!(store.get("1").unwrap().checked);
        store.toggle("1");
        assert!(!store.get("1").unwrap().checked);
    }

    #[test]
    fn test_recategorize_matches_lowercased_names() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add_many(vec![
            item("1", "Milk", "Other", false, 1),
            item("2", "MILK", "Other", true, 2),
            item("3", "Bread", "Bakery", false, 3),
            item("4", "Tea", "Other", false, 4),
        ]);

        let mapping = HashMap::from([
            ("milk".to_string(), "Dairy & Eggs".to_string()),
            ("bread".to_string(), "Bakery".to_string()),
        ]);
        let changed = store.recategorize(&mapping);

        assert_eq!(changed, 2);
        assert_eq!(store.get("1").unwrap().category, "Dairy & Eggs");
        assert_eq!(store.get("2").unwrap().category, "Dairy & Eggs");
        assert_eq!(store.get("3").unwrap().category, "Bakery");
        assert_eq!(store.get("4").unwrap().category, "Other");
        assert_eq!(snapshot(&storage), store.items());
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(storage.contents().as_deref(), Some("[]"));
    }

    #[test]
    fn test_clear_completed_keeps_unchecked_in_order() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add_many(vec![
            item("1", "A", "Other", false, 1),
            item("2", "B", "Other", true, 2),
            item("3", "C", "Other", false, 3),
            item("4", "D", "Other", true, 4),
            item("5", "E", "Other", false, 5),
        ]);

        let removed = store.clear_completed();

        assert_eq!(removed, 2);
        let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
        assert!(!store.has_completed());
    }

    #[test]
    fn test_unique_names_first_seen_order() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add_many(vec![
            item("1", "Milk", "Other", false, 1),
            item("2", "Bread", "Other", false, 2),
            item("3", "Milk", "Other", false, 3),
        ]);
        assert_eq!(store.unique_names(), vec!["Milk", "Bread"]);
    }

    #[test]
    fn test_resolve_id_prefix() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::load(&storage);
        store.add_many(vec![
            item("abc123", "Milk", "Other", false, 1),
            item("abd456", "Bread", "Other", false, 2),
        ]);

        assert_eq!(store.resolve_id("abc").unwrap(), "abc123");
        assert_eq!(store.resolve_id("abd456").unwrap(), "abd456");
        assert!(matches!(
            store.resolve_id("ab"),
            Err(SmartcartError::AmbiguousId { matches: 2, .. })
        ));
        assert!(matches!(
            store.resolve_id("zz"),
            Err(SmartcartError::ItemNotFound { .. })
        ));
        assert!(matches!(
            store.resolve_id(""),
            Err(SmartcartError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("items.json");
        let storage = FileStorage::new(&path);
        assert!(storage.read().unwrap().is_none());

        let mut store = ItemStore::load(storage.clone());
        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));

        assert!(path.exists());
        let reloaded = ItemStore::load(FileStorage::new(&path));
        assert_eq!(reloaded.items(), store.items());
    }

    #[test]
    fn test_file_storage_leaves_no_staging_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("items.json");
        let mut store = ItemStore::load(FileStorage::new(&path));
        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));
        store.toggle("1");

        let entries: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["items.json".to_string()]);
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("items.json");
        let mut store = ItemStore::load(FileStorage::new(&path));
        store.add(item("1", "Milk", "Dairy & Eggs", false, 1));
        store.add(item("2", "Bread", "Bakery", false, 2));
        store.add(item("3", "Soap", "Household", false, 3));
        let saved = fs::read_to_string(&path).unwrap();

        // A directory in the staging slot makes the next write fail part way
        fs::create_dir(temp.path().join("items.json.tmp")).unwrap();
        store.add(item("4", "Eggs", "Dairy & Eggs", false, 4));
        store.clear();
        assert!(store.is_empty());

        assert_eq!(fs::read_to_string(&path).unwrap(), saved);
        let reloaded = ItemStore::load(FileStorage::new(&path));
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.items()[2].name, "Soap");
    }

    #[test]
    fn test_staging_path_is_sibling() {
        let storage = FileStorage::new("/data/smartcart/items.json");
        assert_eq!(
            storage.staging_path(),
            PathBuf::from("/data/smartcart/items.json.tmp")
        );
    }
}

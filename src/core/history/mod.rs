//! Recent-hash history
//!
//! A bounded, newest-first log of past digest computations, persisted as a
//! single JSON record. The storage backend is injected so tests can use an
//! in-memory fake.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Maximum number of entries kept in the log.
pub const MAX_ENTRIES: usize = 5;

/// Storage key for the serialized log.
const STORAGE_KEY: &str = "recent_hashes";

/// One recorded digest computation.
///
/// Field names on the wire follow the original export format:
/// `fileSize` is camelCase, `date` is an ISO-8601 timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub filename: String,
    pub hash: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    pub date: DateTime<Utc>,
}

/// Key-value storage seam: whole values under a single key, no partial
/// updates.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// File-backed store: one JSON file per key under the data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Bounded, persisted history of recent digest computations.
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
}

impl HistoryStore<FileStore> {
    /// Open the default on-disk history in the platform data directory.
    pub fn open() -> Self {
        Self::with_store(FileStore::new(crate::util::data_dir()))
    }
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// List recorded entries, newest first.
    ///
    /// Missing or unparseable persisted data degrades to an empty list;
    /// corruption is logged but never surfaced to the caller.
    pub fn list(&self) -> Vec<HistoryEntry> {
        let Some(raw) = self.store.get(STORAGE_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Discarding corrupt hash history: {}", e);
                Vec::new()
            }
        }
    }

    /// Record a new computation at the front of the log, dropping the
    /// oldest entries beyond [`MAX_ENTRIES`]. The whole log is rewritten.
    pub fn add(&self, filename: &str, hash: &str, file_size: u64) -> anyhow::Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            hash: hash.to_string(),
            file_size,
            date: Utc::now(),
        };

        let mut entries = self.list();
        entries.insert(0, entry.clone());
        entries.truncate(MAX_ENTRIES);

        self.store.set(STORAGE_KEY, &serde_json::to_string(&entries)?)?;
        Ok(entry)
    }

    /// Remove all recorded entries.
    pub fn clear(&self) -> anyhow::Result<()> {
        self.store.remove(STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory stand-in for the file-backed store.
    struct MemoryStore {
        map: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                map: RefCell::new(HashMap::new()),
            }
        }

        fn seed(key: &str, value: &str) -> Self {
            let store = Self::new();
            store.map.borrow_mut().insert(key.to_string(), value.to_string());
            store
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.map.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> anyhow::Result<()> {
            self.map.borrow_mut().remove(key);
            Ok(())
        }
    }

    fn hex_of(byte: u8) -> String {
        crate::core::digest::sha256_hex(&[byte])
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let history = HistoryStore::with_store(MemoryStore::new());
        assert!(history.list().is_empty());
    }

    #[test]
    fn test_capacity_and_ordering() {
        let history = HistoryStore::with_store(MemoryStore::new());

        for i in 0..8u8 {
            history
                .add(&format!("file{}.bin", i), &hex_of(i), u64::from(i))
                .unwrap();
        }

        let entries = history.list();
        assert_eq!(entries.len(), MAX_ENTRIES);
        // Newest first: the last five additions in reverse order.
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(
            names,
            ["file7.bin", "file6.bin", "file5.bin", "file4.bin", "file3.bin"]
        );
    }

    #[test]
    fn test_entry_fields() {
        let history = HistoryStore::with_store(MemoryStore::new());
        let hex = hex_of(42);
        let entry = history.add("report.pdf", &hex, 1234).unwrap();

        assert!(!entry.id.is_empty());
        assert_eq!(entry.filename, "report.pdf");
        assert_eq!(entry.file_size, 1234);
        assert_eq!(entry.hash.len(), 64);
        assert!(entry.hash.chars().all(|c| c.is_ascii_hexdigit()));

        let listed = &history.list()[0];
        assert_eq!(listed.id, entry.id);
    }

    #[test]
    fn test_clear_empties_log() {
        let history = HistoryStore::with_store(MemoryStore::new());
        history.add("a.txt", &hex_of(1), 1).unwrap();
        history.clear().unwrap();
        assert!(history.list().is_empty());
    }

    #[test]
    fn test_corrupt_data_degrades_to_empty() {
        let history =
            HistoryStore::with_store(MemoryStore::seed(STORAGE_KEY, "{not valid json"));
        assert!(history.list().is_empty());

        // A fresh add starts over from the empty log.
        history.add("a.txt", &hex_of(1), 1).unwrap();
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn test_wire_format_field_names() {
        let history = HistoryStore::with_store(MemoryStore::new());
        history.add("a.txt", &hex_of(1), 7).unwrap();

        let raw = history.store.get(STORAGE_KEY).unwrap();
        assert!(raw.contains("\"fileSize\":7"));
        assert!(raw.contains("\"filename\":\"a.txt\""));
        assert!(raw.contains("\"date\":"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryStore::with_store(FileStore::new(dir.path().to_path_buf()));

        assert!(history.list().is_empty());
        history.add("disk.bin", &hex_of(9), 99).unwrap();

        // A second store over the same directory sees the persisted log.
        let reopened = HistoryStore::with_store(FileStore::new(dir.path().to_path_buf()));
        let entries = reopened.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "disk.bin");

        reopened.clear().unwrap();
        assert!(history.list().is_empty());
    }
}

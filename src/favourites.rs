use std::{collections::HashMap, fs, io::ErrorKind, path::PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::StorageError, types::favourite::FavouriteEntry};

/// Slot holding the serialized favourites collection.
pub const FAVOURITES_SLOT: &str = "favouriteBooks";

/// Durable string slots, one value per name.
pub trait Storage {
    /// `None` when the slot is absent or cannot be read.
    fn read(&self, slot: &str) -> Option<String>;
    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;
}

/// One `{slot}.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    fn staging_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json.tmp"))
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Option<String> {
        match fs::read_to_string(self.path(slot)) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read storage slot {slot}: {e}");
                None
            }
        }
    }

    /// Replaces the slot through a rename, so readers see the old or the new
    /// value and never a partial one.
    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            slot: slot.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let staging = self.staging_path(slot);
        fs::write(&staging, value).map_err(io_err)?;
        fs::rename(&staging, self.path(slot)).map_err(io_err)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> Option<String> {
        self.slots.get(slot).cloned()
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}

/// Bookmarked items, unique by key, in insertion order.
pub trait FavouritesStore {
    fn list(&self) -> Vec<FavouriteEntry>;
    /// Keeps the existing entry if the key is already present.
    fn add(&mut self, entry: FavouriteEntry) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    fn contains(&self, key: &str) -> bool;
}

/// Keeps the whole collection as one JSON array in a single slot. Every
/// operation reads the slot afresh; concurrent writers overwrite each other.
#[derive(Debug, Default, Clone)]
pub struct Favourites<S: Storage> {
    storage: S,
}

impl<S: Storage> Favourites<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn persist(&mut self, entries: &[FavouriteEntry]) -> Result<(), StorageError> {
        let s = serde_json::to_string(entries)?;
        self.storage.write(FAVOURITES_SLOT, &s)
    }
}

impl<S: Storage> FavouritesStore for Favourites<S> {
    fn list(&self) -> Vec<FavouriteEntry> {
        let Some(s) = self.storage.read(FAVOURITES_SLOT) else {
            return vec![];
        };
        let values: Vec<Value> = match serde_json::from_str(&s) {
            Ok(values) => values,
            Err(e) => {
                warn!("Ignoring unreadable favourites: {e}");
                return vec![];
            }
        };
        values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping malformed favourite: {e}");
                    None
                }
            })
            .collect()
    }

    fn add(&mut self, entry: FavouriteEntry) -> Result<(), StorageError> {
        let mut entries = self.list();
        if entries.iter().any(|e| e.key == entry.key) {
            debug!("{} is already a favourite.", entry.key);
            return Ok(());
        }
        entries.push(entry);
        self.persist(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let entries: Vec<FavouriteEntry> =
            self.list().into_iter().filter(|e| e.key != key).collect();
        self.persist(&entries)
    }

    fn contains(&self, key: &str) -> bool {
        self.list().iter().any(|e| e.key == key)
    }
}

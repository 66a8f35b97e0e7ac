//! Persistence of the ten-slot array in a key-value store.
//!
//! In the browser the store is `localStorage`; tests and private-browsing
//! sessions fall back to [`MemoryStore`].

use crate::config::{SLOT_COUNT, STORAGE_KEY};
use crate::slot::{default_slots, normalize, SlotArray};
use log::{info, warn};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The browser refused access to storage.
    Unavailable,
    Write(String),
    Serialize(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "Local storage is not available"),
            StoreError::Write(e) => write!(f, "Failed to write to storage: {}", e),
            StoreError::Serialize(e) => write!(f, "Failed to serialize slots: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Minimal string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Browser `localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|_| StoreError::Unavailable)?
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the slot array. Any failure yields the default set.
pub fn load_slots(store: &impl KeyValueStore) -> SlotArray {
    let Some(raw) = store.get(STORAGE_KEY) else {
        info!("No stored animations, starting from defaults");
        return default_slots();
    };

    let parsed: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("Stored animations are not valid JSON ({}), using defaults", e);
            return default_slots();
        }
    };

    match parsed.as_array() {
        Some(items) if items.len() == SLOT_COUNT => {
            let mut slots = default_slots();
            for (slot, item) in slots.iter_mut().zip(items) {
                *slot = normalize(item);
            }
            slots
        }
        Some(items) => {
            warn!(
                "Stored animations have {} entries instead of {}, using defaults",
                items.len(),
                SLOT_COUNT
            );
            default_slots()
        }
        None => {
            warn!("Stored animations are not an array, using defaults");
            default_slots()
        }
    }
}

/// Write all slots in a single store call.
pub fn save_slots(store: &impl KeyValueStore, slots: &SlotArray) -> Result<(), StoreError> {
    let json = serde_json::to_string(slots).map_err(|e| StoreError::Serialize(e.to_string()))?;
    store.set(STORAGE_KEY, &json)
}

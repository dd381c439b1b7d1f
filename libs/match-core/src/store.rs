//! Persistence seam for the three word lists.
//!
//! A [`KeyValueStore`] only moves strings. [`WordStore`] layers the JSON
//! format on top and swallows every failure: loading falls back to an empty
//! list, saving logs and carries on.

use crate::error::StoreError;
use crate::types::{ListName, WordList, WordPair};
use serde_json::Value;
use std::collections::HashMap;

/// String key-value backend (browser storage, SQLite table, ...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// JSON word lists on top of a key-value backend.
#[derive(Debug)]
pub struct WordStore<K> {
    backend: K,
}

impl<K: KeyValueStore> WordStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }

    /// Load a list. Malformed entries are dropped; any failure yields an empty list.
    pub fn load(&self, list: ListName) -> WordList {
        match self.try_load(list) {
            Ok(words) => words,
            Err(e) => {
                tracing::error!("Error loading {} list from storage: {}", list.as_str(), e);
                WordList::new()
            }
        }
    }

    /// Replace a stored list. Failures are logged and dropped.
    pub fn save(&mut self, list: ListName, words: &WordList) {
        if let Err(e) = self.try_save(list, words) {
            tracing::error!("Error saving {} list to storage: {}", list.as_str(), e);
        }
    }

    fn try_load(&self, list: ListName) -> Result<WordList, StoreError> {
        let Some(raw) = self.backend.get(list.storage_key())? else {
            return Ok(WordList::new());
        };

        let Value::Array(items) = serde_json::from_str::<Value>(&raw)? else {
            tracing::warn!("Stored {} list is not an array, ignoring it", list.as_str());
            return Ok(WordList::new());
        };

        let pairs = items.into_iter().filter_map(|item| {
            let term = item.get("term")?.as_str()?;
            let definition = item.get("definition")?.as_str()?;
            Some(WordPair::new(term, definition))
        });

        Ok(WordList::from_pairs(pairs))
    }

    fn try_save(&mut self, list: ListName, words: &WordList) -> Result<(), StoreError> {
        let payload = serde_json::to_string(words)?;
        self.backend.set(list.storage_key(), &payload)
    }
}

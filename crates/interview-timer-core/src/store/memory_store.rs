use crate::{
    error::StoreResult,
    store::{KeyValueStore, RecordKey},
};

use std::collections::HashMap;

/// Volatile [`KeyValueStore`] backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<RecordKey, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: RecordKey) -> StoreResult<Option<String>> {
        Ok(self.values.get(&key).cloned())
    }

    fn put(&mut self, key: RecordKey, value: &str) -> StoreResult<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}

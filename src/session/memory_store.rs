//! In-memory client storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::store::TimestampStore;

/// Clones share the same map, like tabs of one page sharing its storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimestampStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryTimestampStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TimestampStore for InMemoryTimestampStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

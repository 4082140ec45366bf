use std::collections::HashMap;
use std::sync::RwLock;

use crate::area::{StorageArea, StorageError, StorageResult};

/// In-memory storage area.
///
/// An optional byte quota models the browser's per-origin storage limit:
/// a write that would push the total of key and value lengths past it fails
/// with `QuotaExceeded` and leaves the area untouched.
#[derive(Debug, Default)]
pub struct MemoryArea {
    items: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            quota: Some(limit),
        }
    }

    /// Total bytes held, counting keys and values
    pub fn used_bytes(&self) -> usize {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageArea for MemoryArea {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());

        if let Some(limit) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let required = others + key.len() + value.len();
            if required > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    limit,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.remove(key);
        Ok(())
    }
}

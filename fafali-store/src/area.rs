use std::fmt;
use std::sync::Arc;

use crate::app_config::{Backend, StorageConfig};
use crate::{FileArea, MemoryArea, RedisArea};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage quota exceeded writing {key}: {required} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        required: usize,
        limit: usize,
    },
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Redis storage failed: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Storage misconfigured: {0}")]
    Misconfigured(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string key-value area, the contract browser `localStorage` and
/// `sessionStorage` both satisfy.
pub trait StorageArea: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Which of the two areas a value lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    /// Survives restarts ("remember me")
    Durable,
    /// Lives as long as the current tab / process
    TabScoped,
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaKind::Durable => f.write_str("durable"),
            AreaKind::TabScoped => f.write_str("tab-scoped"),
        }
    }
}

/// The pair of storage areas one tab sees
#[derive(Clone)]
pub struct Areas {
    pub durable: Arc<dyn StorageArea>,
    pub tab: Arc<dyn StorageArea>,
}

impl Areas {
    pub fn new(durable: Arc<dyn StorageArea>, tab: Arc<dyn StorageArea>) -> Self {
        Self { durable, tab }
    }

    /// Both areas in process memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryArea::new()), Arc::new(MemoryArea::new()))
    }

    /// Build the durable area from config; the tab-scoped area is always
    /// in-memory since it must not outlive the process.
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        let durable: Arc<dyn StorageArea> = match config.backend {
            Backend::Memory => Arc::new(MemoryArea::new()),
            Backend::File => Arc::new(FileArea::open(&config.data_dir)?),
            Backend::Redis => {
                let url = config.redis_url.as_deref().ok_or_else(|| {
                    StorageError::Misconfigured("redis backend requires storage.redis_url".to_string())
                })?;
                Arc::new(RedisArea::new(url, &config.redis_namespace)?)
            }
        };

        tracing::info!("Opened {:?} durable storage", config.backend);
        Ok(Self::new(durable, Arc::new(MemoryArea::new())))
    }

    pub fn get(&self, kind: AreaKind) -> &dyn StorageArea {
        match kind {
            AreaKind::Durable => self.durable.as_ref(),
            AreaKind::TabScoped => self.tab.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_are_independent() {
        let areas = Areas::in_memory();
        areas.get(AreaKind::Durable).set_item("k", "durable").unwrap();

        assert_eq!(areas.durable.get_item("k").unwrap().as_deref(), Some("durable"));
        assert!(areas.tab.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let config = StorageConfig {
            backend: Backend::Redis,
            redis_url: None,
            ..StorageConfig::default()
        };

        let result = Areas::open(&config);
        assert!(matches!(result, Err(StorageError::Misconfigured(_))));
    }
}

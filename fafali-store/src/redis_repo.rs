use redis::Commands;
use tracing::debug;

use crate::area::{StorageArea, StorageResult};

/// Durable storage area kept in Redis under `<namespace>:<key>`.
#[derive(Clone)]
pub struct RedisArea {
    client: redis::Client,
    namespace: String,
}

impl RedisArea {
    pub fn new(connection_string: &str, namespace: &str) -> StorageResult<Self> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self {
            client,
            namespace: namespace.to_string(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

impl StorageArea for RedisArea {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.client.get_connection()?;
        let value = conn.get::<_, Option<String>>(self.namespaced(key))?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.client.get_connection()?;
        let key = self.namespaced(key);
        conn.set::<_, _, ()>(key.as_str(), value)?;
        debug!("Stored {} bytes at {}", value.len(), key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.client.get_connection()?;
        conn.del::<_, ()>(self.namespaced(key))?;
        Ok(())
    }
}

pub mod app_config;
pub mod area;
pub mod memory;
pub mod file;
pub mod redis_repo;

pub use app_config::{Backend, Config, StorageConfig, StorageKeys, ValidationRules};
pub use area::{AreaKind, Areas, StorageArea, StorageError, StorageResult};
pub use memory::MemoryArea;
pub use file::FileArea;
pub use redis_repo::RedisArea;

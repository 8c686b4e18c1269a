//! Локальный кеш ключ-значение для выбранных мест.
//!
//! Хранилищу выбора нужны только `get` и `set`, поэтому бэкенд
//! подменяется без изменения логики: память, файлы на диске или Redis.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};

pub mod file;
pub mod memory;
#[cfg(feature = "redis-storage")]
pub mod redis;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "redis-storage")]
pub use self::redis::RedisStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "redis-storage")]
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("storage quota exceeded: {size} bytes > {limit} bytes")]
    QuotaExceeded { size: usize, limit: usize },
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Собрать бэкенд по настройкам.
pub async fn from_config(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageBackend::File => Ok(Arc::new(FileStorage::new(&config.dir).await?)),
        #[cfg(feature = "redis-storage")]
        StorageBackend::Redis => Ok(Arc::new(RedisStorage::connect(&config.redis_url).await?)),
        #[cfg(not(feature = "redis-storage"))]
        StorageBackend::Redis => Err(StorageError::Unavailable(
            "built without the redis-storage feature".to_string(),
        )),
    }
}

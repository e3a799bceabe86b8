//! Storage factory for runtime credential store selection

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend name: `memory` or `postgres`
    pub backend: String,
    /// Connection settings, used when the backend is `postgres`
    pub postgres: PostgresConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            postgres: PostgresConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Returns the storage type
    pub fn storage_type(&self) -> Result<StorageType, DomainError> {
        StorageType::from_str(&self.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend: {}", self.backend))
        })
    }
}

/// Factory for creating credential stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the user repository selected by the configuration
    pub async fn create_user_repository(
        config: &StorageConfig,
    ) -> Result<Arc<dyn UserRepository>, DomainError> {
        match config.storage_type()? {
            StorageType::InMemory => {
                info!("Using in-memory credential store");
                Ok(Arc::new(InMemoryUserRepository::new()))
            }
            StorageType::Postgres => {
                let pool = connect_pool(&config.postgres).await?;
                let repository = PostgresUserRepository::new(pool);
                repository.ensure_schema().await?;

                info!("Using PostgreSQL credential store");
                Ok(Arc::new(repository))
            }
        }
    }
}

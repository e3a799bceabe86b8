//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Records {
    users: HashMap<String, User>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, String>,
}

/// In-memory implementation of UserRepository
///
/// Both maps live behind one lock so the uniqueness check and the insert in
/// `create` happen under the same write guard.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    records: Arc<RwLock<Records>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let records = self.records.read().await;
        Ok(records.users.get(id.as_str()).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let records = self.records.read().await;

        Ok(records
            .username_index
            .get(username)
            .and_then(|user_id| records.users.get(user_id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut records = self.records.write().await;

        let id = user.id().as_str().to_string();
        let username = user.username().to_string();

        if records.username_index.contains_key(&username) {
            return Err(DomainError::duplicate_username(username));
        }

        if records.users.contains_key(&id) {
            return Err(DomainError::internal(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        records.username_index.insert(username, id.clone());
        records.users.insert(id, user.clone());

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.records.read().await.users.len())
    }
}

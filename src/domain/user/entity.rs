//! User identity entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_user_id, UserValidationError};

/// User identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored user identity
///
/// Created once at registration and never mutated afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Unique username used for login
    username: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly generated ID
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self::with_id(UserId::generate(), username, password_hash, Utc::now())
    }

    /// Rebuild a user from stored fields
    pub fn with_id(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Caller-facing view of this identity, without the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[hidden]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Public projection of a user identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("user-123").unwrap();
        assert_eq!(id.as_str(), "user-123");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("-user").is_err());
        assert!(UserId::new("user id").is_err());
    }

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = UserId::generate();
        let b = UserId::generate();

        assert_ne!(a, b);
        assert!(UserId::new(a.as_str()).is_ok());
    }

    #[test]
    fn test_user_id_deserialization_validates() {
        let ok: Result<UserId, _> = serde_json::from_str("\"user-1\"");
        assert!(ok.is_ok());

        let bad: Result<UserId, _> = serde_json::from_str("\"user--1\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_user_creation() {
        let user = User::new("alice", "hashed_password");

        assert_eq!(user.username(), "alice");
        assert_eq!(user.password_hash(), "hashed_password");
        assert!(user.created_at() <= Utc::now());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = User::new("alice", "hashed_password");

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_user_debug_hides_password_hash() {
        let user = User::new("alice", "hashed_password");

        let debug = format!("{:?}", user);
        assert!(!debug.contains("hashed_password"));
        assert!(debug.contains("[hidden]"));
    }

    #[test]
    fn test_profile_excludes_password_hash() {
        let user = User::new("alice", "hashed_password");
        let profile = user.profile();

        assert_eq!(&profile.id, user.id());
        assert_eq!(profile.username, "alice");

        let json = serde_json::to_value(&profile).unwrap();
        let fields: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(fields.len(), 3);
        assert!(json.get("password_hash").is_none());
    }
}

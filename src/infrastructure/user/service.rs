//! Authentication service composing the credential store, the password
//! hasher and the token issuer

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::user::{
    validate_password, validate_username, User, UserId, UserProfile, UserRepository,
};
use crate::domain::{DomainError, IssuedToken, TokenIssuer};

use super::password::PasswordHasher;

/// Plaintext hashed once to give unknown-user logins the same cost as real ones
const DECOY_PASSWORD: &str = "authgate-decoy-password";

/// Authentication service: registration, login, token verification and
/// profile lookup
pub struct AuthService<R: UserRepository + ?Sized, H: PasswordHasher + 'static> {
    repository: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<dyn TokenIssuer>,
    decoy_hash: OnceCell<String>,
}

impl<R: UserRepository + ?Sized, H: PasswordHasher + 'static> AuthService<R, H> {
    /// Create a new authentication service
    pub fn new(repository: Arc<R>, hasher: Arc<H>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Register a new user
    ///
    /// Fails with `Validation` for empty or malformed input and with
    /// `DuplicateUsername` when the name is already taken.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserProfile, DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        // Skips hashing for obvious duplicates; `create` still enforces uniqueness
        if self.repository.get_by_username(username).await?.is_some() {
            return Err(DomainError::duplicate_username(username));
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .repository
            .create(User::new(username, password_hash))
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "User registered");

        Ok(user.profile())
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        // No stored password can be empty or over-long, so skip the hashing work
        if validate_password(password).is_err() {
            warn!("Login failed");
            return Err(DomainError::InvalidCredentials);
        }

        let user = match self.repository.get_by_username(username).await? {
            Some(user) => user,
            None => {
                let decoy = self.decoy_hash().await?;
                self.verify_password(password, decoy).await?;

                debug!("Login attempted for an unknown username");
                warn!("Login failed");
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !self.verify_password(password, user.password_hash()).await? {
            debug!(user_id = %user.id(), "Login attempted with a wrong password");
            warn!("Login failed");
            return Err(DomainError::InvalidCredentials);
        }

        let issued = self.tokens.issue(user.id())?;

        info!(user_id = %user.id(), expires_at = %issued.expires_at, "User logged in");

        Ok(issued)
    }

    /// Verify a bearer token and return the user it was issued to
    pub fn verify(&self, token: &str) -> Result<UserId, DomainError> {
        self.tokens.verify(token)?.user_id()
    }

    /// Fetch the public profile of a verified user
    pub async fn get_profile(&self, id: &UserId) -> Result<UserProfile, DomainError> {
        self.repository
            .get(id)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// Compute the decoy hash ahead of the first login
    ///
    /// Without this the first unknown-username login also pays for hashing
    /// the decoy and is measurably slower than a real one.
    pub async fn warm_up(&self) -> Result<(), DomainError> {
        self.decoy_hash().await.map(|_| ())
    }

    /// Count registered users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    async fn decoy_hash(&self) -> Result<&str, DomainError> {
        self.decoy_hash
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD))
            .await
            .map(String::as_str)
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| {
                DomainError::internal(format!("Password verification task failed: {}", e))
            })
    }
}

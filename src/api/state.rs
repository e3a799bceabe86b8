//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::domain::{DomainError, IssuedToken, UserId, UserProfile};
use crate::infrastructure::user::{AuthService, PasswordHasher};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
}

impl AppState {
    pub fn new(auth_service: Arc<dyn AuthServiceTrait>) -> Self {
        Self { auth_service }
    }
}

/// Trait for authentication operations used by the HTTP layer
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn register(&self, username: &str, password: &str) -> Result<UserProfile, DomainError>;
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError>;
    fn verify(&self, token: &str) -> Result<UserId, DomainError>;
    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> AuthServiceTrait for AuthService<R, H>
where
    R: UserRepository + ?Sized + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, username: &str, password: &str) -> Result<UserProfile, DomainError> {
        AuthService::register(self, username, password).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        AuthService::login(self, username, password).await
    }

    fn verify(&self, token: &str) -> Result<UserId, DomainError> {
        AuthService::verify(self, token)
    }

    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, DomainError> {
        AuthService::get_profile(self, id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        AuthService::count(self).await
    }
}

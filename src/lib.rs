//! Authgate
//!
//! Credential and session core exposed over HTTP:
//! - Username/password registration with Argon2id hashing
//! - Login issuing signed, time-bounded bearer tokens
//! - Token verification and profile lookup
//! - In-memory or PostgreSQL credential storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{DomainError, TokenIssuer};
use infrastructure::{
    auth::{JwtConfig, JwtService},
    storage::StorageFactory,
    user::{Argon2Hasher, AuthService},
};
use rand::Rng;
use tracing::{info, warn};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let repository = StorageFactory::create_user_repository(&config.storage).await?;
    let hasher = Arc::new(Argon2Hasher::with_config(&config.password)?);
    let tokens = create_token_issuer(config)?;

    info!(
        token_ttl_hours = config.auth.token_ttl_hours,
        "Authentication service initialized"
    );

    let auth_service = AuthService::new(repository, hasher, tokens);
    auth_service.warm_up().await?;

    Ok(AppState::new(Arc::new(auth_service)))
}

/// Create the token issuer from the configured secret, or a random one
fn create_token_issuer(config: &AppConfig) -> Result<Arc<dyn TokenIssuer>, DomainError> {
    let secret = match config.auth.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => secret.to_string(),
        _ => {
            warn!(
                "No JWT secret configured. Generating random secret. \
                Sessions will NOT persist across restarts. \
                Set APP__AUTH__JWT_SECRET for persistent sessions."
            );
            generate_random_secret()
        }
    };

    let service = JwtService::new(JwtConfig::new(secret, config.auth.token_ttl_hours))?;

    Ok(Arc::new(service))
}

/// Generate a random JWT secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

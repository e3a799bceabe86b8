//! Domain layer - Core business logic and entities

pub mod error;
pub mod session;
pub mod user;

pub use error::{DomainError, INVALID_CREDENTIALS_MESSAGE};
pub use session::{IssuedToken, SessionClaims, TokenIssuer};
pub use user::{User, UserId, UserProfile, UserRepository};

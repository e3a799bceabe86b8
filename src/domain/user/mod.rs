//! User domain
//!
//! This module provides domain types and traits for user identities,
//! including the entity, validation rules, and the credential store trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserProfile};
pub use repository::UserRepository;
pub use validation::{
    validate_password, validate_user_id, validate_username, UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;

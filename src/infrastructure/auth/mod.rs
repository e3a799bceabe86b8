//! Authentication infrastructure module
//!
//! This module provides JWT token management for user sessions.

mod jwt;

pub use jwt::{JwtConfig, JwtService};

//! Session domain
//!
//! Stateless bearer sessions: a token binds a subject to an absolute expiry
//! and is valid as long as its signature checks out and the expiry is not
//! past. Nothing is persisted server side.

use std::fmt::Debug;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;
use super::DomainError;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a subject issued at `now`
    ///
    /// Fails with `Internal` when `now + ttl` is outside the representable
    /// time range.
    pub fn new(
        subject: &UserId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, DomainError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::internal("Token expiry is out of range"))?;

        Ok(Self {
            sub: subject.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check whether the claims are expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Parse the subject back into a user ID
    ///
    /// A signed token whose subject is not a well-formed ID is treated as an
    /// invalid token.
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::new(self.sub.as_str()).map_err(|_| DomainError::InvalidToken)
    }

    /// Absolute expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A freshly minted bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies time-bounded bearer tokens
pub trait TokenIssuer: Send + Sync + Debug {
    /// Mint a token for the subject, expiring after the configured lifetime
    fn issue(&self, subject: &UserId) -> Result<IssuedToken, DomainError>;

    /// Verify signature then expiry, returning the trusted claims
    ///
    /// Fails with `InvalidToken` on any signature or format problem and with
    /// `ExpiredToken` once the current time is past the embedded expiry.
    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError>;
}

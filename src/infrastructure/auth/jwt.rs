//! JWT token generation and validation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt::Debug;
use tracing::debug;

use crate::domain::{DomainError, IssuedToken, SessionClaims, TokenIssuer, UserId};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// HS256 JWT service signing with a shared secret
#[derive(Clone)]
pub struct JwtService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &ALGORITHM)
            .field("ttl", &self.ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::configuration("JWT secret cannot be empty"));
        }

        if config.expiration_hours == 0 {
            return Err(DomainError::configuration(
                "JWT expiration must be at least one hour",
            ));
        }

        let hours = i64::try_from(config.expiration_hours)
            .map_err(|_| DomainError::configuration("JWT expiration is out of range"))?;
        let ttl = Duration::try_hours(hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| DomainError::configuration("JWT expiration is out of range"))?;

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            ttl,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        subject: &UserId,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        let claims = SessionClaims::new(subject, now, self.ttl)?;
        let expires_at = claims.expires_at();

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, subject: &UserId) -> Result<IssuedToken, DomainError> {
        self.issue_at(subject, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        // jsonwebtoken checks the signature before it looks at any claim
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::ExpiredToken,
                kind => {
                    debug!(reason = ?kind, "Rejected JWT");
                    DomainError::InvalidToken
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 24)).unwrap()
    }

    fn subject() -> UserId {
        UserId::new("test-user").unwrap()
    }

    /// Flip one bit of the signature segment and re-encode the token
    fn flip_signature_bit(token: &str, bit: usize) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        bytes[bit / 8] ^= 1 << (bit % 8);
        format!("{}.{}", head, URL_SAFE_NO_PAD.encode(bytes))
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_service();

        let issued = service.issue(&subject()).unwrap();
        assert!(!issued.token.is_empty());

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "test-user");
        assert_eq!(claims.user_id().unwrap(), subject());
        assert_eq!(claims.expires_at(), issued.expires_at);
        assert!(!claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_expiry_is_issue_time_plus_ttl() {
        let service = create_service();
        let now = Utc::now();

        let issued = service.issue_at(&subject(), now).unwrap();
        let claims = service.verify(&issued.token).unwrap();

        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, (now + Duration::hours(24)).timestamp());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        assert!(matches!(
            service.verify("invalid-token"),
            Err(DomainError::InvalidToken)
        ));
        assert!(matches!(service.verify(""), Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", 24)).unwrap();
        let service2 = JwtService::new(JwtConfig::new("secret-2", 24)).unwrap();

        let issued = service1.issue(&subject()).unwrap();

        assert!(matches!(
            service2.verify(&issued.token),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();
        let issued_at = Utc::now() - Duration::hours(25);

        let issued = service.issue_at(&subject(), issued_at).unwrap();

        assert!(matches!(
            service.verify(&issued.token),
            Err(DomainError::ExpiredToken)
        ));
    }

    #[test]
    fn test_expired_token_with_forged_signature_is_invalid() {
        let service = create_service();
        let issued_at = Utc::now() - Duration::hours(25);

        let issued = service.issue_at(&subject(), issued_at).unwrap();
        let forged = flip_signature_bit(&issued.token, 0);

        assert!(matches!(
            service.verify(&forged),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_every_single_bit_flip_in_signature_is_rejected() {
        let service = create_service();
        let issued = service.issue(&subject()).unwrap();

        // HS256 signatures are 32 bytes
        for bit in 0..256 {
            let tampered = flip_signature_bit(&issued.token, bit);
            assert!(
                matches!(service.verify(&tampered), Err(DomainError::InvalidToken)),
                "bit {} flip was accepted",
                bit
            );
        }
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let service = create_service();
        let issued = service.issue(&subject()).unwrap();

        let parts: Vec<&str> = issued.token.split('.').collect();
        let forged_claims = SessionClaims {
            sub: "someone-else".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], payload, parts[2]);

        assert!(matches!(
            service.verify(&forged),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_unsigned_token_is_rejected() {
        let service = create_service();
        let issued = service.issue(&subject()).unwrap();

        let parts: Vec<&str> = issued.token.split('.').collect();
        let none_header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let unsigned = format!("{}.{}.", none_header, parts[1]);

        assert!(matches!(
            service.verify(&unsigned),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_configured_expiration_hours() {
        let service = JwtService::new(JwtConfig::new("secret", 48)).unwrap();
        let now = Utc::now();

        let issued = service.issue_at(&subject(), now).unwrap();
        assert_eq!(issued.expires_at.timestamp(), (now + Duration::hours(48)).timestamp());
    }

    #[test]
    fn test_rejects_unrepresentable_expiration() {
        let result = JwtService::new(JwtConfig::new("secret", 10_000_000_000));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = JwtService::new(JwtConfig::new("secret", u64::MAX));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_issue_past_time_range_is_error() {
        let service = create_service();

        let result = service.issue_at(&subject(), DateTime::<Utc>::MAX_UTC);
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }

    #[test]
    fn test_rejects_empty_secret() {
        let result = JwtService::new(JwtConfig::new("", 24));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_rejects_zero_expiration() {
        let result = JwtService::new(JwtConfig::new("secret", 0));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = JwtConfig::new("very-secret-value", 24);
        let service = JwtService::new(config.clone()).unwrap();

        assert!(!format!("{:?}", config).contains("very-secret-value"));
        assert!(format!("{:?}", service).contains("[hidden]"));
    }
}

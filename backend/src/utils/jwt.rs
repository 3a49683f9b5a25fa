//! Access-token utilities for authentication and authorization.
//!
//! Provides signed, time-limited token issuance and verification bound to a
//! user identity. The signing secret is process-wide configuration, loaded
//! once at startup; it is never logged.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, TokenError};

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject: the authenticated user's id.
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Token service for creating and validating access tokens.
///
/// Stateless apart from the keys; issuance is a pure function of the secret,
/// the subject, and the clock, so tests can pin the clock via [`issue_at`].
///
/// [`issue_at`]: TokenService::issue_at
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self::with_secret(&config.jwt_secret, config.jwt_expires_in_seconds)
    }

    pub fn with_secret(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        TokenService {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    /// Issues a token for the given user, expiring after the configured TTL.
    pub fn issue(&self, user_id: &str) -> Result<String, ServiceError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, ServiceError> {
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Validates a token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::with_secret("test-secret", 86400)
    }

    #[test]
    fn issued_token_resolves_to_its_subject() {
        let tokens = service();
        let token = tokens.issue("user-123").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id(), "user-123");
        assert_eq!(claims.exp, claims.iat + 86400);
    }

    #[test]
    fn token_past_its_expiry_fails_with_expired() {
        let tokens = service();
        // Issued two days ago with a one-day TTL.
        let skewed = Utc::now() - Duration::seconds(2 * 86400);
        let token = tokens.issue_at("user-123", skewed).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = TokenService::with_secret("other-secret", 86400)
            .issue("user-123")
            .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn garbage_input_is_malformed() {
        assert_eq!(
            service().verify("not-a-token"),
            Err(TokenError::Malformed)
        );
    }
}

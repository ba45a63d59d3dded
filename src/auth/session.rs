//! Browser session cookies.
//!
//! The session cookie holds a JWT signed with the configured session
//! secret, whose only payload claim is the GitHub access token minted
//! during the OAuth callback. The service never stores the token
//! server-side; an unreadable or expired cookie simply means "no
//! session" and credential resolution falls through to the bearer
//! header.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{FiledropError, Result};

/// Claims carried by the session cookie JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// GitHub access token.
    pub ght: String,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
}

/// Signing and verification state for session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Name of the session cookie.
    pub cookie_name: String,
    ttl_secs: u64,
}

impl SessionKeys {
    /// Create session keys from a secret.
    pub fn new(secret: &str, cookie_name: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            cookie_name: cookie_name.to_string(),
            ttl_secs,
        }
    }

    /// Issue a session cookie value wrapping the given access token.
    pub fn issue(&self, access_token: &str) -> Result<String> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = SessionClaims {
            ght: access_token.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| FiledropError::Auth(format!("failed to sign session: {e}")))
    }

    /// Recover the access token from a session cookie value.
    ///
    /// Returns `None` on any decode failure (bad signature, expiry,
    /// malformed payload); the caller treats that as "no session".
    pub fn peek(&self, cookie_value: &str) -> Option<String> {
        match decode::<SessionClaims>(cookie_value, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.ght),
            Err(e) => {
                tracing::debug!("session cookie rejected: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_peek_roundtrip() {
        let keys = SessionKeys::new("test-secret", "filedrop_session", 3600);

        let cookie = keys.issue("gh-token-123").unwrap();
        let recovered = keys.peek(&cookie).unwrap();

        assert_eq!(recovered, "gh-token-123");
    }

    #[test]
    fn test_peek_rejects_garbage() {
        let keys = SessionKeys::new("test-secret", "filedrop_session", 3600);

        assert!(keys.peek("not-a-jwt").is_none());
        assert!(keys.peek("").is_none());
    }

    #[test]
    fn test_peek_rejects_wrong_secret() {
        let keys1 = SessionKeys::new("secret-one", "filedrop_session", 3600);
        let keys2 = SessionKeys::new("secret-two", "filedrop_session", 3600);

        let cookie = keys1.issue("gh-token").unwrap();

        assert!(keys2.peek(&cookie).is_none());
    }

    #[test]
    fn test_peek_rejects_expired() {
        let keys = SessionKeys::new("test-secret", "filedrop_session", 3600);

        let now = chrono::Utc::now().timestamp() as u64;
        let claims = SessionClaims {
            ght: "gh-token".to_string(),
            iat: now - 7200,
            exp: now - 3600, // expired an hour ago
        };
        let cookie = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(keys.peek(&cookie).is_none());
    }

    #[test]
    fn test_cookie_name_carried() {
        let keys = SessionKeys::new("s", "sid", 60);
        assert_eq!(keys.cookie_name, "sid");
    }
}

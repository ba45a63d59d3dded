//! Credential resolution.
//!
//! A request can carry its access token two ways: a session cookie set
//! during the OAuth callback, or an `Authorization: Bearer` header.
//! Both collapse into one opaque [`AccessToken`] before verification,
//! keeping the verifier carrier-agnostic.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::AuthError;

/// An opaque access token, tagged with the carrier it arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessToken {
    /// Token recovered from the browser session cookie.
    Session(String),
    /// Token taken from an `Authorization: Bearer` header.
    Bearer(String),
}

impl AccessToken {
    /// The raw token string, regardless of carrier.
    pub fn secret(&self) -> &str {
        match self {
            AccessToken::Session(t) | AccessToken::Bearer(t) => t,
        }
    }
}

/// Resolve the request's access token.
///
/// A session-carried token wins over the header. A header is only
/// honored with the literal `Bearer ` prefix. No side effects.
pub fn resolve_credentials(
    headers: &HeaderMap,
    session_token: Option<String>,
) -> Result<AccessToken, AuthError> {
    if let Some(token) = session_token {
        return Ok(AccessToken::Session(token));
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|t| AccessToken::Bearer(t.to_string()))
        .ok_or(AuthError::MissingCredential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_token_preferred() {
        let headers = headers_with_auth("Bearer header-token");
        let token = resolve_credentials(&headers, Some("session-token".to_string())).unwrap();

        assert_eq!(token, AccessToken::Session("session-token".to_string()));
        assert_eq!(token.secret(), "session-token");
    }

    #[test]
    fn test_bearer_header_fallback() {
        let headers = headers_with_auth("Bearer abc123");
        let token = resolve_credentials(&headers, None).unwrap();

        assert_eq!(token, AccessToken::Bearer("abc123".to_string()));
        assert_eq!(token.secret(), "abc123");
    }

    #[test]
    fn test_missing_everything() {
        let headers = HeaderMap::new();
        let result = resolve_credentials(&headers, None);

        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        let result = resolve_credentials(&headers, None);

        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[test]
    fn test_bearer_prefix_is_case_sensitive() {
        let headers = headers_with_auth("bearer abc123");
        let result = resolve_credentials(&headers, None);

        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[test]
    fn test_bearer_token_preserves_remainder() {
        // Everything after the prefix is the token, spaces included.
        let headers = headers_with_auth("Bearer abc 123");
        let token = resolve_credentials(&headers, None).unwrap();

        assert_eq!(token.secret(), "abc 123");
    }
}

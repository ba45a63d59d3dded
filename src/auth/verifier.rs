//! GitHub identity verification.
//!
//! Every authenticated request exchanges its access token for the
//! account's username by calling the provider's "current user"
//! endpoint. Results are never cached; token validity is entirely the
//! provider's call.

use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client, StatusCode};

use super::AuthError;
use crate::config::GithubConfig;
use crate::{FiledropError, Result};

/// User agent string for provider calls.
pub(crate) const USER_AGENT: &str = "filedrop/0.1";

/// The caller's verified identity. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// GitHub login of the token's owner.
    pub username: String,
}

/// Verifies access tokens against the GitHub API.
#[derive(Debug, Clone)]
pub struct GithubVerifier {
    client: Client,
    user_url: String,
}

impl GithubVerifier {
    /// Create a verifier from the provider configuration.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FiledropError::Provider(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            user_url: format!("{}/user", config.api_base_url.trim_end_matches('/')),
        })
    }

    /// Exchange an access token for the caller's identity.
    ///
    /// Any non-200 status, transport failure, or timeout maps to
    /// `InvalidCredential`; malformed and expired tokens are never
    /// distinguished for the caller. A 200 with a body missing the
    /// `login` field is an integration fault, surfaced as 5xx.
    pub async fn verify(&self, token: &str) -> std::result::Result<Identity, AuthError> {
        let response = self
            .client
            .get(&self.user_url)
            .header(AUTHORIZATION, format!("token {token}"))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("identity provider call failed: {}", e);
                AuthError::InvalidCredential
            })?;

        if response.status() != StatusCode::OK {
            tracing::debug!("identity provider rejected token: {}", response.status());
            return Err(AuthError::InvalidCredential);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AuthError::Integration(format!("unreadable user response: {e}")))?;

        let username = body
            .get("login")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AuthError::Integration("user response missing login field".to_string()))?;

        Ok(Identity {
            username: username.to_string(),
        })
    }
}

//! OAuth authorization-code exchange with GitHub.
//!
//! The browser flow: `/login` redirects to GitHub's authorize page,
//! GitHub calls back with a `code`, and [`OauthClient::exchange_code`]
//! trades the code for an access token. The token then lives in the
//! session cookie; this module never persists it.

use std::time::Duration;

use reqwest::{header::ACCEPT, Client};

use crate::config::GithubConfig;
use crate::{FiledropError, Result};

/// Client for the OAuth authorization-code dance.
#[derive(Debug, Clone)]
pub struct OauthClient {
    client: Client,
    client_id: String,
    client_secret: String,
    authorize_url: String,
    token_url: String,
    scope: String,
    redirect_url: String,
}

impl OauthClient {
    /// Create an OAuth client from the provider configuration.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(super::verifier::USER_AGENT)
            .build()
            .map_err(|e| FiledropError::Provider(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            authorize_url: config.authorize_url.clone(),
            token_url: config.token_url.clone(),
            scope: config.scope.clone(),
            redirect_url: config.redirect_url.clone(),
        })
    }

    /// Build the provider's authorize URL for the login redirect.
    pub fn authorize_redirect_url(&self) -> Result<String> {
        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("scope", self.scope.as_str()),
        ];
        if !self.redirect_url.is_empty() {
            params.push(("redirect_uri", self.redirect_url.as_str()));
        }

        let url = url::Url::parse_with_params(&self.authorize_url, params)
            .map_err(|e| FiledropError::Provider(format!("invalid authorize URL: {e}")))?;

        Ok(url.into())
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| FiledropError::Provider(format!("token exchange failed: {e}")))?;

        if !response.status().is_success() {
            return Err(FiledropError::Provider(format!(
                "token exchange returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FiledropError::Provider(format!("unreadable token response: {e}")))?;

        body.get("access_token")
            .and_then(|v| v.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| {
                FiledropError::Provider("token response missing access_token".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GithubConfig {
        GithubConfig {
            client_id: "client-123".to_string(),
            client_secret: "secret-456".to_string(),
            ..GithubConfig::default()
        }
    }

    #[test]
    fn test_authorize_redirect_url() {
        let oauth = OauthClient::new(&test_config()).unwrap();

        let url = oauth.authorize_redirect_url().unwrap();

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("scope=user%3Aemail"));
        assert!(!url.contains("redirect_uri"));
    }

    #[test]
    fn test_authorize_redirect_url_with_callback() {
        let mut config = test_config();
        config.redirect_url = "https://drop.example.com/login/authorized".to_string();
        let oauth = OauthClient::new(&config).unwrap();

        let url = oauth.authorize_redirect_url().unwrap();

        assert!(url.contains("redirect_uri=https%3A%2F%2Fdrop.example.com%2Flogin%2Fauthorized"));
    }
}

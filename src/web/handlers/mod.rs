//! API handlers for the filedrop web surface.

pub mod pages;
pub mod upload;

pub use pages::*;
pub use upload::*;

use std::sync::Arc;

use crate::auth::{GithubVerifier, OauthClient, SessionKeys};
use crate::upload::NamespaceResolver;
use crate::web::middleware::AuthState;
use crate::{Config, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage namespace resolver.
    pub namespaces: NamespaceResolver,
    /// OAuth authorization-code client.
    pub oauth: OauthClient,
    /// Session cookie keys.
    pub session: SessionKeys,
}

/// Build the shared handler and auth state from configuration.
///
/// Creates the storage root on the spot; a root that cannot be created
/// is a startup failure, not a per-request one.
pub fn build_state(config: &Config) -> Result<(Arc<AppState>, Arc<AuthState>)> {
    let verifier = GithubVerifier::new(&config.github)?;
    let oauth = OauthClient::new(&config.github)?;
    let session = SessionKeys::new(
        &config.session.secret,
        &config.session.cookie_name,
        config.session.ttl_secs,
    );
    let namespaces = NamespaceResolver::new(&config.storage.root)?;

    let app_state = Arc::new(AppState {
        namespaces,
        oauth,
        session: session.clone(),
    });
    let auth_state = Arc::new(AuthState::new(verifier, session));

    Ok((app_state, auth_state))
}

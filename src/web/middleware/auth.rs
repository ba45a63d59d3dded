//! Authentication middleware and extractor.
//!
//! The auth gate is an extractor composed before handlers: it resolves
//! the request's credential carrier, verifies the token against
//! GitHub, and hands the handler the resolved username as an explicit
//! argument. Any failure short-circuits with a 401 before the handler
//! runs.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{resolve_credentials, GithubVerifier, SessionKeys};
use crate::web::error::ApiError;

/// Shared authentication state for the extractor.
#[derive(Clone)]
pub struct AuthState {
    /// Identity provider client.
    pub verifier: GithubVerifier,
    /// Session cookie keys.
    pub session: SessionKeys,
}

impl AuthState {
    /// Create authentication state.
    pub fn new(verifier: GithubVerifier, session: SessionKeys) -> Self {
        Self { verifier, session }
    }
}

/// Extractor for authenticated users.
///
/// Use this extractor to require authentication for a handler. The
/// handler receives the verified GitHub username.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Get auth state from extensions (set by middleware)
            let auth = parts
                .extensions
                .get::<Arc<AuthState>>()
                .cloned()
                .ok_or_else(|| ApiError::internal("Auth state not configured"))?;

            // Recover a session-carried token, if any
            let jar = CookieJar::from_headers(&parts.headers);
            let session_token = jar
                .get(&auth.session.cookie_name)
                .and_then(|cookie| auth.session.peek(cookie.value()));

            // Collapse both carriers into one opaque token
            let token = resolve_credentials(&parts.headers, session_token)?;

            // Verify against the identity provider, fresh every request
            let identity = auth.verifier.verify(token.secret()).await?;

            Ok(AuthUser(identity.username))
        })
    }
}

/// Middleware function to inject auth state into request extensions.
pub async fn auth_context(
    auth_state: Arc<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(auth_state);
    next.run(request).await
}

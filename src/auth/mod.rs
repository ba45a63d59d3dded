//! Authentication for filedrop.
//!
//! Callers prove their identity with a GitHub access token, carried
//! either in a signed session cookie (browser flow) or in an
//! `Authorization: Bearer` header (API flow). The token is verified
//! against GitHub on every request; nothing is cached.

pub mod credentials;
pub mod oauth;
pub mod session;
pub mod verifier;

use thiserror::Error;

pub use credentials::{resolve_credentials, AccessToken};
pub use oauth::OauthClient;
pub use session::{SessionClaims, SessionKeys};
pub use verifier::{GithubVerifier, Identity};

/// Authentication failure taxonomy.
///
/// `MissingCredential` and `InvalidCredential` are surfaced to callers
/// with one shared message so a client cannot probe which of the two
/// occurred. `Integration` is a server fault, not charged to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was supplied with the request.
    #[error("missing credential")]
    MissingCredential,

    /// The supplied credential was rejected by the identity provider.
    #[error("invalid or expired credential")]
    InvalidCredential,

    /// The identity provider accepted the credential but returned a
    /// body this service could not understand.
    #[error("identity provider integration failure: {0}")]
    Integration(String),
}

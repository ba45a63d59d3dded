//! Test helpers for the web API integration tests.
//!
//! Provides a stub GitHub server (identity endpoint + OAuth token
//! exchange) bound to a random local port, and a TestServer wired
//! against it.

use std::net::SocketAddr;
use std::path::Path;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};

use filedrop::web::handlers::build_state;
use filedrop::web::router::create_router;
use filedrop::Config;

/// Token the stub provider accepts, mapped to [`USERNAME`].
pub const VALID_TOKEN: &str = "gho_valid-test-token";

/// Token the stub provider answers with a 200 body missing `login`.
pub const BROKEN_TOKEN: &str = "gho_broken-provider-token";

/// Username the stub provider reports for [`VALID_TOKEN`].
pub const USERNAME: &str = "alice";

/// Authorization code the stub token endpoint exchanges for [`VALID_TOKEN`].
pub const OAUTH_CODE: &str = "good-code";

/// Session cookie name used by the default configuration.
pub const SESSION_COOKIE: &str = "filedrop_session";

/// Spawn the stub GitHub server on a random port.
pub async fn spawn_stub_github() -> SocketAddr {
    let router = Router::new()
        .route("/user", get(stub_user))
        .route("/login/oauth/access_token", post(stub_token));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub GitHub server");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("stub GitHub server error: {e}");
        }
    });

    addr
}

async fn stub_user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if auth == format!("token {VALID_TOKEN}") {
        (StatusCode::OK, Json(json!({ "login": USERNAME })))
    } else if auth == format!("token {BROKEN_TOKEN}") {
        // Success status but no login field: an integration fault.
        (StatusCode::OK, Json(json!({ "id": 42 })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Bad credentials" })),
        )
    }
}

async fn stub_token(body: String) -> (StatusCode, Json<Value>) {
    if body.contains(&format!("code={OAUTH_CODE}")) {
        (
            StatusCode::OK,
            Json(json!({ "access_token": VALID_TOKEN, "token_type": "bearer" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "error": "bad_verification_code" })))
    }
}

/// Create a test configuration pointed at the stub provider.
pub fn create_test_config(github_addr: SocketAddr, storage_root: &Path) -> Config {
    let mut config = Config::default();
    config.github.client_id = "test-client".to_string();
    config.github.client_secret = "test-client-secret".to_string();
    config.github.api_base_url = format!("http://{github_addr}");
    config.github.authorize_url = format!("http://{github_addr}/login/oauth/authorize");
    config.github.token_url = format!("http://{github_addr}/login/oauth/access_token");
    config.github.connect_timeout_secs = 2;
    config.github.timeout_secs = 5;
    config.session.secret = "test-session-secret".to_string();
    config.storage.root = storage_root.to_string_lossy().into_owned();
    config
}

/// Create a test server from the configuration.
pub fn create_test_server(config: &Config) -> TestServer {
    let (app_state, auth_state) = build_state(config).expect("Failed to build state");
    let router = create_router(app_state, auth_state, &config.server.cors_origins);
    TestServer::new(router).expect("Failed to create test server")
}

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Count the entries directly under a directory (0 if absent).
pub fn dir_entries(path: &Path) -> usize {
    match std::fs::read_dir(path) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

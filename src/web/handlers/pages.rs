//! Browser pages and the OAuth login flow.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// One-shot flash cookie read and cleared by the index page.
pub const FLASH_COOKIE: &str = "filedrop_flash";

/// GET / - welcome page.
pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .map(|c| urlencoding::decode(c.value()).unwrap_or_default().into_owned());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());

    let mut body = String::from("<!doctype html>\n<title>filedrop</title>\n");
    if let Some(message) = flash {
        body.push_str(&format!(
            "<p class=\"flash\">{}</p>\n",
            escape_html(&message)
        ));
    }
    body.push_str("<p>Welcome to the file upload service.</p>\n");

    (jar, Html(body))
}

/// GET /login - redirect to the provider's authorize page.
pub async fn login(State(state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    let url = state.oauth.authorize_redirect_url()?;
    Ok(Redirect::to(&url))
}

/// Callback query parameters from the provider.
#[derive(Debug, Deserialize)]
pub struct AuthorizedQuery {
    /// Authorization code, absent when the user denied access.
    pub code: Option<String>,
    /// Denial reason reported by the provider.
    pub error_reason: Option<String>,
    /// Denial description reported by the provider.
    pub error_description: Option<String>,
}

/// GET /login/authorized - OAuth callback.
///
/// Exchanges the code for an access token and stores it in the session
/// cookie. The token itself is never persisted server-side.
pub async fn authorized(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<AuthorizedQuery>,
) -> Result<Response, ApiError> {
    let Some(code) = query.code else {
        let reason = query.error_reason.unwrap_or_else(|| "unknown".to_string());
        let error = query
            .error_description
            .unwrap_or_else(|| "unknown".to_string());
        return Ok(Html(format!(
            "Access denied: reason={} error={}",
            escape_html(&reason),
            escape_html(&error)
        ))
        .into_response());
    };

    let access_token = state.oauth.exchange_code(&code).await?;
    let session_value = state.session.issue(&access_token)?;

    let cookie = Cookie::build((state.session.cookie_name.clone(), session_value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!("session established via OAuth callback");

    Ok((jar.add(cookie), Redirect::to("/")).into_response())
}

/// GET /logout - clear the session cookie.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(
        Cookie::build(state.session.cookie_name.clone())
            .path("/")
            .build(),
    );
    (jar, Redirect::to("/"))
}

/// Redirect to `/` carrying a one-shot flash message.
pub fn flash_redirect(jar: CookieJar, message: &str) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(message).into_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), Redirect::to("/"))
}

/// Minimal HTML escaping for text interpolated into pages.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

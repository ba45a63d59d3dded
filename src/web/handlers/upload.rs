//! Upload handlers.

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use utoipa;

use crate::upload::{issue_token, persist_batch, validate_batch, RawUpload, UploadRecord};
use crate::web::dto::{TemporaryUploadResponse, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::pages::{escape_html, flash_redirect};
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// PUT /api/upload - persist a batch under the caller's namespace.
#[utoipa::path(
    put,
    path = "/api/upload",
    tag = "uploads",
    request_body = Vec<RawUpload>,
    responses(
        (status = 200, description = "Batch persisted", body = UploadResponse),
        (status = 400, description = "Malformed batch"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    AuthUser(username): AuthUser,
    Json(raw): Json<Vec<RawUpload>>,
) -> Result<Json<UploadResponse>, ApiError> {
    // Validate before touching storage so a malformed batch leaves no
    // trace, not even an empty namespace.
    let records = validate_batch(raw).map_err(|r| ApiError::validation(r.details))?;

    let namespace = state.namespaces.resolve(&[username.as_str()])?;
    let written = persist_batch(&namespace, &records)?;

    tracing::info!(user = %username, files = written, "batch persisted");

    Ok(Json(UploadResponse::ok()))
}

/// PUT /api/upload_temporary - persist a batch under a fresh ephemeral
/// namespace and hand back its token.
#[utoipa::path(
    put,
    path = "/api/upload_temporary",
    tag = "uploads",
    request_body = Vec<RawUpload>,
    responses(
        (status = 200, description = "Batch persisted under an ephemeral token", body = TemporaryUploadResponse),
        (status = 400, description = "Malformed batch"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_temporary(
    State(state): State<Arc<AppState>>,
    AuthUser(username): AuthUser,
    Json(raw): Json<Vec<RawUpload>>,
) -> Result<Json<TemporaryUploadResponse>, ApiError> {
    let records = validate_batch(raw).map_err(|r| ApiError::validation(r.details))?;

    let token = issue_token();
    let namespace = state.namespaces.resolve(&[username.as_str(), token.as_str()])?;
    let written = persist_batch(&namespace, &records)?;

    tracing::info!(user = %username, token = %token, files = written, "temporary batch persisted");

    Ok(Json(TemporaryUploadResponse { token }))
}

/// POST /upload - browser-facing single-file upload.
///
/// Multipart form with one `file` field; same auth and persistence
/// semantics as the API path, collapsed to one record. Clients that
/// declare a fragment preference get an inline fragment; everyone else
/// is redirected to `/`, with a one-shot flash cookie on error.
pub async fn upload_form(
    State(state): State<Arc<AppState>>,
    AuthUser(username): AuthUser,
    headers: HeaderMap,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let mut record: Option<UploadRecord> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let name = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        record = Some(UploadRecord {
                            name,
                            bytes: bytes.to_vec(),
                        });
                    }
                    Err(e) => {
                        tracing::debug!("failed to read multipart file field: {}", e);
                        return upload_form_failure(&headers, jar, "Error reading the file");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("invalid multipart body: {}", e);
                return upload_form_failure(&headers, jar, "Invalid form data");
            }
        }
    }

    let Some(record) = record else {
        return upload_form_failure(&headers, jar, "No file part");
    };
    if record.name.is_empty() {
        return upload_form_failure(&headers, jar, "No selected file");
    }

    let saved = state
        .namespaces
        .resolve(&[username.as_str()])
        .and_then(|namespace| persist_batch(&namespace, &[record]));

    match saved {
        Ok(_) => {
            tracing::info!(user = %username, "form upload persisted");
            if prefers_fragment(&headers) {
                Html("<p>Upload complete.</p>".to_string()).into_response()
            } else {
                Redirect::to("/").into_response()
            }
        }
        Err(e) => {
            tracing::error!("form upload failed: {}", e);
            upload_form_failure(&headers, jar, "Error saving the file")
        }
    }
}

/// Whether the client declared a preference for partial fragments.
fn prefers_fragment(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false)
}

/// Browser-variant error response: fragment or flash-redirect.
fn upload_form_failure(headers: &HeaderMap, jar: CookieJar, message: &str) -> Response {
    if prefers_fragment(headers) {
        (
            StatusCode::BAD_REQUEST,
            Html(format!("<p class=\"error\">{}</p>", escape_html(message))),
        )
            .into_response()
    } else {
        flash_redirect(jar, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_prefers_fragment() {
        let mut headers = HeaderMap::new();
        assert!(!prefers_fragment(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        assert!(prefers_fragment(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("something-else"));
        assert!(!prefers_fragment(&headers));
    }
}

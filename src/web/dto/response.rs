//! Response DTOs for the web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Successful permanent upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Always true on success.
    pub success: bool,
}

impl UploadResponse {
    /// The success response.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Successful temporary upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemporaryUploadResponse {
    /// Ephemeral token scoping the uploaded batch. The sole handle for
    /// later retrieval.
    pub token: String,
}

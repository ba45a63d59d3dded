//! Request and response DTOs for the web API.

pub mod response;

pub use crate::upload::RawUpload;
pub use response::{TemporaryUploadResponse, UploadResponse};

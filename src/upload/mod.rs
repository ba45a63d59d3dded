//! Upload pipeline for filedrop.
//!
//! A request's batch flows through three stages: validation and base64
//! decoding ([`batch`]), namespace resolution under the storage root
//! ([`namespace`]), and persistence ([`persister`]). The temporary
//! variant additionally mints an ephemeral namespace token ([`token`]).

pub mod batch;
pub mod namespace;
pub mod persister;
pub mod token;

pub use batch::{validate_batch, BatchRejection, RawUpload, UploadRecord};
pub use namespace::NamespaceResolver;
pub use persister::persist_batch;
pub use token::issue_token;

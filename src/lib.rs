//! filedrop - multi-user file-drop service
//!
//! Authenticated clients upload batches of files, persisted under a
//! per-user storage namespace. Identity comes from GitHub (delegated
//! OAuth), carried across requests by a session cookie or a bearer
//! token.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod upload;
pub mod web;

pub use config::Config;
pub use error::{FiledropError, Result};

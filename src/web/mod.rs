//! Web API module for filedrop.
//!
//! JSON upload API under `/api`, browser pages and the OAuth login
//! flow at the root.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;

//! REST API client module for the account portal.
//!
//! This module provides the `ApiClient` for the portal's auth endpoints.
//! The portal uses JWT bearer token authentication; the token obtained at
//! login is attached to every non-public request.

pub mod client;
pub mod error;
pub mod portal;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::CodeKind;

/// Check if we can bind to localhost (sandboxed test environments may not
/// allow it, in which case mock-server tests are skipped)
#[cfg(test)]
pub(crate) fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

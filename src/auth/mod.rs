//! Authentication module for managing user sessions and credentials.
//!
//! This module provides:
//! - `Session`: the persisted bearer token plus who it belongs to
//! - `CredentialStore`: secure OS-level credential storage via keyring
//!
//! Sessions are persisted to disk; the backend alone decides when a token
//! stops working.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Session, SessionData};

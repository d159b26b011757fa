//! Security module for request authentication.
//!
//! When an API key is configured, the HTTP transport runs every protocol,
//! listing and call request through [`ApiKeyAuth`] before it reaches the
//! dispatcher.

pub mod auth;

pub use auth::{ApiKeyAuth, AuthError, extract_credential};

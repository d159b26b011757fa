//! API key authentication.
//!
//! The key is read from the `Authorization` header. Accepted forms are
//! `Bearer <key>`, `ApiKey <key>`, `Key <key>` and the bare key.

use thiserror::Error;

use crate::core::config::AuthConfig;

/// Authentication failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing authentication credentials")]
    MissingCredentials,

    #[error("Invalid authentication credentials")]
    InvalidCredentials,
}

const SCHEMES: [&str; 3] = ["Bearer", "ApiKey", "Key"];

/// Strip a recognised scheme prefix from an `Authorization` header value.
pub fn extract_credential(header: &str) -> &str {
    let header = header.trim();

    // A scheme with nothing after it carries no credential.
    if SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(header)) {
        return "";
    }

    if let Some((scheme, rest)) = header.split_once(char::is_whitespace) {
        if SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
            return rest.trim();
        }
    }

    header
}

/// Checks requests against a single configured API key.
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: String,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// `None` when no key is configured, meaning authentication is off.
    pub fn from_config(config: &AuthConfig) -> Option<Self> {
        config.api_key.as_deref().map(Self::new)
    }

    /// Authenticate the raw `Authorization` header value, if any.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let credential = authorization
            .map(extract_credential)
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        if constant_time_eq(credential.as_bytes(), self.api_key.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_credential_forms() {
        assert_eq!(extract_credential("Bearer abc"), "abc");
        assert_eq!(extract_credential("ApiKey abc"), "abc");
        assert_eq!(extract_credential("Key abc"), "abc");
        assert_eq!(extract_credential("bearer   abc "), "abc");
        assert_eq!(extract_credential("abc"), "abc");
        assert_eq!(extract_credential("Basic abc"), "Basic abc");
    }

    #[test]
    fn test_authenticate() {
        let auth = ApiKeyAuth::new("s3cret");
        assert_eq!(auth.authenticate(Some("Bearer s3cret")), Ok(()));
        assert_eq!(auth.authenticate(Some("ApiKey s3cret")), Ok(()));
        assert_eq!(auth.authenticate(Some("Key s3cret")), Ok(()));
        assert_eq!(auth.authenticate(Some("s3cret")), Ok(()));
        assert_eq!(
            auth.authenticate(Some("Bearer wrong")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(auth.authenticate(None), Err(AuthError::MissingCredentials));
        assert_eq!(
            auth.authenticate(Some("Bearer ")),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_from_config() {
        assert!(ApiKeyAuth::from_config(&AuthConfig::default()).is_none());
        let config = AuthConfig {
            api_key: Some("k".to_string()),
        };
        assert!(ApiKeyAuth::from_config(&config).is_some());
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", ApiKeyAuth::new("s3cret"));
        assert!(!debug.contains("s3cret"));
    }
}

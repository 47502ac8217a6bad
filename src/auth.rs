//! Bearer-token providers.
//!
//! # Security Note - Logging
//!
//! Tokens are held as [`SecretString`] and only exposed while building the
//! `Authorization` header. The header value is flagged sensitive, and
//! [`BearerHeader`] formats as `[REDACTED]`, so neither `Debug` output nor
//! `tracing` events carry the credential.

use std::env;
use std::fmt;
use std::future::Future;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ListSourceError, Result};

/// Environment variable read by [`EnvToken::default`].
pub const DEFAULT_TOKEN_ENV: &str = "REMOTE_LIST_TOKEN";

/// Supplies the bearer token for each list request.
///
/// Implementations own refresh and expiry; the list source asks for a token
/// once per fetch and never caches it.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> impl Future<Output = Result<SecretString>> + Send;
}

/// A fixed token, e.g. read once from a settings file.
pub struct StaticToken {
    token: SecretString,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<SecretString> {
        if self.token.expose_secret().is_empty() {
            return Err(ListSourceError::Auth("token is empty".to_string()));
        }
        Ok(SecretString::from(self.token.expose_secret().to_string()))
    }
}

/// Reads the token from an environment variable on every request, so an
/// external process can rotate it without restarting the consumer.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_ENV)
    }
}

impl TokenProvider for EnvToken {
    async fn token(&self) -> Result<SecretString> {
        match env::var(&self.var) {
            Ok(token) if !token.is_empty() => Ok(SecretString::from(token)),
            _ => Err(ListSourceError::Auth(format!(
                "token not available. Set the {} environment variable",
                self.var
            ))),
        }
    }
}

/// Token source chosen from settings: an inline token or an environment
/// variable.
#[derive(Debug)]
pub enum ConfiguredToken {
    Inline(StaticToken),
    Env(EnvToken),
}

impl TokenProvider for ConfiguredToken {
    async fn token(&self) -> Result<SecretString> {
        match self {
            ConfiguredToken::Inline(provider) => provider.token().await,
            ConfiguredToken::Env(provider) => provider.token().await,
        }
    }
}

/// `Authorization: Bearer <token>` value that never prints the token.
pub struct BearerHeader {
    value: HeaderValue,
}

impl BearerHeader {
    pub fn new(token: &SecretString) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| {
                ListSourceError::Auth("token contains characters not valid in a header".to_string())
            })?;
        value.set_sensitive(true);
        Ok(Self { value })
    }

    pub fn as_header_value(&self) -> &HeaderValue {
        &self.value
    }
}

impl fmt::Display for BearerHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bearer [REDACTED]")
    }
}

impl fmt::Debug for BearerHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("abc123");
        let token = provider.token().await.unwrap();
        assert_eq!(token.expose_secret(), "abc123");
    }

    #[tokio::test]
    async fn test_static_token_empty() {
        let provider = StaticToken::new("");
        assert!(matches!(
            provider.token().await,
            Err(ListSourceError::Auth(_))
        ));
    }

    #[test]
    fn test_static_token_debug_is_redacted() {
        let provider = StaticToken::new("super-secret");
        let debug = format!("{provider:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    #[serial]
    async fn test_env_token_reads_variable() {
        let key = "REMOTE_LIST_TEST_TOKEN_SET";
        let _guard = unsafe { EnvGuard::set(key, "from-env") };

        let token = EnvToken::new(key).token().await.unwrap();
        assert_eq!(token.expose_secret(), "from-env");
    }

    #[tokio::test]
    #[serial]
    async fn test_env_token_missing_variable() {
        let key = "REMOTE_LIST_TEST_TOKEN_MISSING";
        let _guard = unsafe { EnvGuard::remove(key) };

        let err = EnvToken::new(key).token().await.unwrap_err();
        match err {
            ListSourceError::Auth(msg) => assert!(msg.contains(key)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_env_token_empty_variable() {
        let key = "REMOTE_LIST_TEST_TOKEN_EMPTY";
        let _guard = unsafe { EnvGuard::set(key, "") };

        assert!(EnvToken::new(key).token().await.is_err());
    }

    #[test]
    fn test_bearer_header() {
        let header = BearerHeader::new(&SecretString::from("tok".to_string())).unwrap();
        assert_eq!(header.as_header_value().to_str().unwrap(), "Bearer tok");
        assert!(header.as_header_value().is_sensitive());
        assert_eq!(header.to_string(), "Bearer [REDACTED]");
        assert!(!format!("{header:?}").contains("tok"));
    }

    #[test]
    fn test_bearer_header_rejects_newline() {
        let token = SecretString::from("bad\ntoken".to_string());
        assert!(matches!(
            BearerHeader::new(&token),
            Err(ListSourceError::Auth(_))
        ));
    }
}

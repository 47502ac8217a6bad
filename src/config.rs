//! Settings file for the `remote-list` front end.
//!
//! Settings are stored in YAML and include:
//! - The list source configuration (endpoint and response keys)
//! - Where the bearer token comes from
//! - HTTP timeouts
//!
//! ```yaml
//! source:
//!   endpoint: https://api.example.com/reviews
//!   total_key: X-Total-Count
//! auth:
//!   token_env: REVIEWS_TOKEN
//! timeout: 20
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::{ConfiguredToken, DEFAULT_TOKEN_ENV, EnvToken, StaticToken};
use crate::error::{ListSourceError, Result};
use crate::source::SourceConfig;

/// Environment variable that overrides `source.endpoint` when non-empty.
pub const ENDPOINT_ENV: &str = "REMOTE_LIST_ENDPOINT";

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// List source configuration
    #[serde(default = "default_source")]
    pub source: SourceConfig,

    /// Token source
    #[serde(default)]
    pub auth: AuthSettings,

    /// Total request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_source() -> SourceConfig {
    SourceConfig::new("")
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: default_source(),
            auth: AuthSettings::default(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

/// Token configuration. An inline `token` takes precedence over `token_env`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token: None,
            token_env: default_token_env(),
        }
    }
}

impl AuthSettings {
    /// The token provider these settings describe. An inline token wins.
    pub fn provider(&self) -> ConfiguredToken {
        match &self.token {
            Some(token) => ConfiguredToken::Inline(StaticToken::new(token.clone())),
            None => ConfiguredToken::Env(EnvToken::new(self.token_env.clone())),
        }
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .finish()
    }
}

impl Settings {
    /// Load settings from `path` and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ListSourceError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut settings: Settings = serde_yaml_ng::from_str(&content)?;
        settings.apply_env();
        Ok(settings)
    }

    /// Defaults plus environment overrides, for running without a file.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        settings.apply_env();
        settings
    }

    fn apply_env(&mut self) {
        if let Ok(endpoint) = env::var(ENDPOINT_ENV)
            && !endpoint.is_empty()
        {
            self.source.endpoint = endpoint;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;
    use std::io::Write;

    fn write_settings(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_load_full_settings() {
        let _guard = unsafe { EnvGuard::remove(ENDPOINT_ENV) };
        let file = write_settings(
            "source:\n  endpoint: https://api.example.com/reviews\n  data_key: items\n\
             auth:\n  token_env: REVIEWS_TOKEN\ntimeout: 5\n",
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.source.endpoint, "https://api.example.com/reviews");
        assert_eq!(settings.source.data_key(), Some("items"));
        assert_eq!(settings.source.total_key, "total");
        assert_eq!(settings.auth.token_env, "REVIEWS_TOKEN");
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_env_overrides_endpoint() {
        let _guard = unsafe { EnvGuard::set(ENDPOINT_ENV, "http://localhost:9000/items") };
        let file = write_settings("source:\n  endpoint: https://api.example.com/reviews\n");

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.source.endpoint, "http://localhost:9000/items");
    }

    #[test]
    #[serial]
    fn test_empty_env_does_not_override() {
        let _guard = unsafe { EnvGuard::set(ENDPOINT_ENV, "") };
        let file = write_settings("source:\n  endpoint: https://api.example.com/reviews\n");

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.source.endpoint, "https://api.example.com/reviews");
    }

    #[test]
    #[serial]
    fn test_from_env_without_endpoint() {
        let _guard = unsafe { EnvGuard::remove(ENDPOINT_ENV) };
        let settings = Settings::from_env();
        assert!(settings.source.validate().is_err());
        assert_eq!(settings.auth.token_env, DEFAULT_TOKEN_ENV);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/remote-list.yaml")).unwrap_err();
        assert!(matches!(err, ListSourceError::Config(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let file = write_settings("source: [not, a, map]\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ListSourceError::YamlParse(_)));
    }

    #[test]
    fn test_auth_debug_is_redacted() {
        let auth = AuthSettings {
            token: Some("hunter2".to_string()),
            token_env: default_token_env(),
        };
        let debug = format!("{auth:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    #[serial]
    async fn test_inline_token_overrides_token_env() {
        use crate::auth::TokenProvider;
        use secrecy::ExposeSecret;

        let _guard = unsafe { EnvGuard::set("REMOTE_LIST_TEST_TOKEN", "from-env") };
        let auth = AuthSettings {
            token: Some("inline".to_string()),
            token_env: "REMOTE_LIST_TEST_TOKEN".to_string(),
        };

        let provider = auth.provider();
        assert!(matches!(provider, ConfiguredToken::Inline(_)));
        assert_eq!(provider.token().await.unwrap().expose_secret(), "inline");
    }

    #[tokio::test]
    #[serial]
    async fn test_token_env_used_without_inline_token() {
        use crate::auth::TokenProvider;
        use secrecy::ExposeSecret;

        let _guard = unsafe { EnvGuard::set("REMOTE_LIST_TEST_TOKEN", "from-env") };
        let auth = AuthSettings {
            token: None,
            token_env: "REMOTE_LIST_TEST_TOKEN".to_string(),
        };

        let provider = auth.provider();
        assert!(
            matches!(&provider, ConfiguredToken::Env(token) if token.var() == "REMOTE_LIST_TEST_TOKEN")
        );
        assert_eq!(provider.token().await.unwrap().expose_secret(), "from-env");
    }
}

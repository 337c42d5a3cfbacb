//! Form configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Registration endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://webapis.bloomtechdev.com/registration";
/// How long a success banner stays up.
pub const DEFAULT_SUCCESS_MESSAGE_TTL_MS: u64 = 5_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Settings for one mounted form.
///
/// Every key is optional in TOML; missing keys take their defaults.
///
/// ```toml
/// endpoint = "https://example.com/registration"
/// success_message_ttl_ms = 5000
/// request_timeout_ms = 30000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub endpoint: String,
    pub success_message_ttl_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            success_message_ttl_ms: DEFAULT_SUCCESS_MESSAGE_TTL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl FormConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), endpoint = %config.endpoint, "loaded form config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;
        if self.success_message_ttl_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "success_message_ttl_ms",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_ms",
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }

    /// The endpoint parsed as an absolute http(s) URL with a host.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            key: "endpoint",
            reason,
        };

        let url = Url::parse(&self.endpoint)
            .map_err(|err| invalid(format!("`{}` is not a valid URL: {err}", self.endpoint)))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => return Err(invalid(format!("scheme `{scheme}` is not http(s)"))),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid(format!("`{}` has no host", self.endpoint)));
        }
        Ok(url)
    }

    pub fn success_message_ttl(&self) -> Duration {
        Duration::from_millis(self.success_message_ttl_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

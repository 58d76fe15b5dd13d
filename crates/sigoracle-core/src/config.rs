//! Service configuration.
//!
//! Provides [`OracleConfig`] for configuring the signing service. Values are
//! loaded from environment variables; the signing secret is handled separately
//! by [`crate::secret`] so it never ends up in a serializable struct.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Signing service configuration.
///
/// # Examples
///
/// ```
/// use sigoracle_core::config::OracleConfig;
///
/// let config = OracleConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:8080");
/// assert_eq!(config.sign_path, "/sign_auth");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct OracleConfig {
    /// Bind address (e.g. `"0.0.0.0:8080"`).
    #[builder(default = String::from("0.0.0.0:8080"))]
    pub gateway_listen: String,

    /// Path of the signing endpoint.
    #[builder(default = String::from("/sign_auth"))]
    pub sign_path: String,

    /// Maximum accepted size of `tosign`, in bytes.
    #[builder(default = 65_536)]
    pub max_string_to_sign_size: usize,

    /// Maximum accepted length of `region`, `service`, and `scope`, in bytes.
    #[builder(default = 256)]
    pub max_scope_field_length: usize,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:8080"),
            sign_path: String::from("/sign_auth"),
            max_string_to_sign_size: 65_536,
            max_scope_field_length: 256,
            log_level: String::from("info"),
        }
    }
}

impl OracleConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8080` |
    /// | `SIGN_PATH` | `/sign_auth` |
    /// | `MAX_STRING_TO_SIGN_SIZE` | `65536` |
    /// | `MAX_SCOPE_FIELD_LENGTH` | `256` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Unparsable numeric values keep their default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("SIGN_PATH") {
            config.sign_path = normalize_path(&v);
        }
        if let Some(v) = lookup("MAX_STRING_TO_SIGN_SIZE") {
            if let Ok(n) = v.parse::<usize>() {
                config.max_string_to_sign_size = n;
            }
        }
        if let Some(v) = lookup("MAX_SCOPE_FIELD_LENGTH") {
            if let Ok(n) = v.parse::<usize>() {
                config.max_scope_field_length = n;
            }
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}

/// Ensure the endpoint path starts with a single `/`.
fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches('/'))
}

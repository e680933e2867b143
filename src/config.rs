//! Environment-driven configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Default Asana REST API base URL.
pub const DEFAULT_API_URL: &str = "https://app.asana.com/api/1.0";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_ACCESS_TOKEN: &str = "ASANA_ACCESS_TOKEN";
const ENV_API_URL: &str = "ASANA_API_URL";
const ENV_TIMEOUT_SECS: &str = "ASANA_TIMEOUT_SECS";
const ENV_APPEND_SIGNATURE: &str = "ASANA_APPEND_SIGNATURE";
const ENV_WORKSPACE: &str = "ASANA_WORKSPACE";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Personal access token. Only required for live API calls.
    pub access_token: Option<String>,
    /// API base URL without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Default for appending the signature to task notes.
    pub append_signature: bool,
    /// Workspace used when `--workspace` is not given.
    pub default_workspace: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            append_signature: false,
            default_workspace: None,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment, reading `.env`
    /// first when one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout = match non_empty(ENV_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid { name: ENV_TIMEOUT_SECS, value: raw })?,
            None => DEFAULT_TIMEOUT,
        };

        let append_signature = match non_empty(ENV_APPEND_SIGNATURE) {
            Some(raw) => parse_flag(&raw)
                .ok_or(ConfigError::Invalid { name: ENV_APPEND_SIGNATURE, value: raw })?,
            None => false,
        };

        Ok(Self {
            access_token: non_empty(ENV_ACCESS_TOKEN),
            api_url: non_empty(ENV_API_URL)
                .map_or_else(|| DEFAULT_API_URL.to_string(), |url| url.trim_end_matches('/').to_string()),
            timeout,
            append_signature,
            default_workspace: non_empty(ENV_WORKSPACE),
        })
    }

    /// Returns the access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no token is configured.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.access_token.as_deref().ok_or(ConfigError::Missing(ENV_ACCESS_TOKEN))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.require_token(), Err(ConfigError::Missing("ASANA_ACCESS_TOKEN")));
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("ASANA_ACCESS_TOKEN", "tok"),
            ("ASANA_API_URL", "http://localhost:9000/api/"),
            ("ASANA_TIMEOUT_SECS", "5"),
            ("ASANA_APPEND_SIGNATURE", "Yes"),
            ("ASANA_WORKSPACE", "W1"),
        ])
        .unwrap();

        assert_eq!(config.require_token(), Ok("tok"));
        assert_eq!(config.api_url, "http://localhost:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.append_signature);
        assert_eq!(config.default_workspace.as_deref(), Some("W1"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("ASANA_ACCESS_TOKEN", "  "), ("ASANA_WORKSPACE", "")]).unwrap();
        assert!(config.access_token.is_none());
        assert!(config.default_workspace.is_none());
    }

    #[test]
    fn rejects_bad_timeout_and_flag() {
        assert!(matches!(
            config_from(&[("ASANA_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::Invalid { name: "ASANA_TIMEOUT_SECS", .. })
        ));
        assert!(config_from(&[("ASANA_TIMEOUT_SECS", "0")]).is_err());
        assert!(matches!(
            config_from(&[("ASANA_APPEND_SIGNATURE", "maybe")]),
            Err(ConfigError::Invalid { name: "ASANA_APPEND_SIGNATURE", .. })
        ));
    }
}

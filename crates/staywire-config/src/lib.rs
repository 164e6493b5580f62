//! Shared configuration for the staywire CLI.
//!
//! TOML profiles, credential resolution (env + plaintext), and
//! translation to `staywire_api::ClientConfig`. Credentials are
//! required: a profile with no resolvable client id/secret is a
//! startup-fatal condition, not a degraded mode.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use staywire_api::{ClientConfig, ClientCredentials, Environment};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named upstream profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    20
}

/// A named upstream profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Environment selector: "test" or "production".
    #[serde(default = "default_environment")]
    pub environment: String,

    /// API client identifier.
    pub client_id: Option<String>,

    /// API client secret (plaintext — prefer the env var).
    pub client_secret: Option<String>,

    /// Environment variable name containing the client secret.
    pub client_secret_env: Option<String>,

    /// Tenant/office identifier (test environment only).
    pub office_id: Option<String>,

    /// Replaces the default negotiated rate-code injection set.
    pub rate_codes: Option<Vec<String>>,

    /// Payment-policy filter for pricing queries.
    pub payment_policy: Option<String>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_environment() -> String {
    "test".into()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            client_id: None,
            client_secret: None,
            client_secret_env: None,
            office_id: None,
            rate_codes: None,
            payment_policy: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "staywire", "staywire").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("staywire");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("STAYWIRE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the client id for a profile.
///
/// Order: profile value, then `STAYWIRE_CLIENT_ID`.
pub fn resolve_client_id(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .client_id
        .clone()
        .or_else(|| std::env::var("STAYWIRE_CLIENT_ID").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the client secret for a profile.
///
/// Order: profile's `client_secret_env` indirection, then
/// `STAYWIRE_CLIENT_SECRET`, then plaintext in the config file.
pub fn resolve_client_secret(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.client_secret_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var("STAYWIRE_CLIENT_SECRET") {
        return Ok(SecretString::from(val));
    }

    if let Some(ref secret) = profile.client_secret {
        return Ok(SecretString::from(secret.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `staywire_api::ClientConfig` from a profile.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ClientConfig, ConfigError> {
    let environment: Environment =
        profile
            .environment
            .parse()
            .map_err(|reason| ConfigError::Validation {
                field: "environment".into(),
                reason,
            })?;

    let credentials = ClientCredentials {
        client_id: resolve_client_id(profile, profile_name)?,
        client_secret: resolve_client_secret(profile, profile_name)?,
        office_id: profile.office_id.clone(),
    };

    let mut config = ClientConfig::new(environment, credentials);
    if let Some(ref policy) = profile.payment_policy {
        config.payment_policy = policy.clone();
    }
    if let Some(codes) = profile.rate_codes.clone() {
        config.rate_code_overrides = Some(codes);
    }
    if let Some(secs) = profile.timeout {
        config.transport.timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn profile_with_plaintext_credentials_resolves() {
        let profile = Profile {
            environment: "test".into(),
            client_id: Some("id-123".into()),
            client_secret: Some("shh".into()),
            ..Profile::default()
        };
        let config = profile_to_client_config(&profile, "default").unwrap();
        assert_eq!(config.credentials.client_id, "id-123");
        assert_eq!(config.environment, Environment::Test);
    }

    #[test]
    fn missing_credentials_is_fatal() {
        let profile = Profile {
            environment: "production".into(),
            ..Profile::default()
        };
        let err = profile_to_client_config(&profile, "prod").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn bad_environment_is_rejected() {
        let profile = Profile {
            environment: "staging".into(),
            client_id: Some("id".into()),
            client_secret: Some("shh".into()),
            ..Profile::default()
        };
        let err = profile_to_client_config(&profile, "default").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn profile_overrides_flow_into_client_config() {
        let profile = Profile {
            environment: "test".into(),
            client_id: Some("id".into()),
            client_secret: Some("shh".into()),
            payment_policy: Some("GUARANTEE".into()),
            rate_codes: Some(vec!["SIG".into()]),
            timeout: Some(5),
            ..Profile::default()
        };
        let config = profile_to_client_config(&profile, "default").unwrap();
        assert_eq!(config.payment_policy, "GUARANTEE");
        assert_eq!(config.rate_code_overrides.as_deref(), Some(&["SIG".to_owned()][..]));
        assert_eq!(config.transport.timeout, Duration::from_secs(5));
    }
}

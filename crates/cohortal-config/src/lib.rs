//! Shared configuration for the Cohortal CLI.
//!
//! TOML profiles, credential resolution (environment + plaintext), and
//! translation to `cohortal_core::PortalConfig`. The core never reads
//! config files; this crate is the only disk-touching layer.

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

use cohortal_core::{AuthConfig, PortalConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

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

    /// Named deployment profiles.
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

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named deployment profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g. "https://portal.example.org").
    pub api_url: String,

    /// Identity-provider realm URL
    /// (e.g. "https://idp.example.org/realms/cohortal").
    pub issuer_url: String,

    /// OIDC client id registered for this application.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Username for password-grant login.
    pub username: Option<String>,

    /// Password (plaintext -- prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

fn default_client_id() -> String {
    "cohortal".into()
}

// ── Loading ─────────────────────────────────────────────────────────

/// The default config file path: `$XDG_CONFIG_HOME/cohortal/config.toml`.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "cohortal", "cohortal")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("cohortal.toml"))
}

/// Load configuration from the given TOML file, layered with
/// `COHORTAL_*` environment variables.
pub fn load_config(path: &std::path::Path) -> Result<Config, ConfigError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("COHORTAL_").split("__"))
        .extract()?;
    Ok(config)
}

/// Load configuration from the default path, falling back to built-in
/// defaults when no file exists.
pub fn load_config_or_default() -> Config {
    load_config(&config_path()).unwrap_or_default()
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve a profile into a runtime [`PortalConfig`].
///
/// Credential precedence: `password_env` (environment variable named by
/// the profile) over plaintext `password`. A profile with neither fails
/// with [`ConfigError::NoCredentials`].
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<PortalConfig, ConfigError> {
    let api_url = profile
        .api_url
        .parse()
        .map_err(|e| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("{e}"),
        })?;
    let issuer_url = profile
        .issuer_url
        .parse()
        .map_err(|e| ConfigError::Validation {
            field: "issuer_url".into(),
            reason: format!("{e}"),
        })?;

    let username = profile
        .username
        .clone()
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.to_owned(),
        })?;
    let password = resolve_password(profile, profile_name)?;

    let tls = if let Some(ca_cert) = &profile.ca_cert {
        TlsVerification::CustomCa(ca_cert.clone())
    } else if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = PortalConfig::new(
        api_url,
        AuthConfig {
            issuer_url,
            client_id: profile.client_id.clone(),
            username,
            password,
        },
    );
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    Ok(config)
}

fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(var) = &profile.password_env {
        if let Ok(value) = std::env::var(var) {
            return Ok(SecretString::from(value));
        }
    }
    if let Some(password) = &profile.password {
        return Ok(SecretString::from(password.clone()));
    }
    Err(ConfigError::NoCredentials {
        profile: profile_name.to_owned(),
    })
}

/// Pick the active profile name: explicit choice, then the config's
/// `default_profile`, then `"default"`.
pub fn active_profile_name(explicit: Option<&str>, config: &Config) -> String {
    explicit
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_profiles_from_toml() {
        let file = write_config(
            r#"
            default_profile = "staging"

            [profiles.staging]
            api_url = "https://staging.example.org"
            issuer_url = "https://idp.example.org/realms/cohortal"
            username = "researcher"
            password = "hunter2"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("staging"));
        assert!(config.profiles.contains_key("staging"));
        assert_eq!(config.defaults.timeout, 30);
    }

    #[test]
    fn resolves_profile_to_portal_config() {
        let profile = Profile {
            api_url: "https://portal.example.org".into(),
            issuer_url: "https://idp.example.org/realms/cohortal".into(),
            client_id: "cohortal".into(),
            username: Some("researcher".into()),
            password: Some("hunter2".into()),
            password_env: None,
            ca_cert: None,
            insecure: Some(true),
            timeout: Some(10),
        };

        let config = resolve_profile(&profile, "test", &Defaults::default()).unwrap();
        assert_eq!(config.api_url.as_str(), "https://portal.example.org/");
        assert_eq!(config.auth.username, "researcher");
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let profile = Profile {
            api_url: "https://portal.example.org".into(),
            issuer_url: "https://idp.example.org/realms/cohortal".into(),
            client_id: "cohortal".into(),
            username: Some("researcher".into()),
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        };

        let result = resolve_profile(&profile, "empty", &Defaults::default());
        assert!(matches!(
            result,
            Err(ConfigError::NoCredentials { profile }) if profile == "empty"
        ));
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let profile = Profile {
            api_url: "not a url".into(),
            issuer_url: "https://idp.example.org/realms/cohortal".into(),
            client_id: "cohortal".into(),
            username: Some("researcher".into()),
            password: Some("pw".into()),
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        };

        let result = resolve_profile(&profile, "bad", &Defaults::default());
        assert!(matches!(
            result,
            Err(ConfigError::Validation { field, .. }) if field == "api_url"
        ));
    }

    #[test]
    fn active_profile_prefers_explicit_choice() {
        let config = Config {
            default_profile: Some("from-file".into()),
            ..Config::default()
        };
        assert_eq!(active_profile_name(Some("cli-flag"), &config), "cli-flag");
        assert_eq!(active_profile_name(None, &config), "from-file");
        assert_eq!(
            active_profile_name(None, &Config { default_profile: None, ..Config::default() }),
            "default"
        );
    }
}

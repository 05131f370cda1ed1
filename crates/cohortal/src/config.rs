//! Profile resolution for the CLI.
//!
//! Layers: config-file profile, then CLI flag / env-var overrides.
//! Flags alone are enough to connect when no config file exists.

use secrecy::SecretString;
use std::time::Duration;

use cohortal_config as cfg;
use cohortal_core::{AuthConfig, PortalConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `PortalConfig` from the config file, profile, and CLI overrides.
pub fn build_portal_config(global: &GlobalOpts) -> Result<PortalConfig, CliError> {
    let file_config = cfg::load_config_or_default();
    let profile_name = cfg::active_profile_name(global.profile.as_deref(), &file_config);

    let mut config = match file_config.profiles.get(&profile_name) {
        Some(profile) => cfg::resolve_profile(profile, &profile_name, &file_config.defaults)?,
        None => from_flags(global)?,
    };

    apply_overrides(&mut config, global)?;
    Ok(config)
}

/// Build a config from CLI flags / env vars alone (no profile on disk).
fn from_flags(global: &GlobalOpts) -> Result<PortalConfig, CliError> {
    let no_config = || CliError::NoConfig {
        path: cfg::config_path().display().to_string(),
    };

    let api_url = parse_url("api-url", global.api_url.as_deref().ok_or_else(no_config)?)?;
    let issuer_url = parse_url(
        "issuer-url",
        global.issuer_url.as_deref().ok_or_else(no_config)?,
    )?;
    let username = global.username.clone().ok_or_else(no_config)?;
    let password = global.password.clone().ok_or_else(no_config)?;

    Ok(PortalConfig::new(
        api_url,
        AuthConfig {
            issuer_url,
            client_id: "cohortal".into(),
            username,
            password: SecretString::from(password),
        },
    ))
}

/// Apply CLI flag overrides on top of a resolved profile.
fn apply_overrides(config: &mut PortalConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(api_url) = &global.api_url {
        config.api_url = parse_url("api-url", api_url)?;
    }
    if let Some(issuer_url) = &global.issuer_url {
        config.auth.issuer_url = parse_url("issuer-url", issuer_url)?;
    }
    if let Some(username) = &global.username {
        config.auth.username = username.clone();
    }
    if let Some(password) = &global.password {
        config.auth.password = SecretString::from(password.clone());
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    config.timeout = Duration::from_secs(global.timeout);
    Ok(())
}

fn parse_url(field: &str, raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|e| CliError::Validation {
        field: field.to_owned(),
        reason: format!("{e}"),
    })
}

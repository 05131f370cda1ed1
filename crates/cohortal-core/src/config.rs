// ── Runtime connection configuration ──
//
// These types describe *how* to reach the platform backend and its
// identity provider. They carry credential data and connection tuning,
// but never touch disk. The CLI constructs a `PortalConfig` from its
// profile layer and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Credentials and issuer coordinates for the identity provider.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Issuer realm URL (e.g. `https://idp.example.org/realms/cohortal`).
    pub issuer_url: Url,
    /// OIDC client id registered for this application.
    pub client_id: String,
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging deployments).
    DangerAcceptInvalid,
}

/// Configuration for connecting to one platform deployment.
///
/// Built by the CLI, passed to `Portal` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Backend base URL (e.g. `https://portal.example.org`).
    pub api_url: Url,
    /// Identity-provider coordinates and credentials.
    pub auth: AuthConfig,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// How many seconds before access-token expiry the background task
    /// refreshes. 0 disables the refresh task.
    pub token_refresh_leeway_secs: u64,
}

impl PortalConfig {
    pub fn new(api_url: Url, auth: AuthConfig) -> Self {
        Self {
            api_url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            token_refresh_leeway_secs: 30,
        }
    }
}

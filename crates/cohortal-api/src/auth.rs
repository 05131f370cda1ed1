// Identity-provider token client
//
// Thin wrapper over a Keycloak-style OIDC issuer: resource-owner password
// grant, refresh grant, end-session, and the userinfo endpoint. The OIDC
// protocol itself (discovery, code flow, token validation) is out of scope;
// this module only moves tokens in and out of the `TokenStore`.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::UserInfoDto;
use crate::transport::TransportConfig;

// ── Token material ──────────────────────────────────────────────────

/// One authenticated session's token material.
#[derive(Debug, Clone)]
pub struct TokenSet {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub expires_at: DateTime<Utc>,
}

/// Wire shape of the issuer's token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}

impl From<TokenResponse> for TokenSet {
    fn from(resp: TokenResponse) -> Self {
        Self {
            access_token: SecretString::from(resp.access_token),
            refresh_token: SecretString::from(resp.refresh_token),
            expires_at: Utc::now() + Duration::seconds(resp.expires_in),
        }
    }
}

// ── TokenStore ──────────────────────────────────────────────────────

/// Shared holder for the current session's tokens.
///
/// Cloned into every client that needs to attach a bearer token. The
/// store is the single place token material lives; everything else
/// borrows it for the duration of one request.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<TokenSet>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored token set (login or refresh).
    pub fn set(&self, tokens: TokenSet) {
        *self.inner.write().expect("token lock poisoned") = Some(tokens);
    }

    /// Drop all token material (logout).
    pub fn clear(&self) {
        *self.inner.write().expect("token lock poisoned") = None;
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Option<SecretString> {
        self.inner
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// The current refresh token, if any.
    pub fn refresh_token(&self) -> Option<SecretString> {
        self.inner
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    /// When the current access token expires, if a session exists.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|t| t.expires_at)
    }

    /// `true` while an unexpired access token is held.
    pub fn is_logged_in(&self) -> bool {
        self.expires_at().is_some_and(|at| at > Utc::now())
    }
}

// ── AuthClient ──────────────────────────────────────────────────────

/// Client for the issuer's token endpoints.
///
/// Writes successful login/refresh results into the shared [`TokenStore`]
/// so the [`ApiClient`](crate::ApiClient) picks them up automatically.
pub struct AuthClient {
    http: reqwest::Client,
    issuer_url: Url,
    client_id: String,
    tokens: TokenStore,
}

impl AuthClient {
    /// Create an auth client for the given issuer realm URL
    /// (e.g. `https://idp.example.org/realms/cohortal`).
    pub fn new(
        issuer_url: Url,
        client_id: String,
        tokens: TokenStore,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            issuer_url,
            client_id,
            tokens,
        })
    }

    /// The shared token store.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn endpoint(&self, leaf: &str) -> Result<Url, Error> {
        let base = self.issuer_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/protocol/openid-connect/{leaf}")).map_err(Error::InvalidUrl)
    }

    /// Authenticate with username/password (resource-owner password grant).
    ///
    /// `POST {issuer}/protocol/openid-connect/token`
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.endpoint("token")?;
        debug!("logging in at {}", url);

        let params = [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("username", username),
            ("password", password.expose_secret()),
        ];

        let resp = self
            .http
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let token_resp: TokenResponse = resp.json().await.map_err(Error::Transport)?;
        self.tokens.set(TokenSet::from(token_resp));

        debug!("login successful");
        Ok(())
    }

    /// Exchange the stored refresh token for a fresh token set.
    ///
    /// `POST {issuer}/protocol/openid-connect/token`
    pub async fn refresh(&self) -> Result<(), Error> {
        let refresh_token = self.tokens.refresh_token().ok_or(Error::NotLoggedIn)?;

        let url = self.endpoint("token")?;
        debug!("refreshing tokens at {}", url);

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token.expose_secret()),
        ];

        let resp = self
            .http
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token refresh failed (HTTP {status}): {body}"),
            });
        }

        let token_resp: TokenResponse = resp.json().await.map_err(Error::Transport)?;
        self.tokens.set(TokenSet::from(token_resp));

        debug!("token refresh successful");
        Ok(())
    }

    /// End the session at the issuer and drop all local token material.
    ///
    /// `POST {issuer}/protocol/openid-connect/logout`
    ///
    /// The local store is cleared even when the remote call fails; a dead
    /// issuer must not keep a client logged in.
    pub async fn logout(&self) -> Result<(), Error> {
        let refresh_token = self.tokens.refresh_token();
        self.tokens.clear();

        let Some(refresh_token) = refresh_token else {
            return Ok(());
        };

        let url = self.endpoint("logout")?;
        debug!("logging out at {}", url);

        let params = [
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token.expose_secret()),
        ];

        let _resp = self
            .http
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(Error::Transport)?;

        debug!("logout complete");
        Ok(())
    }

    /// Fetch the authenticated user's OIDC profile.
    ///
    /// `GET {issuer}/protocol/openid-connect/userinfo`
    pub async fn load_user_info(&self) -> Result<UserInfoDto, Error> {
        let access_token = self.tokens.access_token().ok_or(Error::NotLoggedIn)?;

        let url = self.endpoint("userinfo")?;
        debug!("fetching userinfo");

        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("userinfo failed (HTTP {status}): {body}"),
            });
        }

        resp.json().await.map_err(Error::Transport)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_store_starts_logged_out() {
        let store = TokenStore::new();
        assert!(!store.is_logged_in());
        assert!(store.access_token().is_none());
    }

    #[test]
    fn token_store_set_and_clear() {
        let store = TokenStore::new();
        store.set(TokenSet {
            access_token: SecretString::from("acc".to_owned()),
            refresh_token: SecretString::from("ref".to_owned()),
            expires_at: Utc::now() + Duration::minutes(5),
        });
        assert!(store.is_logged_in());

        store.clear();
        assert!(!store.is_logged_in());
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn expired_token_counts_as_logged_out() {
        let store = TokenStore::new();
        store.set(TokenSet {
            access_token: SecretString::from("acc".to_owned()),
            refresh_token: SecretString::from("ref".to_owned()),
            expires_at: Utc::now() - Duration::minutes(1),
        });
        assert!(!store.is_logged_in());
    }
}

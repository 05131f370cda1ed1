// Platform backend HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// injection from the shared `TokenStore`, and response decoding. All
// endpoint groups (content, aql, project, ...) are implemented as
// inherent methods via separate files to keep this module focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::TokenStore;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the platform backend's REST API.
///
/// All methods return decoded payloads; status-code handling and error
/// translation happen here so endpoint modules stay declarative. The
/// bearer token is read from the [`TokenStore`] on every request, so a
/// refresh performed elsewhere is picked up automatically.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenStore,
}

impl ApiClient {
    /// Create a new API client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `https://portal.example.org`);
    /// the versioned `/api/` prefix is appended per request.
    pub fn new(base_url: Url, tokens: TokenStore, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Create an API client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, tokens: TokenStore) -> Self {
        Self {
            http,
            base_url,
            tokens,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shared token store.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Apply the current bearer token to a request builder, if one is held.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        use secrecy::ExposeSecret;
        match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a GET request and decode a JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let builder = self.apply_auth(self.http.get(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::decode_json(resp).await
    }

    /// Send a POST request with JSON body and decode a JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let builder = self.apply_auth(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::decode_json(resp).await
    }

    /// Send a POST request without a body and decode a JSON response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {}", url);

        let builder = self.apply_auth(self.http.post(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::decode_json(resp).await
    }

    /// Send a POST request with JSON body where the backend answers with a
    /// plain-text body rather than JSON.
    ///
    /// Several content write endpoints declare a text response while the
    /// submitted payload is the value of record; callers keep the payload
    /// they sent and only need the call to succeed.
    pub(crate) async fn post_returning_text(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<String, Error> {
        debug!("POST {} (text response)", url);

        let builder = self.apply_auth(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        Self::check_status(status)?;
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }

        resp.text().await.map_err(Error::Transport)
    }

    /// Send a PUT request with JSON body and decode a JSON response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let builder = self.apply_auth(self.http.put(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::decode_json(resp).await
    }

    /// Send a DELETE request, expecting an empty success body.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let builder = self.apply_auth(self.http.delete(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        Self::check_status(status)?;
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }
        Ok(())
    }

    // ── Response decoding ────────────────────────────────────────────

    fn check_status(status: reqwest::StatusCode) -> Result<(), Error> {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or missing credentials".into(),
            });
        }
        Ok(())
    }

    fn api_error(status: reqwest::StatusCode, body: &str) -> Error {
        Error::Api {
            status: status.as_u16(),
            message: body[..body.len().min(200)].to_owned(),
        }
    }

    /// Decode a JSON response body, mapping non-success statuses and
    /// malformed bodies to typed errors.
    async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        Self::check_status(status)?;

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}

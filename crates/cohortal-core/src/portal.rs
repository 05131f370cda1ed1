// ── Portal abstraction ──
//
// Full lifecycle management for a platform connection. Handles
// authentication, the token-refresh background task, and access to the
// domain services and their observable cells.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use cohortal_api::transport::{TlsMode, TransportConfig};
use cohortal_api::{ApiClient, AuthClient, TokenStore};

use crate::config::{PortalConfig, TlsVerification};
use crate::error::CoreError;
use crate::services::{
    AdminService, AqlEditorService, AqlService, CohortService, ContentService, ProfileService,
    ProjectService,
};
use crate::session::Session;

/// Minimum pause between token-refresh attempts, so a short-lived or
/// already-expired token cannot turn the refresh task into a hot loop.
const MIN_REFRESH_PAUSE: Duration = Duration::from_secs(5);

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Portal ───────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PortalInner>`. Constructed once per
/// process and passed by reference to every consumer; services and
/// their cells live exactly as long as the portal.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: PortalConfig,
    session: Session,
    content: ContentService,
    aqls: AqlService,
    aql_editor: AqlEditorService,
    projects: ProjectService,
    cohorts: CohortService,
    admin: AdminService,
    profile: Arc<ProfileService>,
    connection_state: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Portal {
    /// Create a new Portal from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to authenticate and start the
    /// background refresh task.
    pub fn new(config: PortalConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let tokens = TokenStore::new();

        let auth = Arc::new(AuthClient::new(
            config.auth.issuer_url.clone(),
            config.auth.client_id.clone(),
            tokens.clone(),
            &transport,
        )?);
        let api = Arc::new(ApiClient::new(
            config.api_url.clone(),
            tokens,
            &transport,
        )?);

        let profile = Arc::new(ProfileService::new(Arc::clone(&api)));
        let session = Session::new(auth, Arc::clone(&api), Arc::clone(&profile));

        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);

        Ok(Self {
            inner: Arc::new(PortalInner {
                session,
                content: ContentService::new(Arc::clone(&api)),
                aqls: AqlService::new(Arc::clone(&api)),
                aql_editor: AqlEditorService::new(Arc::clone(&api)),
                projects: ProjectService::new(Arc::clone(&api)),
                cohorts: CohortService::new(Arc::clone(&api)),
                admin: AdminService::new(Arc::clone(&api)),
                profile,
                config,
                connection_state,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the portal configuration.
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    // ── Service accessors ────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    pub fn aqls(&self) -> &AqlService {
        &self.inner.aqls
    }

    pub fn aql_editor(&self) -> &AqlEditorService {
        &self.inner.aql_editor
    }

    pub fn projects(&self) -> &ProjectService {
        &self.inner.projects
    }

    pub fn cohorts(&self) -> &CohortService {
        &self.inner.cohorts
    }

    pub fn admin(&self) -> &AdminService {
        &self.inner.admin
    }

    pub fn profile(&self) -> &ProfileService {
        &self.inner.profile
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the platform.
    ///
    /// Authenticates against the identity provider, performs the initial
    /// identity sync, and spawns the token-refresh background task.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        let auth = &self.inner.config.auth;
        if let Err(e) = self
            .inner
            .session
            .login(&auth.username, &auth.password)
            .await
        {
            let _ = self.inner.connection_state.send(ConnectionState::Failed);
            return Err(e);
        }

        let leeway = self.inner.config.token_refresh_leeway_secs;
        if leeway > 0 {
            let portal = self.clone();
            let cancel = self.inner.cancel.clone();
            let mut handles = self.inner.task_handles.lock().await;
            handles.push(tokio::spawn(token_refresh_task(portal, leeway, cancel)));
        }

        let _ = self.inner.connection_state.send(ConnectionState::Connected);
        info!("connected to platform");
        Ok(())
    }

    /// Disconnect from the platform.
    ///
    /// Cancels background tasks, logs out, and resets the connection
    /// state to [`Disconnected`](ConnectionState::Disconnected).
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        // Join all background tasks
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        self.inner.session.logout().await;

        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    /// One-shot: connect, run closure, disconnect.
    ///
    /// Optimized for CLI invocations: disables the refresh task since
    /// a single request-response cycle never outlives its token.
    pub async fn oneshot<F, Fut, T>(config: PortalConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Portal) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.token_refresh_leeway_secs = 0;

        let portal = Portal::new(cfg)?;
        portal.connect().await?;
        let result = f(portal.clone()).await;
        portal.disconnect().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Refresh the access token shortly before it expires, then re-sync the
/// user-info cell so subscribers observe identity changes. Failures are
/// logged and retried at the next wakeup; the last good cached identity
/// stays published.
async fn token_refresh_task(portal: Portal, leeway_secs: u64, cancel: CancellationToken) {
    loop {
        let pause = refresh_pause(&portal, leeway_secs);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            () = tokio::time::sleep(pause) => {
                match portal.inner.session.refresh().await {
                    Ok(()) => {
                        debug!("access token refreshed");
                        if let Err(e) = portal.inner.session.sync_user_info().await {
                            warn!(error = %e, "user-info sync after token refresh failed");
                        }
                    }
                    Err(e) => warn!(error = %e, "token refresh failed"),
                }
            }
        }
    }
}

/// Time until the next refresh attempt: token expiry minus leeway,
/// clamped to a minimum pause.
fn refresh_pause(portal: &Portal, leeway_secs: u64) -> Duration {
    let until_expiry = portal
        .inner
        .session
        .tokens()
        .expires_at()
        .map(|at| at - chrono::Utc::now())
        .and_then(|d| d.to_std().ok())
        .unwrap_or(MIN_REFRESH_PAUSE);

    until_expiry
        .saturating_sub(Duration::from_secs(leeway_secs))
        .max(MIN_REFRESH_PAUSE)
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the portal configuration.
fn build_transport(config: &PortalConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

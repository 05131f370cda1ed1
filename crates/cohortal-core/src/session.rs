// ── Session and authorization ──
//
// Owns the token store, the observable user-info cell, and the loaded
// roles snapshot. Authorization is a strict two-phase check: confirm
// authentication first, then fetch-or-confirm roles, then intersect --
// roles are never evaluated against a pre-authentication snapshot.

use std::sync::{Arc, RwLock};

use secrecy::SecretString;
use tracing::{debug, warn};

use cohortal_api::{ApiClient, AuthClient, TokenStore};

use crate::error::CoreError;
use crate::model::{Role, UserInfo, UserProfile};
use crate::services::ProfileService;
use crate::store::{ResourceCell, ResourceStream};

/// The authenticated session: identity, roles, and token lifecycle.
pub struct Session {
    auth: Arc<AuthClient>,
    api: Arc<ApiClient>,
    profile: Arc<ProfileService>,
    user_info: ResourceCell<UserInfo>,
    /// Roles confirmed for the current login, `None` until first loaded.
    roles: RwLock<Option<Vec<Role>>>,
}

impl Session {
    pub fn new(auth: Arc<AuthClient>, api: Arc<ApiClient>, profile: Arc<ProfileService>) -> Self {
        Self {
            auth,
            api,
            profile,
            user_info: ResourceCell::new(),
            roles: RwLock::new(None),
        }
    }

    /// The shared token store (read-only view for schedulers).
    pub fn tokens(&self) -> &TokenStore {
        self.auth.tokens()
    }

    /// `true` while an unexpired access token is held.
    pub fn is_logged_in(&self) -> bool {
        self.auth.tokens().is_logged_in()
    }

    /// Subscribe to the observable user-info cell (replay-one).
    pub fn user_info(&self) -> ResourceStream<UserInfo> {
        self.user_info.subscribe()
    }

    // ── Login / logout ───────────────────────────────────────────────

    /// Authenticate and perform the initial identity sync.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), CoreError> {
        self.auth.login(username, password).await?;
        self.sync_user_info().await?;
        Ok(())
    }

    /// End the session: best-effort remote logout, then clear all
    /// session-scoped state. This is the dedicated `clear()` path --
    /// cached identity does not survive a logout.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.logout().await {
            warn!(error = %e, "remote logout failed (non-fatal)");
        }
        *self.roles.write().expect("roles lock poisoned") = None;
        self.user_info.clear();
        self.profile.clear();
        debug!("session cleared");
    }

    /// Refresh the access token using the stored refresh token.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.auth.refresh().await?;
        Ok(())
    }

    // ── Identity synchronization ─────────────────────────────────────

    /// Synchronize the user-info cell with the identity provider.
    ///
    /// Called after every login and token refresh. Returns `Ok(None)`
    /// when no session is active. On first login (subject changed since
    /// the last sync) the user is registered with the backend. The
    /// failure path is a real error to the caller; on failure the
    /// user-info cell is cleared because the identity is no longer
    /// confirmed.
    pub async fn sync_user_info(&self) -> Result<Option<Arc<UserInfo>>, CoreError> {
        if !self.is_logged_in() {
            return Ok(None);
        }

        match self.try_sync().await {
            Ok(info) => Ok(Some(info)),
            Err(e) => {
                self.user_info.clear();
                Err(e)
            }
        }
    }

    async fn try_sync(&self) -> Result<Arc<UserInfo>, CoreError> {
        let info = UserInfo::from(self.auth.load_user_info().await?);

        let previous_sub = self.user_info.current().map(|u| u.sub.clone());
        if previous_sub.as_ref() != Some(&info.sub) {
            debug!(sub = %info.sub, "new subject, registering user with backend");
            self.api.register_user(info.sub.as_str()).await?;
        }

        // Keep the backend profile (and with it the roles snapshot) fresh
        // alongside the identity.
        let profile = self.profile.fetch().await?;
        *self.roles.write().expect("roles lock poisoned") = Some(profile.roles.clone());

        Ok(self.user_info.publish(info))
    }

    // ── Authorization ────────────────────────────────────────────────

    /// Authorize the current session against a set of required roles.
    ///
    /// Phase 1: the caller must be authenticated -- no role data is even
    /// looked at for an anonymous session. Phase 2: roles are taken from
    /// the confirmed snapshot, fetching the backend profile when no
    /// snapshot exists yet. Phase 3: any overlap grants access. An empty
    /// requirement list always authorizes.
    pub async fn authorize(&self, required: &[Role]) -> Result<(), CoreError> {
        if required.is_empty() {
            return Ok(());
        }

        if !self.is_logged_in() {
            return Err(CoreError::AuthRequired);
        }

        let loaded = self.roles.read().expect("roles lock poisoned").clone();
        let roles = match loaded {
            Some(roles) => roles,
            None => {
                let profile = self.profile.fetch().await?;
                let roles = profile.roles.clone();
                *self.roles.write().expect("roles lock poisoned") = Some(roles.clone());
                roles
            }
        };

        if required.iter().any(|r| roles.contains(r)) {
            Ok(())
        } else {
            Err(CoreError::Forbidden {
                required: required.to_vec(),
            })
        }
    }

    /// The confirmed backend profile, fetching it if not yet loaded.
    pub async fn profile(&self) -> Result<Arc<UserProfile>, CoreError> {
        if !self.is_logged_in() {
            return Err(CoreError::AuthRequired);
        }
        match self.profile.current() {
            Some(profile) => Ok(profile),
            None => self.profile.fetch().await,
        }
    }
}

// ── Own-profile service ──

use std::sync::Arc;

use cohortal_api::ApiClient;

use crate::error::CoreError;
use crate::model::UserProfile;
use crate::store::{ResourceCell, ResourceStream};

/// Observable cache over the authenticated user's backend profile.
pub struct ProfileService {
    api: Arc<ApiClient>,
    profile: ResourceCell<UserProfile>,
}

impl ProfileService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            profile: ResourceCell::new(),
        }
    }

    /// Subscribe to profile updates (replay-one).
    pub fn profile(&self) -> ResourceStream<UserProfile> {
        self.profile.subscribe()
    }

    /// The cached profile, if ever loaded.
    pub fn current(&self) -> Option<Arc<UserProfile>> {
        self.profile.current()
    }

    /// Fetch the profile and broadcast it.
    pub async fn fetch(&self) -> Result<Arc<UserProfile>, CoreError> {
        let profile = self.api.get_profile().await?;
        Ok(self.profile.publish(UserProfile::from(profile)))
    }

    /// Reset to uninitialized. Logout path only.
    pub fn clear(&self) {
        self.profile.clear();
    }
}

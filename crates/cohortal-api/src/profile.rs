// Profile endpoint
//
// The authenticated user's backend profile: identity, organization, roles.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::UserProfileDto;

impl ApiClient {
    /// Fetch the authenticated user's profile.
    ///
    /// `GET /api/profile`
    pub async fn get_profile(&self) -> Result<UserProfileDto, Error> {
        let url = self.api_url("profile");
        debug!("fetching own profile");
        self.get(url).await
    }
}

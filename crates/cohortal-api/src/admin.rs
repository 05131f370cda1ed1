// User-administration endpoints
//
// Listing, registering, and approving platform users, plus role and
// organization assignment. Registration and approval answer with a
// plain-text body.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::UserDto;

impl ApiClient {
    /// List users, filtered by approval state.
    ///
    /// `GET /api/admin/user?approved={true|false}`
    pub async fn get_users(&self, approved: bool) -> Result<Vec<UserDto>, Error> {
        let mut url = self.api_url("admin/user");
        url.query_pairs_mut()
            .append_pair("approved", if approved { "true" } else { "false" });
        debug!(approved, "fetching users");
        self.get(url).await
    }

    /// Register a user in the backend after first login.
    ///
    /// `POST /api/admin/user/{userId}` -- text response.
    pub async fn register_user(&self, user_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("admin/user/{user_id}"));
        debug!(user_id, "registering user");
        let _body = self.post_returning_text(url, &json!(null)).await?;
        Ok(())
    }

    /// Approve a pending user.
    ///
    /// `POST /api/admin/user/{userId}/approve` -- text response.
    pub async fn approve_user(&self, user_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("admin/user/{user_id}/approve"));
        debug!(user_id, "approving user");
        let _body = self.post_returning_text(url, &json!(null)).await?;
        Ok(())
    }

    /// Replace a user's role set. The backend echoes the stored roles.
    ///
    /// `PUT /api/admin/user/{userId}/role`
    pub async fn update_user_roles(
        &self,
        user_id: &str,
        roles: &[String],
    ) -> Result<Vec<String>, Error> {
        let url = self.api_url(&format!("admin/user/{user_id}/role"));
        debug!(user_id, count = roles.len(), "updating user roles");
        self.put(url, &roles).await
    }

    /// Assign a user to an organization.
    ///
    /// `PUT /api/admin/user/{userId}/organization`
    pub async fn update_user_organization(
        &self,
        user_id: &str,
        organization_id: i64,
    ) -> Result<UserDto, Error> {
        let url = self.api_url(&format!("admin/user/{user_id}/organization"));
        debug!(user_id, organization_id, "updating user organization");
        self.put(url, &json!({ "organizationId": organization_id }))
            .await
    }
}

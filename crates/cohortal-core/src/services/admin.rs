// ── User administration service ──

use std::sync::Arc;

use cohortal_api::ApiClient;

use crate::error::CoreError;
use crate::model::{Role, User, UserId, UserProfile};
use crate::store::{ResourceCell, ResourceStream};

/// Observable cache over the user-administration endpoints: the approved
/// and pending user lists, plus approval and assignment mutations.
pub struct AdminService {
    api: Arc<ApiClient>,
    approved_users: ResourceCell<Vec<User>>,
    pending_users: ResourceCell<Vec<User>>,
}

impl AdminService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            approved_users: ResourceCell::new(),
            pending_users: ResourceCell::new(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn approved_users(&self) -> ResourceStream<Vec<User>> {
        self.approved_users.subscribe()
    }

    pub fn pending_users(&self) -> ResourceStream<Vec<User>> {
        self.pending_users.subscribe()
    }

    // ── Fetch / mutate ───────────────────────────────────────────────

    /// Fetch all approved users and broadcast them.
    pub async fn fetch_approved(&self) -> Result<Arc<Vec<User>>, CoreError> {
        let users = self.api.get_users(true).await?;
        let users: Vec<User> = users.into_iter().map(User::from).collect();
        Ok(self.approved_users.publish(users))
    }

    /// Fetch all users awaiting approval and broadcast them.
    pub async fn fetch_pending(&self) -> Result<Arc<Vec<User>>, CoreError> {
        let users = self.api.get_users(false).await?;
        let users: Vec<User> = users.into_iter().map(User::from).collect();
        Ok(self.pending_users.publish(users))
    }

    /// Approve a pending user. The cached lists are stale afterwards;
    /// callers re-fetch the views they display.
    pub async fn approve(&self, user_id: &UserId) -> Result<(), CoreError> {
        self.api.approve_user(user_id.as_str()).await?;
        Ok(())
    }

    /// Replace a user's role set. Returns the roles the backend stored.
    pub async fn update_roles(
        &self,
        user_id: &UserId,
        roles: &[Role],
    ) -> Result<Vec<Role>, CoreError> {
        let wire: Vec<String> = roles.iter().map(|r| r.as_wire().to_owned()).collect();
        let stored = self.api.update_user_roles(user_id.as_str(), &wire).await?;
        Ok(stored.iter().filter_map(|r| Role::from_wire(r)).collect())
    }

    /// Assign a user to an organization. Returns the updated user.
    pub async fn update_organization(
        &self,
        user_id: &UserId,
        organization_id: i64,
    ) -> Result<User, CoreError> {
        let stored = self
            .api
            .update_user_organization(user_id.as_str(), organization_id)
            .await?;
        Ok(User::from(stored))
    }

    // ── View helpers ─────────────────────────────────────────────────

    /// Restrict a user list to what the given viewer may see: super
    /// admins see everyone, everyone else only their own organization.
    pub fn visible_users(viewer: &UserProfile, users: &[User]) -> Vec<User> {
        if viewer.has_role(Role::SuperAdmin) {
            return users.to_vec();
        }

        let own_org = viewer.organization.as_ref().map(|o| o.id);
        users
            .iter()
            .filter(|u| {
                own_org.is_some() && u.organization.as_ref().map(|o| o.id) == own_org
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Organization;

    fn user(id: &str, org: Option<i64>) -> User {
        User {
            id: UserId::from(id),
            first_name: None,
            last_name: None,
            email: None,
            created_at: None,
            organization: org.map(|id| Organization {
                id,
                name: format!("org-{id}"),
            }),
            roles: vec![],
            approved: true,
        }
    }

    fn profile(roles: Vec<Role>, org: Option<i64>) -> UserProfile {
        UserProfile {
            id: UserId::from("viewer"),
            first_name: None,
            last_name: None,
            email: None,
            organization: org.map(|id| Organization {
                id,
                name: format!("org-{id}"),
            }),
            roles,
        }
    }

    #[test]
    fn super_admin_sees_everyone() {
        let users = vec![user("a", Some(1)), user("b", Some(2)), user("c", None)];
        let viewer = profile(vec![Role::SuperAdmin], Some(1));
        assert_eq!(AdminService::visible_users(&viewer, &users).len(), 3);
    }

    #[test]
    fn org_admin_sees_only_own_organization() {
        let users = vec![user("a", Some(1)), user("b", Some(2)), user("c", None)];
        let viewer = profile(vec![Role::OrganizationAdmin], Some(1));
        let visible = AdminService::visible_users(&viewer, &users);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, UserId::from("a"));
    }

    #[test]
    fn viewer_without_organization_sees_nobody() {
        let users = vec![user("a", Some(1)), user("c", None)];
        let viewer = profile(vec![Role::OrganizationAdmin], None);
        assert!(AdminService::visible_users(&viewer, &users).is_empty());
    }
}

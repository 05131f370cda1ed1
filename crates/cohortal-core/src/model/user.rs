// ── User identity types ──
//
// UserId and Role form the foundation of the session and admin layers.
// Backend user ids are opaque identity-provider subjects (usually UUIDs,
// but never parsed as such).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── UserId ──────────────────────────────────────────────────────────

/// Canonical identifier for a platform user (the OIDC `sub` claim).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Role ────────────────────────────────────────────────────────────

/// Platform roles, as granted through the identity provider and echoed
/// by the backend profile endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    OrganizationAdmin,
    ContentAdmin,
    Researcher,
    StudyCoordinator,
    StudyApprover,
}

impl Role {
    /// The wire spelling used by both the identity provider and the backend.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::OrganizationAdmin => "ORGANIZATION_ADMIN",
            Self::ContentAdmin => "CONTENT_ADMIN",
            Self::Researcher => "RESEARCHER",
            Self::StudyCoordinator => "STUDY_COORDINATOR",
            Self::StudyApprover => "STUDY_APPROVER",
        }
    }

    /// Parse a wire role name. Returns `None` for roles this client does
    /// not know about (e.g. realm-management roles leaking through).
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            "ORGANIZATION_ADMIN" => Some(Self::OrganizationAdmin),
            "CONTENT_ADMIN" => Some(Self::ContentAdmin),
            "RESEARCHER" => Some(Self::Researcher),
            "STUDY_COORDINATOR" => Some(Self::StudyCoordinator),
            "STUDY_APPROVER" => Some(Self::StudyApprover),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

// ── Organization ────────────────────────────────────────────────────

/// An organization (clinic, institute) users belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

// ── User ────────────────────────────────────────────────────────────

/// A platform user as managed through the admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub organization: Option<Organization>,
    pub roles: Vec<Role>,
    pub approved: bool,
}

impl User {
    /// `"Last, First"` display form used by tables; falls back to the
    /// email or the raw id when names are missing.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{last}, {first}"),
            (None, Some(last)) => last.clone(),
            (Some(first), None) => first.clone(),
            (None, None) => self
                .email
                .clone()
                .unwrap_or_else(|| self.id.as_str().to_owned()),
        }
    }
}

/// The authenticated user's backend profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<Organization>,
    pub roles: Vec<Role>,
}

impl UserProfile {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// The authenticated user's OIDC identity, as published by the session's
/// user-info cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub sub: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_round_trip() {
        for role in [
            Role::SuperAdmin,
            Role::OrganizationAdmin,
            Role::ContentAdmin,
            Role::Researcher,
            Role::StudyCoordinator,
            Role::StudyApprover,
        ] {
            assert_eq!(Role::from_wire(role.as_wire()), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_none() {
        assert_eq!(Role::from_wire("uma_authorization"), None);
    }

    #[test]
    fn display_name_prefers_last_first() {
        let user = User {
            id: UserId::from("u-1"),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.org".into()),
            created_at: None,
            organization: None,
            roles: vec![],
            approved: true,
        };
        assert_eq!(user.display_name(), "Lovelace, Ada");
    }

    #[test]
    fn display_name_falls_back_to_email_then_id() {
        let mut user = User {
            id: UserId::from("u-2"),
            first_name: None,
            last_name: None,
            email: Some("grace@example.org".into()),
            created_at: None,
            organization: None,
            roles: vec![],
            approved: true,
        };
        assert_eq!(user.display_name(), "grace@example.org");

        user.email = None;
        assert_eq!(user.display_name(), "u-2");
    }
}

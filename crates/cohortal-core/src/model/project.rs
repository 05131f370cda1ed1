// ── Project domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Lifecycle status of a research project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,
    Pending,
    Reviewing,
    ChangeRequest,
    Approved,
    Published,
    Closed,
    Denied,
}

impl ProjectStatus {
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Reviewing => "REVIEWING",
            Self::ChangeRequest => "CHANGE_REQUEST",
            Self::Approved => "APPROVED",
            Self::Published => "PUBLISHED",
            Self::Closed => "CLOSED",
            Self::Denied => "DENIED",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "DRAFT" => Some(Self::Draft),
            "PENDING" => Some(Self::Pending),
            "REVIEWING" => Some(Self::Reviewing),
            "CHANGE_REQUEST" => Some(Self::ChangeRequest),
            "APPROVED" => Some(Self::Approved),
            "PUBLISHED" => Some(Self::Published),
            "CLOSED" => Some(Self::Closed),
            "DENIED" => Some(Self::Denied),
            _ => None,
        }
    }

    /// Whether the workflow permits moving from `self` to `next`.
    ///
    /// Mirrors the backend's transition table; the client pre-checks so a
    /// disallowed transition fails fast instead of round-tripping.
    pub fn can_transition_to(self, next: Self) -> bool {
        use ProjectStatus as S;
        matches!(
            (self, next),
            (S::Draft, S::Pending)
                | (S::Pending, S::Reviewing | S::Draft)
                | (S::Reviewing, S::Approved | S::ChangeRequest | S::Denied)
                | (S::ChangeRequest, S::Draft | S::Pending)
                | (S::Approved, S::Published)
                | (S::Published, S::Closed)
        )
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// A research project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// `None` while the project only exists in an editor buffer.
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub first_hypotheses: Option<String>,
    pub status: ProjectStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub cohort_id: Option<i64>,
    pub coordinator: Option<User>,
    pub researchers: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_round_trip() {
        for status in [
            ProjectStatus::Draft,
            ProjectStatus::Pending,
            ProjectStatus::Reviewing,
            ProjectStatus::ChangeRequest,
            ProjectStatus::Approved,
            ProjectStatus::Published,
            ProjectStatus::Closed,
            ProjectStatus::Denied,
        ] {
            assert_eq!(ProjectStatus::from_wire(status.as_wire()), Some(status));
        }
    }

    #[test]
    fn draft_can_only_move_to_pending() {
        assert!(ProjectStatus::Draft.can_transition_to(ProjectStatus::Pending));
        assert!(!ProjectStatus::Draft.can_transition_to(ProjectStatus::Approved));
        assert!(!ProjectStatus::Draft.can_transition_to(ProjectStatus::Published));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for next in [
            ProjectStatus::Draft,
            ProjectStatus::Pending,
            ProjectStatus::Approved,
        ] {
            assert!(!ProjectStatus::Closed.can_transition_to(next));
            assert!(!ProjectStatus::Denied.can_transition_to(next));
        }
    }

    #[test]
    fn review_branches_three_ways() {
        assert!(ProjectStatus::Reviewing.can_transition_to(ProjectStatus::Approved));
        assert!(ProjectStatus::Reviewing.can_transition_to(ProjectStatus::ChangeRequest));
        assert!(ProjectStatus::Reviewing.can_transition_to(ProjectStatus::Denied));
        assert!(!ProjectStatus::Reviewing.can_transition_to(ProjectStatus::Published));
    }
}

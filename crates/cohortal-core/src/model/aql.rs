// ── AQL domain types ──
//
// Stored queries, list filtering, execution results, and the editor's
// validation surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{User, UserId};

/// A stored AQL query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aql {
    /// `None` while the query only exists in an editor buffer.
    pub id: Option<i64>,
    pub name: String,
    pub query: String,
    pub purpose: Option<String>,
    pub usage: Option<String>,
    pub public: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub owner: Option<User>,
    pub category_id: Option<i64>,
}

// ── List filtering ──────────────────────────────────────────────────

/// Which slice of the AQL list a view wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AqlScope {
    #[default]
    All,
    OwnedByMe,
    Public,
}

/// Filter predicate applied to the cached AQL list.
#[derive(Debug, Clone, Default)]
pub struct AqlFilter {
    /// Case-insensitive substring match on the query name.
    pub search_text: Option<String>,
    pub scope: AqlScope,
    /// Required for [`AqlScope::OwnedByMe`]; ignored otherwise.
    pub current_user: Option<UserId>,
}

impl AqlFilter {
    pub fn matches(&self, aql: &Aql) -> bool {
        if let Some(needle) = &self.search_text {
            let needle = needle.to_lowercase();
            if !needle.is_empty() && !aql.name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        match self.scope {
            AqlScope::All => true,
            AqlScope::Public => aql.public,
            AqlScope::OwnedByMe => match (&self.current_user, &aql.owner) {
                (Some(me), Some(owner)) => owner.id == *me,
                _ => false,
            },
        }
    }
}

// ── Execution ───────────────────────────────────────────────────────

/// Result set of an executed AQL query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqlExecutionResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl AqlExecutionResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ── Validation ──────────────────────────────────────────────────────

/// Validator verdict for a candidate query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: Option<String>,
    pub start_line: u32,
    pub start_column: u32,
}

impl ValidationOutcome {
    /// Convert a rejection into an editor marker; `None` for a valid query.
    pub fn to_marker(&self) -> Option<EditorMarker> {
        if self.valid {
            return None;
        }
        Some(EditorMarker {
            message: self
                .message
                .clone()
                .unwrap_or_else(|| "invalid query".to_owned()),
            start_line: self.start_line,
            start_column: self.start_column,
            end_line: self.start_line,
            // The marker spans to end-of-line; the editor clamps this.
            end_column: 1000,
        })
    }
}

/// A squiggle marker for the query editor, pointing at the rejected span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorMarker {
    pub message: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn aql(name: &str, public: bool, owner_id: Option<&str>) -> Aql {
        Aql {
            id: Some(1),
            name: name.to_owned(),
            query: "SELECT c FROM COMPOSITION c".to_owned(),
            purpose: None,
            usage: None,
            public,
            created_at: None,
            modified_at: None,
            owner: owner_id.map(|id| User {
                id: UserId::from(id),
                first_name: None,
                last_name: None,
                email: None,
                created_at: None,
                organization: None,
                roles: vec![],
                approved: true,
            }),
            category_id: None,
        }
    }

    #[test]
    fn search_text_matches_case_insensitive() {
        let filter = AqlFilter {
            search_text: Some("sofa".into()),
            ..AqlFilter::default()
        };
        assert!(filter.matches(&aql("SOFA scores", false, None)));
        assert!(!filter.matches(&aql("Ventilation hours", false, None)));
    }

    #[test]
    fn owned_scope_requires_matching_owner() {
        let filter = AqlFilter {
            scope: AqlScope::OwnedByMe,
            current_user: Some(UserId::from("me")),
            ..AqlFilter::default()
        };
        assert!(filter.matches(&aql("a", false, Some("me"))));
        assert!(!filter.matches(&aql("b", false, Some("someone-else"))));
        assert!(!filter.matches(&aql("c", false, None)));
    }

    #[test]
    fn valid_outcome_has_no_marker() {
        let outcome = ValidationOutcome {
            valid: true,
            message: None,
            start_line: 0,
            start_column: 0,
        };
        assert!(outcome.to_marker().is_none());
    }

    #[test]
    fn rejection_marker_spans_to_end_of_line() {
        let outcome = ValidationOutcome {
            valid: false,
            message: Some("unexpected token".into()),
            start_line: 3,
            start_column: 14,
        };
        let marker = outcome.to_marker().unwrap();
        assert_eq!(marker.start_line, 3);
        assert_eq!(marker.end_line, 3);
        assert_eq!(marker.end_column, 1000);
    }
}

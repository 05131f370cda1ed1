// Backend API response types
//
// Wire models for the platform's JSON API. Field names follow the
// backend's camelCase convention via `rename_all`; `#[serde(default)]`
// is used liberally because the backend omits empty optionals.

use serde::{Deserialize, Serialize};

// ── Content ─────────────────────────────────────────────────────────

/// One entry of the portal's configurable navigation bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationLinkDto {
    pub title: String,
    pub target_url: String,
}

/// One dashboard welcome-page card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCardDto {
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Platform-wide counters shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetricsDto {
    #[serde(default)]
    pub aqls: u64,
    #[serde(default)]
    pub projects: u64,
    #[serde(default)]
    pub organizations: u64,
}

/// A recently created project, as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProjectDto {
    pub name: String,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

// ── AQL ─────────────────────────────────────────────────────────────

/// A stored AQL query.
///
/// `use` is a Rust keyword, so the wire field is renamed explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqlDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default, rename = "use")]
    pub usage: Option<String>,
    #[serde(default)]
    pub public_aql: bool,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub owner: Option<UserDto>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Validator verdict for a candidate AQL query.
///
/// Line/column positions arrive as strings from the validator service and
/// are parsed downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqlValidationDto {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub start_line: Option<String>,
    #[serde(default)]
    pub start_column: Option<String>,
}

/// Result set of an executed AQL query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqlExecutionDto {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

// ── Projects ────────────────────────────────────────────────────────

/// A research project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub first_hypotheses: Option<String>,
    /// Lifecycle status, e.g. `"DRAFT"` or `"APPROVED"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub cohort_id: Option<i64>,
    #[serde(default)]
    pub coordinator: Option<UserDto>,
    #[serde(default)]
    pub researchers: Vec<UserDto>,
}

// ── Cohorts ─────────────────────────────────────────────────────────

/// A cohort definition: a tree of criteria groups over stored AQL queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    pub cohort_group: CohortNodeDto,
}

/// One node of the cohort criteria tree.
///
/// `type` is `"GROUP"` (with `operator` and `children`) or `"AQL"`
/// (with `queryId` and optional `parameters`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortNodeDto {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub children: Vec<CohortNodeDto>,
    #[serde(default)]
    pub query_id: Option<i64>,
    #[serde(default)]
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

// ── Users ───────────────────────────────────────────────────────────

/// A platform user, as returned by the user-administration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Account creation time in epoch milliseconds.
    #[serde(default)]
    pub created_timestamp: Option<i64>,
    #[serde(default)]
    pub organization: Option<OrganizationDto>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub approved: bool,
}

/// An organization a user belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDto {
    pub id: i64,
    pub name: String,
}

/// The authenticated user's backend profile (identity + roles).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization: Option<OrganizationDto>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The authenticated user's OIDC userinfo document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoDto {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

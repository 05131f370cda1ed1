// ── Dashboard / navigation content ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the portal's configurable navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    pub title: String,
    pub target_url: String,
}

/// One dashboard welcome-page card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCard {
    pub title: String,
    pub text: Option<String>,
    pub image_id: Option<String>,
    pub url: Option<String>,
}

/// Platform-wide counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub aqls: u64,
    pub projects: u64,
    pub organizations: u64,
}

/// A recently created project, as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardProject {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub organization: Option<String>,
}

// ── Domain model ──
//
// Canonical types consumed by services and UI layers. Wire DTOs from
// `cohortal-api` are converted into these in `crate::convert`.

pub mod aql;
pub mod cohort;
pub mod content;
pub mod project;
pub mod user;

pub use aql::{Aql, AqlExecutionResult, AqlFilter, AqlScope, EditorMarker, ValidationOutcome};
pub use cohort::{Cohort, CohortNode, GroupOperator};
pub use content::{DashboardCard, DashboardMetrics, DashboardProject, NavigationLink};
pub use project::{Project, ProjectStatus};
pub use user::{Organization, Role, User, UserId, UserInfo, UserProfile};

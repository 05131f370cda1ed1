//! Reactive data layer between `cohortal-api` and UI consumers.
//!
//! This crate owns the business logic, domain model, and reactive data
//! infrastructure for the Cohortal workspace:
//!
//! - **[`Portal`]** — Central facade managing the full lifecycle:
//!   [`connect()`](Portal::connect) authenticates against the identity
//!   provider, performs the initial identity sync, then spawns the
//!   token-refresh background task. [`Portal::oneshot()`] provides a
//!   lightweight fire-and-forget mode for single CLI invocations.
//!
//! - **[`ResourceCell<T>`]** — Observable cache holding one canonical
//!   "current value" per remote resource, built on `tokio::sync::watch`.
//!   Late subscribers immediately observe the latest published value
//!   (replay-one); failed refreshes never disturb the cached value.
//!
//! - **Services** ([`services`]) — One per backend area (content, AQL,
//!   projects, cohorts, user administration, profile), each wrapping the
//!   shared `ApiClient` plus its cells. Fetch publishes on success and
//!   propagates errors untouched on failure.
//!
//! - **[`Session`]** — Token lifecycle, the observable user-info cell,
//!   and two-phase role authorization (authenticate, then load roles,
//!   then intersect).
//!
//! - **Sort comparators** ([`sort`]) — Locale-collated, direction-aware
//!   orderings with ID tiebreaks, shared by every sortable table.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod portal;
pub mod services;
pub mod session;
pub mod sort;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthConfig, PortalConfig, TlsVerification};
pub use error::CoreError;
pub use portal::{ConnectionState, Portal};
pub use services::{
    AdminService, AqlEditorService, AqlService, CohortService, ContentService, ProfileService,
    ProjectService,
};
pub use session::Session;
pub use store::{ResourceCell, ResourceStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Aql,
    AqlExecutionResult,
    AqlFilter,
    AqlScope,
    Cohort,
    CohortNode,
    DashboardCard,
    DashboardMetrics,
    DashboardProject,
    EditorMarker,
    GroupOperator,
    NavigationLink,
    Organization,
    Project,
    ProjectStatus,
    Role,
    User,
    UserId,
    UserInfo,
    UserProfile,
    ValidationOutcome,
};

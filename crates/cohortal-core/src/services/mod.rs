// ── Domain services ──
//
// Each service wraps the shared `ApiClient` and one observable cell per
// remote resource. The contract is uniform: `fetch_*` issues one read
// and publishes on success; `update_*` issues one write and publishes
// the stored value; failures propagate without touching cached state.
// Duplicate in-flight fetches are not deduplicated -- the last response
// to arrive wins.

mod admin;
mod aql;
mod aql_editor;
mod cohort;
mod content;
mod profile;
mod project;

pub use admin::AdminService;
pub use aql::AqlService;
pub use aql_editor::AqlEditorService;
pub use cohort::CohortService;
pub use content::ContentService;
pub use profile::ProfileService;
pub use project::ProjectService;

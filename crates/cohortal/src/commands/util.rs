//! Shared sorting helpers.
//!
//! Table order must match the web UI, so every column sort routes
//! through `cohortal_core::sort` (collation-aware, ID tiebreak,
//! direction applied by comparator negation).

use cohortal_core::sort::{self, SortKey};
use cohortal_core::{Aql, Project, User};

use crate::cli::{AqlSortColumn, ProjectSortColumn, UserSortColumn};

fn aql_key(aql: &Aql) -> SortKey {
    aql.id.map_or_else(|| SortKey::from(""), SortKey::Num)
}

fn project_key(project: &Project) -> SortKey {
    project.id.map_or_else(|| SortKey::from(""), SortKey::Num)
}

fn user_key(user: &User) -> SortKey {
    SortKey::from(user.id.as_str())
}

fn millis(ts: Option<chrono::DateTime<chrono::Utc>>) -> i64 {
    ts.map_or(0, |t| t.timestamp_millis())
}

pub fn sort_aqls(aqls: &mut [Aql], column: AqlSortColumn, ascending: bool) {
    match column {
        AqlSortColumn::Name => aqls.sort_by(|a, b| {
            sort::compare_localized_strings(
                Some(a.name.as_str()),
                Some(b.name.as_str()),
                &aql_key(a),
                &aql_key(b),
                ascending,
            )
        }),
        AqlSortColumn::Author => aqls.sort_by(|a, b| {
            let author_a = a.owner.as_ref().map(User::display_name);
            let author_b = b.owner.as_ref().map(User::display_name);
            sort::compare_localized_strings(
                author_a.as_deref(),
                author_b.as_deref(),
                &aql_key(a),
                &aql_key(b),
                ascending,
            )
        }),
        AqlSortColumn::Created => aqls.sort_by(|a, b| {
            sort::compare_timestamps(
                millis(a.created_at),
                millis(b.created_at),
                &aql_key(a),
                &aql_key(b),
                ascending,
            )
        }),
    }
}

pub fn sort_projects(projects: &mut [Project], column: ProjectSortColumn, ascending: bool) {
    match column {
        ProjectSortColumn::Name => projects.sort_by(|a, b| {
            sort::compare_localized_strings(
                Some(a.name.as_str()),
                Some(b.name.as_str()),
                &project_key(a),
                &project_key(b),
                ascending,
            )
        }),
        ProjectSortColumn::Status => projects.sort_by(|a, b| {
            sort::compare_localized_strings(
                Some(a.status.as_wire()),
                Some(b.status.as_wire()),
                &project_key(a),
                &project_key(b),
                ascending,
            )
        }),
        ProjectSortColumn::Created => projects.sort_by(|a, b| {
            sort::compare_timestamps(
                millis(a.created_at),
                millis(b.created_at),
                &project_key(a),
                &project_key(b),
                ascending,
            )
        }),
    }
}

pub fn sort_users(users: &mut [User], column: UserSortColumn, ascending: bool) {
    match column {
        UserSortColumn::Name => users.sort_by(|a, b| {
            let name_a = a.display_name();
            let name_b = b.display_name();
            sort::compare_localized_strings(
                Some(name_a.as_str()),
                Some(name_b.as_str()),
                &user_key(a),
                &user_key(b),
                ascending,
            )
        }),
        UserSortColumn::Organization => users.sort_by(|a, b| {
            let org_a = a.organization.as_ref().map(|o| o.name.as_str());
            let org_b = b.organization.as_ref().map(|o| o.name.as_str());
            sort::compare_localized_strings(org_a, org_b, &user_key(a), &user_key(b), ascending)
        }),
        UserSortColumn::Created => users.sort_by(|a, b| {
            sort::compare_timestamps(
                millis(a.created_at),
                millis(b.created_at),
                &user_key(a),
                &user_key(b),
                ascending,
            )
        }),
    }
}

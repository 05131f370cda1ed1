//! Project command handlers.

use tabled::Tabled;

use cohortal_core::{Portal, PortalConfig, Project, User};

use crate::cli::{GlobalOpts, ProjectsArgs, ProjectsCommand, ProjectsListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Coordinator")]
    coordinator: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.map(|id| id.to_string()).unwrap_or_default(),
            name: project.name.clone(),
            status: project.status.to_string(),
            coordinator: project
                .coordinator
                .as_ref()
                .map(User::display_name)
                .unwrap_or_default(),
            created: project
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: PortalConfig,
    args: ProjectsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProjectsCommand::List(list) => handle_list(config, list, global).await,
    }
}

async fn handle_list(
    config: PortalConfig,
    list: ProjectsListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut projects = Portal::oneshot(config, |portal| async move {
        let projects = portal.projects().fetch_all().await?;
        Ok(projects.as_ref().clone())
    })
    .await?;

    util::sort_projects(&mut projects, list.sort, list.direction.is_ascending());

    let out = output::render_list(
        &global.output,
        &projects,
        |p| ProjectRow::from(p),
        |p| p.id.map(|id| id.to_string()).unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

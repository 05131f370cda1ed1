//! User-administration command handlers.

use tabled::Tabled;

use cohortal_core::{AdminService, Portal, PortalConfig, Role, User, UserId};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand, UsersListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Organization")]
    organization: String,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.display_name(),
            organization: user
                .organization
                .as_ref()
                .map(|o| o.name.clone())
                .unwrap_or_default(),
            roles: user
                .roles
                .iter()
                .map(|r| r.as_wire())
                .collect::<Vec<_>>()
                .join(", "),
            created: user
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: PortalConfig,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List(list) => handle_list(config, list, global).await,
        UsersCommand::Approve { id } => handle_approve(config, id, global).await,
    }
}

async fn handle_list(
    config: PortalConfig,
    list: UsersListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pending = list.pending;

    let mut users = Portal::oneshot(config, |portal| async move {
        // Listing users is an admin surface; check before fetching.
        portal
            .session()
            .authorize(&[Role::SuperAdmin, Role::OrganizationAdmin])
            .await?;

        let users = if pending {
            portal.admin().fetch_pending().await?
        } else {
            portal.admin().fetch_approved().await?
        };

        // Organization-scoped visibility: non-superadmins only see their
        // own organization.
        let viewer = portal.session().profile().await?;
        Ok(AdminService::visible_users(&viewer, &users))
    })
    .await?;

    util::sort_users(&mut users, list.sort, list.direction.is_ascending());

    let out = output::render_list(
        &global.output,
        &users,
        |u| UserRow::from(u),
        |u| u.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn handle_approve(
    config: PortalConfig,
    id: String,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let user_id = UserId::from(id);

    Portal::oneshot(config, |portal| {
        let user_id = user_id.clone();
        async move {
            portal
                .session()
                .authorize(&[Role::SuperAdmin, Role::OrganizationAdmin])
                .await?;
            portal.admin().approve(&user_id).await
        }
    })
    .await?;

    if !global.quiet {
        eprintln!("User {user_id} approved");
    }
    Ok(())
}

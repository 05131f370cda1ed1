//! Whoami command handler.

use cohortal_core::{Portal, PortalConfig, UserProfile};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(config: PortalConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let profile: UserProfile = Portal::oneshot(config, |portal| async move {
        let profile = portal.session().profile().await?;
        Ok(profile.as_ref().clone())
    })
    .await?;

    let out = output::render_single(
        &global.output,
        &profile,
        |p| {
            let name = match (&p.first_name, &p.last_name) {
                (Some(first), Some(last)) => format!("{first} {last}"),
                _ => p.id.to_string(),
            };
            format!(
                "{name}\n  id:           {}\n  email:        {}\n  organization: {}\n  roles:        {}",
                p.id,
                p.email.as_deref().unwrap_or("-"),
                p.organization.as_ref().map_or("-", |o| o.name.as_str()),
                p.roles
                    .iter()
                    .map(|r| r.as_wire())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        },
        |p| p.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

//! Command handlers.
//!
//! Each handler opens a one-shot portal session, pulls what it needs out
//! of the closure, and renders outside it. Sorting always goes through
//! the core comparators so table order matches the web UI.

mod aql;
mod config_cmd;
mod dashboard;
mod projects;
mod users;
mod util;
mod whoami;

use cohortal_core::PortalConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a command to its handler. `Config` never connects; everything
/// else receives a ready-to-use `PortalConfig`.
pub async fn dispatch(
    cmd: Command,
    config: PortalConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Dashboard => dashboard::handle(config, global).await,
        Command::Aql(args) => aql::handle(config, args, global).await,
        Command::Projects(args) => projects::handle(config, args, global).await,
        Command::Users(args) => users::handle(config, args, global).await,
        Command::Whoami => whoami::handle(config, global).await,
        Command::Config(_) => unreachable!("config commands are dispatched in main"),
    }
}

pub use config_cmd::handle as handle_config;

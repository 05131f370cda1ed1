//! Config inspection commands. These never open a portal session.

use cohortal_config as cfg;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&cfg::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut config = cfg::load_config_or_default();
            // Passwords never leave the process, even redacted-looking ones.
            for profile in config.profiles.values_mut() {
                if profile.password.is_some() {
                    profile.password = Some("<redacted>".to_owned());
                }
            }
            let rendered = toml::to_string_pretty(&config).map_err(|e| CliError::Config {
                message: e.to_string(),
            })?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}

//! Config subcommand handlers.

use staywire_config::{config_path, load_config_or_default};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let mut cfg = load_config_or_default();
            for profile in cfg.profiles.values_mut() {
                if profile.client_secret.is_some() {
                    profile.client_secret = Some("<redacted>".into());
                }
            }
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: format!("failed to render config: {e}"),
            })?;
            if !global.quiet {
                println!("# {}", config_path().display());
                print!("{rendered}");
            }
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }
    }
}

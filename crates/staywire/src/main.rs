mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use staywire_api::{ClientConfig, HotelClient};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need credentials
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "staywire", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the upstream service
        cmd => {
            let client_config = build_client_config(&cli.global)?;
            let client = HotelClient::new(client_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &client, &cli.global).await
        }
    }
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// A missing profile is not fatal: flags and env vars alone are enough
/// to run against the upstream.
fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = staywire_config::load_config_or_default();
    let profile_name = global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    let mut profile = cfg
        .profiles
        .get(&profile_name)
        .cloned()
        .unwrap_or_default();

    // CLI flags and env vars win over the profile.
    if let Some(ref environment) = global.environment {
        profile.environment = environment.clone();
    }
    if let Some(ref client_id) = global.client_id {
        profile.client_id = Some(client_id.clone());
    }
    if let Some(ref client_secret) = global.client_secret {
        profile.client_secret = Some(client_secret.clone());
        profile.client_secret_env = None;
    }
    if let Some(ref office_id) = global.office_id {
        profile.office_id = Some(office_id.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(staywire_config::profile_to_client_config(
        &profile,
        &profile_name,
    )?)
}

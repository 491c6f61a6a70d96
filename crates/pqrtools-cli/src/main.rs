mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    match run_app() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("pqrtools v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = PartialAppConfig::load(cli.config.as_deref())?.merge_with_cli(&cli)?;
    debug!("Resolved configuration: {:?}", &config);

    let command_result = match cli.command {
        Commands::ZeroCharges(args) => {
            info!("Dispatching to 'zero-charges' command.");
            commands::zero_charges::run(args, &config)
        }
        Commands::Residues(args) => {
            info!("Dispatching to 'residues' command.");
            commands::residues::run(args, &config)
        }
    };

    match command_result {
        Ok(()) => {
            info!("✅ Command completed successfully.");
            Ok(())
        }
        // A failed file operation is reported but does not fail the process.
        Err(e) if e.is_operation_failure() => {
            error!("❌ Command failed: {}", e);
            eprintln!("❌ Command failed: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

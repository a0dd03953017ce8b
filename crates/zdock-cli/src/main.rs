mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("ZDOCK++ CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let quiet = cli.quiet;
    let command_result = match cli.command {
        Commands::Prune(args) => {
            info!("Dispatching to 'prune' command.");
            commands::prune::run(args, quiet)
        }
        Commands::Ligand(args) => {
            info!("Dispatching to 'ligand' command.");
            commands::ligand::run(args)
        }
        Commands::Multimer(args) => {
            info!("Dispatching to 'multimer' command.");
            commands::multimer::run(args)
        }
        Commands::Split(args) => {
            info!("Dispatching to 'split' command.");
            commands::split::run_split_command(args)
        }
        Commands::Unsplit(args) => {
            info!("Dispatching to 'unsplit' command.");
            commands::split::run_unsplit_command(args)
        }
        Commands::Filter(args) => {
            info!("Dispatching to 'filter' command.");
            commands::filter::run(args, quiet)
        }
        Commands::Centroids(args) => {
            info!("Dispatching to 'centroids' command.");
            commands::centroids::run(args)
        }
    };

    match &command_result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    command_result
}

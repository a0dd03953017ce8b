use super::print_document;
use crate::cli::PruneArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use zdockpp::engine::progress::ProgressReporter;
use zdockpp::workflows::prune;
use tracing::info;

pub fn run(args: PruneArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialConfig::from_file(path)?,
        None => PartialConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = prune::run(&args.input, args.ligand.as_deref(), &config, &reporter)?;
    info!(
        clusters = result.summaries.len(),
        "Writing pruned result document."
    );

    if let Some(report) = &args.report {
        prune::write_cluster_report(&result.summaries, report)?;
        info!("Cluster report written to {}", report.display());
    }
    print_document(&result.document)
}

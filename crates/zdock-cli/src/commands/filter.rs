use super::print_document;
use crate::cli::FilterArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use zdockpp::engine::progress::ProgressReporter;
use zdockpp::workflows::filter::{self, FilterOptions};

pub fn run(args: FilterArgs, quiet: bool) -> Result<()> {
    let options = FilterOptions {
        receptor: args.receptor,
        ligand: args.ligand,
    };
    let progress_handler = CliProgressHandler::new(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let filtered = filter::run(&args.input, &args.constraints, &options, &reporter)?;
    print_document(&filtered)
}

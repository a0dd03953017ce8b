use super::print_document;
use crate::cli::{SplitArgs, UnsplitArgs};
use crate::error::Result;
use tracing::info;
use zdockpp::workflows::split::{run_split, run_unsplit};

pub fn run_split_command(args: SplitArgs) -> Result<()> {
    let written = run_split(&args.input, args.chunk_size, &args.prefix)?;
    for path in &written {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

pub fn run_unsplit_command(args: UnsplitArgs) -> Result<()> {
    let merged = run_unsplit(&args.inputs)?;
    print_document(&merged)
}

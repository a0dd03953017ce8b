use super::with_stdout;
use crate::cli::CentroidsArgs;
use crate::error::Result;
use zdockpp::workflows::centroids::{self, CentroidOptions};

pub fn run(args: CentroidsArgs) -> Result<()> {
    let options = CentroidOptions {
        count: args.count,
        ligand: args.ligand,
        chain_id: args.chain,
    };
    let atoms = centroids::run(&args.input, &options)?;
    with_stdout(|out| centroids::write_centroids(&atoms, out))
}

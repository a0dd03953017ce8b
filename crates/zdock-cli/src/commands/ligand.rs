use super::with_stdout;
use crate::cli::LigandArgs;
use crate::error::Result;
use zdockpp::workflows::ligand::{self, LigandOptions};

pub fn run(args: LigandArgs) -> Result<()> {
    let options = LigandOptions {
        prediction: args.prediction,
        complex: args.complex,
        receptor: args.receptor,
        ligand: args.ligand,
        all_records: args.all_records,
    };
    with_stdout(|out| ligand::run(&args.input, &options, out))
}

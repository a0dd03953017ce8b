use super::with_stdout;
use crate::cli::MultimerArgs;
use crate::error::Result;
use zdockpp::workflows::multimer::{self, MultimerOptions};

pub fn run(args: MultimerArgs) -> Result<()> {
    let options = MultimerOptions {
        prediction: args.prediction,
        component: args.component,
        structure: args.structure,
        all_records: args.all_records,
    };
    with_stdout(|out| multimer::run(&args.input, &options, out))
}

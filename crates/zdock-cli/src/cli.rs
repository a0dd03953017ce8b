use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ZDOCK++ Developers",
    version,
    about = "ZDOCK++ CLI - Tools for ZDOCK and M-ZDOCK docking results: pruning, complex generation, filtering and more.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster predictions by RMSD and keep one representative per cluster.
    Prune(PruneArgs),
    /// Write the ligand, or the whole complex, for one prediction.
    Ligand(LigandArgs),
    /// Write one component, or the whole ring, of an M-ZDOCK prediction.
    Multimer(MultimerArgs),
    /// Split a result file into chunks of predictions.
    Split(SplitArgs),
    /// Join result files produced by `split`.
    Unsplit(UnsplitArgs),
    /// Keep predictions that satisfy inter-atomic distance constraints.
    Filter(FilterArgs),
    /// Write a pseudo-atom at the ligand centroid of each top prediction.
    Centroids(CentroidsArgs),
}

/// Arguments for the `prune` subcommand.
#[derive(Args, Debug)]
pub struct PruneArgs {
    /// ZDOCK or M-ZDOCK result file.
    #[arg(value_name = "RESULT")]
    pub input: PathBuf,

    /// Moving structure (ligand or multimer subunit); defaults to the file named in the result header.
    #[arg(short, long, value_name = "PATH")]
    pub ligand: Option<PathBuf>,

    /// RMSD cutoff; poses closer than this to a cluster representative join its cluster.
    #[arg(short, long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Configuration file in TOML format with a `[prune]` table.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write every prediction with its score replaced by its cluster id.
    #[arg(long)]
    pub annotate: bool,

    /// Use every atom of the moving structure for RMSD instead of the backbone only.
    #[arg(long)]
    pub all_atoms: bool,

    /// Write a CSV summary of the clusters to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `ligand` subcommand.
#[derive(Args, Debug)]
pub struct LigandArgs {
    /// ZDOCK result file.
    #[arg(value_name = "RESULT")]
    pub input: PathBuf,

    /// Index of the prediction (1 is the top prediction).
    #[arg(short = 'n', long, default_value_t = 1, value_name = "INT")]
    pub prediction: usize,

    /// Create the complex; by default only the ligand is written.
    #[arg(short = 'c', long)]
    pub complex: bool,

    /// Receptor PDB file; defaults to the receptor named in the result header.
    #[arg(short, long, value_name = "PATH")]
    pub receptor: Option<PathBuf>,

    /// Ligand PDB file; defaults to the ligand named in the result header.
    #[arg(short, long, value_name = "PATH")]
    pub ligand: Option<PathBuf>,

    /// Write all records (by default only ATOM and HETATM are written).
    #[arg(short = 'a', long)]
    pub all_records: bool,
}

/// Arguments for the `multimer` subcommand.
#[derive(Args, Debug)]
pub struct MultimerArgs {
    /// M-ZDOCK result file.
    #[arg(value_name = "RESULT")]
    pub input: PathBuf,

    /// Index of the prediction (1 is the top prediction).
    #[arg(short = 'n', long, default_value_t = 1, value_name = "INT")]
    pub prediction: usize,

    /// Subunit PDB file; defaults to the structure named in the result header.
    #[arg(short = 'r', long, value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Component of the multimer to write (all components if not given).
    #[arg(short = 'm', long, value_name = "INT")]
    pub component: Option<usize>,

    /// Write all records (by default only ATOM and HETATM are written).
    #[arg(short = 'a', long)]
    pub all_records: bool,
}

/// Arguments for the `split` subcommand.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// ZDOCK or M-ZDOCK result file.
    #[arg(value_name = "RESULT")]
    pub input: PathBuf,

    /// Number of predictions per chunk (defaults to all predictions).
    #[arg(short = 'n', long, value_name = "INT")]
    pub chunk_size: Option<usize>,

    /// Output file name prefix.
    #[arg(short, long, default_value = zdockpp::workflows::split::DEFAULT_SPLIT_PREFIX, value_name = "PREFIX")]
    pub prefix: String,
}

/// Arguments for the `unsplit` subcommand.
#[derive(Args, Debug)]
pub struct UnsplitArgs {
    /// Result files to join; the header of the first one is kept.
    #[arg(required = true, value_name = "RESULT")]
    pub inputs: Vec<PathBuf>,
}

/// Arguments for the `filter` subcommand.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// ZDOCK or M-ZDOCK result file.
    #[arg(value_name = "RESULT")]
    pub input: PathBuf,

    /// Constraint file: `serial name residue chain resseq` for two atoms, a distance and MIN or MAX.
    #[arg(value_name = "CONSTRAINTS")]
    pub constraints: PathBuf,

    /// Receptor (or multimer subunit) PDB file; defaults to the file named in the result header.
    #[arg(short, long, value_name = "PATH")]
    pub receptor: Option<PathBuf>,

    /// Ligand PDB file; defaults to the ligand named in the result header.
    #[arg(short, long, value_name = "PATH")]
    pub ligand: Option<PathBuf>,
}

/// Arguments for the `centroids` subcommand.
#[derive(Args, Debug)]
pub struct CentroidsArgs {
    /// ZDOCK result file.
    #[arg(value_name = "RESULT")]
    pub input: PathBuf,

    /// Number of centroids to generate (top N predictions).
    #[arg(short = 'n', long, default_value_t = 1, value_name = "INT")]
    pub count: usize,

    /// Ligand PDB file; defaults to the ligand named in the result header.
    #[arg(short, long, value_name = "PATH")]
    pub ligand: Option<PathBuf>,

    /// Chain id for the output pseudo-atoms.
    #[arg(short, long, default_value_t = zdockpp::engine::centroids::DEFAULT_CENTROID_CHAIN, value_name = "CHAR")]
    pub chain: char,
}

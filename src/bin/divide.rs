use clap::Parser;
use linkfold::DivideOptions;
use linkfold::cli::{self, TransferArgs};
use std::path::PathBuf;

/// Divide the regular files of a directory into numbered subdirectories
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maximum number of files per output subdirectory
    #[arg(long, value_name = "DIR_SIZE", conflicts_with = "into", required_unless_present = "into")]
    size: Option<usize>,

    /// Number of output subdirectories to create
    #[arg(long, value_name = "NUM_DIRS")]
    into: Option<usize>,

    /// Directory holding the files to divide
    input_dir: PathBuf,

    /// Directory to create the numbered subdirectories in
    output_dir: PathBuf,

    #[command(flatten)]
    transfer: TransferArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_logging(args.transfer.verbose);

    let options = DivideOptions {
        mode: cli::divide_mode(args.size, args.into)?,
        transfer: args.transfer.options()?,
        matching: args.transfer.matching,
        input: args.input_dir,
        output: args.output_dir,
    };

    let report = linkfold::divide::run(&options, std::io::stdout().lock())?;
    cli::finish(&report)
}

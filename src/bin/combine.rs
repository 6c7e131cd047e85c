use clap::Parser;
use linkfold::CombineOptions;
use linkfold::cli::{self, TransferArgs};
use std::path::PathBuf;

/// Combine files from sibling subdirectories into a single output directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory whose subdirectories hold the files
    input_parent_dir: PathBuf,

    /// Directory to gather the files into
    output_dir: PathBuf,

    /// Also take files sitting directly in the input directory
    #[arg(long)]
    include_files: bool,

    /// Include subdirectories whose names start with '.'
    #[arg(long)]
    hidden_dirs: bool,

    #[command(flatten)]
    transfer: TransferArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_logging(args.transfer.verbose);

    let options = CombineOptions {
        transfer: args.transfer.options()?,
        matching: args.transfer.matching,
        input: args.input_parent_dir,
        output: args.output_dir,
        include_files: args.include_files,
        hidden_dirs: args.hidden_dirs,
    };

    let report = linkfold::combine::run(&options, std::io::stdout().lock())?;
    cli::finish(&report)
}

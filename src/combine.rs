//! Gather files from sibling subdirectories into one flat directory.

use crate::error::AccessError;
use crate::fsops::{self, Entry};
use crate::transfer::{BatchReport, Executor, LinkSpec, TransferOptions};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CombineOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub matching: String,
    /// Also take regular files sitting directly in `input`.
    pub include_files: bool,
    pub hidden_dirs: bool,
    pub transfer: TransferOptions,
}

/// Build the transfer list without touching the output side.
///
/// Top-level files (when enabled) come first, then each subdirectory in name
/// order, so on a name clash the later subdirectory wins.
pub fn plan(options: &CombineOptions) -> Result<Vec<LinkSpec>, AccessError> {
    let input = fsops::open_dir(&options.input)?;
    let output = fsops::resolve_for_compare(&options.output)?;

    if options.include_files && input == output {
        return Err(AccessError::OutputIsInput(options.output.clone()));
    }

    let mut sources: Vec<Entry> = Vec::new();
    if options.include_files {
        sources.extend(fsops::regular_files(&input, &options.matching)?);
    }

    for subdir in fsops::subdirectories(&input, options.hidden_dirs)? {
        if fsops::resolve_for_compare(&subdir.path)? == output {
            debug!("skipping output directory {}", subdir.path.display());
            continue;
        }
        sources.extend(fsops::regular_files(&subdir.path, &options.matching)?);
    }

    sources
        .into_iter()
        .map(|entry| -> Result<LinkSpec, AccessError> {
            let source = fsops::source_path(&entry.path, options.transfer.follow)?;
            Ok(LinkSpec::new(source, options.output.join(&entry.name)))
        })
        .collect()
}

/// Plan, create the output directory, then run every transfer.
pub fn run<W: Write>(options: &CombineOptions, out: W) -> Result<BatchReport> {
    let specs = plan(options)
        .with_context(|| format!("Failed to read input {}", options.input.display()))?;
    debug!("planned {} transfers ({})", specs.len(), options.transfer.method);

    let mut exec = Executor::new(options.transfer, out);
    exec.announce()?;

    if !options.transfer.dry_run {
        fs::create_dir_all(&options.output).with_context(|| {
            format!("Failed to create directory {}", options.output.display())
        })?;
    }

    Ok(exec.run(&specs)?)
}

//! Spread the files of one directory over numbered bucket directories.

use crate::error::{AccessError, PlanError};
use crate::fsops;
use crate::partition::{self, Bucket, Mode};
use crate::transfer::{BatchReport, Executor, LinkSpec, TransferOptions};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DivideOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: Mode,
    pub matching: String,
    pub transfer: TransferOptions,
}

#[derive(Error, Debug)]
pub enum DividePlanError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// A bucket directory and the transfers that fill it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBucket {
    pub dir: PathBuf,
    pub specs: Vec<LinkSpec>,
}

pub fn plan(options: &DivideOptions) -> Result<Vec<PlannedBucket>, DividePlanError> {
    let input = fsops::open_dir(&options.input)?;
    let files = fsops::regular_files(&input, &options.matching)?;
    let buckets = partition::plan(&files, options.mode)?;
    debug!(
        "{} files into {} buckets ({:?}, {})",
        files.len(),
        buckets.len(),
        options.mode,
        options.transfer.method
    );

    let mut planned = Vec::with_capacity(buckets.len());
    for Bucket { name, items } in buckets {
        let dir = options.output.join(name);
        let specs = items
            .iter()
            .map(|entry| -> Result<LinkSpec, AccessError> {
                let source = fsops::source_path(&entry.path, options.transfer.follow)?;
                Ok(LinkSpec::new(source, dir.join(&entry.name)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        planned.push(PlannedBucket { dir, specs });
    }
    Ok(planned)
}

/// Plan, create every bucket directory (empty ones included), then transfer.
pub fn run<W: Write>(options: &DivideOptions, out: W) -> Result<BatchReport> {
    let buckets = plan(options)
        .with_context(|| format!("Failed to plan division of {}", options.input.display()))?;

    let mut exec = Executor::new(options.transfer, out);
    exec.announce()?;

    if !options.transfer.dry_run {
        for bucket in &buckets {
            fs::create_dir_all(&bucket.dir).with_context(|| {
                format!("Failed to create directory {}", bucket.dir.display())
            })?;
        }
    }

    Ok(exec.run(buckets.iter().flat_map(|b| &b.specs))?)
}

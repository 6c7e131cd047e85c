//! Argument pieces shared by the `combine` and `divide` binaries.

use crate::error::UsageError;
use crate::partition::Mode;
use crate::transfer::{BatchReport, Method, TransferOptions};
use anyhow::{Result, bail};
use clap::Args;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    /// Copy files instead of symlinking them
    #[arg(long)]
    pub copy: bool,

    /// Move files instead of symlinking them
    #[arg(long = "move")]
    pub move_files: bool,

    /// Resolve symlinked sources to their real path first
    #[arg(long)]
    pub follow: bool,

    /// Glob pattern for matching files (shell-style). Default: "*"
    #[arg(short, long, default_value = "*")]
    pub matching: String,

    /// Print actions without performing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print each operation as it happens
    #[arg(short, long)]
    pub verbose: bool,
}

impl TransferArgs {
    pub fn method(&self) -> Result<Method, UsageError> {
        match (self.copy, self.move_files) {
            (true, true) => Err(UsageError::ConflictingMethods),
            (true, false) => Ok(Method::Copy),
            (false, true) => Ok(Method::Move),
            (false, false) => Ok(Method::Link),
        }
    }

    pub fn options(&self) -> Result<TransferOptions, UsageError> {
        Ok(TransferOptions {
            method: self.method()?,
            follow: self.follow,
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
    }
}

/// Turn `--size`/`--into` into a partition mode.
pub fn divide_mode(size: Option<usize>, into: Option<usize>) -> Result<Mode, UsageError> {
    match (size, into) {
        (Some(_), Some(_)) => Err(UsageError::ConflictingModes),
        (Some(0), None) => Err(UsageError::ZeroSize),
        (Some(size), None) => Ok(Mode::BySize(size)),
        (None, Some(0)) => Err(UsageError::ZeroInto),
        (None, Some(count)) => Ok(Mode::ByCount(count)),
        (None, None) => Err(UsageError::MissingMode),
    }
}

/// Logs go to stderr; `--verbose` turns on debug output for this crate and
/// `RUST_LOG` overrides both.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "linkfold=debug"
    } else {
        "linkfold=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Report every failed transfer on stderr and fail if there were any.
pub fn finish(report: &BatchReport) -> Result<()> {
    if report.is_success() {
        return Ok(());
    }
    for (_, err) in &report.failures {
        eprintln!("{}", err);
    }
    bail!(
        "{} of {} transfers failed",
        report.failures.len(),
        report.failures.len() + report.completed
    )
}

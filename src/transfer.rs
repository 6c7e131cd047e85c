use crate::error::TransferError;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What to do with each source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Link,
    Copy,
    Move,
}

impl Method {
    /// Arrow used in verbose output.
    pub fn glyph(self) -> &'static str {
        match self {
            Method::Link => "->",
            Method::Copy => "=>",
            Method::Move => "~>",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Link => write!(f, "link"),
            Method::Copy => write!(f, "copy"),
            Method::Move => write!(f, "move"),
        }
    }
}

/// A planned transfer from `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl LinkSpec {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferOptions {
    pub method: Method,
    pub follow: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Perform a single transfer.
pub fn transfer(spec: &LinkSpec, method: Method) -> Result<(), TransferError> {
    if same_entry(&spec.source, &spec.destination) {
        return Err(TransferError::SameEntry(spec.source.clone()));
    }
    match method {
        Method::Link => link(&spec.source, &spec.destination),
        Method::Copy => copy(&spec.source, &spec.destination),
        Method::Move => rename(&spec.source, &spec.destination),
    }
}

/// Whether both paths name the same directory entry. Only the parents are
/// resolved, so a link at `b` pointing to `a` is a different entry.
fn same_entry(a: &Path, b: &Path) -> bool {
    fn locate(path: &Path) -> Option<PathBuf> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        Some(fs::canonicalize(parent).ok()?.join(path.file_name()?))
    }
    match (locate(a), locate(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Symlink `dst` to `src`, replacing whatever sits at `dst`.
fn link(src: &Path, dst: &Path) -> Result<(), TransferError> {
    let io_err = |source: io::Error| TransferError::Io {
        op: "link",
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    match symlink(src, dst) {
        Ok(()) => Ok(()),
        Err(first) => {
            let Ok(meta) = fs::symlink_metadata(dst) else {
                return Err(io_err(first));
            };
            debug!("replacing existing {}", dst.display());
            if meta.is_dir() {
                fs::remove_dir(dst).map_err(io_err)?;
            } else {
                fs::remove_file(dst).map_err(io_err)?;
            }
            symlink(src, dst).map_err(io_err)
        }
    }
}

#[cfg(unix)]
fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copy the bytes of a regular file, truncating any existing destination.
fn copy(src: &Path, dst: &Path) -> Result<(), TransferError> {
    let io_err = |source: io::Error| TransferError::Io {
        op: "copy",
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    let meta = fs::metadata(src).map_err(io_err)?;
    if !meta.is_file() {
        return Err(TransferError::NotRegularFile(src.to_path_buf()));
    }

    // Writing through a leftover link would clobber whatever it points at.
    if fs::symlink_metadata(dst).is_ok_and(|m| m.file_type().is_symlink()) {
        fs::remove_file(dst).map_err(io_err)?;
    }

    fs::copy(src, dst).map_err(io_err)?;
    Ok(())
}

fn rename(src: &Path, dst: &Path) -> Result<(), TransferError> {
    fs::rename(src, dst).map_err(|source| {
        if source.kind() == io::ErrorKind::CrossesDevices {
            TransferError::CrossDevice {
                from: src.to_path_buf(),
                to: dst.to_path_buf(),
            }
        } else {
            TransferError::Io {
                op: "move",
                from: src.to_path_buf(),
                to: dst.to_path_buf(),
                source,
            }
        }
    })
}

/// Outcome of a batch: how many transfers ran and which ones failed.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: usize,
    pub failures: Vec<(LinkSpec, TransferError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs a batch of transfers, echoing each one to `out` when verbose.
pub struct Executor<W: Write> {
    options: TransferOptions,
    out: W,
}

impl<W: Write> Executor<W> {
    pub fn new(options: TransferOptions, out: W) -> Self {
        Self { options, out }
    }

    /// Print the dry-run banner if this executor will not touch the disk.
    pub fn announce(&mut self) -> io::Result<()> {
        if self.options.dry_run {
            writeln!(self.out, "DRY RUN")?;
        }
        Ok(())
    }

    /// Print and (unless dry-run) perform each spec. Failures are collected,
    /// not returned, so one bad file never stops the rest.
    pub fn run<'a, I>(&mut self, specs: I) -> io::Result<BatchReport>
    where
        I: IntoIterator<Item = &'a LinkSpec>,
    {
        let mut report = BatchReport::default();
        for spec in specs {
            if self.options.verbose {
                writeln!(
                    self.out,
                    "{} {} {}",
                    spec.source.display(),
                    self.options.method.glyph(),
                    spec.destination.display()
                )?;
            }
            if self.options.dry_run {
                continue;
            }
            match transfer(spec, self.options.method) {
                Ok(()) => report.completed += 1,
                Err(err) => {
                    warn!("{}", err);
                    report.failures.push((spec.clone(), err));
                }
            }
        }
        Ok(report)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while listing or resolving paths on the input side.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Path '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("Permission denied for '{0}'")]
    PermissionDenied(PathBuf),

    #[error("Path '{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output '{0}' is the input directory; its top-level files cannot be combined into themselves")]
    OutputIsInput(PathBuf),

    #[error("Failed to list '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: globwalk::GlobError,
    },
}

impl AccessError {
    /// Classify an io error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => AccessError::NotFound(path),
            io::ErrorKind::PermissionDenied => AccessError::PermissionDenied(path),
            _ => AccessError::Io { path, source },
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    #[error("bucket size must be greater than zero")]
    ZeroBucketSize,

    #[error("bucket count must be greater than zero")]
    ZeroBucketCount,
}

/// Failure of a single transfer. The batch carries on after one of these.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("{0} is not a regular file")]
    NotRegularFile(PathBuf),

    #[error("{0} would be replaced by itself")]
    SameEntry(PathBuf),

    #[error("cannot move {from} to {to}: source and destination are on different filesystems")]
    CrossDevice { from: PathBuf, to: PathBuf },

    #[error("{op} {from} to {to} failed: {source}")]
    Io {
        op: &'static str,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("at most one of [--copy,--move] may be given")]
    ConflictingMethods,

    #[error("--size must be greater than zero")]
    ZeroSize,

    #[error("--into must be greater than zero")]
    ZeroInto,

    #[error("only one of --size or --into may be given")]
    ConflictingModes,

    #[error("one of --size or --into is required")]
    MissingMode,
}

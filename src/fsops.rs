use crate::error::AccessError;
use globwalk::GlobWalkerBuilder;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: OsString,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_file: bool,
}

impl Entry {
    pub fn is_hidden(&self) -> bool {
        self.name.to_string_lossy().starts_with('.')
    }
}

/// Check that `dir` is an existing directory and return its real absolute path.
pub fn open_dir(dir: &Path) -> Result<PathBuf, AccessError> {
    let meta = fs::metadata(dir).map_err(|e| AccessError::from_io(dir, e))?;
    if !meta.is_dir() {
        return Err(AccessError::NotADirectory(dir.to_path_buf()));
    }
    // The walker swallows a root it cannot read, so probe it here.
    fs::read_dir(dir).map_err(|e| AccessError::from_io(dir, e))?;
    resolve_symlink_target(dir)
}

/// List the immediate children of `dir` whose names match `pattern`.
///
/// Entries are stat'ed through symlinks, so a link to a file counts as a file
/// and a link to a directory counts as a directory. Dangling links and entries
/// that vanish mid-listing are skipped with a warning.
pub fn list_entries(dir: &Path, pattern: &str) -> Result<Vec<Entry>, AccessError> {
    let base = open_dir(dir)?;

    let walker = GlobWalkerBuilder::from_patterns(&base, &[pattern])
        .case_insensitive(true)
        .min_depth(1)
        .max_depth(1)
        .build()
        .map_err(|source| AccessError::Walk {
            path: base.clone(),
            source,
        })?;

    let mut entries = Vec::new();
    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                warn!("skipping entry in {}: {}", base.display(), err);
                continue;
            }
        };
        let path = item.path().to_path_buf();
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) => {
                warn!("skipping {}: {}", path.display(), err);
                continue;
            }
        };
        entries.push(Entry {
            name: item.file_name().to_os_string(),
            path,
            is_dir: meta.is_dir(),
            is_file: meta.is_file(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("listed {} entries in {}", entries.len(), base.display());
    Ok(entries)
}

/// Regular files directly inside `dir` matching `pattern`, sorted by name.
pub fn regular_files(dir: &Path, pattern: &str) -> Result<Vec<Entry>, AccessError> {
    Ok(list_entries(dir, pattern)?
        .into_iter()
        .filter(|e| e.is_file)
        .collect())
}

/// Immediate subdirectories of `dir`, sorted by name. Dot-directories are
/// dropped unless `include_hidden` is set.
pub fn subdirectories(dir: &Path, include_hidden: bool) -> Result<Vec<Entry>, AccessError> {
    Ok(list_entries(dir, "*")?
        .into_iter()
        .filter(|e| e.is_dir && (include_hidden || !e.is_hidden()))
        .collect())
}

/// Make `path` absolute against the working directory without touching symlinks.
pub fn resolve_absolute(path: &Path) -> Result<PathBuf, AccessError> {
    std::path::absolute(path).map_err(|e| AccessError::from_io(path, e))
}

/// Follow every symlink in `path` down to the real file or directory.
pub fn resolve_symlink_target(path: &Path) -> Result<PathBuf, AccessError> {
    fs::canonicalize(path).map_err(|e| AccessError::from_io(path, e))
}

/// Path a transfer should read from: the entry itself, or with `follow`
/// the file its symlinks ultimately point at.
pub fn source_path(path: &Path, follow: bool) -> Result<PathBuf, AccessError> {
    if follow {
        resolve_symlink_target(path)
    } else {
        Ok(path.to_path_buf())
    }
}

/// Real path when `path` exists, plain absolute path otherwise.
pub fn resolve_for_compare(path: &Path) -> Result<PathBuf, AccessError> {
    match fs::canonicalize(path) {
        Ok(real) => Ok(real),
        Err(_) => resolve_absolute(path),
    }
}

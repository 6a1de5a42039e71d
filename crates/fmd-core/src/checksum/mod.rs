//! Checksum manager: hash the tracked data files into a store, and later
//! verify the files against it.
//!
//! Generate is the only operation that writes; Check is read-only and stops
//! at the first file that is missing from the store or does not match.

mod hash;
mod store;

use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub use hash::{is_sha256_hex, sha256_path};
pub use store::ChecksumStore;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("checksum mismatch for {file}: expected {expected}, got {actual}")]
    Mismatch {
        file: String,
        expected: String,
        actual: String,
    },
    #[error("no stored checksum for {file} in {store}")]
    Missing { file: String, store: String },
    #[error("no tracked data files found")]
    NoTrackedFiles,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChecksumError {
    /// Error name as printed by the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            ChecksumError::Mismatch { .. } => "ChecksumMismatchError",
            ChecksumError::Missing { .. } => "MissingChecksumError",
            ChecksumError::NoTrackedFiles => "NoTrackedFilesError",
            ChecksumError::Other(_) => "IoError",
        }
    }
}

/// A file registered for tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    /// Store key: `/`-separated path relative to the root.
    pub key: String,
    pub path: PathBuf,
}

impl TrackedFile {
    /// Fails when `path` does not lie under `root`.
    pub fn new(root: &Path, path: PathBuf) -> anyhow::Result<Self> {
        let outside = || format!("{} is outside {}", path.display(), root.display());
        let rel = path.strip_prefix(root).with_context(outside)?;
        let mut parts = Vec::new();
        for c in rel.components() {
            match c {
                Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => anyhow::bail!(outside()),
            }
        }
        Ok(Self {
            key: parts.join("/"),
            path,
        })
    }
}

/// Every regular file under `root/data_dir`, recursively, sorted by path,
/// except the checksum store itself. A missing directory yields an empty
/// list; a directory that resolves outside `root` is an error.
pub fn tracked_files(
    root: &Path,
    data_dir: &Path,
    store_path: &Path,
) -> anyhow::Result<Vec<TrackedFile>> {
    let dir = root.join(data_dir);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("resolve {}", root.display()))?;
    let dir = dir
        .canonicalize()
        .with_context(|| format!("resolve {}", dir.display()))?;
    if !dir.starts_with(&root) {
        anyhow::bail!("data dir {} is outside {}", dir.display(), root.display());
    }
    let store = store_path.canonicalize().ok();

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(&dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if store.is_some() && entry.path().canonicalize().ok() == store {
            tracing::debug!("not tracking the checksum store {}", entry.path().display());
            continue;
        }
        files.push(TrackedFile::new(&root, entry.into_path())?);
    }
    Ok(files)
}

/// What Generate did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Tracked files hashed.
    pub hashed: usize,
    /// Entries whose digest was new or differed from the previous store.
    pub changed: usize,
    /// Total entries now in the store.
    pub total: usize,
}

/// Hash every tracked file and upsert its entry in the store at `store_path`.
/// Entries for other filenames are preserved.
pub fn generate(store_path: &Path, files: &[TrackedFile]) -> Result<GenerateSummary, ChecksumError> {
    if files.is_empty() {
        return Err(ChecksumError::NoTrackedFiles);
    }
    let mut store = ChecksumStore::load(store_path)?.unwrap_or_default();
    let mut changed = 0;
    for f in files {
        let digest = sha256_path(&f.path)?;
        tracing::debug!("{}  {}", digest, f.key);
        if store.insert(f.key.clone(), digest.clone()).as_deref() != Some(digest.as_str()) {
            changed += 1;
        }
    }
    store.save_atomic(store_path)?;
    tracing::info!(
        "wrote {} ({} entries, {} changed)",
        store_path.display(),
        store.len(),
        changed
    );
    Ok(GenerateSummary {
        hashed: files.len(),
        changed,
        total: store.len(),
    })
}

/// Verify every tracked file against the store, failing on the first problem.
/// Returns the number of files verified.
pub fn check(store_path: &Path, files: &[TrackedFile]) -> Result<usize, ChecksumError> {
    if files.is_empty() {
        return Err(ChecksumError::NoTrackedFiles);
    }
    let store = ChecksumStore::load(store_path)?.unwrap_or_default();
    for f in files {
        let Some(expected) = store.get(&f.key) else {
            return Err(ChecksumError::Missing {
                file: f.key.clone(),
                store: store_path.display().to_string(),
            });
        };
        let actual = sha256_path(&f.path)?;
        if actual != expected {
            return Err(ChecksumError::Mismatch {
                file: f.key.clone(),
                expected: expected.to_string(),
                actual,
            });
        }
        tracing::debug!("verified {}", f.key);
    }
    tracing::info!("{} matches {} tracked file(s)", store_path.display(), files.len());
    Ok(files.len())
}

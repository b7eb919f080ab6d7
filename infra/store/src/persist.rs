//! Durable file backend: load on open, atomic swap on every committed write.

use crate::error::{StoreError, StoreErrorExt};
use crate::snapshot::Snapshot;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

const TMP_MARKER: &str = ".toggletmp.";
const STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Debug)]
pub(crate) struct FileBackend {
    pub(crate) path: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileBackend {
    pub(crate) const fn new(path: PathBuf) -> Self {
        Self { path, tmp_counter: AtomicU64::new(1) }
    }

    /// Reads the snapshot; a missing file is an empty catalog.
    pub(crate) fn load(&self) -> Result<Snapshot, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No catalog file yet, starting empty");
                return Ok(Snapshot::default());
            },
            Err(err) => {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", self.path.display()).into()),
                });
            },
        };

        Snapshot::from_json(&bytes).context(format!("Loading {}", self.path.display()))
    }

    /// Writes `snapshot` with the atomic swap pattern:
    /// unique temp file, `fsync`, rename over the target, then sync the directory.
    pub(crate) fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let bytes = snapshot.to_json()?;
        let temp = self.unique_tmp_path();

        if let Err(err) = write_synced(&temp, &bytes).and_then(|()| self.swap(&temp)) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }

        if let Some(parent) = self.path.parent() {
            sync_dir(parent);
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "Catalog saved atomically");
        Ok(())
    }

    /// Renames `temp` over the target, removing the target first on platforms where
    /// `rename` refuses to overwrite.
    fn swap(&self, temp: &Path) -> Result<(), StoreError> {
        let context = || format!("Atomic swap failed: {} -> {}", temp.display(), self.path.display());
        match fs::rename(temp, &self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                fs::remove_file(&self.path).context(format!(
                    "Failed to replace existing file: {}",
                    self.path.display()
                ))?;
                fs::rename(temp, &self.path).context(context())
            },
            Err(err) => Err(StoreError::Io { source: err, context: Some(context().into()) }),
        }
    }

    fn unique_tmp_path(&self) -> PathBuf {
        let counter = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let file_name = self.path.file_name().and_then(|s| s.to_str()).unwrap_or("catalog");
        self.path.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .context(format!("Temp creation failed: {}", path.display()))?;
    file.write_all(bytes).context("Write failed")?;
    file.sync_all().context("Hardware sync failed")?;
    Ok(())
}

fn sync_dir(path: &Path) {
    match fs::File::open(path) {
        Ok(dir) => {
            if let Err(err) = dir.sync_all() {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

/// Removes temp files older than a few minutes left behind by crashed writers.
///
/// Cleanup is best effort: failures are logged, never returned.
pub(crate) fn purge_tmp(dir: &Path) {
    let now = SystemTime::now();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "Temp file scan failed");
            return;
        },
    };

    let (mut removed, mut failed) = (0usize, 0usize);
    for entry in entries.flatten() {
        let path = entry.path();
        if !is_tmp(&path) || !is_stale(&path, now) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Temp file removal failed");
                failed += 1;
            },
        }
    }

    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary files");
    }
}

fn is_tmp(path: &Path) -> bool {
    path.is_file()
        && path.file_name().and_then(|name| name.to_str()).is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(path: &Path, now: SystemTime) -> bool {
    fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > STALE_AFTER)
}

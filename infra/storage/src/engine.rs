use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use crate::security;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Marker inserted into temporary file names; see [`maintenance`].
pub(crate) const TMP_MARKER: &str = ".lpadtmp.";

#[derive(Debug)]
pub(crate) struct StorageInner {
    /// Canonical physical root; every resolved path starts with it.
    pub(crate) root: PathBuf,
    pub(crate) tmp_counter: AtomicU64,
}

/// Cheaply cloneable handle to a sandboxed storage root.
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Storage {
    #[must_use]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Maps a relative path onto the physical path inside the root.
    ///
    /// # Errors
    /// [`StorageError::PathTraversal`] for absolute paths, `..` escapes and symlinks
    /// leading out of the root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        security::resolve_path(&self.inner.root, path.as_ref())
    }

    /// # Errors
    /// [`StorageError::FileNotFound`] when nothing is stored at `path`.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let resolved = self.resolve(path)?;

        fs::read(&resolved).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            },
            _ => StorageError::Io {
                source: err,
                context: Some(format!("reading {}", resolved.display()).into()),
            },
        })
    }

    /// Replaces the file at `path` with `data` in one atomic step, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// [`StorageError::PathTraversal`] or [`StorageError::Io`].
    pub async fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        let Some(parent) = target.parent() else {
            return Err(StorageError::Internal {
                message: "target has no parent directory".into(),
                context: Some(target.display().to_string().into()),
            });
        };

        fs::create_dir_all(parent)
            .await
            .context(format!("creating directory {}", parent.display()))?;

        let temp = self.temp_path_for(&target);
        if let Err(err) = write_synced(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err);
        }

        if let Err(err) = replace(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err);
        }

        sync_dir(parent).await;
        debug!(path = %target.display(), bytes = data.len(), "Stored file");
        Ok(())
    }

    /// # Errors
    /// [`StorageError::FileNotFound`] when nothing is stored at `path`.
    pub async fn delete(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;

        fs::remove_file(&resolved).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            },
            _ => StorageError::Io {
                source: err,
                context: Some(format!("deleting {}", resolved.display()).into()),
            },
        })?;

        debug!(path = %resolved.display(), "Deleted file");
        Ok(())
    }

    /// Whether a regular file is stored at `path`.
    ///
    /// # Errors
    /// [`StorageError::PathTraversal`] or [`StorageError::Io`]; a missing file is
    /// `Ok(false)`.
    pub async fn exists(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        let resolved = self.resolve(path)?;

        match fs::metadata(&resolved).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("inspecting {}", resolved.display()).into()),
            }),
        }
    }

    /// File stems of the regular files directly inside `dir` with the given extension,
    /// sorted. A directory that does not exist yet lists as empty.
    ///
    /// # Errors
    /// [`StorageError::PathTraversal`] or [`StorageError::Io`].
    pub async fn list(
        &self,
        dir: impl AsRef<Path>,
        extension: &str,
    ) -> Result<Vec<String>, StorageError> {
        let resolved = self.resolve(dir)?;

        let mut entries = match fs::read_dir(&resolved).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("listing {}", resolved.display()).into()),
                });
            },
        };

        let mut stems = Vec::new();
        while let Some(entry) =
            entries.next_entry().await.context(format!("listing {}", resolved.display()))?
        {
            let path = entry.path();
            let is_file = entry.file_type().await.is_ok_and(|kind| kind.is_file());
            if !is_file || path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                stems.push(stem.to_owned());
            }
        }

        stems.sort_unstable();
        Ok(stems)
    }

    /// Removes temp files older than `age` left behind by interrupted writes.
    pub async fn purge_stale_tmp(&self, age: Duration) {
        maintenance::purge_stale_tmp(&self.inner.root, age).await;
    }

    fn temp_path_for(&self, target: &Path) -> PathBuf {
        let seq = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let name = target.file_name().and_then(|name| name.to_str()).unwrap_or("document");
        target.with_file_name(format!("{name}{TMP_MARKER}{}.{seq}", std::process::id()))
    }
}

async fn write_synced(temp: &Path, data: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp)
        .await
        .context(format!("creating {}", temp.display()))?;

    file.write_all(data).await.context(format!("writing {}", temp.display()))?;
    file.sync_all().await.context(format!("syncing {}", temp.display()))?;
    Ok(())
}

async fn replace(temp: &Path, target: &Path) -> Result<(), StorageError> {
    match fs::rename(temp, target).await {
        Ok(()) => Ok(()),
        // Platforms without atomic replace refuse to rename over an existing file.
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            fs::remove_file(target).await.context(format!("replacing {}", target.display()))?;
            fs::rename(temp, target).await.context(format!("replacing {}", target.display()))
        },
        Err(err) => Err(StorageError::Io {
            source: err,
            context: Some(format!("renaming {} -> {}", temp.display(), target.display()).into()),
        }),
    }
}

async fn sync_dir(dir: &Path) {
    let result = match fs::File::open(dir).await {
        Ok(handle) => handle.sync_all().await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        warn!(path = %dir.display(), error = %err, "Directory sync failed");
    }
}

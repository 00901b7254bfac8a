use crate::engine::{Storage, StorageInner};
use crate::error::{StorageError, StorageErrorExt};
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Duration;
use tokio::fs;
use tracing::info;

/// Temp files younger than this may still belong to an in-flight write.
const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct StorageBuilder<S: Sealed = NoRoot> {
    root: S,
    create: bool,
    stale_after: Duration,
}

impl Default for StorageBuilder<NoRoot> {
    fn default() -> Self {
        Self { root: NoRoot, create: true, stale_after: DEFAULT_STALE_AFTER }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> StorageBuilder<S> {
    /// Whether a missing root is created (default) or treated as an error.
    #[must_use]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }

    /// Minimum age before an orphaned temp file is removed on connect.
    #[must_use]
    pub const fn stale_after(mut self, age: Duration) -> Self {
        self.stale_after = age;
        self
    }
}

impl StorageBuilder<NoRoot> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<WithRoot> {
        StorageBuilder { root: WithRoot(path.into()), create: self.create, stale_after: self.stale_after }
    }
}

impl StorageBuilder<WithRoot> {
    /// Resolves the root and purges stale temp files.
    ///
    /// # Errors
    /// [`StorageError::Io`] when the root cannot be created or canonicalized
    /// (including a missing root with `create(false)`).
    pub async fn connect(self) -> Result<Storage, StorageError> {
        let WithRoot(root) = self.root;

        if self.create {
            fs::create_dir_all(&root)
                .await
                .context(format!("creating storage root {}", root.display()))?;
        }

        let root = fs::canonicalize(&root)
            .await
            .context(format!("resolving storage root {}", root.display()))?;
        info!(root = %root.display(), "Storage opened");

        let storage =
            Storage { inner: Arc::new(StorageInner { root, tmp_counter: AtomicU64::new(0) }) };
        storage.purge_stale_tmp(self.stale_after).await;

        Ok(storage)
    }
}

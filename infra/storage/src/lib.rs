//! Sandboxed file storage for Livepad documents.
//!
//! Every path handed to [`Storage`] is relative to a canonical root and is rejected
//! when it would leave it. Writes go to a unique temporary sibling, are fsynced and
//! then renamed over the target, so readers never observe a half-written document.
//! Temporary files orphaned by a crash are purged when the storage is opened.
//!
//! ```rust
//! use lpad_storage::{Storage, StorageError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), StorageError> {
//! # let tmp = tempfile::tempdir().map_err(|e| StorageError::from(e.to_string()))?;
//! let storage = Storage::builder().root(tmp.path().join("data")).connect().await?;
//!
//! storage.write("projects/abc.json", br#"{"name":"Demo"}"#).await?;
//! assert_eq!(storage.list("projects", "json").await?, vec!["abc".to_owned()]);
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod security;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};

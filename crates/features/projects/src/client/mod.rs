//! Editor-side project sync.

mod backend;
mod error;
mod host;
mod sync;

pub use backend::{HttpBackend, ProjectBackend};
pub use error::{SyncError, SyncErrorExt};
pub use host::{Destination, Host, Notice, NoticeLevel};
pub use sync::{ProjectSync, SaveOutcome, SaveRequest, SaveResult, Saved, requested_project};

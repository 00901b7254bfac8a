//! Source buffers and the editing session.
//!
//! An [`EditingSession`] holds the three fragment buffers and the project binding.
//! Every effective change hands a fresh snapshot to its [`FragmentObserver`],
//! normally a [`lpad_preview::PreviewRenderer`].

mod buffer;
mod error;
mod observer;
mod session;

pub use buffer::SourceBuffer;
pub use error::{EditorError, EditorErrorExt};
pub use observer::{Detached, FragmentObserver};
pub use session::{EditingSession, SessionState};

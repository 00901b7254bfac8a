//! # Domain Models
//!
//! Plain data shared by every Livepad crate: project identity, the three source
//! fragments and the configuration shapes. No I/O lives here.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;

pub use error::{DomainError, DomainErrorExt};
pub use model::{FragmentKind, Fragments, ProjectId, ProjectName};

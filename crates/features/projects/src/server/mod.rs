//! Server side of projects: file-backed repository and Axum routes.

mod error;
mod handlers;
mod repository;
mod router;

pub use error::{ProjectError, ProjectErrorExt};
pub use repository::{ProjectRepository, StoredProject};
pub use router::projects_router;

//! # Projects
//!
//! Saved projects: a name plus the three source fragments.
//!
//! * `client` - [`client::ProjectSync`], the `NEW -> BOUND` save/load flow an editor
//!   runs against the REST API, and [`client::HttpBackend`] speaking that API.
//! * `server` - [`server::ProjectRepository`] on sandboxed file storage and the Axum
//!   routes under `/api/projects` and `/view/{id}`.
//!
//! The wire DTOs in [`model`] are shared by both sides.

pub mod model;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod server;

pub use model::{
    CreateProjectRequest, ErrorResponse, MessageResponse, ProjectResponse, ProjectSummary,
    UpdateProjectRequest,
};

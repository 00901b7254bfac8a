//! Facade crate for the Livepad features and shared modules.
//! Re-exports domain/kernel primitives and composes the feature routers.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `livepad` with the desired feature flags (`server`/`client`).
//! - Servers mount [`server::router::api_router`]; editors drive
//!   `projects::client::ProjectSync` with an [`editor::EditingSession`].

pub use lpad_domain as domain;
pub use lpad_editor as editor;
pub use lpad_kernel as kernel;
pub use lpad_preview as preview;
pub use lpad_projects as projects;

#[cfg(feature = "server")]
pub mod server {
    pub use lpad_kernel::server::ApiState;

    pub mod router {
        use lpad_kernel::server::ApiState;
        pub use lpad_kernel::server::system_router;
        pub use lpad_projects::server::projects_router;
        use utoipa_axum::router::OpenApiRouter;

        /// Every HTTP route the server exposes, documentation excluded.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new().merge(system_router()).merge(projects_router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "preview",
        "editor",
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

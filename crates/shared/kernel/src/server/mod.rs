//! Axum building blocks shared by every router: application state and system routes.

mod health;
mod router;
mod state;

pub use health::HealthResponse;
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};

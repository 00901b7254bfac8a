use super::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use lpad_derive::{api_handler, api_model};
use lpad_domain::constants::SYSTEM_TAG;

#[api_model]
/// Liveness report
pub struct HealthResponse {
    /// Always `up` while the process serves requests
    pub status: String,
    /// Crate version of the running server
    pub version: String,
    /// Seconds since the state was built
    pub uptime: u64,
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Service is up", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "up".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: state.uptime().as_secs(),
    };

    ([(header::CACHE_CONTROL, "no-store")], Json(body))
}

use axum::Router;
use livepad::server::ApiState;
use livepad::server::router::api_router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Livepad API", description = "Projects and live previews"))]
struct ApiDoc;

/// Mount path of the interactive API reference.
pub const DOCS_PATH: &str = "/docs";

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let (routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(routes).merge(Scalar::with_url(DOCS_PATH, api_doc))
}

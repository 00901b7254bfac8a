use super::handlers;
use super::repository::ProjectRepository;
use axum::extract::FromRef;
use lpad_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

impl FromRef<ApiState> for ProjectRepository {
    fn from_ref(state: &ApiState) -> Self {
        Self::new(state.storage.clone())
    }
}

/// `/api/projects` CRUD plus the `/view/{id}` page.
#[must_use]
pub fn projects_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_projects, handlers::create_project))
        .routes(routes!(handlers::get_project, handlers::update_project, handlers::delete_project))
        .routes(routes!(handlers::view_project))
}

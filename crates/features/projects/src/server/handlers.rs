use super::error::ProjectError;
use super::repository::ProjectRepository;
use crate::model::{
    CreateProjectRequest, ErrorResponse, MessageResponse, ProjectResponse, ProjectSummary,
    UpdateProjectRequest,
};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use lpad_derive::api_handler;
use lpad_domain::constants::{
    DELETED_MESSAGE, PROJECT_NOT_FOUND_MESSAGE, PROJECTS_TAG, UPDATED_MESSAGE,
};
use lpad_domain::{ProjectId, ProjectName};
use lpad_preview::{PreviewOptions, compose};
use tracing::error;

#[api_handler(
    get,
    path = "/api/projects",
    responses((status = OK, description = "All projects, sorted by name", body = [ProjectSummary])),
    tag = PROJECTS_TAG,
)]
pub(super) async fn list_projects(
    State(repo): State<ProjectRepository>,
) -> Result<Json<Vec<ProjectSummary>>, ProjectError> {
    Ok(Json(repo.list().await?))
}

#[api_handler(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = CREATED, description = "Project created", body = ProjectResponse),
        (status = BAD_REQUEST, description = "Missing or blank name", body = ErrorResponse),
    ),
    tag = PROJECTS_TAG,
)]
pub(super) async fn create_project(
    State(repo): State<ProjectRepository>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ProjectError> {
    let name = ProjectName::parse(&body.name)?;
    let project = repo.create(name, body.fragments()).await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

#[api_handler(
    get,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = OK, description = "The project", body = ProjectResponse),
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
    ),
    tag = PROJECTS_TAG,
)]
pub(super) async fn get_project(
    State(repo): State<ProjectRepository>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ProjectError> {
    let id = ProjectId::parse(id)?;
    Ok(Json(repo.get(&id).await?.into()))
}

#[api_handler(
    put,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = OK, description = "Fragments replaced", body = MessageResponse),
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
    ),
    tag = PROJECTS_TAG,
)]
pub(super) async fn update_project(
    State(repo): State<ProjectRepository>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<MessageResponse>, ProjectError> {
    let id = ProjectId::parse(id)?;
    repo.update(&id, body.into_fragments()).await?;

    Ok(Json(MessageResponse::ok(UPDATED_MESSAGE)))
}

#[api_handler(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = OK, description = "Project deleted", body = MessageResponse),
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
    ),
    tag = PROJECTS_TAG,
)]
pub(super) async fn delete_project(
    State(repo): State<ProjectRepository>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ProjectError> {
    let id = ProjectId::parse(id)?;
    repo.delete(&id).await?;

    Ok(Json(MessageResponse::ok(DELETED_MESSAGE)))
}

/// Read-only page running a stored project through the preview composer.
#[api_handler(
    get,
    path = "/view/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = OK, description = "Composed preview document", content_type = "text/html", body = String),
        (status = NOT_FOUND, description = "Unknown project", content_type = "text/plain", body = String),
    ),
    tag = PROJECTS_TAG,
)]
pub(super) async fn view_project(
    State(repo): State<ProjectRepository>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = ProjectId::parse(id) else {
        return (StatusCode::NOT_FOUND, PROJECT_NOT_FOUND_MESSAGE).into_response();
    };

    match repo.get(&id).await {
        Ok(project) => {
            Html(compose(&project.fragments, &PreviewOptions::default()).into_string())
                .into_response()
        },
        Err(ProjectError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, PROJECT_NOT_FOUND_MESSAGE).into_response()
        },
        Err(err) => {
            error!(project_id = %id, error = %err, "Project view failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        },
    }
}

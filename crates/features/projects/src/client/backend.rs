use super::error::SyncError;
use crate::model::{
    CreateProjectRequest, ErrorResponse, MessageResponse, ProjectResponse, ProjectSummary,
    UpdateProjectRequest,
};
use lpad_domain::ProjectId;
use lpad_domain::constants::{DELETED_MESSAGE, PROJECTS_PATH, UPDATED_MESSAGE};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::fmt::Display;
use std::future::Future;
use tracing::debug;

/// The project API as seen by an editor.
pub trait ProjectBackend: Send + Sync {
    fn fetch(
        &self,
        id: &ProjectId,
    ) -> impl Future<Output = Result<ProjectResponse, SyncError>> + Send;

    fn create(
        &self,
        request: &CreateProjectRequest,
    ) -> impl Future<Output = Result<ProjectResponse, SyncError>> + Send;

    fn update(
        &self,
        id: &ProjectId,
        request: &UpdateProjectRequest,
    ) -> impl Future<Output = Result<MessageResponse, SyncError>> + Send;

    fn delete(&self, id: &ProjectId)
    -> impl Future<Output = Result<MessageResponse, SyncError>> + Send;

    fn list(&self) -> impl Future<Output = Result<Vec<ProjectSummary>, SyncError>> + Send;
}

/// [`ProjectBackend`] over HTTP. No timeouts and no retries: a request either gets
/// a response or fails as [`SyncError::Connection`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// # Errors
    /// [`SyncError::Connection`] when the HTTP client cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent(concat!("livepad/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| connection(&err))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{PROJECTS_PATH}", self.base_url)
    }

    fn project_url(&self, id: &ProjectId) -> String {
        format!("{}{PROJECTS_PATH}/{id}", self.base_url)
    }
}

impl ProjectBackend for HttpBackend {
    async fn fetch(&self, id: &ProjectId) -> Result<ProjectResponse, SyncError> {
        debug!(project_id = %id, "Fetching project");
        let response =
            self.client.get(self.project_url(id)).send().await.map_err(|err| connection(&err))?;
        let (status, body) = success_body(response).await?;
        fetched_project(id, status, &body)
    }

    async fn create(&self, request: &CreateProjectRequest) -> Result<ProjectResponse, SyncError> {
        debug!("Creating project");
        let response = self
            .client
            .post(self.collection_url())
            .json(request)
            .send()
            .await
            .map_err(|err| connection(&err))?;
        let (status, body) = success_body(response).await?;
        created_project(request, status, &body)
    }

    async fn update(
        &self,
        id: &ProjectId,
        request: &UpdateProjectRequest,
    ) -> Result<MessageResponse, SyncError> {
        debug!(project_id = %id, "Updating project");
        let response = self
            .client
            .put(self.project_url(id))
            .json(request)
            .send()
            .await
            .map_err(|err| connection(&err))?;
        let (_, body) = success_body(response).await?;
        Ok(confirmation(&body, UPDATED_MESSAGE))
    }

    async fn delete(&self, id: &ProjectId) -> Result<MessageResponse, SyncError> {
        debug!(project_id = %id, "Deleting project");
        let response =
            self.client.delete(self.project_url(id)).send().await.map_err(|err| connection(&err))?;
        let (_, body) = success_body(response).await?;
        Ok(confirmation(&body, DELETED_MESSAGE))
    }

    async fn list(&self) -> Result<Vec<ProjectSummary>, SyncError> {
        let response =
            self.client.get(self.collection_url()).send().await.map_err(|err| connection(&err))?;
        let (status, body) = success_body(response).await?;
        let entries: Vec<SummaryBody> =
            serde_json::from_slice(&body).map_err(|err| unexpected(status, err))?;

        Ok(entries
            .into_iter()
            .map(|entry| ProjectSummary { id: entry.id, name: entry.name.unwrap_or_default() })
            .collect())
    }
}

/// A project body as the editor reads it. Every field may be missing or `null` and
/// unknown fields are ignored; absent fragments read as empty text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectBody {
    id: Option<String>,
    name: Option<String>,
    html: Option<String>,
    css: Option<String>,
    js: Option<String>,
}

impl ProjectBody {
    fn into_response(self, id: ProjectId) -> ProjectResponse {
        ProjectResponse {
            id,
            name: self.name.unwrap_or_default(),
            html: self.html.unwrap_or_default(),
            css: self.css.unwrap_or_default(),
            js: self.js.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    id: ProjectId,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Confirmation {
    message: Option<String>,
}

fn connection(err: &reqwest::Error) -> SyncError {
    SyncError::Connection { message: err.to_string().into(), context: None }
}

fn unexpected(status: u16, err: impl Display) -> SyncError {
    SyncError::Server {
        status,
        message: format!("unexpected response body: {err}").into(),
        context: None,
    }
}

/// Body of a successful response. Failures carry the body's `error` text, or the
/// status reason when the body has another shape.
async fn success_body(response: Response) -> Result<(u16, Vec<u8>), SyncError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|err| connection(&err))?;

    if status.is_success() {
        return Ok((status.as_u16(), body.to_vec()));
    }

    let message = serde_json::from_slice::<ErrorResponse>(&body).map_or_else(
        |_| status.canonical_reason().unwrap_or("request failed").to_owned(),
        |body| body.error,
    );

    if status == StatusCode::NOT_FOUND {
        Err(SyncError::NotFound { message: message.into(), context: None })
    } else {
        Err(SyncError::Server { status: status.as_u16(), message: message.into(), context: None })
    }
}

/// The requested id names the project; an id in the body is not consulted.
fn fetched_project(
    id: &ProjectId,
    status: u16,
    body: &[u8],
) -> Result<ProjectResponse, SyncError> {
    let body: ProjectBody = serde_json::from_slice(body).map_err(|err| unexpected(status, err))?;
    Ok(body.into_response(id.clone()))
}

/// Only the assigned id is required; the name falls back to the one sent.
fn created_project(
    request: &CreateProjectRequest,
    status: u16,
    body: &[u8],
) -> Result<ProjectResponse, SyncError> {
    let mut body: ProjectBody =
        serde_json::from_slice(body).map_err(|err| unexpected(status, err))?;
    let Some(raw_id) = body.id.take() else {
        return Err(unexpected(status, "no project id assigned"));
    };
    let id = ProjectId::parse(raw_id).map_err(|err| unexpected(status, err))?;
    if body.name.is_none() {
        body.name = Some(request.name.clone());
    }

    Ok(body.into_response(id))
}

/// Any 2xx body confirms the write; its `message` is kept when there is one.
fn confirmation(body: &[u8], fallback: &str) -> MessageResponse {
    let message = serde_json::from_slice::<Confirmation>(body)
        .ok()
        .and_then(|confirmation| confirmation.message)
        .unwrap_or_else(|| fallback.to_owned());
    MessageResponse::ok(message)
}

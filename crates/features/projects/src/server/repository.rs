use super::error::{ProjectError, ProjectErrorExt};
use crate::model::{ProjectResponse, ProjectSummary};
use lpad_domain::{Fragments, ProjectId, ProjectName};
use lpad_kernel::new_project_id;
use lpad_storage::{Storage, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const PROJECTS_DIR: &str = "projects";
const EXTENSION: &str = "json";
const ID_ATTEMPTS: usize = 4;

/// On-disk shape of `projects/<id>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProject {
    pub id: ProjectId,
    pub name: ProjectName,
    #[serde(flatten)]
    pub fragments: Fragments,
}

impl From<StoredProject> for ProjectResponse {
    fn from(project: StoredProject) -> Self {
        let Fragments { html, css, js } = project.fragments;
        Self { id: project.id, name: project.name.into(), html, css, js }
    }
}

impl From<&StoredProject> for ProjectSummary {
    fn from(project: &StoredProject) -> Self {
        Self { id: project.id.clone(), name: project.name.to_string() }
    }
}

/// Projects as JSON documents in the storage sandbox. Writes replace whole files
/// atomically; concurrent saves of one project are last-writer-wins.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    storage: Storage,
}

impl ProjectRepository {
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn path(id: &ProjectId) -> String {
        format!("{PROJECTS_DIR}/{id}.{EXTENSION}")
    }

    /// # Errors
    /// [`ProjectError::Storage`] or [`ProjectError::Internal`] if no free id was found.
    pub async fn create(
        &self,
        name: ProjectName,
        fragments: Fragments,
    ) -> Result<StoredProject, ProjectError> {
        let id = self.fresh_id().await?;
        let project = StoredProject { id, name, fragments };
        self.write(&project).await?;

        info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// # Errors
    /// [`ProjectError::NotFound`] for unknown ids, [`ProjectError::Serialization`] for
    /// a corrupted document.
    pub async fn get(&self, id: &ProjectId) -> Result<StoredProject, ProjectError> {
        let bytes = self.storage.read(Self::path(id)).await.map_err(not_found_or_storage)?;
        serde_json::from_slice::<StoredProject>(&bytes).context("decoding stored project")
    }

    /// Replaces the fragments; the name never changes.
    ///
    /// # Errors
    /// As [`ProjectRepository::get`], plus write failures.
    pub async fn update(
        &self,
        id: &ProjectId,
        fragments: Fragments,
    ) -> Result<StoredProject, ProjectError> {
        let mut project = self.get(id).await?;
        project.fragments = fragments;
        self.write(&project).await?;

        info!(project_id = %id, "Project updated");
        Ok(project)
    }

    /// # Errors
    /// [`ProjectError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError> {
        self.storage.delete(Self::path(id)).await.map_err(not_found_or_storage)?;

        info!(project_id = %id, "Project deleted");
        Ok(())
    }

    /// Every readable project, sorted by name then id. Unreadable documents are
    /// skipped with a warning.
    ///
    /// # Errors
    /// [`ProjectError::Storage`] when the project directory cannot be listed.
    pub async fn list(&self) -> Result<Vec<ProjectSummary>, ProjectError> {
        let stems = self.storage.list(PROJECTS_DIR, EXTENSION).await.context("listing projects")?;

        let mut summaries = Vec::with_capacity(stems.len());
        for stem in stems {
            let Ok(id) = ProjectId::parse(stem.as_str()) else {
                warn!(file = %stem, "Skipping project file with a foreign name");
                continue;
            };
            match self.get(&id).await {
                Ok(project) => summaries.push(ProjectSummary::from(&project)),
                Err(err) => warn!(project_id = %id, error = %err, "Skipping unreadable project"),
            }
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    async fn write(&self, project: &StoredProject) -> Result<(), ProjectError> {
        let bytes = serde_json::to_vec_pretty(project).context("encoding project")?;
        self.storage.write(Self::path(&project.id), &bytes).await.context("writing project")
    }

    async fn fresh_id(&self) -> Result<ProjectId, ProjectError> {
        for _ in 0..ID_ATTEMPTS {
            let id = new_project_id()
                .map_err(|err| ProjectError::Internal { message: err.to_string().into(), context: None })?;
            if !self.storage.exists(Self::path(&id)).await.context("checking project id")? {
                return Ok(id);
            }
            warn!(project_id = %id, "Generated project id already taken");
        }

        Err(ProjectError::Internal { message: "no free project id".into(), context: None })
    }
}

fn not_found_or_storage(err: StorageError) -> ProjectError {
    match err {
        StorageError::FileNotFound { .. } => ProjectError::not_found(),
        other => other.into(),
    }
}

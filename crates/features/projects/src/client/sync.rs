use super::backend::ProjectBackend;
use super::error::SyncError;
use super::host::{Destination, Host, Notice};
use crate::model::{CreateProjectRequest, MessageResponse, ProjectResponse, UpdateProjectRequest};
use lpad_domain::constants::{LOAD_FAILED_MESSAGE, PROJECT_QUERY_PARAM, SAVED_MESSAGE};
use lpad_domain::{ProjectId, ProjectName};
use lpad_editor::{EditingSession, EditorError, FragmentObserver, SessionState};
use reqwest::Url;
use tracing::{info, warn};

/// Relative entry URLs are resolved against this before reading the query.
const ENTRY_BASE: &str = "http://localhost/";

/// The network half of a save, built from a session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(CreateProjectRequest),
    Update { id: ProjectId, body: UpdateProjectRequest },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Created(ProjectResponse),
    Updated(MessageResponse),
}

pub type SaveResult = Result<Saved, SyncError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(ProjectId),
    Updated,
    /// The name prompt was dismissed; nothing was sent.
    Cancelled,
}

/// Loads and saves an [`EditingSession`] against a [`ProjectBackend`].
///
/// Every failure is turned into a notice on the [`Host`] before it is returned, so
/// callers may drop the error.
#[derive(Debug, Clone)]
pub struct ProjectSync<B> {
    backend: B,
}

impl<B: ProjectBackend> ProjectSync<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Session bootstrap from the entry URL: a `project_id` query parameter loads
    /// that project, anything else opens a fresh session.
    ///
    /// # Errors
    /// See [`ProjectSync::load`]; a malformed id counts as a failed load.
    pub async fn start<O, H>(
        &self,
        session: &mut EditingSession<O>,
        host: &mut H,
        entry: &str,
    ) -> Result<(), SyncError>
    where
        O: FragmentObserver,
        H: Host,
    {
        match requested_project(entry) {
            None => {
                session.open_fresh();
                Ok(())
            },
            Some(Ok(id)) => self.load(session, host, &id).await,
            Some(Err(err)) => {
                warn!(error = %err, "Entry URL carries an unusable project id");
                abandon_load(host);
                Err(err)
            },
        }
    }

    /// Fills the buffers from a stored project and binds the session to it.
    ///
    /// # Errors
    /// Any backend failure. The user is notified, the host goes back to the
    /// listing and the buffers are left untouched; there is no retry.
    /// [`SyncError::Session`] without a request when the session is already bound.
    pub async fn load<O, H>(
        &self,
        session: &mut EditingSession<O>,
        host: &mut H,
        id: &ProjectId,
    ) -> Result<(), SyncError>
    where
        O: FragmentObserver,
        H: Host,
    {
        ensure_unbound(session, host, id)?;
        let fetched = self.backend.fetch(id).await;
        Self::finish_load(session, host, id, fetched)
    }

    /// Applies a fetch result to the session, for hosts that run the fetch
    /// themselves.
    ///
    /// # Errors
    /// The failed fetch, after notifying it and navigating to the listing.
    /// [`SyncError::Session`] when the session got bound while the fetch was in
    /// flight; the buffers keep the bound project's text.
    pub fn finish_load<O, H>(
        session: &mut EditingSession<O>,
        host: &mut H,
        id: &ProjectId,
        fetched: Result<ProjectResponse, SyncError>,
    ) -> Result<(), SyncError>
    where
        O: FragmentObserver,
        H: Host,
    {
        ensure_unbound(session, host, id)?;

        match fetched {
            Ok(project) => {
                session.bind(id.clone())?;
                session.replace_all(project.into_fragments());
                info!(project_id = %id, "Project loaded");
                Ok(())
            },
            Err(err) => {
                warn!(project_id = %id, error = %err, "Project load failed");
                abandon_load(host);
                Err(err)
            },
        }
    }

    /// Prompt, request and bookkeeping in one call.
    ///
    /// # Errors
    /// The [`SyncError`] that was already shown to the user.
    pub async fn save<O, H>(
        &self,
        session: &mut EditingSession<O>,
        host: &mut H,
    ) -> Result<SaveOutcome, SyncError>
    where
        O: FragmentObserver,
        H: Host,
    {
        let Some(request) = Self::prepare_save(session, host)? else {
            return Ok(SaveOutcome::Cancelled);
        };
        let result = self.execute(request).await;
        Self::finish(session, host, result)
    }

    /// First step of a save. A `NEW` session asks the host for a name; `None` means
    /// the prompt was cancelled and nothing should be sent.
    ///
    /// # Errors
    /// [`SyncError::Validation`] for a blank or overlong name, already notified.
    pub fn prepare_save<O, H>(
        session: &EditingSession<O>,
        host: &mut H,
    ) -> Result<Option<SaveRequest>, SyncError>
    where
        O: FragmentObserver,
        H: Host,
    {
        let fragments = session.snapshot();

        match session.state() {
            SessionState::Bound(id) => {
                Ok(Some(SaveRequest::Update { id: id.clone(), body: fragments.into() }))
            },
            SessionState::New => {
                let Some(raw) = host.prompt_project_name() else {
                    info!("Save cancelled at the name prompt");
                    return Ok(None);
                };
                let name = ProjectName::parse(raw).map_err(SyncError::from).inspect_err(|err| {
                    host.notify(Notice::error(err.save_notice()));
                })?;
                Ok(Some(SaveRequest::Create(CreateProjectRequest::new(&name, fragments))))
            },
        }
    }

    /// Second step of a save: the backend call and nothing else, so a host can run
    /// it without holding the session.
    pub async fn execute(&self, request: SaveRequest) -> SaveResult {
        match request {
            SaveRequest::Create(body) => self.backend.create(&body).await.map(Saved::Created),
            SaveRequest::Update { id, body } => {
                self.backend.update(&id, &body).await.map(Saved::Updated)
            },
        }
    }

    /// Last step of a save: binds a created project, notifies and navigates.
    ///
    /// # Errors
    /// The failed [`SaveResult`], after notifying it. The session is unchanged.
    pub fn finish<O, H>(
        session: &mut EditingSession<O>,
        host: &mut H,
        result: SaveResult,
    ) -> Result<SaveOutcome, SyncError>
    where
        O: FragmentObserver,
        H: Host,
    {
        let outcome = match result {
            Ok(Saved::Created(project)) => {
                if let Err(err) = session.bind(project.id.clone()) {
                    warn!(error = %err, "Created a project from an already bound session");
                }
                info!(project_id = %project.id, "Project created");
                SaveOutcome::Created(project.id)
            },
            Ok(Saved::Updated(_)) => {
                info!(project_id = ?session.project_id().map(ProjectId::as_str), "Project updated");
                SaveOutcome::Updated
            },
            Err(err) => {
                warn!(error = %err, "Project save failed");
                host.notify(Notice::error(err.save_notice()));
                return Err(err);
            },
        };

        host.notify(Notice::info(SAVED_MESSAGE));
        host.navigate(Destination::Listing);
        Ok(outcome)
    }
}

fn abandon_load<H: Host>(host: &mut H) {
    host.notify(Notice::error(LOAD_FAILED_MESSAGE));
    host.navigate(Destination::Listing);
}

/// A bound session keeps its project; loading another one into it is refused
/// before anything is fetched or written.
fn ensure_unbound<O, H>(
    session: &EditingSession<O>,
    host: &mut H,
    requested: &ProjectId,
) -> Result<(), SyncError>
where
    O: FragmentObserver,
    H: Host,
{
    let SessionState::Bound(bound) = session.state() else {
        return Ok(());
    };

    warn!(bound = %bound, requested = %requested, "Load into a bound session refused");
    host.notify(Notice::error(LOAD_FAILED_MESSAGE));
    Err(EditorError::AlreadyBound { bound: bound.clone(), context: None }.into())
}

/// The percent-decoded `project_id` query value of an entry URL, if present and
/// non-empty.
///
/// Accepts a full URL, or a path or query relative to the editor page.
#[must_use]
pub fn requested_project(entry: &str) -> Option<Result<ProjectId, SyncError>> {
    let url = Url::parse(ENTRY_BASE).and_then(|base| base.join(entry)).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == PROJECT_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(|value| ProjectId::parse(value).map_err(SyncError::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_url_selects_the_project() {
        let id = requested_project("http://localhost/editor?project_id=Ab3_x").unwrap().unwrap();
        assert_eq!(id.as_str(), "Ab3_x");

        let id = requested_project("?theme=dark&project_id=q9#top").unwrap().unwrap();
        assert_eq!(id.as_str(), "q9");
    }

    #[test]
    fn missing_or_empty_parameter_means_fresh_session() {
        assert!(requested_project("/editor").is_none());
        assert!(requested_project("/editor?project_id=").is_none());
        assert!(requested_project("/editor?other=1").is_none());
    }

    #[test]
    fn entry_id_is_percent_decoded() {
        let id = requested_project("/editor?project_id=abc%5Fd").unwrap().unwrap();
        assert_eq!(id.as_str(), "abc_d");

        let entry = "http://localhost:5001/editor?x=%26&project_id=q%2D1";
        let id = requested_project(entry).unwrap().unwrap();
        assert_eq!(id.as_str(), "q-1");
    }

    #[test]
    fn malformed_id_is_a_validation_error() {
        let result = requested_project("/editor?project_id=..%2Fetc").unwrap();
        assert!(matches!(result, Err(SyncError::Validation { .. })));
    }
}

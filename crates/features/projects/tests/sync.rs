#![cfg(feature = "client")]

use lpad_domain::constants::{LOAD_FAILED_MESSAGE, NAME_REQUIRED_MESSAGE, SAVED_MESSAGE};
use lpad_domain::{FragmentKind, Fragments, ProjectId};
use lpad_editor::{Detached, EditingSession, SessionState};
use lpad_preview::{MemorySurface, PreviewRenderer};
use lpad_projects::client::{
    Destination, Host, Notice, NoticeLevel, ProjectBackend, ProjectSync, SaveOutcome, SaveRequest,
    SyncError,
};
use lpad_projects::{
    CreateProjectRequest, MessageResponse, ProjectResponse, ProjectSummary, UpdateProjectRequest,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Fetch(String),
    Create(CreateProjectRequest),
    Update(String, UpdateProjectRequest),
}

#[derive(Default)]
struct FakeBackend {
    projects: Mutex<HashMap<String, ProjectResponse>>,
    calls: Mutex<Vec<Call>>,
    next_id: &'static str,
    offline: bool,
}

impl FakeBackend {
    fn with_project(id: &str, fragments: Fragments) -> Self {
        let backend = Self::default();
        backend.projects.lock().unwrap().insert(
            id.to_owned(),
            ProjectResponse {
                id: ProjectId::parse(id).unwrap(),
                name: "Stored".to_owned(),
                html: fragments.html,
                css: fragments.css,
                js: fragments.js,
            },
        );
        backend
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), SyncError> {
        self.calls.lock().unwrap().push(call);
        if self.offline {
            return Err(SyncError::Connection { message: "refused".into(), context: None });
        }
        Ok(())
    }
}

impl ProjectBackend for FakeBackend {
    async fn fetch(&self, id: &ProjectId) -> Result<ProjectResponse, SyncError> {
        self.record(Call::Fetch(id.to_string()))?;
        self.projects.lock().unwrap().get(id.as_str()).cloned().ok_or_else(|| {
            SyncError::NotFound { message: "Project not found".into(), context: None }
        })
    }

    async fn create(&self, request: &CreateProjectRequest) -> Result<ProjectResponse, SyncError> {
        self.record(Call::Create(request.clone()))?;
        let fragments = request.fragments();
        Ok(ProjectResponse {
            id: ProjectId::parse(self.next_id).unwrap(),
            name: request.name.clone(),
            html: fragments.html,
            css: fragments.css,
            js: fragments.js,
        })
    }

    async fn update(
        &self,
        id: &ProjectId,
        request: &UpdateProjectRequest,
    ) -> Result<MessageResponse, SyncError> {
        self.record(Call::Update(id.to_string(), request.clone()))?;
        if !self.projects.lock().unwrap().contains_key(id.as_str()) {
            return Err(SyncError::Server {
                status: 500,
                message: "disk full".into(),
                context: None,
            });
        }
        Ok(MessageResponse::ok("Project updated!"))
    }

    async fn delete(&self, _id: &ProjectId) -> Result<MessageResponse, SyncError> {
        unreachable!("sync never deletes")
    }

    async fn list(&self) -> Result<Vec<ProjectSummary>, SyncError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct ScriptedHost {
    answers: Vec<Option<String>>,
    notices: Vec<Notice>,
    visited: Vec<Destination>,
}

impl ScriptedHost {
    fn answering(answer: Option<&str>) -> Self {
        Self { answers: vec![answer.map(str::to_owned)], ..Self::default() }
    }
}

impl Host for ScriptedHost {
    fn prompt_project_name(&mut self) -> Option<String> {
        self.answers.pop().flatten()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn navigate(&mut self, destination: Destination) {
        self.visited.push(destination);
    }
}

fn demo_session() -> EditingSession<Detached> {
    let mut session = EditingSession::new(Detached);
    session.set(FragmentKind::Markup, "<p>hi</p>");
    session.set(FragmentKind::Style, "p{color:red}");
    session
}

#[tokio::test]
async fn first_save_creates_binds_and_returns_to_listing() {
    let sync = ProjectSync::new(FakeBackend { next_id: "srv_42", ..FakeBackend::default() });
    let mut session = demo_session();
    let mut host = ScriptedHost::answering(Some("Demo"));

    let outcome = sync.save(&mut session, &mut host).await.unwrap();

    let id = ProjectId::parse("srv_42").unwrap();
    assert_eq!(outcome, SaveOutcome::Created(id.clone()));
    assert_eq!(session.state(), &SessionState::Bound(id));
    assert_eq!(
        sync.backend().calls(),
        vec![Call::Create(CreateProjectRequest {
            name: "Demo".to_owned(),
            html: "<p>hi</p>".to_owned(),
            css: "p{color:red}".to_owned(),
            js: String::new(),
        })]
    );
    assert_eq!(host.notices, vec![Notice::info(SAVED_MESSAGE)]);
    assert_eq!(host.visited, vec![Destination::Listing]);
}

#[tokio::test]
async fn save_after_create_updates_the_bound_project() {
    let backend = FakeBackend::with_project("srv_42", Fragments::default());
    let sync = ProjectSync::new(FakeBackend { next_id: "srv_42", ..backend });
    let mut session = demo_session();
    sync.save(&mut session, &mut ScriptedHost::answering(Some("Demo"))).await.unwrap();

    session.set(FragmentKind::Script, "go()");
    let mut host = ScriptedHost::default();
    let outcome = sync.save(&mut session, &mut host).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Updated);
    let calls = sync.backend().calls();
    assert_eq!(
        calls[1],
        Call::Update(
            "srv_42".to_owned(),
            UpdateProjectRequest::from(Fragments::new("<p>hi</p>", "p{color:red}", "go()"))
        )
    );
    assert_eq!(host.notices, vec![Notice::info(SAVED_MESSAGE)]);
}

#[tokio::test]
async fn cancelled_prompt_sends_nothing() {
    let sync = ProjectSync::new(FakeBackend::default());
    let mut session = demo_session();
    let mut host = ScriptedHost::answering(None);

    let outcome = sync.save(&mut session, &mut host).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Cancelled);
    assert!(sync.backend().calls().is_empty());
    assert!(host.notices.is_empty());
    assert!(host.visited.is_empty());
    assert_eq!(session.state(), &SessionState::New);
}

#[tokio::test]
async fn blank_name_is_reported_without_a_request() {
    let sync = ProjectSync::new(FakeBackend::default());
    let mut session = demo_session();
    let mut host = ScriptedHost::answering(Some("   "));

    let err = sync.save(&mut session, &mut host).await.unwrap_err();

    assert!(matches!(err, SyncError::Validation { .. }));
    assert!(sync.backend().calls().is_empty());
    assert_eq!(host.notices, vec![Notice::error(NAME_REQUIRED_MESSAGE)]);
    assert!(host.visited.is_empty());
    assert_eq!(session.state(), &SessionState::New);
}

#[tokio::test]
async fn server_failure_is_shown_and_session_kept() {
    let sync = ProjectSync::new(FakeBackend::default());
    let mut session = demo_session();
    session.bind(ProjectId::parse("gone").unwrap()).unwrap();
    let mut host = ScriptedHost::default();

    let err = sync.save(&mut session, &mut host).await.unwrap_err();

    assert!(matches!(err, SyncError::Server { status: 500, .. }));
    assert_eq!(host.notices.len(), 1);
    assert_eq!(host.notices[0].level, NoticeLevel::Error);
    assert_eq!(host.notices[0].message, "Error saving: disk full");
    assert!(host.visited.is_empty());
    assert_eq!(session.fragment(FragmentKind::Markup), "<p>hi</p>");
}

#[tokio::test]
async fn connection_failure_uses_the_generic_message() {
    let sync = ProjectSync::new(FakeBackend { offline: true, ..FakeBackend::default() });
    let mut session = demo_session();
    let mut host = ScriptedHost::answering(Some("Demo"));

    let err = sync.save(&mut session, &mut host).await.unwrap_err();

    assert!(matches!(err, SyncError::Connection { .. }));
    assert_eq!(host.notices[0].message, err.save_notice());
    assert_eq!(session.state(), &SessionState::New);
}

#[tokio::test]
async fn load_fills_buffers_binds_and_renders_once() {
    let stored = Fragments::new("<h1>x</h1>", "h1{}", "run()");
    let sync = ProjectSync::new(FakeBackend::with_project("p1", stored.clone()));
    let mut session = EditingSession::new(PreviewRenderer::new(MemorySurface::new()));
    let mut host = ScriptedHost::default();

    sync.load(&mut session, &mut host, &ProjectId::parse("p1").unwrap()).await.unwrap();

    assert_eq!(session.snapshot(), stored);
    assert_eq!(session.project_id().map(ProjectId::as_str), Some("p1"));
    assert_eq!(session.observer().surface().replacements(), 1);
    assert!(host.notices.is_empty());
}

#[tokio::test]
async fn missing_project_notifies_and_leaves() {
    let sync = ProjectSync::new(FakeBackend::default());
    let mut session = EditingSession::new(Detached);
    let mut host = ScriptedHost::default();

    let err = sync
        .load(&mut session, &mut host, &ProjectId::parse("missing-id").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::NotFound { .. }));
    assert_eq!(host.notices, vec![Notice::error(LOAD_FAILED_MESSAGE)]);
    assert_eq!(host.visited, vec![Destination::Listing]);
    assert_eq!(session.snapshot(), Fragments::default());
    assert_eq!(session.state(), &SessionState::New);
}

#[tokio::test]
async fn start_chooses_between_load_and_fresh() {
    let sync = ProjectSync::new(FakeBackend::with_project("p1", Fragments::new("a", "b", "c")));

    let mut fresh = EditingSession::new(Detached);
    sync.start(&mut fresh, &mut ScriptedHost::default(), "/editor").await.unwrap();
    assert_eq!(fresh.snapshot(), Fragments::placeholder());
    assert_eq!(fresh.state(), &SessionState::New);

    let mut loaded = EditingSession::new(Detached);
    sync.start(&mut loaded, &mut ScriptedHost::default(), "/editor?project_id=p1").await.unwrap();
    assert_eq!(loaded.snapshot(), Fragments::new("a", "b", "c"));

    let mut host = ScriptedHost::default();
    let mut broken = EditingSession::new(Detached);
    assert!(sync.start(&mut broken, &mut host, "/editor?project_id=a.b").await.is_err());
    assert_eq!(host.visited, vec![Destination::Listing]);
    assert_eq!(sync.backend().calls(), vec![Call::Fetch("p1".to_owned())]);
}

#[tokio::test]
async fn split_save_steps_compose_like_save() {
    let sync = ProjectSync::new(FakeBackend { next_id: "n1", ..FakeBackend::default() });
    let mut session = demo_session();
    let mut host = ScriptedHost::answering(Some("Split"));

    let request =
        ProjectSync::<FakeBackend>::prepare_save(&session, &mut host).unwrap().unwrap();
    assert!(matches!(&request, SaveRequest::Create(body) if body.name == "Split"));
    let result = sync.execute(request).await;
    let outcome = ProjectSync::<FakeBackend>::finish(&mut session, &mut host, result).unwrap();

    assert_eq!(outcome, SaveOutcome::Created(ProjectId::parse("n1").unwrap()));
    assert!(session.state().is_bound());
}

#[tokio::test]
async fn bound_session_refuses_a_second_load() {
    let sync = ProjectSync::new(FakeBackend::with_project("b", Fragments::new("<p>B</p>", "", "")));
    let mut session = EditingSession::new(Detached);
    session.set(FragmentKind::Markup, "<p>A</p>");
    session.bind(ProjectId::parse("a").unwrap()).unwrap();
    let mut host = ScriptedHost::default();

    let err = sync.load(&mut session, &mut host, &ProjectId::parse("b").unwrap()).await.unwrap_err();

    assert!(matches!(err, SyncError::Session { .. }));
    assert!(sync.backend().calls().is_empty());
    assert_eq!(session.state(), &SessionState::Bound(ProjectId::parse("a").unwrap()));
    assert_eq!(session.fragment(FragmentKind::Markup), "<p>A</p>");
    assert_eq!(host.notices, vec![Notice::error(LOAD_FAILED_MESSAGE)]);
    assert!(host.visited.is_empty());
}

#[tokio::test]
async fn fetch_finishing_after_a_create_leaves_the_created_project_alone() {
    let backend = FakeBackend {
        next_id: "a",
        ..FakeBackend::with_project("b", Fragments::new("<p>B</p>", "", ""))
    };
    let sync = ProjectSync::new(backend);
    let mut session = demo_session();
    let wanted = ProjectId::parse("b").unwrap();

    let fetched = sync.backend().fetch(&wanted).await;
    let outcome = sync.save(&mut session, &mut ScriptedHost::answering(Some("Mine"))).await;
    assert_eq!(outcome.unwrap(), SaveOutcome::Created(ProjectId::parse("a").unwrap()));

    let mut host = ScriptedHost::default();
    let err = ProjectSync::<FakeBackend>::finish_load(&mut session, &mut host, &wanted, fetched)
        .unwrap_err();

    assert!(matches!(err, SyncError::Session { .. }));
    assert_eq!(session.project_id().map(ProjectId::as_str), Some("a"));
    assert_eq!(session.fragment(FragmentKind::Markup), "<p>hi</p>");
    assert_eq!(host.notices, vec![Notice::error(LOAD_FAILED_MESSAGE)]);
}

use livepad::domain::{FragmentKind, Fragments, ProjectId};
use livepad::editor::{Detached, EditingSession, SessionState};
use livepad::projects::client::{
    Destination, Host, HttpBackend, Notice, ProjectBackend, ProjectSync, SaveOutcome, SyncError,
};
use lpad_server::{Handle, Server};
use std::net::SocketAddr;
use tempfile::TempDir;

#[derive(Default)]
struct TestHost {
    name: Option<String>,
    notices: Vec<Notice>,
    visited: Vec<Destination>,
}

impl Host for TestHost {
    fn prompt_project_name(&mut self) -> Option<String> {
        self.name.take()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn navigate(&mut self, destination: Destination) {
        self.visited.push(destination);
    }
}

struct Running {
    base_url: String,
    handle: Handle<SocketAddr>,
    task: tokio::task::JoinHandle<anyhow::Result<()>>,
    _data: TempDir,
}

async fn start() -> Running {
    let data = TempDir::new().unwrap();
    let server = Server::builder().port(0).data_dir(data.path()).build().await.unwrap();
    let handle = Handle::<SocketAddr>::new();
    let task = tokio::spawn(server.run_with_handle(handle.clone()));
    let address = handle.listening().await.expect("server failed to bind");

    Running { base_url: format!("http://{address}"), handle, task, _data: data }
}

impl Running {
    async fn stop(self) {
        self.handle.graceful_shutdown(None);
        self.task.await.unwrap().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn editor_flow_against_a_live_server() {
    let server = start().await;
    let sync = ProjectSync::new(HttpBackend::new(server.base_url.as_str()).unwrap());

    let mut session = EditingSession::new(Detached);
    session.set(FragmentKind::Markup, "<p>hi</p>");
    session.set(FragmentKind::Style, "p{color:red}");
    let mut host = TestHost { name: Some("Demo".to_owned()), ..TestHost::default() };

    let SaveOutcome::Created(id) = sync.save(&mut session, &mut host).await.unwrap() else {
        panic!("first save must create");
    };
    assert_eq!(session.state(), &SessionState::Bound(id.clone()));
    assert_eq!(host.visited, vec![Destination::Listing]);

    session.set(FragmentKind::Script, "console.log(1)");
    assert_eq!(sync.save(&mut session, &mut host).await.unwrap(), SaveOutcome::Updated);

    let mut reopened = EditingSession::new(Detached);
    let entry = format!("/editor?project_id={id}");
    sync.start(&mut reopened, &mut TestHost::default(), &entry).await.unwrap();
    assert_eq!(reopened.snapshot(), Fragments::new("<p>hi</p>", "p{color:red}", "console.log(1)"));

    let listing = sync.backend().list().await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "Demo");

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn backend_maps_http_failures() {
    let server = start().await;
    let backend = HttpBackend::new(format!("{}/", server.base_url)).unwrap();
    let missing = ProjectId::parse("missing-id").unwrap();

    let err = backend.fetch(&missing).await.unwrap_err();
    assert!(matches!(err, SyncError::NotFound { ref message, .. } if message == "Project not found"));

    let blank = livepad::projects::CreateProjectRequest::default();
    let err = backend.create(&blank).await.unwrap_err();
    assert!(matches!(err, SyncError::Server { status: 400, .. }));

    let mut session = EditingSession::new(Detached);
    let mut host = TestHost::default();
    assert!(sync_load_fails(&backend, &mut session, &mut host, &missing).await);
    assert_eq!(host.visited, vec![Destination::Listing]);
    assert_eq!(session.state(), &SessionState::New);

    server.stop().await;
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let backend = HttpBackend::new("http://127.0.0.1:9").unwrap();

    let err = backend.list().await.unwrap_err();

    assert!(matches!(err, SyncError::Connection { .. }));
}

async fn sync_load_fails(
    backend: &HttpBackend,
    session: &mut EditingSession<Detached>,
    host: &mut TestHost,
    id: &ProjectId,
) -> bool {
    ProjectSync::new(backend.clone()).load(session, host, id).await.is_err()
}

use lpad_domain::{FragmentKind, Fragments, ProjectId};
use lpad_editor::{Detached, EditingSession, EditorError, FragmentObserver, SessionState};
use lpad_preview::{MemorySurface, PreviewRenderer};

#[derive(Default)]
struct Recorder {
    seen: Vec<Fragments>,
}

impl FragmentObserver for Recorder {
    fn fragments_changed(&mut self, fragments: &Fragments) {
        self.seen.push(fragments.clone());
    }
}

fn id(value: &str) -> ProjectId {
    ProjectId::parse(value).unwrap()
}

#[test]
fn each_change_notifies_with_the_full_snapshot() {
    let mut session = EditingSession::new(Recorder::default());

    assert!(session.set(FragmentKind::Markup, "<p>hi</p>"));
    assert!(session.set(FragmentKind::Style, "p{color:red}"));

    let seen = &session.observer().seen;
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], Fragments::new("<p>hi</p>", "p{color:red}", ""));
}

#[test]
fn identical_write_is_not_a_change() {
    let mut session = EditingSession::new(Recorder::default());
    session.set(FragmentKind::Script, "go()");

    assert!(!session.set(FragmentKind::Script, "go()"));

    assert_eq!(session.observer().seen.len(), 1);
    assert_eq!(session.revision(FragmentKind::Script), 1);
}

#[test]
fn replace_all_notifies_once() {
    let mut session = EditingSession::new(Recorder::default());

    session.replace_all(Fragments::new("a", "b", "c"));

    assert_eq!(session.observer().seen.len(), 1);
    assert_eq!(session.snapshot(), Fragments::new("a", "b", "c"));
    assert_eq!(session.fragment(FragmentKind::Style), "b");
}

#[test]
fn open_fresh_renders_the_placeholder() {
    let mut session = EditingSession::new(PreviewRenderer::new(MemorySurface::new()));

    session.open_fresh();

    let surface = session.observer().surface();
    assert_eq!(surface.replacements(), 1);
    assert!(surface.current().unwrap().as_str().contains(&Fragments::placeholder().html));
    assert_eq!(session.state(), &SessionState::New);
}

#[test]
fn refresh_renders_without_changes() {
    let mut session = EditingSession::new(Recorder::default());

    session.refresh();
    session.refresh();

    assert_eq!(session.observer().seen, vec![Fragments::default(), Fragments::default()]);
}

#[test]
fn bind_happens_exactly_once() {
    let mut session = EditingSession::new(Detached);
    assert_eq!(session.project_id(), None);

    session.bind(id("first")).unwrap();
    let err = session.bind(id("second")).unwrap_err();

    assert!(matches!(err, EditorError::AlreadyBound { ref bound, .. } if bound.as_str() == "first"));
    assert_eq!(session.state(), &SessionState::Bound(id("first")));
    assert!(session.state().is_bound());
}

#[test]
fn failing_script_does_not_block_later_renders() {
    let mut session = EditingSession::new(PreviewRenderer::new(MemorySurface::new()));

    session.set(FragmentKind::Script, "throw new Error('boom')");
    session.set(FragmentKind::Markup, "<p>after</p>");

    let surface = session.into_observer().into_surface();
    assert_eq!(surface.replacements(), 2);
    assert!(surface.current().unwrap().as_str().contains("<p>after</p>"));
}

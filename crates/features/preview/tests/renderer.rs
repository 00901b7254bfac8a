use lpad_domain::Fragments;
use lpad_preview::{
    MemorySurface, PreviewDocument, PreviewError, PreviewOptions, PreviewRenderer, RenderSurface,
    ScriptErrorPolicy,
};

#[derive(Default)]
struct FlakySurface {
    fail_next: bool,
    shown: Option<PreviewDocument>,
}

impl RenderSurface for FlakySurface {
    fn replace_document(&mut self, document: &PreviewDocument) -> Result<(), PreviewError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(PreviewError::Surface { message: "frame detached".into(), context: None });
        }
        self.shown = Some(document.clone());
        Ok(())
    }
}

#[test]
fn every_render_replaces_the_whole_document() {
    let mut renderer = PreviewRenderer::new(MemorySurface::new());

    renderer.render(&Fragments::new("<p>one</p>", "", ""));
    renderer.render(&Fragments::new("<p>two</p>", "", ""));

    let surface = renderer.surface();
    assert_eq!(surface.replacements(), 2);
    let current = surface.current().unwrap().as_str();
    assert!(current.contains("<p>two</p>"));
    assert!(!current.contains("<p>one</p>"));
}

#[test]
fn broken_script_is_still_delivered_inside_the_guard() {
    let mut renderer = PreviewRenderer::new(MemorySurface::new());

    renderer.render_parts("<p>ok</p>", "p { color: red }", "function (");

    let doc = renderer.surface().current().unwrap().as_str();
    assert!(doc.contains("<p>ok</p>"));
    assert!(doc.contains("try {\n    (0, eval)(source);"));
    assert!(doc.contains(r#"})("function (", false);"#));
}

#[test]
fn surface_failures_are_absorbed_and_counted() {
    let mut renderer = PreviewRenderer::new(FlakySurface { fail_next: true, shown: None });

    renderer.render(&Fragments::new("<p>lost</p>", "", ""));
    assert!(renderer.surface().shown.is_none());

    renderer.render(&Fragments::new("<p>shown</p>", "", ""));

    assert_eq!(renderer.renders(), 2);
    assert_eq!(renderer.failures(), 1);
    assert!(renderer.surface().shown.as_ref().unwrap().as_str().contains("<p>shown</p>"));
}

#[test]
fn options_change_applies_to_the_next_render() {
    let mut renderer = PreviewRenderer::new(MemorySurface::new());
    renderer.render(&Fragments::default());

    renderer.set_options(PreviewOptions::new(ScriptErrorPolicy::Overlay));
    renderer.render(&Fragments::default());

    let history = renderer.into_surface();
    assert!(history.history()[0].as_str().contains(r#"("", false);"#));
    assert!(history.history()[1].as_str().contains(r#"("", true);"#));
}

#[test]
fn renderer_can_borrow_a_surface() {
    let mut surface = MemorySurface::new();
    {
        let mut renderer = PreviewRenderer::new(&mut surface);
        renderer.render(&Fragments::placeholder());
    }

    assert_eq!(surface.replacements(), 1);
}

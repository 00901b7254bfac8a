use crate::document::{PreviewDocument, PreviewOptions, compose, compose_parts};
use crate::surface::RenderSurface;
use lpad_domain::Fragments;
use tracing::{debug, warn};

/// Composes documents and pushes them to a surface.
///
/// Rendering never fails from the caller's point of view: a surface error is logged
/// and the next render simply tries again.
#[derive(Debug)]
pub struct PreviewRenderer<S> {
    surface: S,
    options: PreviewOptions,
    renders: u64,
    failures: u64,
}

impl<S: RenderSurface> PreviewRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, PreviewOptions::default())
    }

    pub const fn with_options(surface: S, options: PreviewOptions) -> Self {
        Self { surface, options, renders: 0, failures: 0 }
    }

    pub fn render(&mut self, fragments: &Fragments) {
        let document = compose(fragments, &self.options);
        self.present(&document);
    }

    pub fn render_parts(&mut self, markup: &str, style: &str, script: &str) {
        let document = compose_parts(markup, style, script, &self.options);
        self.present(&document);
    }

    fn present(&mut self, document: &PreviewDocument) {
        self.renders += 1;
        match self.surface.replace_document(document) {
            Ok(()) => debug!(render = self.renders, bytes = document.len(), "Preview replaced"),
            Err(err) => {
                self.failures += 1;
                warn!(render = self.renders, error = %err, "Preview surface rejected the document");
            },
        }
    }

    #[must_use]
    pub const fn options(&self) -> &PreviewOptions {
        &self.options
    }

    pub const fn set_options(&mut self, options: PreviewOptions) {
        self.options = options;
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Render attempts so far, failed ones included.
    #[must_use]
    pub const fn renders(&self) -> u64 {
        self.renders
    }

    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.failures
    }
}

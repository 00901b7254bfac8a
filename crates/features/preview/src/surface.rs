use crate::document::PreviewDocument;
use crate::error::PreviewError;

/// Where a composed document ends up: an iframe, a webview, a file, a test buffer.
///
/// Implementations must swap the whole document in one step; a surface never shows
/// a mix of two renders.
pub trait RenderSurface {
    /// # Errors
    /// [`PreviewError::Surface`] when the host could not take the document.
    fn replace_document(&mut self, document: &PreviewDocument) -> Result<(), PreviewError>;
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn replace_document(&mut self, document: &PreviewDocument) -> Result<(), PreviewError> {
        (**self).replace_document(document)
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn replace_document(&mut self, document: &PreviewDocument) -> Result<(), PreviewError> {
        (**self).replace_document(document)
    }
}

/// Keeps every document it was given, newest last.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    history: Vec<PreviewDocument>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&PreviewDocument> {
        self.history.last()
    }

    #[must_use]
    pub fn history(&self) -> &[PreviewDocument] {
        &self.history
    }

    #[must_use]
    pub fn replacements(&self) -> usize {
        self.history.len()
    }
}

impl RenderSurface for MemorySurface {
    fn replace_document(&mut self, document: &PreviewDocument) -> Result<(), PreviewError> {
        self.history.push(document.clone());
        Ok(())
    }
}

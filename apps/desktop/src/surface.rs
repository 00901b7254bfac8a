use dioxus::prelude::*;
use livepad::preview::{PreviewDocument, PreviewError, RenderSurface};

/// Publishes each document into a signal bound to the preview iframe's `srcdoc`.
#[derive(Debug, Clone, Copy)]
pub struct SignalSurface {
    document: Signal<String>,
}

impl SignalSurface {
    #[must_use]
    pub const fn new(document: Signal<String>) -> Self {
        Self { document }
    }
}

impl RenderSurface for SignalSurface {
    fn replace_document(&mut self, document: &PreviewDocument) -> Result<(), PreviewError> {
        let mut slot = self.document.try_write().map_err(|err| PreviewError::Surface {
            message: err.to_string().into(),
            context: Some("preview frame is gone".into()),
        })?;
        document.as_str().clone_into(&mut slot);
        Ok(())
    }
}

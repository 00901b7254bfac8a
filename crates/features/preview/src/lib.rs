//! Live preview composition.
//!
//! Three source fragments go in, one complete HTML document comes out and replaces
//! whatever the [`RenderSurface`] showed before. Scripts run inside a guard so a
//! throwing or unparsable script is reported in the preview and never reaches the
//! editor hosting it.

mod document;
mod error;
mod renderer;
mod surface;

pub use document::{PreviewDocument, PreviewOptions, compose, compose_parts, script_literal};
pub use error::{PreviewError, PreviewErrorExt};
pub use renderer::PreviewRenderer;
pub use surface::{MemorySurface, RenderSurface};

pub use lpad_domain::config::ScriptErrorPolicy;

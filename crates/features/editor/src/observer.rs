use lpad_domain::Fragments;
use lpad_preview::{PreviewRenderer, RenderSurface};

/// Receives the full fragment snapshot after every buffer change.
pub trait FragmentObserver {
    fn fragments_changed(&mut self, fragments: &Fragments);
}

impl<S: RenderSurface> FragmentObserver for PreviewRenderer<S> {
    fn fragments_changed(&mut self, fragments: &Fragments) {
        self.render(fragments);
    }
}

impl<O: FragmentObserver + ?Sized> FragmentObserver for &mut O {
    fn fragments_changed(&mut self, fragments: &Fragments) {
        (**self).fragments_changed(fragments);
    }
}

/// Observer for sessions without a preview attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl FragmentObserver for Detached {
    fn fragments_changed(&mut self, _fragments: &Fragments) {}
}

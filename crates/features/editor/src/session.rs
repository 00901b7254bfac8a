use crate::buffer::SourceBuffer;
use crate::error::EditorError;
use crate::observer::FragmentObserver;
use lpad_domain::{FragmentKind, Fragments, ProjectId};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Not yet saved; the first save creates a project.
    New,
    Bound(ProjectId),
}

impl SessionState {
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

/// In-memory editing state for one page load.
///
/// Buffer changes notify the observer synchronously with a full snapshot. The
/// observer is owned by the session, so a notification cannot re-enter it.
#[derive(Debug)]
pub struct EditingSession<O> {
    markup: SourceBuffer,
    style: SourceBuffer,
    script: SourceBuffer,
    state: SessionState,
    observer: O,
}

impl<O: FragmentObserver> EditingSession<O> {
    pub const fn new(observer: O) -> Self {
        Self {
            markup: SourceBuffer::new(FragmentKind::Markup),
            style: SourceBuffer::new(FragmentKind::Style),
            script: SourceBuffer::new(FragmentKind::Script),
            state: SessionState::New,
            observer,
        }
    }

    /// Writes one buffer. Returns `true` and re-renders if the text changed.
    pub fn set(&mut self, kind: FragmentKind, text: impl Into<String>) -> bool {
        let changed = self.buffer_mut(kind).set(text);
        if changed {
            debug!(%kind, revision = self.revision(kind), "Buffer changed");
            self.notify();
        }
        changed
    }

    /// Bulk write of all three buffers with a single notification.
    pub fn replace_all(&mut self, fragments: Fragments) {
        let Fragments { html, css, js } = fragments;
        self.markup.set(html);
        self.style.set(css);
        self.script.set(js);
        self.notify();
    }

    /// Fills the buffers with the starter content and renders it.
    pub fn open_fresh(&mut self) {
        info!("Starting a fresh session");
        self.replace_all(Fragments::placeholder());
    }

    /// Renders the current snapshot even if nothing changed.
    pub fn refresh(&mut self) {
        self.notify();
    }

    /// Moves `New` to `Bound(id)`.
    ///
    /// # Errors
    /// [`EditorError::AlreadyBound`] if the session already has a project; the
    /// existing binding is kept.
    pub fn bind(&mut self, id: ProjectId) -> Result<(), EditorError> {
        if let SessionState::Bound(bound) = &self.state {
            return Err(EditorError::AlreadyBound { bound: bound.clone(), context: None });
        }
        info!(project_id = %id, "Session bound");
        self.state = SessionState::Bound(id);
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> Fragments {
        Fragments::new(self.markup.text(), self.style.text(), self.script.text())
    }

    #[must_use]
    pub fn fragment(&self, kind: FragmentKind) -> &str {
        self.buffer(kind).text()
    }

    #[must_use]
    pub fn revision(&self, kind: FragmentKind) -> u64 {
        self.buffer(kind).revision()
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        match &self.state {
            SessionState::New => None,
            SessionState::Bound(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    pub const fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.observer.fragments_changed(&snapshot);
    }

    const fn buffer(&self, kind: FragmentKind) -> &SourceBuffer {
        match kind {
            FragmentKind::Markup => &self.markup,
            FragmentKind::Style => &self.style,
            FragmentKind::Script => &self.script,
        }
    }

    const fn buffer_mut(&mut self, kind: FragmentKind) -> &mut SourceBuffer {
        match kind {
            FragmentKind::Markup => &mut self.markup,
            FragmentKind::Style => &mut self.style,
            FragmentKind::Script => &mut self.script,
        }
    }
}

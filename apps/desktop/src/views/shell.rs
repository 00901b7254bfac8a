use crate::host::{DesktopHost, NoticeQueue};
use dioxus::prelude::*;
use livepad::domain::ProjectId;
use livepad::projects::client::{Destination, Notice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    /// `None` opens a fresh, unsaved session.
    Editor { project: Option<ProjectId> },
}

/// Window-wide UI state: the current view and the modal notice queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    route: Signal<Route>,
    notices: Signal<NoticeQueue>,
}

impl Shell {
    /// Creates the shell and makes it available to every child component.
    pub fn provide() -> Self {
        let route = use_signal(|| Route::Listing);
        let notices = use_signal(NoticeQueue::default);
        use_context_provider(|| Self { route, notices })
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route.read().clone()
    }

    pub fn open(&mut self, route: Route) {
        self.route.set(route);
    }

    pub fn apply(&mut self, host: DesktopHost) {
        let now = self.notices.write().apply(host);
        if let Some(destination) = now {
            self.go(destination);
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.write().push(notice);
    }

    #[must_use]
    pub fn current_notice(&self) -> Option<Notice> {
        self.notices.read().current().cloned()
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.notices.read().is_blocking()
    }

    pub fn dismiss(&mut self) {
        let deferred = self.notices.write().dismiss();
        if let Some(destination) = deferred {
            self.go(destination);
        }
    }

    fn go(&mut self, destination: Destination) {
        match destination {
            Destination::Listing => self.route.set(Route::Listing),
        }
    }
}

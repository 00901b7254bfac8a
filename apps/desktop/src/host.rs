use livepad::projects::client::{Destination, Host, Notice};
use std::collections::VecDeque;

/// Collects what a sync step asked of the host so the UI can apply it afterwards.
#[derive(Debug, Default)]
pub struct DesktopHost {
    answer: Option<String>,
    notices: Vec<Notice>,
    destination: Option<Destination>,
}

impl DesktopHost {
    /// A host whose name prompt returns `answer` (`None` for a cancelled prompt).
    #[must_use]
    pub const fn answering(answer: Option<String>) -> Self {
        Self { answer, notices: Vec::new(), destination: None }
    }
}

impl Host for DesktopHost {
    fn prompt_project_name(&mut self) -> Option<String> {
        self.answer.take()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn navigate(&mut self, destination: Destination) {
        self.destination = Some(destination);
    }
}

/// Modal notices in arrival order. A navigation waits until every notice that came
/// with it was dismissed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    pending: Option<Destination>,
}

impl NoticeQueue {
    /// Returns the destination to go to right away, if any.
    pub fn apply(&mut self, host: DesktopHost) -> Option<Destination> {
        self.notices.extend(host.notices);
        match host.destination {
            Some(destination) if !self.notices.is_empty() => {
                self.pending = Some(destination);
                None
            },
            other => other,
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.notices.front()
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        !self.notices.is_empty()
    }

    /// Closes the front notice; yields the deferred destination once none are left.
    pub fn dismiss(&mut self) -> Option<Destination> {
        self.notices.pop_front();
        if self.notices.is_empty() { self.pending.take() } else { None }
    }
}

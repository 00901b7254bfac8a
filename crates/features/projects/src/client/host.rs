use lpad_domain::constants::LISTING_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A blocking message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The project listing; leaving the editor discards its session.
    Listing,
}

impl Destination {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Listing => LISTING_PATH,
        }
    }
}

/// The browsing context an editing session lives in.
pub trait Host {
    /// Asks for a new project's name. `None` means the user cancelled.
    fn prompt_project_name(&mut self) -> Option<String>;

    fn notify(&mut self, notice: Notice);

    fn navigate(&mut self, destination: Destination);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn prompt_project_name(&mut self) -> Option<String> {
        (**self).prompt_project_name()
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }

    fn navigate(&mut self, destination: Destination) {
        (**self).navigate(destination);
    }
}

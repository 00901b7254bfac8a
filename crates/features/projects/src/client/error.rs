use lpad_domain::DomainError;
use lpad_domain::constants::CONNECTION_FAILED_MESSAGE;
use lpad_editor::EditorError;
use std::borrow::Cow;

#[lpad_derive::lpad_error]
pub enum SyncError {
    #[error("Project not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rejected before any request was sent.
    #[error("Validation failed{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The request never produced an HTTP response.
    #[error("Connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Server error {status}{}: {message}", format_context(.context))]
    Server { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The session cannot take the result, e.g. a load into a bound session.
    #[error("Editing session rejected the change{}: {source}", format_context(.context))]
    Session { source: EditorError, context: Option<Cow<'static, str>> },
}

impl SyncError {
    /// Text shown to the user when a save fails with this error.
    #[must_use]
    pub fn save_notice(&self) -> String {
        match self {
            Self::Connection { .. } => CONNECTION_FAILED_MESSAGE.to_owned(),
            Self::Validation { message, .. } => message.to_string(),
            Self::NotFound { message, .. } | Self::Server { message, .. } => {
                format!("Error saving: {message}")
            },
            Self::Session { source, .. } => format!("Error saving: {source}"),
        }
    }
}

impl From<DomainError> for SyncError {
    fn from(err: DomainError) -> Self {
        let message = match err {
            DomainError::InvalidProjectId { message, .. }
            | DomainError::InvalidProjectName { message, .. } => message,
        };
        Self::Validation { message, context: None }
    }
}

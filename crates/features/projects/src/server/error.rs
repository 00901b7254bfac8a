use crate::model::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lpad_domain::DomainError;
use lpad_domain::constants::PROJECT_NOT_FOUND_MESSAGE;
use lpad_storage::StorageError;
use std::borrow::Cow;
use tracing::error;

#[lpad_derive::lpad_error]
pub enum ProjectError {
    #[error("Project not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid project{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Project storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    /// A stored document that is not a project, or one that cannot be encoded.
    #[error("Project document error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal project error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ProjectError {
    pub(crate) fn not_found() -> Self {
        Self::NotFound { message: PROJECT_NOT_FOUND_MESSAGE.into(), context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Storage { .. } | Self::Serialization { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// The `error` text sent to clients. Server-side failures stay in the log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { message, .. } | Self::Validation { message, .. } => {
                message.to_string()
            },
            Self::Storage { .. } | Self::Serialization { .. } | Self::Internal { .. } => {
                "Internal server error".to_owned()
            },
        }
    }
}

impl From<DomainError> for ProjectError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidProjectId { .. } => Self::not_found(),
            DomainError::InvalidProjectName { message, context } => {
                Self::Validation { message, context }
            },
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Project request failed");
        }

        (status, Json(ErrorResponse { error: self.public_message() })).into_response()
    }
}

use std::borrow::Cow;

#[lpad_derive::lpad_error]
pub enum DomainError {
    #[error("Invalid project id{}: {message}", format_context(.context))]
    InvalidProjectId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid project name{}: {message}", format_context(.context))]
    InvalidProjectName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

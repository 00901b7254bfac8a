use std::borrow::Cow;

#[lpad_derive::lpad_error]
pub enum PreviewError {
    /// The host surface refused or failed to take the new document.
    #[error("Preview surface error{}: {message}", format_context(.context))]
    Surface { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Script encoding error{}: {source}", format_context(.context))]
    Encoding { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal preview error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

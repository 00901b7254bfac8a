use lpad_domain::ProjectId;
use std::borrow::Cow;

#[lpad_derive::lpad_error]
pub enum EditorError {
    /// A session binds to a project once; the binding is never replaced.
    #[error("Session is already bound to project '{bound}'{}", format_context(.context))]
    AlreadyBound { bound: ProjectId, context: Option<Cow<'static, str>> },
}

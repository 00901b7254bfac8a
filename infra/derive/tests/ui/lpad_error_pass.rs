use lpad_derive::lpad_error;
use std::borrow::Cow;

#[lpad_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected: {reason}")]
    Rejected { reason: String },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = DemoError::Rejected { reason: "nope".to_owned() };
    assert_eq!(err.context_str(), None);
}

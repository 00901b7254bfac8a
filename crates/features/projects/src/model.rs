use lpad_derive::api_model;
use lpad_domain::{Fragments, ProjectId, ProjectName};

/// Body of `POST /api/projects`.
///
/// The name stays a raw string so a blank or missing one is answered with a
/// validation message rather than a deserialization rejection.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CreateProjectRequest {
    pub name: String,
    pub html: String,
    pub css: String,
    pub js: String,
}

impl CreateProjectRequest {
    #[must_use]
    pub fn new(name: &ProjectName, fragments: Fragments) -> Self {
        let Fragments { html, css, js } = fragments;
        Self { name: name.as_str().to_owned(), html, css, js }
    }

    #[must_use]
    pub fn fragments(&self) -> Fragments {
        Fragments::new(self.html.as_str(), self.css.as_str(), self.js.as_str())
    }
}

/// Body of `PUT /api/projects/{id}`. The name is fixed at creation and ignored here.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateProjectRequest {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl UpdateProjectRequest {
    #[must_use]
    pub fn into_fragments(self) -> Fragments {
        Fragments { html: self.html, css: self.css, js: self.js }
    }
}

impl From<Fragments> for UpdateProjectRequest {
    fn from(fragments: Fragments) -> Self {
        let Fragments { html, css, js } = fragments;
        Self { html, css, js }
    }
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ProjectResponse {
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: ProjectId,
    pub name: String,
    pub html: String,
    pub css: String,
    pub js: String,
}

impl ProjectResponse {
    #[must_use]
    pub fn fragments(&self) -> Fragments {
        Fragments::new(self.html.as_str(), self.css.as_str(), self.js.as_str())
    }

    #[must_use]
    pub fn into_fragments(self) -> Fragments {
        Fragments { html: self.html, css: self.css, js: self.js }
    }
}

/// One entry of the project listing.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: ProjectId,
    pub name: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

/// Failure body of every API endpoint.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

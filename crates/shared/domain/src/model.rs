use crate::constants::{MAX_PROJECT_ID_LEN, MAX_PROJECT_NAME_LEN};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque project identifier assigned by the server on first save.
///
/// Accepted only when it is 1..=64 characters of `[A-Za-z0-9_-]`, which also keeps
/// it safe to use as a file name and a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// # Errors
    /// [`DomainError::InvalidProjectId`] when the value is empty, too long or contains
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() || value.len() > MAX_PROJECT_ID_LEN {
            return Err(DomainError::InvalidProjectId {
                message: format!("length must be 1..={MAX_PROJECT_ID_LEN}").into(),
                context: None,
            });
        }
        let allowed = |c: &char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-');
        if let Some(bad) = value.chars().find(|c| !allowed(c)) {
            return Err(DomainError::InvalidProjectId {
                message: format!("unexpected character {bad:?}").into(),
                context: None,
            });
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProjectId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Human-readable project name, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// # Errors
    /// [`DomainError::InvalidProjectName`] for blank names and names longer than
    /// 120 characters after trimming.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidProjectName {
                message: crate::constants::NAME_REQUIRED_MESSAGE.into(),
                context: None,
            });
        }
        if trimmed.chars().count() > MAX_PROJECT_NAME_LEN {
            return Err(DomainError::InvalidProjectName {
                message: format!("at most {MAX_PROJECT_NAME_LEN} characters").into(),
                context: None,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProjectName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

/// Which of the three source texts a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Markup,
    Style,
    Script,
}

impl FragmentKind {
    pub const ALL: [Self; 3] = [Self::Markup, Self::Style, Self::Script];

    /// Field name on the wire (`html`, `css`, `js`).
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Style => "css",
            Self::Script => "js",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markup => "HTML",
            Self::Style => "CSS",
            Self::Script => "JavaScript",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three source texts of a project. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fragments {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl Fragments {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self { html: html.into(), css: css.into(), js: js.into() }
    }

    /// Starter content for a session that is not bound to a project.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(
            "<h1>Hello, Livepad!</h1>\n<p>Edit the HTML, CSS and JavaScript panes to see changes live.</p>",
            "body {\n  font-family: system-ui, sans-serif;\n  margin: 2rem;\n}\n\nh1 {\n  color: #6b4fbb;\n}",
            "console.log('Preview ready');",
        )
    }

    #[must_use]
    pub fn get(&self, kind: FragmentKind) -> &str {
        match kind {
            FragmentKind::Markup => &self.html,
            FragmentKind::Style => &self.css,
            FragmentKind::Script => &self.js,
        }
    }

    pub fn get_mut(&mut self, kind: FragmentKind) -> &mut String {
        match kind {
            FragmentKind::Markup => &mut self.html,
            FragmentKind::Style => &mut self.css,
            FragmentKind::Script => &mut self.js,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FragmentKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

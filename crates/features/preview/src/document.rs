use crate::error::{PreviewError, PreviewErrorExt};
use lpad_domain::Fragments;
use lpad_domain::config::ScriptErrorPolicy;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::fmt;
use std::io;
use tracing::warn;

/// Runs the script fragment through indirect `eval` so it executes in global scope,
/// like a plain inline script, while every failure stays inside the preview.
const GUARD_OPEN: &str = r#"(function (source, overlay) {
  function report(error) {
    var text = error && error.stack ? String(error.stack) : String(error);
    console.error('[preview]', text);
    if (overlay && document.body) {
      var banner = document.createElement('pre');
      banner.setAttribute('data-preview-error', '');
      banner.style.cssText = 'position:fixed;left:0;right:0;bottom:0;margin:0;padding:8px;' +
        'background:#fde8e8;color:#9b1c1c;font:12px monospace;white-space:pre-wrap;z-index:2147483647';
      banner.textContent = text;
      document.body.appendChild(banner);
    }
  }
  window.addEventListener('error', function (event) {
    event.preventDefault();
    report(event.error || event.message);
  });
  window.addEventListener('unhandledrejection', function (event) {
    event.preventDefault();
    report(event.reason);
  });
  try {
    (0, eval)(source);
  } catch (error) {
    report(error);
  }
})("#;
const GUARD_CLOSE: &str = ");";
const EMPTY_SCRIPT_LITERAL: &str = "\"\"";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    pub error_policy: ScriptErrorPolicy,
}

impl PreviewOptions {
    #[must_use]
    pub const fn new(error_policy: ScriptErrorPolicy) -> Self {
        Self { error_policy }
    }
}

/// A complete, self-contained HTML document; always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewDocument(String);

impl PreviewDocument {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for PreviewDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PreviewDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[must_use]
pub fn compose(fragments: &Fragments, options: &PreviewOptions) -> PreviewDocument {
    compose_parts(&fragments.html, &fragments.css, &fragments.js, options)
}

/// Builds the preview document.
///
/// Style and markup are embedded verbatim. The script travels as a script-safe
/// string literal, so nothing in it can close the surrounding `<script>` element.
#[must_use]
pub fn compose_parts(
    markup: &str,
    style: &str,
    script: &str,
    options: &PreviewOptions,
) -> PreviewDocument {
    let literal = script_literal(script).unwrap_or_else(|err| {
        warn!(error = %err, "Script fragment dropped from preview");
        EMPTY_SCRIPT_LITERAL.to_owned()
    });
    let overlay = match options.error_policy {
        ScriptErrorPolicy::Console => "false",
        ScriptErrorPolicy::Overlay => "true",
    };

    let mut html = String::with_capacity(
        markup.len() + style.len() + literal.len() + GUARD_OPEN.len() + 160,
    );
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>");
    html.push_str(style);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(markup);
    html.push_str("\n<script>");
    html.push_str(GUARD_OPEN);
    html.push_str(&literal);
    html.push_str(", ");
    html.push_str(overlay);
    html.push_str(GUARD_CLOSE);
    html.push_str("</script>\n</body>\n</html>\n");

    PreviewDocument(html)
}

/// JSON string literal of `script` with `<`, `>`, `&`, U+2028 and U+2029 escaped.
///
/// # Errors
/// [`PreviewError::Encoding`] if serialization fails, which a `&str` never triggers.
pub fn script_literal(script: &str) -> Result<String, PreviewError> {
    let mut buffer = Vec::with_capacity(script.len() + 2);
    let mut serializer = Serializer::with_formatter(&mut buffer, ScriptSafeFormatter);
    script.serialize(&mut serializer).context("encoding script fragment")?;

    String::from_utf8(buffer).map_err(|err| PreviewError::Internal {
        message: err.to_string().into(),
        context: Some("script literal is not UTF-8".into()),
    })
}

struct ScriptSafeFormatter;

impl Formatter for ScriptSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

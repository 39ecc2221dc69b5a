//! HTML export.

use crate::models::Record;
use crate::{Error, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Default file name of the HTML export.
pub const DEFAULT_HTML_OUTPUT: &str = "html_display.html";

/// Renders records as one `<ul>` per record, separated by `<hr>`.
#[must_use]
pub fn render_html<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut html = String::new();
    for record in records {
        html.push_str("<ul>");
        for (name, value) in record.fields() {
            let _ = write!(html, "<li>{}: {}</li>", escape_html(name), escape_html(value));
        }
        html.push_str("</ul><hr>");
    }
    html
}

/// Writes the HTML rendering of `records` to `path`, replacing it.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn export_html<'a, I>(records: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    std::fs::write(path, render_html(records)).map_err(|e| Error::OperationFailed {
        operation: "write_html".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    tracing::debug!(path = %path.display(), "Exported HTML");
    Ok(())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

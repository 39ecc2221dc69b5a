//! Record rendering for display.
//!
//! Plain text for the console and an HTML list export.

mod html;
mod text;

pub use html::{DEFAULT_HTML_OUTPUT, export_html, render_html};
pub use text::render_text;

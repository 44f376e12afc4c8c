//! Validation report rendering.
//!
//! Every renderer is a pure function of its inputs: identical reports give
//! byte-identical output.
//!
//! - **Markdown**: the human-readable validation log
//! - **Comments**: reviewer notes as a `column,comment` CSV
//! - **Sanitized tables**: delimited output in the upload's own delimiter
//! - **JSON**: the machine-readable report

mod comments;
mod common;
mod json;
mod markdown;
mod sanitized;

pub use comments::{ReviewerComments, render_comments_csv};
pub use common::ReportContext;
pub use json::render_json;
pub use markdown::{DIVIDER_WIDTH, render_markdown};
pub use sanitized::{sanitized_bytes, write_sanitized};

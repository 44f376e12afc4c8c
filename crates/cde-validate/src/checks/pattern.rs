//! Regex columns.

use regex::Regex;
use tracing::warn;

/// Compile a column pattern anchored at both ends.
///
/// Returns `None` and logs a warning when the pattern does not compile.
pub fn compile(column: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(regex) => Some(regex),
        Err(error) => {
            warn!(column = %column, pattern = %pattern, %error, "invalid validation pattern");
            None
        }
    }
}

pub fn full_match(regex: &Regex, value: &str) -> bool {
    regex.is_match(value)
}

#![deny(unsafe_code)]

//! List-valued CDE cells.
//!
//! Cells such as `Validation`, `FillNull` and the `Specific*` columns hold
//! either a JSON list (`["Brain","iPSC"]`), a single-quoted list literal
//! (`['Raw', 'Processed']`) or a bare scalar.

/// Parse a list cell. Empty, `nan` and `none` cells are empty lists.
pub fn parse_list_cell(cell: &str) -> Vec<String> {
    let normalized = cell.trim();
    if normalized.is_empty() || matches!(normalized.to_lowercase().as_str(), "nan" | "none") {
        return Vec::new();
    }
    if !normalized.starts_with('[') {
        return vec![normalized.to_string()];
    }
    if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(normalized) {
        return values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            })
            .filter(|value| !value.trim().is_empty())
            .collect();
    }
    match parse_quoted_list(normalized) {
        Some(values) => values
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .collect(),
        None => vec![normalized.to_string()],
    }
}

/// Parse a bracketed list whose items use single or double quotes.
///
/// Unquoted items are taken verbatim after trimming. Returns `None` when the
/// brackets or quotes are unbalanced.
fn parse_quoted_list(text: &str) -> Option<Vec<String>> {
    let inner = text.strip_prefix('[')?.strip_suffix(']')?;
    let mut values = Vec::new();
    let mut chars = inner.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };
        let value = if first == '\'' || first == '"' {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next()? {
                    '\\' => value.push(chars.next()?),
                    c if c == first => break,
                    c => value.push(c),
                }
            }
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            value
        } else {
            let mut value = String::new();
            while let Some(c) = chars.next_if(|c| *c != ',') {
                value.push(c);
            }
            value.trim().to_string()
        };
        values.push(value);
        match chars.next() {
            Some(',') | None => {}
            Some(_) => return None,
        }
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_like_cells() {
        assert!(parse_list_cell("").is_empty());
        assert!(parse_list_cell("  NaN ").is_empty());
        assert!(parse_list_cell("None").is_empty());
        assert!(parse_list_cell("[]").is_empty());
    }

    #[test]
    fn json_lists() {
        assert_eq!(parse_list_cell(r#"["Brain","iPSC"]"#), vec!["Brain", "iPSC"]);
        assert_eq!(parse_list_cell(r#"["a", "", 3]"#), vec!["a", "3"]);
    }

    #[test]
    fn single_quoted_lists() {
        assert_eq!(
            parse_list_cell("['Raw', 'Not Reported', \"it's\"]"),
            vec!["Raw", "Not Reported", "it's"]
        );
        assert_eq!(parse_list_cell("['a, b', 'c']"), vec!["a, b", "c"]);
        assert_eq!(parse_list_cell("[Male, Female]"), vec!["Male", "Female"]);
    }

    #[test]
    fn scalars_and_malformed_lists() {
        assert_eq!(parse_list_cell("Unknown"), vec!["Unknown"]);
        assert_eq!(parse_list_cell("['open"), vec!["['open"]);
    }
}

use std::path::Path;

const SANITIZED_SUFFIX: &str = "_sanitized";

/// Table name for an uploaded file: the file stem with every run of
/// non-alphanumeric characters replaced by `_`.
///
/// A trailing `_sanitized` is dropped so released tables validate under
/// their original name.
pub fn table_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let mut name = String::with_capacity(stem.len());
    let mut pending_separator = false;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !name.is_empty() {
                name.push('_');
            }
            pending_separator = false;
            name.push(c);
        } else {
            pending_separator = true;
        }
    }
    let keep = match name.strip_suffix(SANITIZED_SUFFIX) {
        Some(base) if !base.is_empty() => base.len(),
        _ => name.len(),
    };
    name.truncate(keep);
    if name.is_empty() {
        "table".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_file_stems() {
        assert_eq!(table_name_from_path(Path::new("uploads/SAMPLE.csv")), "SAMPLE");
        assert_eq!(
            table_name_from_path(Path::new("ASSAY_RNAseq.tsv")),
            "ASSAY_RNAseq"
        );
        assert_eq!(
            table_name_from_path(Path::new("my study (final).csv")),
            "my_study_final"
        );
        assert_eq!(table_name_from_path(Path::new("__.csv")), "table");
        assert_eq!(
            table_name_from_path(Path::new("out/DATA_sanitized.csv")),
            "DATA"
        );
    }
}

#![deny(unsafe_code)]

/// Version spellings that resolve to another published release.
const VERSION_ALIASES: &[(&str, &str)] = &[("v3", "v3.0"), ("v3.0.0", "v3.0"), ("v3.2-beta", "v3.2")];

/// Map a requested CDE version to the release it is published under.
pub fn canonical_version(requested: &str) -> String {
    let trimmed = requested.trim();
    VERSION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map_or_else(|| trimmed.to_string(), |(_, target)| (*target).to_string())
}

/// Ordering key so `v3.10` sorts after `v3.9` and pre-releases sort first.
pub(crate) fn version_sort_key(version: &str) -> (Vec<u64>, bool, String) {
    let body = version.trim().trim_start_matches(['v', 'V']);
    let (numbers, suffix) = match body.split_once('-') {
        Some((numbers, suffix)) => (numbers, Some(suffix)),
        None => (body, None),
    };
    let parts = numbers
        .split('.')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect();
    (parts, suffix.is_none(), version.to_string())
}

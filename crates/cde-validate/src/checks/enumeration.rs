//! Enum columns: exact, case-sensitive membership.

pub fn is_allowed(value: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|candidate| candidate == value)
}

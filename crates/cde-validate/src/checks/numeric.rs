//! Integer and Float columns.

/// Integral `i64`, or a finite float with no fractional part.
pub fn is_integer(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.parse::<i64>().is_ok()
        || trimmed
            .parse::<f64>()
            .is_ok_and(|number| number.is_finite() && number.fract() == 0.0)
}

/// Any finite float.
pub fn is_float(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(f64::is_finite)
}

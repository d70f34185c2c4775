use regex::Regex;
use std::sync::OnceLock;

fn tz_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // " +0000", " +00:00", " UTC" or " +0000 UTC" at the end of the value.
    // Negative offsets name a different instant and are kept.
    RE.get_or_init(|| {
        Regex::new(r"(?:\s+\+\d{2}:?\d{2})?(?:\s+UTC)?$").expect("static regex")
    })
}

fn fraction_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.\d+$").expect("static regex"))
}

/// Heuristic: a date separator plus a time separator or zone marker.
pub fn is_time_value(v: &str) -> bool {
    v.contains('-') && (v.contains(':') || v.contains("UTC") || v.contains("+0000"))
}

fn reduce_time_value(v: &str) -> String {
    let v = v.trim();
    let without_tz = tz_suffix_re().replace(v, "");
    fraction_suffix_re().replace(&without_tz, "").into_owned()
}

/// Tolerant scalar comparison used after an exact row match failed.
///
/// 1. exact string equality
/// 2. both look like timestamps: drop zone suffix and sub-second fraction, then compare
/// 3. drop one trailing `%` from each side, then compare
pub fn values_equal(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    if is_time_value(a) && is_time_value(b) {
        return reduce_time_value(a) == reduce_time_value(b);
    }

    let a = a.strip_suffix('%').unwrap_or(a);
    let b = b.strip_suffix('%').unwrap_or(b);
    a == b
}

/// Field-by-field [`values_equal`] over two rows of the same arity.
pub fn rows_equal(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        assert!(values_equal("A", "A"));
        assert!(!values_equal("A", "B"));
        assert!(values_equal("", ""));
    }

    #[test]
    fn test_percent() {
        assert!(values_equal("12.5%", "12.5"));
        assert!(values_equal("12.5", "12.5%"));
        assert!(values_equal("7%", "7%"));
        assert!(!values_equal("12.5%%", "12.5"));
        assert!(!values_equal("12.5%", "12.6"));
    }

    #[test]
    fn test_time_values() {
        assert!(is_time_value("2024-01-01 10:00:00"));
        assert!(is_time_value("2024-01-01 UTC"));
        assert!(!is_time_value("10:00:00"));
        assert!(!is_time_value("2024-01-01"));

        assert!(values_equal(
            "2024-01-01 10:00:00.123 +0000 UTC",
            "2024-01-01 10:00:00"
        ));
        assert!(values_equal("2024-01-01 10:00:00 UTC", "2024-01-01 10:00:00.5"));
        assert!(values_equal("2024-01-01 10:00:00 +00:00", "2024-01-01 10:00:00"));
        assert!(!values_equal("2024-01-01 10:00:01", "2024-01-01 10:00:00"));
    }

    #[test]
    fn test_negative_offset_is_not_dropped() {
        assert!(!values_equal("2024-01-01 10:00:00 -0500", "2024-01-01 10:00:00"));
        assert!(!values_equal("2024-01-01 10:00:00 -0500", "2024-01-01 10:00:00 +0000"));
        assert!(!values_equal("2024-01-01 10:00:00 -05:00", "2024-01-01 10:00:00"));
    }

    #[test]
    fn test_time_rule_does_not_fall_through_to_percent() {
        // both are time-like; reduced forms differ, so no percent retry
        assert!(!values_equal("2024-01-01 10:00:00%", "2024-01-01 10:00:01"));
    }

    #[test]
    fn test_rows_equal_requires_same_arity() {
        let a = vec!["1".to_string(), "50%".to_string()];
        let b = vec!["1".to_string(), "50".to_string()];
        assert!(rows_equal(&a, &b));
        assert!(!rows_equal(&a, &b[..1]));
    }
}

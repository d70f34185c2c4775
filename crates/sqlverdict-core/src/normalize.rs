/// Canonical form of SQL text for the textual exact-match pre-check.
///
/// Lower-cases, strips the trailing statement terminator and collapses whitespace runs
/// to single spaces. A terminator written as `;;` or `; ;` is stripped as a whole so that
/// normalizing twice never changes the result again.
pub fn normalize_sql(sql: &str) -> String {
    let lowered = sql.to_lowercase();
    let stripped = lowered.trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Textual equivalence after normalization. A candidate that normalizes to nothing
/// never matches, even an equally empty reference.
pub fn is_exact_match(reference_sql: &str, candidate_sql: &str) -> bool {
    let candidate = normalize_sql(candidate_sql);
    !candidate.is_empty() && candidate == normalize_sql(reference_sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_sql("SELECT id FROM t;"), "select id from t");
        assert_eq!(normalize_sql("select id from t"), "select id from t");
        assert_eq!(
            normalize_sql("  SELECT\n\tid\n  FROM   t ;  "),
            "select id from t"
        );
    }

    #[test]
    fn test_terminator_run_is_stripped() {
        assert_eq!(normalize_sql("select 1;;"), "select 1");
        assert_eq!(normalize_sql("select 1 ; ;\n"), "select 1");
        assert_eq!(normalize_sql("select ';' from t;"), "select ';' from t");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "SELECT id FROM t;",
            "select 1;;",
            "select 1 ; ;",
            "  \n ",
            "",
            ";",
            "SELECT a,\n  b\r\nFROM x WHERE y = 'A  B';",
        ];
        for s in samples {
            let once = normalize_sql(s);
            assert_eq!(normalize_sql(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_exact_match() {
        assert!(is_exact_match("SELECT id FROM t;", "select id from t"));
        assert!(!is_exact_match("SELECT id FROM t", "select name from t"));
        assert!(!is_exact_match("", "  "));
        assert!(!is_exact_match(";", " ; "));
    }
}

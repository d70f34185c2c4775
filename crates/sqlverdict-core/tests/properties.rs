//! Behavioural properties of the result comparator and the item pipeline.

use sqlverdict_core::classify::classify_reason;
use sqlverdict_core::compare::{compare_results, AlignmentStrategy};
use sqlverdict_core::engine::judge_item;
use sqlverdict_core::model::{BenchmarkItem, ErrorCategory, EvaluationCase, TabularResult};
use sqlverdict_core::normalize::normalize_sql;
use sqlverdict_core::spj::SpjRegistry;
use sqlverdict_core::values::values_equal;

fn table(rows: &[&[&str]]) -> TabularResult {
    TabularResult::success(
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

fn case(
    reference: &str,
    candidate: &str,
    gold: TabularResult,
    pred: TabularResult,
) -> EvaluationCase {
    EvaluationCase {
        item: BenchmarkItem {
            id: "item".into(),
            database_name: "db".into(),
            question: "q".into(),
            reference_sql: reference.into(),
            candidate_sql: candidate.into(),
            judge_tag: None,
        },
        gold,
        pred,
    }
}

/// Deterministic permutations of the data rows (header stays first).
fn permutations(result: &TabularResult) -> Vec<TabularResult> {
    let header = result.rows[0].clone();
    let data = result.data_rows().to_vec();
    let n = data.len();
    (0..n)
        .map(|shift| {
            let mut rows = vec![header.clone()];
            let mut rotated: Vec<_> = (0..n).map(|i| data[(i + shift) % n].clone()).collect();
            if shift % 2 == 1 {
                rotated.reverse();
            }
            rows.extend(rotated);
            TabularResult::success(rows)
        })
        .collect()
}

#[test]
fn normalization_is_idempotent() {
    for s in [
        "SELECT *\nFROM   orders\tWHERE id = 1;",
        "select 1;;",
        " ;",
        "WITH x AS (SELECT 1) SELECT * FROM x ; ",
    ] {
        let once = normalize_sql(s);
        assert_eq!(normalize_sql(&once), once);
    }
}

#[test]
fn comparison_is_reflexive() {
    let samples = [
        table(&[&["id", "name"], &["1", "a"], &["2", "b"], &["2", "b"]]),
        table(&[&["x"]]),
        table(&[]),
        table(&[&["a", "A"], &["1", "2"]]),
    ];
    for r in samples {
        let c = compare_results(&r, &r.clone());
        assert!(c.equivalent, "{:?}: {}", r, c.reason);
    }
}

#[test]
fn row_order_does_not_matter() {
    let gold = table(&[
        &["id", "city"],
        &["1", "Oslo"],
        &["2", "Lima"],
        &["3", "Oslo"],
        &["3", "Oslo"],
    ]);
    let pred = table(&[
        &["city", "id"],
        &["Oslo", "3"],
        &["Lima", "2"],
        &["Oslo", "1"],
        &["Oslo", "3"],
    ]);
    for g in permutations(&gold) {
        for p in permutations(&pred) {
            assert!(compare_results(&g, &p).equivalent);
        }
    }

    let wrong = table(&[
        &["city", "id"],
        &["Oslo", "3"],
        &["Lima", "2"],
        &["Oslo", "1"],
        &["Oslo", "1"],
    ]);
    for p in permutations(&wrong) {
        assert!(!compare_results(&gold, &p).equivalent);
    }
}

#[test]
fn duplicates_are_not_collapsed() {
    let gold = table(&[&["v"], &["A"], &["A"]]);
    let pred = table(&[&["v"], &["A"]]);
    let c = compare_results(&gold, &pred);
    assert!(!c.equivalent);
    assert_eq!(classify_reason(&c.reason), ErrorCategory::RowCountError);
}

#[test]
fn renamed_columns_are_tolerated() {
    let gold = table(&[&["id", "name"], &["1", "Alice"], &["2", "Bob"]]);
    let pred = table(&[&["name", "id"], &["Alice", "1"], &["Bob", "2"]]);
    let c = compare_results(&gold, &pred);
    assert!(c.equivalent);
    assert_eq!(c.strategy, Some(AlignmentStrategy::ExactColumnNames));
}

#[test]
fn value_tolerance() {
    assert!(values_equal("12.5%", "12.5"));
    assert!(values_equal(
        "2024-01-01 10:00:00.123 +0000 UTC",
        "2024-01-01 10:00:00"
    ));
    assert!(!values_equal("A", "B"));
}

#[test]
fn classifier_prefers_data_over_projection() {
    for reason in [
        "column name mismatch, data mismatch",
        "data mismatch, column name mismatch",
        "COLUMN NAME MISMATCH / DATA MISMATCH",
    ] {
        assert_eq!(classify_reason(reason), ErrorCategory::DataMismatch);
    }
}

#[test]
fn scenario_exact_match() {
    let c = case(
        "SELECT id FROM t;",
        "select id from t",
        TabularResult::failure("not executed"),
        TabularResult::failure("not executed"),
    );
    let out = judge_item(&c, &SpjRegistry::default());
    assert_eq!(out.judgement.category, ErrorCategory::ExactMatch);
    assert!(out.judgement.is_correct);
}

#[test]
fn scenario_row_count_mismatch() {
    let c = case(
        "SELECT id FROM t",
        "SELECT id FROM t WHERE id < 3",
        table(&[&["id"], &["1"], &["2"], &["3"]]),
        table(&[&["id"], &["1"], &["2"]]),
    );
    let out = judge_item(&c, &SpjRegistry::default());
    assert_eq!(out.judgement.category, ErrorCategory::RowCountError);
    assert!(out.judgement.reason.contains('3'));
    assert!(out.judgement.reason.contains('2'));
    assert!(!out.judgement.is_correct);
}

#[test]
fn scenario_content_mapping_mismatch_is_data_mismatch() {
    let c = case(
        "SELECT id, name FROM t",
        "SELECT name AS who, id AS num FROM t",
        table(&[&["id", "name"], &["1", "Alice"], &["2", "Bob"]]),
        table(&[&["who", "num"], &["Alice", "1"], &["Bob", "2"]]),
    );
    let out = judge_item(&c, &SpjRegistry::default());
    assert_eq!(out.judgement.category, ErrorCategory::SemanticMatch);

    let c = case(
        "SELECT id, name FROM t",
        "SELECT name AS who, id AS num FROM t",
        table(&[&["id", "name"], &["1", "Alice"], &["2", "Bob"]]),
        table(&[&["who", "num"], &["Alice", "9"], &["Bob", "8"]]),
    );
    let out = judge_item(&c, &SpjRegistry::default());
    assert_eq!(out.judgement.category, ErrorCategory::DataMismatch);
    assert!(out.judgement.reason.contains("positional_comparison"));
}

#[test]
fn every_item_gets_exactly_one_category() {
    let inputs = [
        case("select 1", "select 1", table(&[]), table(&[])),
        case("select 1", "", table(&[]), table(&[])),
        case("select 1", "I am not sure", table(&[]), table(&[])),
        case("select a", "select b", TabularResult::failure("x"), table(&[])),
        case("select a", "select b", table(&[]), TabularResult::failure("x")),
        case("select a", "select b", table(&[&["a"]]), table(&[&["b"]])),
        case(
            "select a",
            "select b",
            table(&[&["a"], &["1"]]),
            table(&[&["a", "b"], &["1", "2"]]),
        ),
    ];
    let mut stats = sqlverdict_core::stats::RunStatistics::new();
    for c in &inputs {
        judge_item(c, &SpjRegistry::default()).record_into(&mut stats);
    }
    assert_eq!(stats.total, inputs.len() as u64);
    assert_eq!(stats.counts.values().sum::<u64>(), stats.total);
    assert_eq!(stats.count(ErrorCategory::ProjectionError), 1);
}

use crate::model::TabularResult;

/// Number of leading data rows that make up a column fingerprint.
pub const FEATURE_ROWS: usize = 10;

/// Minimum similarity for a non-identical fingerprint to be accepted.
pub const MIN_SIMILARITY: f64 = 0.8;

const FEATURE_SEP: &str = ":";

/// Fingerprint of one column: the trimmed values of its first [`FEATURE_ROWS`] data rows.
pub fn column_feature(result: &TabularResult, col: usize) -> String {
    result
        .data_rows()
        .iter()
        .take(FEATURE_ROWS)
        .map(|row| row.get(col).map(|v| v.trim()).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(FEATURE_SEP)
}

/// 1.0 for identical fingerprints, otherwise the share of position-wise equal tokens
/// when both split into the same number of tokens, otherwise 0.0.
pub fn feature_similarity(f1: &str, f2: &str) -> f64 {
    if f1 == f2 {
        return 1.0;
    }
    let t1: Vec<&str> = f1.split(FEATURE_SEP).collect();
    let t2: Vec<&str> = f2.split(FEATURE_SEP).collect();
    if t1.len() != t2.len() || t1.is_empty() {
        return 0.0;
    }
    let same = t1.iter().zip(&t2).filter(|(a, b)| a == b).count();
    same as f64 / t1.len() as f64
}

/// Infers `mapping[gold_col] = pred_col` from column contents.
///
/// Returns `None` unless every gold column gets a confident partner; partial mappings
/// are never returned.
pub fn map_columns(gold: &TabularResult, pred: &TabularResult) -> Option<Vec<usize>> {
    let width = gold.header().len();
    if width == 0
        || width != pred.header().len()
        || gold.data_row_count() == 0
        || gold.data_row_count() != pred.data_row_count()
    {
        return None;
    }

    let gold_features: Vec<String> = (0..width).map(|c| column_feature(gold, c)).collect();
    let pred_features: Vec<String> = (0..width).map(|c| column_feature(pred, c)).collect();

    let mut used = vec![false; width];
    let mut mapping = Vec::with_capacity(width);

    for (gi, gf) in gold_features.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        for (pj, pf) in pred_features.iter().enumerate() {
            if used[pj] {
                continue;
            }
            let sim = feature_similarity(gf, pf);
            if sim >= 1.0 {
                best = Some((pj, sim));
                break;
            }
            if sim > MIN_SIMILARITY && best.map_or(true, |(_, b)| sim > b) {
                best = Some((pj, sim));
            }
        }

        let (pj, sim) = best?;
        tracing::trace!(gold_col = gi, pred_col = pj, similarity = sim, "column mapped");
        used[pj] = true;
        mapping.push(pj);
    }

    Some(mapping)
}

use crate::errors::DatasetError;
use crate::model::EvaluationCase;
use std::collections::BTreeMap;
use std::path::Path;

/// Parses a JSONL file of evaluation cases. Blank lines are skipped.
pub fn load_cases(path: &Path) -> Result<Vec<EvaluationCase>, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_cases(&raw, path)
}

pub fn parse_cases(raw: &str, path: &Path) -> Result<Vec<EvaluationCase>, DatasetError> {
    let mut cases = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let case: EvaluationCase =
            serde_json::from_str(line).map_err(|source| DatasetError::Record {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })?;
        cases.push(case);
    }
    Ok(cases)
}

/// Reads `{"<item index>": "<judge tag>"}`.
pub fn load_annotations(path: &Path) -> Result<BTreeMap<usize, String>, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let by_key: BTreeMap<String, String> =
        serde_json::from_str(&raw).map_err(|source| DatasetError::Annotations {
            path: path.to_path_buf(),
            source,
        })?;

    by_key
        .into_iter()
        .map(|(key, tag)| {
            key.trim()
                .parse::<usize>()
                .map(|idx| (idx, tag))
                .map_err(|_| DatasetError::AnnotationKey {
                    path: path.to_path_buf(),
                    key,
                })
        })
        .collect()
}

/// Sets judge tags by dataset position. Annotations override inline tags.
///
/// Returns the number of items tagged.
pub fn apply_annotations(
    cases: &mut [EvaluationCase],
    annotations: &BTreeMap<usize, String>,
) -> usize {
    let mut applied = 0;
    for (&idx, tag) in annotations {
        match cases.get_mut(idx) {
            Some(case) => {
                case.item.judge_tag = Some(tag.clone());
                applied += 1;
            }
            None => tracing::warn!(
                event = "sqlverdict.annotations.out_of_range",
                index = idx,
                items = cases.len(),
                "annotation index has no matching item"
            ),
        }
    }
    applied
}

//! Row ordering.
//!
//! Numeric columns sort by float value, text columns by their lowercased
//! text. The sort is stable in both directions: records with equal keys
//! keep their input order under `desc` too.

use std::cmp::Ordering;

use crate::dsl::{SortOrder, SortSpec, parse_sort};
use crate::error::{PipelineError, Result};
use crate::kind::{ColumnKind, to_float};
use crate::{Dataset, Record};

/// A computed sort key for one record.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // A column has one kind, so keys never mix.
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Parse `expr` against `dataset` and apply it.
pub fn sort(dataset: &Dataset, expr: &str) -> Result<Dataset> {
    let spec = parse_sort(dataset, expr)?;
    apply_sort(dataset, &spec)
}

/// Return the records of `dataset` reordered by `spec`.
pub fn apply_sort(dataset: &Dataset, spec: &SortSpec) -> Result<Dataset> {
    let kind = ColumnKind::infer(dataset, &spec.column);
    log::debug!("sort {spec} on {kind:?} column");

    // Compute every key up front so a bad value fails before anything moves.
    let mut keyed = dataset
        .records()
        .iter()
        .map(|record| sort_key(record, spec, kind).map(|key| (key, record)))
        .collect::<Result<Vec<_>>>()?;

    match spec.order {
        SortOrder::Asc => keyed.sort_by(|(a, _), (b, _)| a.compare(b)),
        SortOrder::Desc => keyed.sort_by(|(a, _), (b, _)| b.compare(a)),
    }

    let records = keyed.into_iter().map(|(_, r)| r.clone()).collect();
    Ok(dataset.with_records(records))
}

fn sort_key(record: &Record, spec: &SortSpec, kind: ColumnKind) -> Result<SortKey> {
    let value = record
        .get(&spec.column)
        .ok_or_else(|| PipelineError::ColumnNotFound(spec.column.clone()))?;
    Ok(match kind {
        ColumnKind::Numeric => SortKey::Number(to_float(&spec.column, value)?),
        ColumnKind::Text => SortKey::Text(value.to_lowercase()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{column, phones};

    #[test]
    fn test_numeric_ascending() {
        let d = sort(&phones(), "price=asc").unwrap();
        assert_eq!(column(&d, "price"), ["600", "899.50", "999.99"]);
    }

    #[test]
    fn test_text_descending() {
        let d = sort(&phones(), "name=desc").unwrap();
        assert_eq!(column(&d, "name"), ["Samsung", "Nokia", "Apple"]);
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let d = Dataset::new(
            vec!["n".into()],
            vec![
                Record::from_pairs([("n", "10")]),
                Record::from_pairs([("n", "9")]),
                Record::from_pairs([("n", "100")]),
            ],
        );
        let out = sort(&d, "n=asc").unwrap();
        assert_eq!(column(&out, "n"), ["9", "10", "100"]);
    }

    #[test]
    fn test_text_ignores_case() {
        let d = Dataset::new(
            vec!["w".into()],
            vec![
                Record::from_pairs([("w", "banana")]),
                Record::from_pairs([("w", "Cherry")]),
                Record::from_pairs([("w", "apple")]),
            ],
        );
        let out = sort(&d, "w=asc").unwrap();
        assert_eq!(column(&out, "w"), ["apple", "banana", "Cherry"]);
    }

    #[test]
    fn test_desc_reverses_asc() {
        let d = phones();
        for col in ["price", "rating", "name"] {
            let asc = sort(&d, &format!("{col}=asc")).unwrap();
            let desc = sort(&d, &format!("{col}=desc")).unwrap();
            let mut reversed = asc.into_records();
            reversed.reverse();
            assert_eq!(reversed, desc.into_records(), "column {col}");
        }
    }

    #[test]
    fn test_ties_keep_input_order_both_ways() {
        let d = Dataset::new(
            vec!["k".into(), "id".into()],
            vec![
                Record::from_pairs([("k", "1"), ("id", "a")]),
                Record::from_pairs([("k", "2"), ("id", "b")]),
                Record::from_pairs([("k", "1"), ("id", "c")]),
            ],
        );
        let asc = sort(&d, "k=asc").unwrap();
        assert_eq!(column(&asc, "id"), ["a", "c", "b"]);
        let desc = sort(&d, "k=desc").unwrap();
        assert_eq!(column(&desc, "id"), ["b", "a", "c"]);
    }

    #[test]
    fn test_empty_numeric_cell_fails() {
        let d = Dataset::new(
            vec!["x".into()],
            vec![
                Record::from_pairs([("x", "2")]),
                Record::from_pairs([("x", "")]),
            ],
        );
        assert!(matches!(
            sort(&d, "x=asc"),
            Err(PipelineError::Conversion { .. })
        ));
    }

    #[test]
    fn test_bad_order_and_column() {
        assert!(matches!(
            sort(&phones(), "price=random"),
            Err(PipelineError::UnknownSortOrder(_))
        ));
        assert!(matches!(
            sort(&phones(), "brand=asc"),
            Err(PipelineError::ColumnNotFound(_))
        ));
    }
}

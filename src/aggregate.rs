//! Column reductions.
//!
//! Aggregation does not look at the inferred column kind: every value of
//! the column must parse as a number, empty cells included.

use crate::Dataset;
use crate::dsl::{AggregateKind, AggregateSpec, parse_aggregate};
use crate::error::Result;
use crate::kind::to_float;

/// Parse `expr` against `dataset` and reduce the column.
///
/// An empty expression or an empty dataset yields `Ok(None)` without
/// parsing anything.
pub fn aggregate(dataset: &Dataset, expr: &str) -> Result<Option<f64>> {
    if expr.is_empty() || dataset.is_empty() {
        return Ok(None);
    }
    let spec = parse_aggregate(dataset, expr)?;
    apply_aggregate(dataset, &spec)
}

/// Reduce the column named by `spec` to a single value.
pub fn apply_aggregate(dataset: &Dataset, spec: &AggregateSpec) -> Result<Option<f64>> {
    let values = dataset
        .records()
        .iter()
        .map(|r| to_float(&spec.column, r.get(&spec.column).unwrap_or_default()))
        .collect::<Result<Vec<f64>>>()?;

    let result = reduce(spec.kind, values);
    log::debug!("aggregate {spec} over {} records = {result:?}", dataset.len());
    Ok(result)
}

fn reduce(kind: AggregateKind, mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let result = match kind {
        AggregateKind::Avg => values.iter().sum::<f64>() / values.len() as f64,
        AggregateKind::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregateKind::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        AggregateKind::Median => {
            values.sort_by(f64::total_cmp);
            let mid = values.len() / 2;
            if values.len() % 2 == 1 {
                values[mid]
            } else {
                (values[mid - 1] + values[mid]) / 2.0
            }
        }
    };
    Some(result)
}

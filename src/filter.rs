//! Row filtering.
//!
//! Numeric columns compare as floats with `=`, `>` and `<`. Text columns
//! only support `=`, compared case-insensitively. Any failure aborts the
//! whole filter; a row is never silently dropped because its value could
//! not be read.

use crate::dsl::{FilterOp, FilterSpec, parse_filter};
use crate::error::{PipelineError, Result};
use crate::kind::{ColumnKind, to_float};
use crate::{Dataset, Record};

/// Parse `expr` against `dataset` and apply it.
pub fn filter(dataset: &Dataset, expr: &str) -> Result<Dataset> {
    let spec = parse_filter(dataset, expr)?;
    apply_filter(dataset, &spec)
}

/// Keep the records matching `spec`, preserving their order.
pub fn apply_filter(dataset: &Dataset, spec: &FilterSpec) -> Result<Dataset> {
    let kind = ColumnKind::infer(dataset, &spec.column);
    log::debug!("filter {spec} on {kind:?} column");

    let mut kept = Vec::new();
    for record in dataset.records() {
        if matches(record, spec, kind)? {
            kept.push(record.clone());
        }
    }

    log::debug!("filter kept {} of {} records", kept.len(), dataset.len());
    Ok(dataset.with_records(kept))
}

fn matches(record: &Record, spec: &FilterSpec, kind: ColumnKind) -> Result<bool> {
    let value = record
        .get(&spec.column)
        .ok_or_else(|| PipelineError::ColumnNotFound(spec.column.clone()))?;

    match kind {
        ColumnKind::Numeric => {
            let lhs = to_float(&spec.column, value)?;
            let rhs = to_float(&spec.column, &spec.operand)?;
            Ok(match spec.op {
                FilterOp::Eq => lhs == rhs,
                FilterOp::Gt => lhs > rhs,
                FilterOp::Lt => lhs < rhs,
            })
        }
        ColumnKind::Text => match spec.op {
            FilterOp::Eq => Ok(value.to_lowercase() == spec.operand.to_lowercase()),
            op => Err(PipelineError::UnsupportedOperator {
                column: spec.column.clone(),
                op: op.symbol(),
            }),
        },
    }
}

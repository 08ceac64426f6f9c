//! Column type inference.

use crate::Dataset;
use crate::error::{PipelineError, Result};

/// How a stage should interpret the values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl ColumnKind {
    /// Infer the kind of `column` from every row of `dataset`.
    pub fn infer(dataset: &Dataset, column: &str) -> Self {
        if is_numeric_column(dataset, column) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}

/// True when the value is an unsigned decimal: digits with at most one `.`,
/// no sign, no exponent, and at least one digit.
pub fn is_numeric_value(value: &str) -> bool {
    let digits = value.replacen('.', "", 1);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// True when every non-empty value of `column` is numeric.
///
/// Empty cells and rows without the column are skipped, so an empty
/// dataset is vacuously numeric.
pub fn is_numeric_column(dataset: &Dataset, column: &str) -> bool {
    dataset
        .records()
        .iter()
        .filter_map(|r| r.get(column))
        .filter(|v| !v.is_empty())
        .all(is_numeric_value)
}

/// Parse a cell as a float the way a numeric stage needs it.
pub(crate) fn to_float(column: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::Conversion {
            column: column.to_string(),
            value: value.to_string(),
        })
}

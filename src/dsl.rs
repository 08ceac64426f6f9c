//! Parsers for the three command-line mini-languages.
//!
//! ```text
//! --where      <column><op><value>        op is one of = > <
//! --order-by   <column>=<asc|desc>
//! --aggregate  <column>=<avg|min|max|median>
//! ```
//!
//! Parsing is split in two steps: `*Spec::parse` checks syntax only, and
//! the `parse_*` functions additionally check that the column exists in a
//! dataset. Nothing here prints; failures come back as [`PipelineError`].

use std::fmt;

use crate::Dataset;
use crate::error::{PipelineError, Result};

/// Relational operator of a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Lt,
}

impl FilterOp {
    /// Operators in the order they are searched for.
    const PRIORITY: [FilterOp; 3] = [FilterOp::Eq, FilterOp::Gt, FilterOp::Lt];

    pub fn symbol(self) -> char {
        match self {
            FilterOp::Eq => '=',
            FilterOp::Gt => '>',
            FilterOp::Lt => '<',
        }
    }
}

/// Parsed `--where` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub column: String,
    pub op: FilterOp,
    pub operand: String,
}

impl FilterSpec {
    /// Parse `column<op>value`.
    ///
    /// The operator is chosen by priority, not position: if the text
    /// contains `=` anywhere it is an equality filter, otherwise `>`,
    /// otherwise `<`. The split happens at the first occurrence of the
    /// chosen operator, so the operand may itself contain operator
    /// characters.
    pub fn parse(expr: &str) -> Result<Self> {
        for op in FilterOp::PRIORITY {
            if let Some((column, operand)) = expr.split_once(op.symbol()) {
                return Ok(Self {
                    column: column.to_string(),
                    op,
                    operand: operand.to_string(),
                });
            }
        }
        Err(PipelineError::parse(expr, "expected one of =, >, <"))
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.op.symbol(), self.operand)
    }
}

/// Sort direction of an `--order-by` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn name(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parsed `--order-by` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub order: SortOrder,
}

impl SortSpec {
    /// Parse `column=asc` or `column=desc`.
    pub fn parse(expr: &str) -> Result<Self> {
        let (column, order) = split_assignment(expr)?;
        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => return Err(PipelineError::UnknownSortOrder(other.to_string())),
        };
        Ok(Self {
            column: column.to_string(),
            order,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.order.name())
    }
}

/// Reduction applied by an `--aggregate` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Avg,
    Min,
    Max,
    Median,
}

impl AggregateKind {
    pub fn name(self) -> &'static str {
        match self {
            AggregateKind::Avg => "avg",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
            AggregateKind::Median => "median",
        }
    }
}

/// Parsed `--aggregate` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSpec {
    pub column: String,
    pub kind: AggregateKind,
}

impl AggregateSpec {
    /// Parse `column=avg|min|max|median`.
    pub fn parse(expr: &str) -> Result<Self> {
        let (column, kind) = split_assignment(expr)?;
        let kind = match kind {
            "avg" => AggregateKind::Avg,
            "min" => AggregateKind::Min,
            "max" => AggregateKind::Max,
            "median" => AggregateKind::Median,
            other => return Err(PipelineError::UnknownAggregateType(other.to_string())),
        };
        Ok(Self {
            column: column.to_string(),
            kind,
        })
    }
}

impl fmt::Display for AggregateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.kind.name())
    }
}

/// Parse a filter expression and check its column against `dataset`.
pub fn parse_filter(dataset: &Dataset, expr: &str) -> Result<FilterSpec> {
    let spec = FilterSpec::parse(expr)?;
    ensure_column(dataset, &spec.column)?;
    Ok(spec)
}

/// Parse a sort expression and check its column against `dataset`.
pub fn parse_sort(dataset: &Dataset, expr: &str) -> Result<SortSpec> {
    let spec = SortSpec::parse(expr)?;
    ensure_column(dataset, &spec.column)?;
    Ok(spec)
}

/// Parse an aggregate expression and check its column against `dataset`.
pub fn parse_aggregate(dataset: &Dataset, expr: &str) -> Result<AggregateSpec> {
    let spec = AggregateSpec::parse(expr)?;
    ensure_column(dataset, &spec.column)?;
    Ok(spec)
}

fn ensure_column(dataset: &Dataset, column: &str) -> Result<()> {
    if dataset.has_column(column) {
        Ok(())
    } else {
        Err(PipelineError::ColumnNotFound(column.to_string()))
    }
}

/// Split `column=value` on the first `=`.
fn split_assignment(expr: &str) -> Result<(&str, &str)> {
    expr.split_once('=')
        .ok_or_else(|| PipelineError::parse(expr, "expected column=value"))
}

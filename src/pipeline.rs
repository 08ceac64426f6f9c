//! Query orchestration.
//!
//! A query runs in a fixed order:
//!
//! ```text
//! dataset -> ORDER BY -> WHERE -> AGGREGATE | table
//! ```
//!
//! Sorting happens before filtering. A stage that fails prints a
//! diagnostic and hands its input through unchanged, so one bad expression
//! never stops the rest of the query.

use std::fmt;
use std::io::{self, Write};

use crate::Dataset;
use crate::aggregate::aggregate;
use crate::error::PipelineError;
use crate::filter::filter;
use crate::render::Table;
use crate::sort::sort;

pub const NO_DATA: &str = "No data to display";
pub const NO_AGGREGATE_DATA: &str =
    "No data for aggregation (the filter may have excluded every row)";

/// The three optional expressions of a query, as typed by the user.
///
/// Empty strings are treated the same as absent expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub order_by: Option<String>,
    pub filter: Option<String>,
    pub aggregate: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order_by = Some(expr.into());
        self
    }

    pub fn filter(mut self, expr: impl Into<String>) -> Self {
        self.filter = Some(expr.into());
        self
    }

    pub fn aggregate(mut self, expr: impl Into<String>) -> Self {
        self.aggregate = Some(expr.into());
        self
    }
}

fn non_empty(expr: &Option<String>) -> Option<&str> {
    expr.as_deref().filter(|e| !e.is_empty())
}

/// A pipeline stage, for reports and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sort,
    Filter,
    Aggregate,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Sort => "sort",
            Stage::Filter => "filter",
            Stage::Aggregate => "aggregate",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage::Sort => "Sort",
            Stage::Filter => "Filter",
            Stage::Aggregate => "Aggregation",
        }
    }
}

/// An error a stage recovered from.
#[derive(Debug)]
pub struct Diagnostic {
    pub stage: Stage,
    pub error: PipelineError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.stage.label(), self.error)
    }
}

/// Record counts for one executed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub input_count: usize,
    pub output_count: usize,
    /// The stage failed and its input was used instead.
    pub fell_back: bool,
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.stage.name(),
            self.input_count,
            self.output_count
        )?;
        if self.fell_back {
            write!(f, " (fell back)")?;
        }
        Ok(())
    }
}

/// What the query finally rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The working dataset was printed as a table of this many rows.
    Table(usize),
    /// The aggregate was computed and printed.
    Aggregate(f64),
    /// No aggregate was requested and no rows were left.
    NoData,
    /// An aggregate was requested but produced no value.
    NoAggregate,
}

/// Everything that happened during a run.
#[derive(Debug)]
pub struct RunReport {
    pub stages: Vec<StageReport>,
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: Outcome,
}

/// Runs a [`Query`] against a dataset and writes the result.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    query: Query,
}

impl Pipeline {
    pub fn new(query: Query) -> Self {
        Self { query }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Execute the query, writing diagnostics and the rendered result to
    /// `out`. Only a failed write is returned as an error.
    pub fn run<W: Write>(&self, dataset: Dataset, out: &mut W) -> io::Result<RunReport> {
        let mut run = Run {
            out,
            stages: Vec::new(),
            diagnostics: Vec::new(),
        };

        let mut current = dataset;
        if let Some(expr) = non_empty(&self.query.order_by) {
            current = run.transform(Stage::Sort, current, |d| sort(d, expr))?;
        }
        if let Some(expr) = non_empty(&self.query.filter) {
            current = run.transform(Stage::Filter, current, |d| filter(d, expr))?;
        }

        let outcome = match non_empty(&self.query.aggregate) {
            Some(expr) => run.aggregate(&current, expr)?,
            None => run.table(&current)?,
        };

        Ok(RunReport {
            stages: run.stages,
            diagnostics: run.diagnostics,
            outcome,
        })
    }
}

/// Mutable state of one [`Pipeline::run`].
struct Run<'a, W: Write> {
    out: &'a mut W,
    stages: Vec<StageReport>,
    diagnostics: Vec<Diagnostic>,
}

impl<W: Write> Run<'_, W> {
    fn transform<F>(&mut self, stage: Stage, input: Dataset, apply: F) -> io::Result<Dataset>
    where
        F: FnOnce(&Dataset) -> crate::Result<Dataset>,
    {
        let input_count = input.len();
        let (output, fell_back) = match apply(&input) {
            Ok(output) => (output, false),
            Err(error) => {
                self.report(stage, error)?;
                (input, true)
            }
        };
        self.stages.push(StageReport {
            stage,
            input_count,
            output_count: output.len(),
            fell_back,
        });
        Ok(output)
    }

    fn aggregate(&mut self, dataset: &Dataset, expr: &str) -> io::Result<Outcome> {
        let (value, fell_back) = match aggregate(dataset, expr) {
            Ok(value) => (value, false),
            Err(error) => {
                self.report(Stage::Aggregate, error)?;
                (None, true)
            }
        };
        self.stages.push(StageReport {
            stage: Stage::Aggregate,
            input_count: dataset.len(),
            output_count: usize::from(value.is_some()),
            fell_back,
        });

        let Some(value) = value else {
            writeln!(self.out, "{NO_AGGREGATE_DATA}")?;
            return Ok(Outcome::NoAggregate);
        };

        writeln!(
            self.out,
            "Table data: [['Aggregation', 'Value'], ['{expr}', {value:?}]]"
        )?;
        let table = Table::new(vec![
            vec!["Aggregation".to_string(), "Value".to_string()],
            vec![expr.to_string(), value.to_string()],
        ]);
        write!(self.out, "{}", table.render())?;
        Ok(Outcome::Aggregate(value))
    }

    fn table(&mut self, dataset: &Dataset) -> io::Result<Outcome> {
        if dataset.is_empty() {
            writeln!(self.out, "{NO_DATA}")?;
            return Ok(Outcome::NoData);
        }
        write!(self.out, "{}", Table::from_dataset(dataset).render())?;
        Ok(Outcome::Table(dataset.len()))
    }

    fn report(&mut self, stage: Stage, error: PipelineError) -> io::Result<()> {
        let diagnostic = Diagnostic { stage, error };
        log::warn!("{diagnostic}; continuing with unchanged input");
        writeln!(self.out, "{diagnostic}")?;
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{column, phones};

    fn run(query: Query) -> (RunReport, String) {
        let mut out = Vec::new();
        let report = Pipeline::new(query).run(phones(), &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plain_table() {
        let (report, out) = run(Query::new());
        assert_eq!(report.outcome, Outcome::Table(3));
        assert!(report.stages.is_empty());
        assert!(out.contains("| Apple   |"));
        assert!(out.contains("| Nokia   |"));
    }

    #[test]
    fn test_sort_then_filter() {
        let (report, out) = run(Query::new().order_by("price=asc").filter("rating>4.0"));
        assert_eq!(report.outcome, Outcome::Table(2));
        assert!(report.diagnostics.is_empty());
        let samsung = out.find("Samsung").unwrap();
        let apple = out.find("Apple").unwrap();
        assert!(samsung < apple);
        assert!(!out.contains("Nokia"));

        let stages: Vec<_> = report.stages.iter().map(|s| s.to_string()).collect();
        assert_eq!(stages, ["sort: 3 -> 3", "filter: 3 -> 2"]);
    }

    #[test]
    fn test_unknown_filter_column_falls_back() {
        let (report, out) = run(Query::new().filter("brand=Apple"));
        assert_eq!(report.outcome, Outcome::Table(3));
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.stages[0].fell_back);
        assert!(out.starts_with("Filter error: Column 'brand' not found in data\n"));
    }

    #[test]
    fn test_text_relational_filter_falls_back_to_all_rows() {
        let (report, out) = run(Query::new().filter("name>M"));
        assert_eq!(report.outcome, Outcome::Table(3));
        assert!(matches!(
            report.diagnostics[0].error,
            PipelineError::UnsupportedOperator { .. }
        ));
        assert!(out.contains("Samsung"));
    }

    #[test]
    fn test_bad_sort_keeps_order_and_still_filters() {
        let (report, out) = run(Query::new().order_by("price=up").filter("price<950"));
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].stage, Stage::Sort);
        assert_eq!(report.outcome, Outcome::Table(2));
        assert!(out.find("Samsung").unwrap() < out.find("Nokia").unwrap());
    }

    #[test]
    fn test_filter_to_nothing_prints_notice() {
        let (report, out) = run(Query::new().filter("price>5000"));
        assert_eq!(report.outcome, Outcome::NoData);
        assert_eq!(out, format!("{NO_DATA}\n"));
    }

    #[test]
    fn test_aggregate_output() {
        let (report, out) = run(Query::new().aggregate("price=median"));
        assert_eq!(report.outcome, Outcome::Aggregate(899.5));
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Table data: [['Aggregation', 'Value'], ['price=median', 899.5]]")
        );
        assert_eq!(lines.next(), Some("+--------------+-------+"));
        assert_eq!(lines.next(), Some("| Aggregation  | Value |"));
        assert!(out.contains("| price=median | 899.5 |"));
    }

    #[test]
    fn test_aggregate_after_filter() {
        let (report, _) = run(Query::new().filter("rating>4.0").aggregate("price=min"));
        assert_eq!(report.outcome, Outcome::Aggregate(899.5));
    }

    #[test]
    fn test_aggregate_over_empty_filter_result() {
        let (report, out) = run(Query::new().filter("price>5000").aggregate("price=avg"));
        assert_eq!(report.outcome, Outcome::NoAggregate);
        assert!(report.diagnostics.is_empty());
        assert_eq!(out, format!("{NO_AGGREGATE_DATA}\n"));
    }

    #[test]
    fn test_bad_aggregate_prints_diagnostic_then_notice() {
        let (report, out) = run(Query::new().aggregate("price=badtype"));
        assert_eq!(report.outcome, Outcome::NoAggregate);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Aggregation error: "));
        assert_eq!(lines[1], NO_AGGREGATE_DATA);
    }

    #[test]
    fn test_empty_expressions_are_ignored() {
        let (report, _) = run(Query::new().order_by("").filter("").aggregate(""));
        assert!(report.stages.is_empty());
        assert_eq!(report.outcome, Outcome::Table(3));
    }

    #[test]
    fn test_input_dataset_is_not_mutated() {
        let d = phones();
        let mut out = Vec::new();
        Pipeline::new(Query::new().order_by("name=desc"))
            .run(d.clone(), &mut out)
            .unwrap();
        assert_eq!(column(&d, "name"), ["Apple", "Samsung", "Nokia"]);
    }
}

//! # csv-pipeline
//!
//! Load a delimited text file, then sort, filter and aggregate it from the
//! command line.
//!
//! ## Overview
//!
//! A query is made of up to three small expressions:
//! - **order by**: `column=asc` or `column=desc`
//! - **where**: `column=value`, `column>value` or `column<value`
//! - **aggregate**: `column=avg`, `min`, `max` or `median`
//!
//! Stages always run in the order sort, filter, aggregate. Whether a column
//! is numeric or text is inferred from its values. A stage that fails
//! reports a diagnostic and passes its input through unchanged.
//!
//! ## Example
//!
//! ```
//! use csv_pipeline::{Pipeline, Query, read_csv};
//!
//! let data = "name,price,rating\n\
//!             Apple,999.99,4.7\n\
//!             Samsung,899.50,4.5\n\
//!             Nokia,600,3.1\n";
//! let dataset = read_csv(data.as_bytes(), b',').unwrap();
//!
//! let mut out = Vec::new();
//! let query = Query::new().order_by("price=asc").filter("rating>4.0");
//! let report = Pipeline::new(query).run(dataset, &mut out).unwrap();
//!
//! assert!(report.diagnostics.is_empty());
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.find("Samsung").unwrap() < out.find("Apple").unwrap());
//! assert!(!out.contains("Nokia"));
//! ```

pub mod aggregate;
pub mod dataset;
pub mod dsl;
pub mod error;
pub mod filter;
pub mod kind;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod sort;

pub use aggregate::{aggregate, apply_aggregate};
pub use dataset::Dataset;
pub use dsl::{
    AggregateKind, AggregateSpec, FilterOp, FilterSpec, SortOrder, SortSpec, parse_aggregate,
    parse_filter, parse_sort,
};
pub use error::{PipelineError, Result};
pub use filter::{apply_filter, filter};
pub use kind::{ColumnKind, is_numeric_column, is_numeric_value};
pub use loader::{delimiter_byte, load_csv, read_csv};
pub use pipeline::{Diagnostic, Outcome, Pipeline, Query, RunReport, Stage, StageReport};
pub use record::Record;
pub use render::{Align, Table};
pub use sort::{apply_sort, sort};

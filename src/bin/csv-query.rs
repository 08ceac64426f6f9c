//! CLI tool to sort, filter and aggregate a delimited file.
//!
//! Usage:
//!   csv-query <file.csv> [--order-by col=asc|desc] [--where col<op>value]
//!             [--aggregate col=avg|min|max|median]

use clap::Parser;
use csv_pipeline::{Pipeline, Query, delimiter_byte, load_csv};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Sort, filter and aggregate a delimited text file.
///
/// Stages always run in this order: --order-by, --where, --aggregate.
#[derive(Parser)]
#[command(name = "csv-query")]
struct Cli {
    /// Path to the delimited input file (first row is the header)
    file: PathBuf,

    /// Filter rows: column=value, column>value or column<value
    #[arg(long = "where", value_name = "EXPR")]
    where_: Option<String>,

    /// Aggregate a column: column=avg|min|max|median
    #[arg(long, value_name = "EXPR")]
    aggregate: Option<String>,

    /// Sort rows: column=asc|desc
    #[arg(long, value_name = "EXPR")]
    order_by: Option<String>,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Show the input path and per-stage record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let delimiter = match delimiter_byte(cli.delimiter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let dataset = match load_csv(&cli.file, delimiter) {
        Ok(dataset) => dataset,
        Err(e) => {
            println!("{e}");
            process::exit(1);
        }
    };
    let input_count = dataset.len();

    let query = Query {
        order_by: cli.order_by,
        filter: cli.where_,
        aggregate: cli.aggregate,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = match Pipeline::new(query).run(dataset, &mut out) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error writing output: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = out.flush() {
        eprintln!("Error writing output: {e}");
        process::exit(1);
    }

    if cli.verbose {
        eprintln!("Input:    {}", cli.file.display());
        eprintln!("Records:  {input_count}");
        for stage in &report.stages {
            eprintln!("Stage:    {stage}");
        }
        eprintln!("Warnings: {}", report.diagnostics.len());
    }
}

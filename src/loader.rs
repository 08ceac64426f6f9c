//! Delimited-file reader.
//!
//! The first row is the header. Every later row becomes a [`Record`]
//! keyed by header name, in file order.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::{Dataset, Record};

/// Load a delimited file from disk.
pub fn load_csv(path: &Path, delimiter: u8) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PipelineError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PipelineError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let dataset = read_csv(file, delimiter)?;
    if dataset.is_empty() {
        return Err(PipelineError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    log::debug!(
        "loaded {} records with columns {:?} from {}",
        dataset.len(),
        dataset.columns(),
        path.display()
    );
    Ok(dataset)
}

/// Parse delimited text from any reader. An input with only a header row
/// yields an empty dataset.
pub fn read_csv<R: Read>(input: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    for h in &headers {
        if !columns.contains(h) {
            columns.push(h.clone());
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(Record::from_pairs(headers.iter().cloned().zip(row.iter())));
    }

    Ok(Dataset::new(columns, records))
}

/// Validate a user-supplied delimiter.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(PipelineError::InvalidDelimiter(delimiter))
    }
}

//! Grid-style text tables.
//!
//! ```text
//! +---------+---------+
//! | name    |   price |
//! +=========+=========+
//! | Apple   |  999.99 |
//! +---------+---------+
//! ```

use crate::Dataset;
use crate::kind::ColumnKind;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A table of already-formatted cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    align: Vec<Align>,
}

impl Table {
    /// A table without a header row; every column left aligned.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: None,
            rows,
            align: Vec::new(),
        }
    }

    /// A table of every record in `dataset`, one column per header.
    /// Numeric columns are right aligned.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let columns = dataset.columns();
        let rows = dataset
            .records()
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| r.get(c).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();
        let align = columns
            .iter()
            .map(|c| align_for(ColumnKind::infer(dataset, c)))
            .collect();

        Self {
            headers: Some(columns.to_vec()),
            rows,
            align,
        }
    }

    /// Render the table, one line per `\n`, with a trailing newline.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut output = String::new();

        output.push_str(&draw_border(&widths, '-'));
        if let Some(headers) = &self.headers {
            output.push_str(&self.draw_row(headers, &widths));
            output.push_str(&draw_border(&widths, '='));
        }
        for row in &self.rows {
            output.push_str(&self.draw_row(row, &widths));
            output.push_str(&draw_border(&widths, '-'));
        }
        output
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in self.headers.iter().chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    fn draw_row(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or_default();
            let cell = match self.align.get(i).copied().unwrap_or(Align::Left) {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            };
            line.push(' ');
            line.push_str(&cell);
            line.push_str(" |");
        }
        line.push('\n');
        line
    }
}

fn draw_border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

/// Alignment matching the inferred kind of a column.
pub fn align_for(kind: ColumnKind) -> Align {
    match kind {
        ColumnKind::Numeric => Align::Right,
        ColumnKind::Text => Align::Left,
    }
}

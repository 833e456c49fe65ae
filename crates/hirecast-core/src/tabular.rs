//! Minimal reader for the numeric CSV files this crate exchanges with the
//! training pipeline (ledger and reference snapshot).
//!
//! Cells are comma separated, surrounding whitespace and double quotes are
//! stripped, blank lines are ignored. No quoted commas.

/// Parsed file: trimmed header names plus raw data lines.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"').trim().to_string())
        .collect()
}

/// Returns `None` for an input with no header line.
pub(crate) fn parse(text: &str) -> Option<Table> {
    let mut lines = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let header = split_cells(lines.next()?);
    let rows = lines.map(split_cells).collect();

    Some(Table { header, rows })
}

/// Parses a finite number; blanks, `nan` and garbage yield `None`.
pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats one row the way the ledger writes it.
pub(crate) fn format_row(values: &[f64]) -> String {
    let mut line = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AnalyzerError;
use crate::record::{RawRecord, SalesRecord};

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Product", "Category", "Price", "Quantity Sold"];

/// Optional column; derived from price and quantity when absent.
pub const TOTAL_SALES_COLUMN: &str = "Total Sales";

/// Row accounting for a successful load, so the menu can report how
/// much of the file the cleaning pass kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub dropped_rows: usize,
}

impl LoadReport {
    pub fn kept_rows(&self) -> usize {
        self.total_rows - self.dropped_rows
    }
}

/// Load and validate a sales dataset from a csv file.
///
/// Either every returned record is fully typed, or the whole load
/// fails; there is no partially-coerced in-between. Rows failing the
/// cleaning pass are dropped and counted in the report.
pub fn load_dataset(path: &Path) -> Result<(Vec<SalesRecord>, LoadReport), AnalyzerError> {
    if !path.is_file() {
        return Err(AnalyzerError::InvalidInput(format!(
            "file not found at '{}'",
            path.display()
        )));
    }
    let is_csv = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(AnalyzerError::InvalidInput(format!(
            "'{}' is not a csv file",
            path.display()
        )));
    }

    let file = File::open(path).map_err(|err| {
        AnalyzerError::InvalidInput(format!("could not open '{}': {err}", path.display()))
    })?;
    // flexible so a truncated row reaches the cleaning pass instead
    // of failing the read
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    // schema check before any row is trusted. an input with no header
    // at all reports every required column as missing.
    let headers = reader
        .headers()
        .map_err(|err| AnalyzerError::InvalidInput(format!("could not read header row: {err}")))?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| (*column).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(AnalyzerError::Schema { missing });
    }
    let total_supplied = headers.iter().any(|header| header == TOTAL_SALES_COLUMN);

    let mut records = Vec::new();
    let mut total_rows = 0usize;
    for result in reader.records() {
        let row = result
            .map_err(|err| AnalyzerError::InvalidInput(format!("unparseable table: {err}")))?;
        // a row carrying more fields than the header means the file is
        // not the table its header claims. a truncated row only loses
        // itself: its absent cells fail the required-value check below.
        if row.len() > headers.len() {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            return Err(AnalyzerError::InvalidInput(format!(
                "unparseable table: line {line} has {} fields, expected {}",
                row.len(),
                headers.len()
            )));
        }
        let raw: RawRecord = row
            .deserialize(Some(&headers))
            .map_err(|err| AnalyzerError::InvalidInput(format!("unparseable table: {err}")))?;
        total_rows += 1;
        if let Some(record) = raw.validate(total_supplied) {
            records.push(record);
        }
    }

    let report = LoadReport {
        total_rows,
        dropped_rows: total_rows - records.len(),
    };
    Ok((records, report))
}

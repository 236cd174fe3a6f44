use thiserror::Error;

// errors which occur during a session; all of them are recoverable,
// the menu reports the cause and keeps running.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyzerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("csv is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("no data loaded")]
    EmptyDataset,
}

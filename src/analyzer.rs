use std::path::Path;

use crate::error::AnalyzerError;
use crate::filters::FilterOptions;
use crate::loader::{load_dataset, LoadReport};
use crate::metrics::Metrics;
use crate::record::SalesRecord;

/// The analysis session: the current dataset and the metrics computed
/// from it. One instance is constructed per run and every operation
/// takes it by reference; there is no other holder of this state.
pub struct Analyzer {
    records: Vec<SalesRecord>,
    metrics: Option<Metrics>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            metrics: None,
        }
    }

    /// Load a dataset from `path`, replacing the current one entirely.
    ///
    /// The old dataset and its metrics are gone before the file is
    /// touched, so a failed reload leaves the session empty rather
    /// than silently holding stale data.
    pub fn load(&mut self, path: &Path) -> Result<LoadReport, AnalyzerError> {
        self.records.clear();
        self.metrics = None;

        let (records, report) = load_dataset(path)?;
        self.records = records;
        self.metrics = Metrics::compute(&self.records);
        Ok(report)
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The metrics snapshot for the current dataset, recomputing if it
    /// has not been cached yet. An empty session has no metrics.
    pub fn compute_metrics(&mut self) -> Result<&Metrics, AnalyzerError> {
        if self.metrics.is_none() {
            self.metrics = Metrics::compute(&self.records);
        }
        self.metrics.as_ref().ok_or(AnalyzerError::EmptyDataset)
    }

    /// A filtered copy of the dataset. Bounds arrive as the raw prompt
    /// text and a bad bound fails here, leaving the dataset untouched.
    pub fn filter(
        &self,
        category: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<SalesRecord>, AnalyzerError> {
        let options = FilterOptions::parse(category, start_date, end_date)?;
        Ok(options.apply(&self.records))
    }
}

use chrono::NaiveDate;

use crate::error::AnalyzerError;
use crate::record::{parse_date, SalesRecord};

/// Optional predicates narrowing a dataset to a view. A `None` means
/// that dimension imposes no constraint at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterOptions {
    /// Build the predicates from raw prompt input.
    ///
    /// Category matching is case-insensitive, so the needle is
    /// lowercased once here. A date bound that fails to parse is an
    /// error, never a silent match-nothing filter.
    pub fn parse(
        category: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<FilterOptions, AnalyzerError> {
        let start_date = match start_date {
            Some(raw) => Some(parse_bound(raw, "start date")?),
            None => None,
        };
        let end_date = match end_date {
            Some(raw) => Some(parse_bound(raw, "end date")?),
            None => None,
        };

        Ok(FilterOptions {
            category: category.map(str::to_lowercase),
            start_date,
            end_date,
        })
    }

    /// Apply every supplied predicate in one ordered scan, returning
    /// the matching records as an owned copy.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        if records.is_empty() {
            return Vec::new();
        }

        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    fn matches(&self, record: &SalesRecord) -> bool {
        if let Some(category) = &self.category {
            if record.category.to_lowercase() != *category {
                return false;
            }
        }
        // bounds are inclusive on both ends
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }
        true
    }
}

fn parse_bound(raw: &str, which: &str) -> Result<NaiveDate, AnalyzerError> {
    parse_date(raw)
        .ok_or_else(|| AnalyzerError::InvalidInput(format!("could not parse {which} '{raw}'")))
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Case table loading and normalization.
//!
//! Reads the wide disease case CSV (one row per region, one column per
//! `{year}-{disease}` pair) and melts it into a [`CaseTable`] of long-form
//! [`CaseRecord`]s. Also answers catalog questions about the loaded table
//! (which years and diseases it covers), pivots a single year into a
//! per-region disease breakdown, and splits one year and disease into
//! per-region shares of the total.

pub mod breakdown;
pub mod normalize;
pub mod share;

use std::collections::BTreeSet;

use disease_map_cases_models::{CaseRecord, Disease};
use disease_map_geography_models::RegionKey;
use thiserror::Error;

/// Errors that can occur while loading a case table.
#[derive(Debug, Error)]
pub enum CaseTableError {
    /// The case file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The mandatory region name column is absent.
    #[error("Missing region column '{expected}' (found columns: {found:?})")]
    MissingIdentifierColumn {
        /// Header that was expected.
        expected: String,
        /// Headers that were present.
        found: Vec<String>,
    },

    /// A value column label could not be split into year and disease.
    #[error("Malformed column label '{label}': {reason}")]
    MalformedColumnLabel {
        /// The offending column label.
        label: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Two value columns resolve to the same year and disease.
    #[error("Column '{label}' duplicates an earlier column for the same year and disease")]
    DuplicateColumn {
        /// The second column label.
        label: String,
    },

    /// Two rows carry the same canonical region name.
    #[error("Region '{region}' appears more than once (line {line})")]
    DuplicateRegion {
        /// Canonical region name.
        region: String,
        /// CSV line of the repeated row.
        line: u64,
    },

    /// A cell is neither empty nor a whole number between zero and
    /// [`MAX_CASE_COUNT`](disease_map_cases_models::MAX_CASE_COUNT).
    #[error("Invalid case count '{value}' for region '{region}' in column '{column}' (line {line})")]
    InvalidCaseCount {
        /// Region the row belongs to.
        region: String,
        /// Column label of the cell.
        column: String,
        /// Raw cell text.
        value: String,
        /// CSV line of the row.
        line: u64,
    },

    /// Summing counts for one year overflowed.
    #[error("Case counts for {year} are too large to total")]
    CountOverflow {
        /// Year being totalled.
        year: i32,
    },
}

impl From<disease_map_cases_models::MalformedLabelError> for CaseTableError {
    fn from(e: disease_map_cases_models::MalformedLabelError) -> Self {
        Self::MalformedColumnLabel {
            label: e.label,
            reason: e.reason,
        }
    }
}

/// A normalized case table: exactly one record per region, year, and
/// disease present in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseTable {
    records: Vec<CaseRecord>,
}

impl CaseTable {
    /// Wraps already-normalized records.
    #[must_use]
    pub const fn new(records: Vec<CaseRecord>) -> Self {
        Self { records }
    }

    /// Returns all records.
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Consumes the table, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<CaseRecord> {
        self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Earliest and latest year, or `None` for an empty table.
    #[must_use]
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Distinct diseases in order of first appearance.
    #[must_use]
    pub fn diseases(&self) -> Vec<Disease> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.disease.clone()))
            .map(|r| r.disease.clone())
            .collect()
    }

    /// Whether any record refers to `disease`.
    #[must_use]
    pub fn has_disease(&self, disease: &Disease) -> bool {
        self.records.iter().any(|r| &r.disease == disease)
    }

    /// Distinct canonical region keys in order of first appearance.
    #[must_use]
    pub fn region_keys(&self) -> Vec<RegionKey> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(CaseRecord::key)
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, year: i32, disease: Disease, cases: Option<u64>) -> CaseRecord {
        CaseRecord {
            region_name: region.to_string(),
            short_form: None,
            year,
            disease,
            cases,
        }
    }

    fn sample() -> CaseTable {
        CaseTable::new(vec![
            record("Goa", 2009, Disease::Hydrocele, Some(100)),
            record("Goa", 2008, Disease::Lymphoedema, Some(191)),
            record("Kerala", 2011, Disease::Hydrocele, None),
            record("Kerala", 2008, Disease::Lymphoedema, Some(10_886)),
        ])
    }

    #[test]
    fn years_are_sorted_and_distinct() {
        assert_eq!(sample().years(), vec![2008, 2009, 2011]);
    }

    #[test]
    fn year_bounds_span_table() {
        assert_eq!(sample().year_bounds(), Some((2008, 2011)));
        assert_eq!(CaseTable::default().year_bounds(), None);
    }

    #[test]
    fn diseases_keep_first_appearance_order() {
        assert_eq!(
            sample().diseases(),
            vec![Disease::Hydrocele, Disease::Lymphoedema]
        );
    }

    #[test]
    fn has_disease_matches_exact_token() {
        let table = sample();
        assert!(table.has_disease(&Disease::Hydrocele));
        assert!(!table.has_disease(&Disease::from("Malaria")));
    }

    #[test]
    fn region_keys_are_distinct() {
        let keys: Vec<String> = sample()
            .region_keys()
            .into_iter()
            .map(RegionKey::into_string)
            .collect();
        assert_eq!(keys, vec!["Goa", "Kerala"]);
    }
}

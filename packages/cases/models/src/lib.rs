#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disease case record types.
//!
//! The case table arrives in wide form, one column per `{year}-{disease}`
//! pair. These types describe the long form it is normalized into: one
//! [`CaseRecord`] per region, year, and disease.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use disease_map_geography_models::RegionKey;
use serde::{Deserialize, Serialize};

/// Largest case count a single cell may hold.
///
/// Every count up to this value is exact as an `f64`, so percentages and
/// float-formatted cells never round a count.
pub const MAX_CASE_COUNT: u64 = (1 << 53) - 1;

/// A disease tracked by the case table.
///
/// The two diseases the dashboard was built around are named variants;
/// any other column token is carried verbatim in [`Disease::Other`].
/// Tokens are compared exactly, so `"hydrocele"` is not [`Disease::Hydrocele`].
///
/// Build values with [`Disease::from`], which maps known tokens to their
/// named variant. Equality, ordering and hashing go through the token, so
/// a hand-built `Disease::Other("Hydrocele".into())` still equals
/// [`Disease::Hydrocele`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Disease {
    /// Lymphatic filariasis presenting as limb swelling.
    Lymphoedema,
    /// Lymphatic filariasis presenting as scrotal fluid buildup.
    Hydrocele,
    /// Any other disease token found in the table.
    Other(String),
}

impl Disease {
    /// Diseases with a dedicated variant.
    pub const KNOWN: &[Self] = &[Self::Lymphoedema, Self::Hydrocele];

    /// Returns the column token for this disease.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lymphoedema => "Lymphoedema",
            Self::Hydrocele => "Hydrocele",
            Self::Other(token) => token,
        }
    }

    /// Short description shown alongside the map, when one is known.
    #[must_use]
    pub const fn description(&self) -> Option<&'static str> {
        match self {
            Self::Lymphoedema => Some(
                "Lymphedema is a chronic condition that causes swelling in the body's tissues due to a buildup of lymph fluid",
            ),
            Self::Hydrocele => Some(
                "A hydrocele is a buildup of fluid in the scrotum, the pouch of skin that holds the testicles",
            ),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for Disease {
    fn from(token: &str) -> Self {
        match token {
            "Lymphoedema" => Self::Lymphoedema,
            "Hydrocele" => Self::Hydrocele,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Disease {
    fn from(token: String) -> Self {
        match token.as_str() {
            "Lymphoedema" => Self::Lymphoedema,
            "Hydrocele" => Self::Hydrocele,
            _ => Self::Other(token),
        }
    }
}

impl From<Disease> for String {
    fn from(disease: Disease) -> Self {
        match disease {
            Disease::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl PartialEq for Disease {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Disease {}

impl PartialOrd for Disease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Disease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Disease {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value column label split into its year and disease.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnLabel {
    /// Leftmost token of the label.
    pub year: i32,
    /// Everything after the first separator.
    pub disease: Disease,
}

impl ColumnLabel {
    /// Splits `"{year}{separator}{disease}"` on the first separator.
    ///
    /// The disease may itself contain the separator; only the first
    /// occurrence splits.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedLabelError`] if the label has no separator, the
    /// year token is not an integer, or the disease token is empty.
    pub fn parse(label: &str, separator: &str) -> Result<Self, MalformedLabelError> {
        let malformed = |reason| MalformedLabelError {
            label: label.to_string(),
            reason,
        };

        let (year, disease) = label
            .split_once(separator)
            .ok_or_else(|| malformed("no year/disease separator"))?;

        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| malformed("year token is not an integer"))?;

        let disease = disease.trim();
        if disease.is_empty() {
            return Err(malformed("disease token is empty"));
        }

        Ok(Self {
            year,
            disease: Disease::from(disease),
        })
    }
}

/// Error returned when a value column label cannot be split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLabelError {
    /// The offending column label.
    pub label: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl fmt::Display for MalformedLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed column label '{}': {}", self.label, self.reason)
    }
}

impl std::error::Error for MalformedLabelError {}

/// One region's case count for one year and disease.
///
/// `cases` is `None` when the table cell was empty. Aggregation treats
/// that as zero, but the distinction is kept so the map can tell
/// "reported zero" from "not reported".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Canonical region name.
    pub region_name: String,
    /// Abbreviated region name, if the table has one.
    pub short_form: Option<String>,
    /// Reporting year.
    pub year: i32,
    /// Disease the count refers to.
    pub disease: Disease,
    /// Number of cases, or `None` if the cell was empty.
    pub cases: Option<u64>,
}

impl CaseRecord {
    /// Returns the join key for this record's region.
    #[must_use]
    pub fn key(&self) -> RegionKey {
        RegionKey::canonical(&self.region_name)
    }

    /// Case count with missing values filled as zero.
    #[must_use]
    pub fn cases_or_zero(&self) -> u64 {
        self.cases.unwrap_or(0)
    }
}

/// One region's case counts for every disease in a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBreakdown {
    /// Canonical region name.
    pub region_name: String,
    /// Counts per disease, in the table's disease order.
    pub counts: Vec<DiseaseCount>,
}

/// Case count for one disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseCount {
    /// Disease the count refers to.
    pub disease: Disease,
    /// Number of cases, zero when not reported.
    pub cases: u64,
}

/// One region's slice of a year's total for a single disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionShare {
    /// Canonical region name.
    pub region_name: String,
    /// Short identifier, when the table has one.
    pub short_form: Option<String>,
    /// Number of cases, zero when not reported.
    pub cases: u64,
    /// Whether the table had a value for this region.
    pub reported: bool,
    /// Share of the year's total, in percent, rounded to two decimals.
    pub percent: f64,
}

/// Column layout of the wide case table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TableLayout {
    /// Header of the mandatory region name column.
    pub region_column: String,
    /// Other headers accepted for the region name column.
    pub region_column_aliases: Vec<String>,
    /// Header of the optional short-form column.
    pub short_form_column: String,
    /// Separator between year and disease in value column labels.
    pub label_separator: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            region_column: "States/UTs".to_string(),
            region_column_aliases: vec!["State/UT".to_string()],
            short_form_column: "Short Form".to_string(),
            label_separator: "-".to_string(),
        }
    }
}

impl TableLayout {
    /// Whether `header` names the region column or one of its aliases.
    #[must_use]
    pub fn is_region_column(&self, header: &str) -> bool {
        header == self.region_column || self.region_column_aliases.iter().any(|a| a == header)
    }
}

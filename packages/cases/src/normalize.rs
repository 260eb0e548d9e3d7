//! Wide-to-long normalization of the case table.
//!
//! The header row names one region column (plus an optional short-form
//! column); every other column is a `{year}-{disease}` value column. Each
//! row is melted into one [`CaseRecord`] per value column.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use disease_map_cases_models::{CaseRecord, ColumnLabel, MAX_CASE_COUNT, TableLayout};
use disease_map_geography_models::RegionKey;

use crate::{CaseTable, CaseTableError};

/// Cell spellings treated as "not reported".
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null"];

/// Resolved positions of the identifier and value columns.
struct ColumnMap {
    region: usize,
    short_form: Option<usize>,
    values: Vec<(usize, String, ColumnLabel)>,
}

/// Reads and normalizes a case table file.
///
/// The file handle is held only while parsing.
///
/// # Errors
///
/// Returns [`CaseTableError`] if the file cannot be read or the table is
/// malformed (see [`parse_case_table`]).
pub fn load_case_table(path: &Path, layout: &TableLayout) -> Result<CaseTable, CaseTableError> {
    let file = std::fs::File::open(path).map_err(|e| CaseTableError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let table = parse_case_table(file, layout)?;
    log::info!(
        "Loaded {} case records from {}",
        table.len(),
        path.display()
    );

    Ok(table)
}

/// Normalizes a wide case table from any reader (a file or an uploaded
/// buffer).
///
/// # Errors
///
/// Returns [`CaseTableError::MissingIdentifierColumn`] if no region column
/// is present, [`CaseTableError::MalformedColumnLabel`] for a value column
/// that does not split into year and disease,
/// [`CaseTableError::DuplicateColumn`] / [`CaseTableError::DuplicateRegion`]
/// when a (region, year, disease) tuple would repeat, and
/// [`CaseTableError::InvalidCaseCount`] for a non-numeric cell.
pub fn parse_case_table(
    reader: impl Read,
    layout: &TableLayout,
) -> Result<CaseTable, CaseTableError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = map_columns(&headers, layout)?;
    log::debug!(
        "Case table has {} value columns (short form column: {})",
        columns.values.len(),
        columns.short_form.is_some()
    );

    let mut records = Vec::new();
    let mut seen_regions = BTreeMap::<RegionKey, u64>::new();

    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);

        let key = RegionKey::canonical(row.get(columns.region).unwrap_or_default());
        if key.as_str().is_empty() {
            log::debug!("Skipping row without a region name (line {line})");
            continue;
        }
        if seen_regions.insert(key.clone(), line).is_some() {
            return Err(CaseTableError::DuplicateRegion {
                region: key.into_string(),
                line,
            });
        }

        let short_form = columns
            .short_form
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);

        for (idx, header, label) in &columns.values {
            let cell = row.get(*idx).unwrap_or_default();
            let cases = parse_count(cell).ok_or_else(|| CaseTableError::InvalidCaseCount {
                region: key.to_string(),
                column: header.clone(),
                value: cell.to_string(),
                line,
            })?;

            records.push(CaseRecord {
                region_name: key.to_string(),
                short_form: short_form.clone(),
                year: label.year,
                disease: label.disease.clone(),
                cases,
            });
        }
    }

    Ok(CaseTable::new(records))
}

fn map_columns(
    headers: &csv::StringRecord,
    layout: &TableLayout,
) -> Result<ColumnMap, CaseTableError> {
    let region = headers
        .iter()
        .position(|h| layout.is_region_column(h.trim()))
        .ok_or_else(|| CaseTableError::MissingIdentifierColumn {
            expected: layout.region_column.clone(),
            found: headers.iter().map(ToString::to_string).collect(),
        })?;

    let short_form = headers
        .iter()
        .enumerate()
        .position(|(idx, h)| idx != region && h.trim() == layout.short_form_column);

    let mut values = Vec::new();
    let mut seen_labels = BTreeSet::new();

    for (idx, raw) in headers.iter().enumerate() {
        if idx == region || Some(idx) == short_form {
            continue;
        }

        let header = raw.trim();
        let label = ColumnLabel::parse(header, &layout.label_separator)?;
        if !seen_labels.insert(label.clone()) {
            return Err(CaseTableError::DuplicateColumn {
                label: header.to_string(),
            });
        }
        values.push((idx, header.to_string(), label));
    }

    Ok(ColumnMap {
        region,
        short_form,
        values,
    })
}

/// Parses one cell. `Some(None)` is a missing value, `None` is garbage.
///
/// Whole-number floats (`"191.0"`) are accepted since spreadsheet exports
/// write them for columns that contain gaps. Counts above
/// [`MAX_CASE_COUNT`] are rejected in either spelling.
#[allow(
    clippy::option_option,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn parse_count(cell: &str) -> Option<Option<u64>> {
    let cell = cell.trim();
    if MISSING_MARKERS.contains(&cell) {
        return Some(None);
    }
    if let Ok(n) = cell.parse::<u64>() {
        return (n <= MAX_CASE_COUNT).then_some(Some(n));
    }

    let value = cell.parse::<f64>().ok()?;
    if value.is_finite()
        && value >= 0.0
        && value.fract() == 0.0
        && value <= MAX_CASE_COUNT as f64
    {
        Some(Some(value as u64))
    } else {
        None
    }
}

//! Text shown on and around the map.
//!
//! These strings are part of the renderer contract and are compared
//! verbatim in tests, so changes here are breaking.

use disease_map_cases_models::Disease;
use disease_map_choropleth_models::ValueMode;

/// Formats a count with comma thousands separators (`1234567` ->
/// `"1,234,567"`).
#[must_use]
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Map title, e.g. `"Hydrocele Cases in 2008 - Total Cases: 372,828"`.
#[must_use]
pub fn title(disease: &Disease, year: i32, total_cases: u64) -> String {
    format!(
        "{disease} Cases in {year} - Total Cases: {}",
        thousands(total_cases)
    )
}

/// Hover text for a region.
///
/// Absolute mode: `"Goa: 191 cases"`. Percent mode: `"Goa: 12.50%"`.
#[must_use]
pub fn hover_text(name: &str, cases: u64, percent: f64, mode: ValueMode) -> String {
    match mode {
        ValueMode::Absolute => format!("{name}: {cases} cases"),
        ValueMode::Percent => format!("{name}: {percent:.2}%"),
    }
}

/// On-map label for percent mode, name above percentage.
#[must_use]
pub fn label_text(name: &str, percent: f64) -> String {
    format!("{name}\n{percent:.2}%")
}

//! Per-region metrics and totals.

use disease_map_cases_models::Disease;
use disease_map_choropleth_models::{AggregatedResult, JoinedRegion, RegionMetric, ValueMode};

use crate::{ChoroplethError, format};

/// Computes totals, percentages and hover text for one joined year.
///
/// Region order follows `joined`. A zero total is not an error: every
/// region then gets `percent = 0.0`.
///
/// # Errors
///
/// Returns [`ChoroplethError::TotalOverflow`] if the region counts do not
/// fit in a `u64` total.
pub fn aggregate(
    joined: &[JoinedRegion<'_>],
    year: i32,
    disease: &Disease,
    mode: ValueMode,
) -> Result<AggregatedResult, ChoroplethError> {
    let total_cases = joined
        .iter()
        .try_fold(0_u64, |total, r| total.checked_add(r.cases))
        .ok_or_else(|| ChoroplethError::TotalOverflow {
            year,
            disease: disease.clone(),
        })?;

    let regions = joined
        .iter()
        .map(|region| {
            let percent = percent_of(region.cases, total_cases);
            let name = region.short_form.as_deref().unwrap_or(&region.region_name);
            RegionMetric {
                region_name: region.region_name.clone(),
                short_form: region.short_form.clone(),
                cases: region.cases,
                reported: region.reported,
                percent,
                hover_text: format::hover_text(name, region.cases, percent, mode),
            }
        })
        .collect();

    Ok(AggregatedResult {
        year,
        disease: disease.clone(),
        mode,
        total_cases,
        regions,
    })
}

/// `cases` as a percentage of `total`, rounded to two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_of(cases: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(cases as f64 * 100.0 / total as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Per-region shares of one year's total for a single disease.
//!
//! Works on the case table alone, so regions the boundary file does not
//! cover are still listed.

use std::collections::BTreeMap;

use disease_map_cases_models::{CaseRecord, Disease, RegionShare};
use disease_map_geography_models::RegionKey;

use crate::CaseTableError;

/// Lists every region with a `disease` record for `year`, in order of
/// first appearance, with its share of the total.
///
/// Missing cells count as zero. A zero total gives every region
/// `percent = 0.0`.
///
/// # Errors
///
/// Returns [`CaseTableError::CountOverflow`] if the total overflows.
#[allow(clippy::cast_precision_loss)]
pub fn disease_share(
    records: &[CaseRecord],
    year: i32,
    disease: &Disease,
) -> Result<Vec<RegionShare>, CaseTableError> {
    let mut order: Vec<RegionKey> = Vec::new();
    let mut by_region: BTreeMap<RegionKey, RegionShare> = BTreeMap::new();
    let mut total: u64 = 0;

    for record in records
        .iter()
        .filter(|r| r.year == year && &r.disease == disease)
    {
        let cases = record.cases_or_zero();
        total = total
            .checked_add(cases)
            .ok_or(CaseTableError::CountOverflow { year })?;

        let key = record.key();
        if let Some(share) = by_region.get_mut(&key) {
            share.cases += cases;
            share.reported |= record.cases.is_some();
            continue;
        }
        order.push(key.clone());
        by_region.insert(
            key,
            RegionShare {
                region_name: record.key().into_string(),
                short_form: record.short_form.clone(),
                cases,
                reported: record.cases.is_some(),
                percent: 0.0,
            },
        );
    }

    Ok(order
        .iter()
        .filter_map(|key| by_region.remove(key))
        .map(|mut share| {
            if total > 0 {
                share.percent = (share.cases as f64 * 10_000.0 / total as f64).round() / 100.0;
            }
            share
        })
        .collect())
}

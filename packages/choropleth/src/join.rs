//! Left join of geometry regions with case records.
//!
//! Geometry is the anchor: every region in the boundary file yields one
//! [`JoinedRegion`], whether or not the case table mentions it. Case
//! records for regions with no geometry are dropped. Keys on both sides
//! are [`RegionKey`]s, so names match after trimming and nothing else.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use disease_map_cases_models::{CaseRecord, Disease};
use disease_map_choropleth_models::JoinedRegion;
use disease_map_geography_models::{RegionGeometry, RegionKey};

use crate::ChoroplethError;

/// Fails with [`ChoroplethError::UnknownDisease`] unless some record
/// refers to `disease`.
///
/// # Errors
///
/// Returns [`ChoroplethError::UnknownDisease`] listing the diseases that
/// are present.
pub fn ensure_known_disease(
    records: &[CaseRecord],
    disease: &Disease,
) -> Result<(), ChoroplethError> {
    if records.iter().any(|r| &r.disease == disease) {
        return Ok(());
    }

    let mut known: Vec<Disease> = Vec::new();
    for record in records {
        if !known.contains(&record.disease) {
            known.push(record.disease.clone());
        }
    }

    Err(ChoroplethError::UnknownDisease {
        disease: disease.clone(),
        known,
    })
}

/// Joins `geometries` with the records for exactly `year` and `disease`.
///
/// The output has one entry per geometry, in geometry order. Regions
/// without a matching record (or with an empty cell) get `cases = 0`.
///
/// # Errors
///
/// * [`ChoroplethError::EmptyJoinResult`] if `geometries` is empty.
/// * [`ChoroplethError::UnknownDisease`] if no record has `disease`.
/// * [`ChoroplethError::AmbiguousJoin`] if two records for the
///   requested year and disease share a canonical region name.
pub fn join<'a>(
    geometries: &'a [RegionGeometry],
    records: &[CaseRecord],
    year: i32,
    disease: &Disease,
) -> Result<Vec<JoinedRegion<'a>>, ChoroplethError> {
    ensure_known_disease(records, disease)?;
    join_known(geometries, records, year, disease)
}

/// [`join`] without the disease check, for callers that already ran
/// [`ensure_known_disease`] on the same records.
///
/// # Errors
///
/// * [`ChoroplethError::EmptyJoinResult`] if `geometries` is empty.
/// * [`ChoroplethError::AmbiguousJoin`] if two records for the
///   requested year and disease share a canonical region name.
pub fn join_known<'a>(
    geometries: &'a [RegionGeometry],
    records: &[CaseRecord],
    year: i32,
    disease: &Disease,
) -> Result<Vec<JoinedRegion<'a>>, ChoroplethError> {
    if geometries.is_empty() {
        return Err(ChoroplethError::EmptyJoinResult);
    }

    let mut by_region: BTreeMap<RegionKey, &CaseRecord> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| r.year == year && &r.disease == disease)
    {
        match by_region.entry(record.key()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(slot) => {
                return Err(ChoroplethError::AmbiguousJoin {
                    region: slot.key().to_string(),
                    year,
                    disease: disease.clone(),
                });
            }
        }
    }

    let joined: Vec<JoinedRegion<'a>> = geometries
        .iter()
        .map(|geometry| {
            let matched = by_region.get(&geometry.key()).copied();
            JoinedRegion {
                region_name: geometry.region_name.clone(),
                short_form: matched.and_then(|r| r.short_form.clone()),
                cases: matched.map_or(0, CaseRecord::cases_or_zero),
                reported: matched.is_some_and(|r| r.cases.is_some()),
                geometry,
            }
        })
        .collect();

    log::debug!(
        "Joined {disease} {year}: {} geometry regions, {} case records, {} reported",
        geometries.len(),
        by_region.len(),
        joined.iter().filter(|j| j.reported).count()
    );

    Ok(joined)
}

//! Multi-year batches for side-by-side comparison.
//!
//! Each year is joined and aggregated on its own; no state is shared
//! between years. A failure in any year fails the whole batch and names
//! the year, so callers never receive a partial set of maps.

use std::collections::BTreeSet;

use disease_map_cases_models::{CaseRecord, Disease};
use disease_map_choropleth_models::{AggregatedResult, ValueMode, YearRange};
use disease_map_geography_models::RegionGeometry;

use crate::ChoroplethError;
use crate::aggregate::aggregate;
use crate::join::{ensure_known_disease, join_known};

/// Year grid shown by the comparison view when no range is chosen.
pub const DEFAULT_COMPARISON_YEARS: [i32; 4] = [2008, 2009, 2010, 2011];

/// Picks up to `count` evenly spaced years from `range`, always
/// including both endpoints when `count >= 2`.
///
/// A range shorter than `count` is returned whole.
///
/// # Errors
///
/// Returns [`ChoroplethError::InvalidYearRange`] if the range ends before
/// it starts.
pub fn select_comparison_years(
    range: YearRange,
    count: usize,
) -> Result<Vec<i32>, ChoroplethError> {
    if range.start > range.end {
        return Err(ChoroplethError::InvalidYearRange {
            start: range.start,
            end: range.end,
        });
    }

    let last = u128::from(range.end.abs_diff(range.start));
    let wanted = count as u128;
    if wanted > last {
        // The range holds `last + 1 <= count` years.
        return Ok((range.start..=range.end).collect());
    }
    if count <= 1 {
        return Ok(if count == 0 { Vec::new() } else { vec![range.start] });
    }

    let steps = wanted - 1;
    Ok((0..wanted)
        .map(|i| {
            let offset = (i * last + steps / 2) / steps;
            u32::try_from(offset).map_or(range.end, |o| range.start.saturating_add_unsigned(o))
        })
        .collect())
}

/// Builds one [`AggregatedResult`] per requested year, in request order.
///
/// Years with no data for `disease` come back zero-filled rather than
/// omitted.
///
/// # Errors
///
/// * [`ChoroplethError::DuplicateYear`] if a year is requested twice.
/// * [`ChoroplethError::UnknownDisease`] if no record has `disease`.
/// * [`ChoroplethError::Batch`] wrapping the first year that failed.
pub fn build(
    geometries: &[RegionGeometry],
    records: &[CaseRecord],
    years: &[i32],
    disease: &Disease,
    mode: ValueMode,
) -> Result<Vec<AggregatedResult>, ChoroplethError> {
    validate(records, years, disease)?;

    let results = years
        .iter()
        .map(|&year| build_year(geometries, records, year, disease, mode))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Built {disease} comparison for {} years", results.len());
    Ok(results)
}

/// Same as [`build`], with years processed on the `rayon` thread pool.
///
/// Output order and contents are identical to [`build`].
///
/// # Errors
///
/// See [`build`]. When several years fail, which one is reported is
/// unspecified.
#[cfg(feature = "parallel")]
pub fn build_parallel(
    geometries: &[RegionGeometry],
    records: &[CaseRecord],
    years: &[i32],
    disease: &Disease,
    mode: ValueMode,
) -> Result<Vec<AggregatedResult>, ChoroplethError> {
    use rayon::prelude::*;

    validate(records, years, disease)?;

    let results = years
        .par_iter()
        .map(|&year| build_year(geometries, records, year, disease, mode))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Built {disease} comparison for {} years in parallel",
        results.len()
    );
    Ok(results)
}

fn validate(
    records: &[CaseRecord],
    years: &[i32],
    disease: &Disease,
) -> Result<(), ChoroplethError> {
    let mut seen = BTreeSet::new();
    if let Some(&year) = years.iter().find(|&&year| !seen.insert(year)) {
        return Err(ChoroplethError::DuplicateYear { year });
    }
    ensure_known_disease(records, disease)
}

fn build_year(
    geometries: &[RegionGeometry],
    records: &[CaseRecord],
    year: i32,
    disease: &Disease,
    mode: ValueMode,
) -> Result<AggregatedResult, ChoroplethError> {
    join_known(geometries, records, year, disease)
        .and_then(|joined| aggregate(&joined, year, disease, mode))
        .map_err(|e| ChoroplethError::Batch {
            year,
            disease: disease.clone(),
            source: Box::new(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, region};

    fn geometries() -> Vec<RegionGeometry> {
        vec![
            region("Goa", 73.0, 15.0),
            region("Kerala", 76.0, 9.0),
            region("Ladakh", 77.0, 34.0),
        ]
    }

    fn records() -> Vec<CaseRecord> {
        vec![
            record("Goa", 2008, "Hydrocele", Some(100)),
            record("Kerala", 2008, "Hydrocele", Some(413)),
            record("Goa", 2010, "Hydrocele", Some(80)),
            record("Kerala", 2010, "Hydrocele", Some(400)),
            record("Goa", 2008, "Lymphoedema", Some(191)),
        ]
    }

    #[test]
    fn empty_years_are_zero_filled_not_omitted() {
        let years = [2008, 2009, 2010, 2011];
        let results = build(
            &geometries(),
            &records(),
            &years,
            &Disease::Hydrocele,
            ValueMode::Percent,
        )
        .unwrap();

        assert_eq!(results.len(), 4);
        let got: Vec<i32> = results.iter().map(|r| r.year).collect();
        assert_eq!(got, years);

        for empty in [&results[1], &results[3]] {
            assert_eq!(empty.total_cases, 0);
            assert_eq!(empty.regions.len(), 3);
            assert!(empty.regions.iter().all(|r| r.percent.abs() < f64::EPSILON));
        }
        assert_eq!(results[0].total_cases, 513);
        assert_eq!(results[2].total_cases, 480);
    }

    #[test]
    fn keeps_request_order() {
        let results = build(
            &geometries(),
            &records(),
            &[2010, 2008],
            &Disease::Hydrocele,
            ValueMode::Absolute,
        )
        .unwrap();
        assert_eq!(results[0].year, 2010);
        assert_eq!(results[1].year, 2008);
    }

    #[test]
    fn years_are_independent() {
        let batch = build(
            &geometries(),
            &records(),
            &[2008, 2010],
            &Disease::Hydrocele,
            ValueMode::Absolute,
        )
        .unwrap();
        let single = build(
            &geometries(),
            &records(),
            &[2010],
            &Disease::Hydrocele,
            ValueMode::Absolute,
        )
        .unwrap();
        assert_eq!(batch[1], single[0]);
    }

    #[test]
    fn rejects_duplicate_years() {
        let err = build(
            &geometries(),
            &records(),
            &[2008, 2009, 2008],
            &Disease::Hydrocele,
            ValueMode::Absolute,
        )
        .unwrap_err();
        assert!(matches!(err, ChoroplethError::DuplicateYear { year: 2008 }));
    }

    #[test]
    fn unknown_disease_fails_before_any_year() {
        let err = build(
            &geometries(),
            &records(),
            &[2008],
            &Disease::from("Malaria"),
            ValueMode::Absolute,
        )
        .unwrap_err();
        assert!(matches!(err, ChoroplethError::UnknownDisease { .. }));
    }

    #[test]
    fn failing_year_fails_whole_batch_and_is_named() {
        let mut records = records();
        records.push(record("Goa ", 2010, "Hydrocele", Some(1)));

        let err = build(
            &geometries(),
            &records,
            &[2008, 2010, 2011],
            &Disease::Hydrocele,
            ValueMode::Absolute,
        )
        .unwrap_err();
        match err {
            ChoroplethError::Batch {
                year,
                disease,
                source,
            } => {
                assert_eq!(year, 2010);
                assert_eq!(disease, Disease::Hydrocele);
                assert!(matches!(*source, ChoroplethError::AmbiguousJoin { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_geometry_fails_batch() {
        let err = build(
            &[],
            &records(),
            &[2008],
            &Disease::Hydrocele,
            ValueMode::Absolute,
        )
        .unwrap_err();
        assert!(matches!(err, ChoroplethError::Batch { year: 2008, .. }));
    }

    #[test]
    fn selects_evenly_spaced_years() {
        let range = YearRange {
            start: 2000,
            end: 2012,
        };
        assert_eq!(
            select_comparison_years(range, 4).unwrap(),
            vec![2000, 2004, 2008, 2012]
        );
    }

    #[test]
    fn short_range_is_returned_whole() {
        let range = YearRange {
            start: 2008,
            end: 2009,
        };
        assert_eq!(select_comparison_years(range, 4).unwrap(), vec![2008, 2009]);
    }

    #[test]
    fn selected_years_are_distinct_and_ascending() {
        let range = YearRange {
            start: 2008,
            end: 2012,
        };
        let years = select_comparison_years(range, 4).unwrap();
        assert_eq!(years.len(), 4);
        assert!(years.windows(2).all(|w| w[0] < w[1]), "{years:?}");
        assert_eq!(years.first(), Some(&2008));
        assert_eq!(years.last(), Some(&2012));
    }

    #[test]
    fn wide_range_is_sampled_without_listing_every_year() {
        let range = YearRange {
            start: -2_000_000_000,
            end: 2_000_000_000,
        };
        assert_eq!(
            select_comparison_years(range, 4).unwrap(),
            vec![-2_000_000_000, -666_666_667, 666_666_667, 2_000_000_000]
        );
    }

    #[test]
    fn full_i32_range_keeps_endpoints() {
        let range = YearRange {
            start: i32::MIN,
            end: i32::MAX,
        };
        let years = select_comparison_years(range, 3).unwrap();
        assert_eq!(years, vec![i32::MIN, 0, i32::MAX]);
    }

    #[test]
    fn zero_and_one_year_requests() {
        let range = YearRange {
            start: 2008,
            end: 2011,
        };
        assert!(select_comparison_years(range, 0).unwrap().is_empty());
        assert_eq!(select_comparison_years(range, 1).unwrap(), vec![2008]);
    }

    #[test]
    fn overflowing_year_fails_batch() {
        let records = vec![
            record("Goa", 2008, "Hydrocele", Some(u64::MAX)),
            record("Kerala", 2008, "Hydrocele", Some(1)),
        ];
        let err = build(
            &geometries(),
            &records,
            &[2008],
            &Disease::Hydrocele,
            ValueMode::Absolute,
        )
        .unwrap_err();
        match err {
            ChoroplethError::Batch { year, source, .. } => {
                assert_eq!(year, 2008);
                assert!(matches!(*source, ChoroplethError::TotalOverflow { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let range = YearRange {
            start: 2012,
            end: 2008,
        };
        assert!(matches!(
            select_comparison_years(range, 4),
            Err(ChoroplethError::InvalidYearRange {
                start: 2012,
                end: 2008
            })
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let years = [2008, 2009, 2010, 2011];
        let sequential = build(
            &geometries(),
            &records(),
            &years,
            &Disease::Hydrocele,
            ValueMode::Percent,
        )
        .unwrap();
        let parallel = build_parallel(
            &geometries(),
            &records(),
            &years,
            &Disease::Hydrocele,
            ValueMode::Percent,
        )
        .unwrap();
        assert_eq!(sequential, parallel);
    }
}

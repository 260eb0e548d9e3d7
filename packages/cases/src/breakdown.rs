//! Per-region disease breakdown for a single year.

use std::collections::BTreeMap;

use disease_map_cases_models::{CaseRecord, Disease, DiseaseCount, RegionBreakdown};
use disease_map_geography_models::RegionKey;

use crate::CaseTableError;

/// Pivots one year of records into per-region counts for every disease
/// reported that year.
///
/// Regions and diseases keep their first-appearance order. A region with
/// no value for some disease gets zero; repeated records are summed.
///
/// # Errors
///
/// Returns [`CaseTableError::CountOverflow`] if summing repeated records
/// overflows.
pub fn disease_breakdown(
    records: &[CaseRecord],
    year: i32,
) -> Result<Vec<RegionBreakdown>, CaseTableError> {
    let mut diseases: Vec<Disease> = Vec::new();
    let mut regions: Vec<RegionKey> = Vec::new();
    let mut counts: BTreeMap<(RegionKey, Disease), u64> = BTreeMap::new();

    for record in records.iter().filter(|r| r.year == year) {
        let key = record.key();
        if !diseases.contains(&record.disease) {
            diseases.push(record.disease.clone());
        }
        if !regions.contains(&key) {
            regions.push(key.clone());
        }
        let count = counts.entry((key, record.disease.clone())).or_default();
        *count = count
            .checked_add(record.cases_or_zero())
            .ok_or(CaseTableError::CountOverflow { year })?;
    }

    Ok(regions
        .into_iter()
        .map(|region| {
            let counts = diseases
                .iter()
                .map(|disease| DiseaseCount {
                    disease: disease.clone(),
                    cases: counts
                        .get(&(region.clone(), disease.clone()))
                        .copied()
                        .unwrap_or(0),
                })
                .collect();
            RegionBreakdown {
                region_name: region.into_string(),
                counts,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, year: i32, disease: &str, cases: Option<u64>) -> CaseRecord {
        CaseRecord {
            region_name: region.to_string(),
            short_form: None,
            year,
            disease: Disease::from(disease),
            cases,
        }
    }

    #[test]
    fn pivots_requested_year_only() {
        let records = vec![
            record("Goa", 2008, "Lymphoedema", Some(191)),
            record("Goa", 2008, "Hydrocele", Some(100)),
            record("Goa", 2009, "Lymphoedema", Some(7)),
            record("Bihar", 2008, "Lymphoedema", Some(212_536)),
            record("Bihar", 2008, "Hydrocele", None),
        ];

        let breakdown = disease_breakdown(&records, 2008).unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].region_name, "Goa");
        assert_eq!(
            breakdown[0].counts,
            vec![
                DiseaseCount {
                    disease: Disease::Lymphoedema,
                    cases: 191
                },
                DiseaseCount {
                    disease: Disease::Hydrocele,
                    cases: 100
                },
            ]
        );
        assert_eq!(breakdown[1].region_name, "Bihar");
        assert_eq!(breakdown[1].counts[1].cases, 0);
    }

    #[test]
    fn fills_diseases_missing_for_a_region() {
        let records = vec![
            record("Goa", 2008, "Lymphoedema", Some(1)),
            record("Kerala", 2008, "Hydrocele", Some(2)),
        ];
        let breakdown = disease_breakdown(&records, 2008).unwrap();
        assert_eq!(breakdown[0].counts.len(), 2);
        assert_eq!(breakdown[0].counts[1].cases, 0);
        assert_eq!(breakdown[1].counts[0].cases, 0);
        assert_eq!(breakdown[1].counts[1].cases, 2);
    }

    #[test]
    fn unknown_year_is_empty() {
        let records = vec![record("Goa", 2008, "Lymphoedema", Some(1))];
        assert!(disease_breakdown(&records, 1999).unwrap().is_empty());
    }

    #[test]
    fn overflowing_repeated_records_are_an_error() {
        let records = vec![
            record("Goa", 2008, "Hydrocele", Some(u64::MAX)),
            record("Goa", 2008, "Hydrocele", Some(1)),
        ];
        assert!(matches!(
            disease_breakdown(&records, 2008),
            Err(CaseTableError::CountOverflow { year: 2008 })
        ));
    }
}

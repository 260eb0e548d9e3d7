//! Shared test inputs.

use disease_map_cases_models::{CaseRecord, Disease};
use disease_map_geography_models::RegionGeometry;
use geo::{MultiPolygon, polygon};

/// A unit-ish square region at `(x, y)`.
pub fn region(name: &str, x: f64, y: f64) -> RegionGeometry {
    let poly = polygon![
        (x: x, y: y),
        (x: x + 1.0, y: y),
        (x: x + 1.0, y: y + 1.0),
        (x: x, y: y + 1.0),
        (x: x, y: y),
    ];
    let shape = MultiPolygon(vec![poly]);
    RegionGeometry {
        region_name: name.to_string(),
        geometry: geojson::Geometry::new(geojson::Value::from(&shape)),
        shape,
    }
}

pub fn record(region: &str, year: i32, disease: &str, cases: Option<u64>) -> CaseRecord {
    CaseRecord {
        region_name: region.to_string(),
        short_form: None,
        year,
        disease: Disease::from(disease),
        cases,
    }
}

pub fn record_with_short_form(
    region: &str,
    short_form: &str,
    year: i32,
    disease: &str,
    cases: Option<u64>,
) -> CaseRecord {
    CaseRecord {
        short_form: Some(short_form.to_string()),
        ..record(region, year, disease, cases)
    }
}

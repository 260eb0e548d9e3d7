//! Loads region boundaries from `GeoJSON`.
//!
//! Each feature contributes one [`RegionGeometry`]. The region name comes
//! from the property named in [`GeometryLayout`] and is trimmed; the
//! geometry must be a `Polygon` or `MultiPolygon`.

use std::path::Path;

use disease_map_geography_models::{GeometryLayout, RegionGeometry, RegionKey};
use geo::MultiPolygon;
use geojson::{Feature, GeoJson};

use crate::GeographyError;

/// Reads and parses a boundary file.
///
/// The file is read into memory in one go and closed before parsing.
///
/// # Errors
///
/// Returns [`GeographyError`] if the file cannot be read or any feature
/// is unusable (see [`parse_regions`]).
pub fn load_regions(
    path: &Path,
    layout: &GeometryLayout,
) -> Result<Vec<RegionGeometry>, GeographyError> {
    let text = std::fs::read_to_string(path).map_err(|e| GeographyError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions = parse_regions(&text, layout)?;
    log::info!("Loaded {} regions from {}", regions.len(), path.display());

    Ok(regions)
}

/// Parses a `GeoJSON` `FeatureCollection` into regions, in feature order.
///
/// # Errors
///
/// Returns [`GeographyError`] if the text is not a `FeatureCollection`,
/// or if any feature lacks a name, lacks a geometry, or has a
/// non-polygonal geometry.
pub fn parse_regions(
    text: &str,
    layout: &GeometryLayout,
) -> Result<Vec<RegionGeometry>, GeographyError> {
    let collection = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(_) => {
            return Err(GeographyError::NotAFeatureCollection { found: "Feature" });
        }
        GeoJson::Geometry(_) => {
            return Err(GeographyError::NotAFeatureCollection { found: "Geometry" });
        }
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| parse_feature(index, feature, layout))
        .collect()
}

fn parse_feature(
    index: usize,
    feature: Feature,
    layout: &GeometryLayout,
) -> Result<RegionGeometry, GeographyError> {
    let region_name = feature
        .property(&layout.name_property)
        .and_then(serde_json::Value::as_str)
        .map(|name| RegionKey::canonical(name).into_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| GeographyError::MissingNameProperty {
            feature: index,
            property: layout.name_property.clone(),
        })?;

    let Some(geometry) = feature.geometry else {
        return Err(GeographyError::MissingGeometry {
            region: region_name,
        });
    };

    let kind = geometry_kind(&geometry.value);
    if !matches!(kind, "Polygon" | "MultiPolygon") {
        return Err(GeographyError::UnsupportedGeometry {
            region: region_name,
            kind,
        });
    }

    let shape = match geo::Geometry::<f64>::try_from(geometry.clone())? {
        geo::Geometry::MultiPolygon(mp) => mp,
        geo::Geometry::Polygon(p) => MultiPolygon(vec![p]),
        _ => {
            return Err(GeographyError::UnsupportedGeometry {
                region: region_name,
                kind,
            });
        }
    };

    log::trace!("Parsed region '{region_name}' ({kind})");

    Ok(RegionGeometry {
        region_name,
        geometry,
        shape,
    })
}

const fn geometry_kind(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

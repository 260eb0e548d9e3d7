//! Render payload emission.
//!
//! Pairs aggregated metrics back up with their geometry and adds the map
//! metadata (title, color scale, framing). The result is the sole
//! hand-off to the renderer.

use disease_map_choropleth_models::{
    AggregatedResult, ColorScale, FitBounds, RegionLabel, RegionMetric, RegionPaint,
    RenderPayload, ValueMode, ValueRange,
};
use disease_map_geography::shape;
use disease_map_geography_models::{RegionGeometry, RegionKey};

use crate::{ChoroplethError, format};

/// Builds the render payload for one aggregated year.
///
/// `geometries` must be the slice the result was joined against: regions
/// are paired by position and their names must agree.
///
/// # Errors
///
/// Returns [`ChoroplethError::GeometryMismatch`] if the region lists do
/// not line up.
pub fn emit(
    result: &AggregatedResult,
    geometries: &[RegionGeometry],
    scale: &ColorScale,
) -> Result<RenderPayload, ChoroplethError> {
    if result.regions.len() != geometries.len() {
        let region = result
            .regions
            .get(geometries.len())
            .map(|m| m.region_name.clone())
            .or_else(|| {
                geometries
                    .get(result.regions.len())
                    .map(|g| g.region_name.clone())
            })
            .unwrap_or_default();
        return Err(ChoroplethError::GeometryMismatch { region });
    }

    let regions = result
        .regions
        .iter()
        .zip(geometries)
        .map(|(metric, geometry)| paint(metric, geometry, result.mode))
        .collect::<Result<Vec<_>, _>>()?;

    let value_range = regions
        .iter()
        .map(|r| r.value)
        .fold(None, |range: Option<ValueRange>, v| {
            Some(range.map_or(ValueRange { min: v, max: v }, |r| ValueRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }))
        })
        .unwrap_or(ValueRange { min: 0.0, max: 0.0 });

    Ok(RenderPayload {
        title: format::title(&result.disease, result.year, result.total_cases),
        year: result.year,
        disease: result.disease.clone(),
        mode: result.mode,
        total_cases: result.total_cases,
        value_label: result.mode.value_label().to_string(),
        color_scale: scale.clone(),
        value_range,
        fit_bounds: FitBounds::Locations,
        bounds: shape::extent(geometries),
        regions,
    })
}

#[allow(clippy::cast_precision_loss)]
fn paint(
    metric: &RegionMetric,
    geometry: &RegionGeometry,
    mode: ValueMode,
) -> Result<RegionPaint, ChoroplethError> {
    if geometry.key() != RegionKey::canonical(&metric.region_name) {
        return Err(ChoroplethError::GeometryMismatch {
            region: metric.region_name.clone(),
        });
    }

    let value = match mode {
        ValueMode::Absolute => metric.cases as f64,
        ValueMode::Percent => metric.percent,
    };

    // Only regions with reported data get an on-map label.
    let label = if mode == ValueMode::Percent && metric.reported {
        shape::label_point(geometry).map(|position| RegionLabel {
            text: format::label_text(metric.display_name(), metric.percent),
            position,
        })
    } else {
        None
    };

    Ok(RegionPaint {
        region_name: metric.region_name.clone(),
        value,
        hover_text: metric.hover_text.clone(),
        label,
        geometry: geometry.geometry.clone(),
    })
}

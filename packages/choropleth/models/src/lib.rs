#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Choropleth pipeline types.
//!
//! Geometry regions are left-joined with case records into
//! [`JoinedRegion`]s, aggregated into an [`AggregatedResult`], and finally
//! shaped into a [`RenderPayload`], the only structure handed to the
//! external map renderer. Nothing here depends on a rendering library.

use disease_map_cases_models::Disease;
use disease_map_geography_models::{Bounds, RegionGeometry};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which value colors the map.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValueMode {
    /// Raw case counts.
    #[default]
    Absolute,
    /// Each region's share of the total, in percent.
    Percent,
}

impl ValueMode {
    /// Legend caption for the color axis.
    #[must_use]
    pub const fn value_label(self) -> &'static str {
        match self {
            Self::Absolute => "Number of Cases",
            Self::Percent => "Percent of Cases",
        }
    }
}

/// One geometry region after the left join.
///
/// Every geometry region yields exactly one of these. `cases` is zero
/// when no case record matched or the matching cell was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRegion<'a> {
    /// Region name from the boundary file.
    pub region_name: String,
    /// Short form from the matched case record, if any.
    pub short_form: Option<String>,
    /// Case count, zero-filled.
    pub cases: u64,
    /// Whether a case record with a value matched this region.
    pub reported: bool,
    /// The region's geometry, borrowed from the loaded boundaries.
    pub geometry: &'a RegionGeometry,
}

/// Aggregated metrics for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMetric {
    /// Region name from the boundary file.
    pub region_name: String,
    /// Short form, if the case table has one for this region.
    pub short_form: Option<String>,
    /// Case count, zero-filled.
    pub cases: u64,
    /// Whether the case table reported a value for this region.
    pub reported: bool,
    /// Share of the total in percent, rounded to two decimals. Zero when
    /// the total is zero.
    pub percent: f64,
    /// Hover text shown by the renderer.
    pub hover_text: String,
}

impl RegionMetric {
    /// Name shown on the map: the short form when present.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.short_form.as_deref().unwrap_or(&self.region_name)
    }
}

/// Metrics for every geometry region for one year and disease.
///
/// `regions` follows the geometry order and `total_cases` is the sum of
/// their `cases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    /// Year the metrics cover.
    pub year: i32,
    /// Disease the metrics cover.
    pub disease: Disease,
    /// Mode the hover text was built for.
    pub mode: ValueMode,
    /// Sum of all region case counts.
    pub total_cases: u64,
    /// Per-region metrics, in geometry order.
    pub regions: Vec<RegionMetric>,
}

/// A named sequence of color stops, low to high.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScale {
    /// Preset name (e.g. `"Viridis"`).
    pub name: String,
    /// Hex colors from the low end to the high end.
    pub stops: Vec<String>,
}

/// How the renderer frames the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitBounds {
    /// Zoom to the drawn regions and hide the base map.
    #[default]
    Locations,
}

/// Minimum and maximum color value across regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lowest value.
    pub min: f64,
    /// Highest value.
    pub max: f64,
}

/// On-map text label for a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLabel {
    /// Label text.
    pub text: String,
    /// `[lon, lat]` anchor, the region centroid.
    pub position: [f64; 2],
}

/// Everything the renderer needs to draw one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPaint {
    /// Region name from the boundary file.
    pub region_name: String,
    /// Value mapped through the color scale.
    pub value: f64,
    /// Hover text.
    pub hover_text: String,
    /// Text label drawn on the map, if any.
    pub label: Option<RegionLabel>,
    /// Unmodified region geometry.
    pub geometry: geojson::Geometry,
}

/// Render-ready map for one year and disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    /// Map title.
    pub title: String,
    /// Year shown.
    pub year: i32,
    /// Disease shown.
    pub disease: Disease,
    /// Which value colors the regions.
    pub mode: ValueMode,
    /// Sum of all region case counts.
    pub total_cases: u64,
    /// Legend caption for the color axis.
    pub value_label: String,
    /// Color scale to map values through.
    pub color_scale: ColorScale,
    /// Color axis domain.
    pub value_range: ValueRange,
    /// Framing behavior.
    pub fit_bounds: FitBounds,
    /// Extent of all drawn regions.
    pub bounds: Option<Bounds>,
    /// Per-region paint, in geometry order.
    pub regions: Vec<RegionPaint>,
}

impl RenderPayload {
    /// Converts the payload into a `GeoJSON` `FeatureCollection` whose
    /// features carry `name`, `value`, `hover` and (when present) `label`
    /// properties.
    #[must_use]
    pub fn to_feature_collection(&self) -> geojson::FeatureCollection {
        let features = self
            .regions
            .iter()
            .map(|region| {
                let mut properties = geojson::JsonObject::new();
                properties.insert("name".to_string(), region.region_name.clone().into());
                properties.insert("value".to_string(), region.value.into());
                properties.insert("hover".to_string(), region.hover_text.clone().into());
                if let Some(label) = &region.label {
                    properties.insert("label".to_string(), label.text.clone().into());
                }

                geojson::Feature {
                    bbox: None,
                    geometry: Some(region.geometry.clone()),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// A single-map request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQuery {
    /// Year to show.
    pub year: i32,
    /// Disease to show.
    pub disease: Disease,
    /// Value mode.
    #[serde(default)]
    pub mode: ValueMode,
}

/// A side-by-side multi-year request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonQuery {
    /// Years to show, in display order. Must be distinct.
    pub years: Vec<i32>,
    /// Disease to show.
    pub disease: Disease,
    /// Value mode.
    #[serde(default)]
    pub mode: ValueMode,
}

/// An inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    /// First year.
    pub start: i32,
    /// Last year.
    pub end: i32,
}

impl YearRange {
    /// Every year in the range, ascending. `None` if `start > end`.
    ///
    /// Allocates one entry per year; use
    /// `select_comparison_years` to sample a wide range.
    #[must_use]
    pub fn years(self) -> Option<Vec<i32>> {
        (self.start <= self.end).then(|| (self.start..=self.end).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn value_mode_parses_snake_case() {
        assert_eq!(ValueMode::from_str("percent").unwrap(), ValueMode::Percent);
        assert_eq!(ValueMode::Absolute.to_string(), "absolute");
        assert!(ValueMode::from_str("Percent").is_err());
    }

    #[test]
    fn year_range_is_inclusive() {
        let range = YearRange {
            start: 2008,
            end: 2011,
        };
        assert_eq!(range.years(), Some(vec![2008, 2009, 2010, 2011]));
    }

    #[test]
    fn inverted_year_range_is_none() {
        let range = YearRange {
            start: 2011,
            end: 2008,
        };
        assert_eq!(range.years(), None);
    }

    #[test]
    fn display_name_prefers_short_form() {
        let mut metric = RegionMetric {
            region_name: "Andhra Pradesh".to_string(),
            short_form: Some("AP".to_string()),
            cases: 1,
            reported: true,
            percent: 100.0,
            hover_text: String::new(),
        };
        assert_eq!(metric.display_name(), "AP");
        metric.short_form = None;
        assert_eq!(metric.display_name(), "Andhra Pradesh");
    }

    #[test]
    fn map_query_mode_defaults_to_absolute() {
        let query: MapQuery =
            serde_json::from_str(r#"{ "year": 2008, "disease": "Hydrocele" }"#).unwrap();
        assert_eq!(query.mode, ValueMode::Absolute);
        assert_eq!(query.disease, Disease::Hydrocele);
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region geometry and canonical region key types.
//!
//! The case table and the boundary file are sourced independently. Both
//! sides are keyed by [`RegionKey`] before they are joined, so the only
//! place region names are normalized is [`RegionKey::canonical`].

use std::fmt;

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Canonical key used to match region names across datasets.
///
/// Canonicalization only trims leading and trailing whitespace. Case and
/// punctuation are kept as-is: `"Goa"` and `"goa"` are different regions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionKey(String);

impl RegionKey {
    /// Builds the canonical key for a region name from either dataset.
    #[must_use]
    pub fn canonical(name: &str) -> Self {
        Self(name.trim().to_string())
    }

    /// Returns the canonical name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the canonical name.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One administrative region from the boundary file.
///
/// `geometry` is the feature's geometry exactly as it was read and is
/// handed to the renderer untouched. `shape` is the same outline
/// converted to [`MultiPolygon`] for centroid and bounds computations.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    /// Region name as it appears in the boundary file (trimmed).
    pub region_name: String,
    /// Original `GeoJSON` geometry.
    pub geometry: geojson::Geometry,
    /// Polygonal outline derived from `geometry`.
    pub shape: MultiPolygon<f64>,
}

impl RegionGeometry {
    /// Returns the canonical join key for this region.
    #[must_use]
    pub fn key(&self) -> RegionKey {
        RegionKey::canonical(&self.region_name)
    }
}

/// Where region names live in the boundary file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeometryLayout {
    /// Feature property holding the region name (e.g. `"NAME_1"`).
    pub name_property: String,
}

impl Default for GeometryLayout {
    fn default() -> Self {
        Self {
            name_property: "NAME_1".to_string(),
        }
    }
}

/// Axis-aligned bounding box in longitude/latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// Western edge (minimum longitude).
    pub min_lon: f64,
    /// Southern edge (minimum latitude).
    pub min_lat: f64,
    /// Eastern edge (maximum longitude).
    pub max_lon: f64,
    /// Northern edge (maximum latitude).
    pub max_lat: f64,
}

impl Bounds {
    /// Returns the smallest box covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }
}

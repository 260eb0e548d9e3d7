#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region boundary loading, label placement, and name reconciliation.
//!
//! Reads administrative boundaries from a `GeoJSON` `FeatureCollection`
//! into [`RegionGeometry`] values, computes centroids and extents for map
//! framing, and reports which region names line up between the boundary
//! file and the case table.
//!
//! [`RegionGeometry`]: disease_map_geography_models::RegionGeometry

pub mod load;
pub mod reconcile;
pub mod shape;

use thiserror::Error;

/// Errors that can occur while reading region boundaries.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// The boundary file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The input is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document parsed, but is not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection, found {found}")]
    NotAFeatureCollection {
        /// What the document actually was.
        found: &'static str,
    },

    /// A feature has no usable region name.
    #[error("Feature {feature} has no string property '{property}'")]
    MissingNameProperty {
        /// Zero-based index of the feature in the collection.
        feature: usize,
        /// Property that was expected to hold the name.
        property: String,
    },

    /// A feature has a name but no geometry.
    #[error("Region '{region}' has no geometry")]
    MissingGeometry {
        /// Region name.
        region: String,
    },

    /// A feature's geometry is not a polygon or multipolygon.
    #[error("Region '{region}' has unsupported geometry type {kind}")]
    UnsupportedGeometry {
        /// Region name.
        region: String,
        /// `GeoJSON` geometry type that was found.
        kind: &'static str,
    },
}

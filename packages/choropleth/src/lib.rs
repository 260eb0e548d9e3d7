#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disease choropleth pipeline.
//!
//! Joins region geometry with normalized case records for a year and
//! disease, aggregates totals and percentages, and emits the
//! [`RenderPayload`] consumed by the map renderer. The pipeline is a pure
//! transform: every input (tables, boundaries, query, color scale) is an
//! explicit parameter and nothing is cached between calls.
//!
//! [`RenderPayload`]: disease_map_choropleth_models::RenderPayload

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod format;
pub mod join;
pub mod payload;
pub mod pipeline;
pub mod scales;

#[cfg(test)]
mod fixtures;

use disease_map_cases::CaseTableError;
use disease_map_cases_models::Disease;
use disease_map_geography::GeographyError;
use thiserror::Error;

/// Errors that can occur while building a choropleth.
#[derive(Debug, Error)]
pub enum ChoroplethError {
    /// The case table could not be loaded.
    #[error(transparent)]
    Cases(#[from] CaseTableError),

    /// The region boundaries could not be loaded.
    #[error(transparent)]
    Geography(#[from] GeographyError),

    /// The query names a disease the case table does not contain.
    #[error("Unknown disease '{disease}' (table has: {known:?})")]
    UnknownDisease {
        /// Disease that was requested.
        disease: Disease,
        /// Diseases present in the table.
        known: Vec<Disease>,
    },

    /// There are no geometry regions to join against.
    #[error("No geometry regions to join case data onto")]
    EmptyJoinResult,

    /// More than one case record matched the same geometry region.
    #[error("Region '{region}' matches more than one {disease} record for {year}")]
    AmbiguousJoin {
        /// Canonical region name.
        region: String,
        /// Year being joined.
        year: i32,
        /// Disease being joined.
        disease: Disease,
    },

    /// Aggregated regions do not line up with the geometry passed to
    /// the emitter.
    #[error("Aggregated region '{region}' does not line up with the supplied geometry")]
    GeometryMismatch {
        /// Region that could not be paired.
        region: String,
    },

    /// Region counts for one year and disease sum past `u64::MAX`.
    #[error("{disease} case counts for {year} are too large to total")]
    TotalOverflow {
        /// Year being aggregated.
        year: i32,
        /// Disease being aggregated.
        disease: Disease,
    },

    /// A year was requested more than once in a batch.
    #[error("Year {year} is requested more than once")]
    DuplicateYear {
        /// The repeated year.
        year: i32,
    },

    /// A year range ends before it starts.
    #[error("Start year {start} is after end year {end}")]
    InvalidYearRange {
        /// First year.
        start: i32,
        /// Last year.
        end: i32,
    },

    /// One year of a multi-year batch failed.
    #[error("Failed to build {disease} map for {year}: {source}")]
    Batch {
        /// Year that failed.
        year: i32,
        /// Disease being built.
        disease: Disease,
        /// Why it failed.
        source: Box<Self>,
    },

    /// No color scale preset has the requested name.
    #[error("Unknown color scale '{name}' (available: {known:?})")]
    UnknownColorScale {
        /// Requested name.
        name: String,
        /// Registered preset names.
        known: Vec<String>,
    },

    /// The configuration file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("Invalid config {path}: {source}")]
    Config {
        /// Path of the config file.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

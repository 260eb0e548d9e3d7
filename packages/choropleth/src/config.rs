//! Dashboard configuration.
//!
//! Column names, the boundary name property, and the default color scale
//! all have defaults matching the Indian state dataset, so an empty (or
//! absent) config file is valid.
//!
//! ```toml
//! default_scale = "Coolwarm"
//!
//! [table]
//! region_column = "States/UTs"
//! short_form_column = "Short Form"
//! label_separator = "-"
//!
//! [geometry]
//! name_property = "NAME_1"
//! ```

use std::path::Path;

use disease_map_cases_models::TableLayout;
use disease_map_choropleth_models::ColorScale;
use disease_map_geography_models::GeometryLayout;
use serde::{Deserialize, Serialize};

use crate::ChoroplethError;
use crate::scales::{DEFAULT_SCALE_NAME, find_scale};

/// Input layout and presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MapConfig {
    /// Case table column layout.
    pub table: TableLayout,
    /// Boundary file layout.
    pub geometry: GeometryLayout,
    /// Color scale preset used when the caller does not pick one.
    pub default_scale: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            table: TableLayout::default(),
            geometry: GeometryLayout::default(),
            default_scale: DEFAULT_SCALE_NAME.to_string(),
        }
    }
}

impl MapConfig {
    /// Parses a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or a value has the
    /// wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ChoroplethError::Io`] if the file cannot be read and
    /// [`ChoroplethError::Config`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ChoroplethError> {
        let text = std::fs::read_to_string(path).map_err(|e| ChoroplethError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::from_toml_str(&text).map_err(|e| ChoroplethError::Config {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Resolves the configured default color scale.
    ///
    /// # Errors
    ///
    /// Returns [`ChoroplethError::UnknownColorScale`] if the configured
    /// name is not a registered preset.
    pub fn color_scale(&self) -> Result<ColorScale, ChoroplethError> {
        find_scale(&self.default_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = MapConfig::from_toml_str("").unwrap();
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.table.region_column, "States/UTs");
        assert_eq!(config.geometry.name_property, "NAME_1");
        assert_eq!(config.color_scale().unwrap().name, "Viridis");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = MapConfig::from_toml_str(
            r#"
            default_scale = "Coolwarm"

            [table]
            label_separator = "_"

            [geometry]
            name_property = "st_nm"
            "#,
        )
        .unwrap();
        assert_eq!(config.table.label_separator, "_");
        assert_eq!(config.table.region_column, "States/UTs");
        assert_eq!(config.table.short_form_column, "Short Form");
        assert_eq!(config.geometry.name_property, "st_nm");
        assert_eq!(config.color_scale().unwrap().name, "Coolwarm");
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(MapConfig::from_toml_str("default_scale = 3").is_err());
    }

    #[test]
    fn unknown_default_scale_is_reported() {
        let config = MapConfig::from_toml_str(r#"default_scale = "Rainbow""#).unwrap();
        assert!(matches!(
            config.color_scale(),
            Err(ChoroplethError::UnknownColorScale { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MapConfig::load(Path::new("/nonexistent/disease_map.toml")).unwrap_err();
        assert!(matches!(err, ChoroplethError::Io { .. }));
    }
}

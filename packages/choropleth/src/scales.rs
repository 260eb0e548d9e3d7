//! Compile-time registry of color scale presets.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a preset requires creating a TOML file in `scales/` and adding
//! a corresponding entry here.

use disease_map_choropleth_models::ColorScale;

use crate::ChoroplethError;

/// Preset used when no scale is chosen.
pub const DEFAULT_SCALE_NAME: &str = "Viridis";

/// Number of registered presets. Enforced by a test.
#[cfg(test)]
const EXPECTED_SCALE_COUNT: usize = 6;

/// Embedded TOML scale definitions, in selector order.
const SCALE_TOMLS: &[(&str, &str)] = &[
    ("red_blue", include_str!("../scales/red_blue.toml")),
    ("green_yellow", include_str!("../scales/green_yellow.toml")),
    ("purple_orange", include_str!("../scales/purple_orange.toml")),
    ("blues", include_str!("../scales/blues.toml")),
    ("coolwarm", include_str!("../scales/coolwarm.toml")),
    ("viridis", include_str!("../scales/viridis.toml")),
];

/// Returns all registered color scales.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_scales() -> Vec<ColorScale> {
    SCALE_TOMLS
        .iter()
        .map(|(file, toml_str)| {
            toml::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse color scale '{file}': {e}"))
        })
        .collect()
}

/// Looks up a preset by its display name (e.g. `"Coolwarm"`).
///
/// # Errors
///
/// Returns [`ChoroplethError::UnknownColorScale`] if no preset has that
/// name.
pub fn find_scale(name: &str) -> Result<ColorScale, ChoroplethError> {
    let scales = all_scales();
    let known: Vec<String> = scales.iter().map(|s| s.name.clone()).collect();

    scales
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| ChoroplethError::UnknownColorScale {
            name: name.to_string(),
            known,
        })
}

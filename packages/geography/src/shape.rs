//! Label placement and map framing.

use disease_map_geography_models::{Bounds, RegionGeometry};
use geo::{BoundingRect, Centroid};

/// Returns the `[lon, lat]` centroid of a region's outline, used to
/// anchor its on-map label.
///
/// Returns `None` for a region whose outline is empty.
#[must_use]
pub fn label_point(region: &RegionGeometry) -> Option<[f64; 2]> {
    region.shape.centroid().map(|p| [p.x(), p.y()])
}

/// Returns the bounding box of a single region.
#[must_use]
pub fn region_bounds(region: &RegionGeometry) -> Option<Bounds> {
    region.shape.bounding_rect().map(|rect| Bounds {
        min_lon: rect.min().x,
        min_lat: rect.min().y,
        max_lon: rect.max().x,
        max_lat: rect.max().y,
    })
}

/// Returns the box that frames every given region, or `None` if there
/// are no non-empty regions.
pub fn extent<'a>(regions: impl IntoIterator<Item = &'a RegionGeometry>) -> Option<Bounds> {
    regions
        .into_iter()
        .filter_map(region_bounds)
        .reduce(Bounds::union)
}

use crate::models::Geometry;
use geo::algorithm::area::Area;
use geo::algorithm::contains::Contains;
use geo::{BooleanOps, Geometry as GeoGeometry, MultiPolygon};
use radiant_core::error::{RadiantError, Result};

/// Uncovered area of `inner` tolerated by [`covers`], relative to its area.
///
/// Boolean operations snap vertices to a fixed grid, so a union can lose a
/// sliver along edges it shares with its inputs.
pub const COVER_TOLERANCE: f64 = 1e-6;

/// True when every point of `inner` lies within `outer` or on its boundary.
///
/// Besides exact containment, `inner` counts as covered when the part of it
/// outside `outer` is no larger than [`COVER_TOLERANCE`] of its area.
pub fn covers(outer: &MultiPolygon, inner: &MultiPolygon) -> bool {
    if outer.0.is_empty() || inner.0.is_empty() {
        return false;
    }

    if GeoGeometry::MultiPolygon(outer.clone()).contains(&GeoGeometry::MultiPolygon(inner.clone())) {
        return true;
    }

    let inner_area = inner.unsigned_area();
    if inner_area == 0.0 {
        return false;
    }

    inner.difference(outer).unsigned_area() <= COVER_TOLERANCE * inner_area
}

/// Center of a project extent as `(lat, lon)`.
///
/// Longitudes of the first ring are shifted into `[0, 360)` before taking
/// the midpoint so extents that straddle the antimeridian stay compact.
pub fn extent_center(extent: &Geometry) -> Result<(f64, f64)> {
    let ring = match extent {
        Geometry::Polygon { coordinates } => coordinates.first(),
        Geometry::MultiPolygon { coordinates } => coordinates.first().and_then(|p| p.first()),
        Geometry::Point { .. } => None,
    }
    .filter(|ring| !ring.is_empty())
    .ok_or_else(|| RadiantError::MissingField { field: "extent.coordinates".to_string() })?;

    let wrap = |lon: f64| if lon < 0.0 { lon + 360.0 } else { lon };

    let x_min = ring.iter().map(|c| wrap(c[0])).fold(f64::INFINITY, f64::min);
    let x_max = ring.iter().map(|c| wrap(c[0])).fold(f64::NEG_INFINITY, f64::max);
    let y_min = ring.iter().map(|c| c[1]).fold(f64::INFINITY, f64::min);
    let y_max = ring.iter().map(|c| c[1]).fold(f64::NEG_INFINITY, f64::max);

    let mut lon = (x_min + x_max) / 2.0;
    if lon > 180.0 {
        lon -= 360.0;
    }

    Ok(((y_min + y_max) / 2.0, lon))
}

//! Geometry models for radiant-geo.
//!
//! Re-exports the canonical types from `radiant-core` and converts them
//! to `geo` crate types.

use geo::Geometry as GeoGeometry;
use radiant_core::error::{RadiantError, Result};

pub use radiant_core::models::{Bbox, Geometry, GeometryType, Ring};

fn to_line_string(ring: &[[f64; 2]]) -> geo::LineString {
    geo::LineString::new(ring.iter().map(|c| geo::Coord { x: c[0], y: c[1] }).collect())
}

fn to_polygon(rings: &[Ring]) -> geo::Polygon {
    match rings.split_first() {
        Some((exterior, interiors)) => geo::Polygon::new(
            to_line_string(exterior),
            interiors.iter().map(|r| to_line_string(r)).collect(),
        ),
        None => geo::Polygon::new(geo::LineString::new(vec![]), vec![]),
    }
}

/// Convert a canonical Geometry to a geo::Geometry
pub fn to_geo_geometry(geom: &Geometry) -> GeoGeometry {
    match geom {
        Geometry::Point { coordinates } => {
            GeoGeometry::Point(geo::Point::new(coordinates[0], coordinates[1]))
        }
        Geometry::Polygon { coordinates } => GeoGeometry::Polygon(to_polygon(coordinates)),
        Geometry::MultiPolygon { coordinates } => GeoGeometry::MultiPolygon(geo::MultiPolygon::new(
            coordinates.iter().map(|p| to_polygon(p)).collect(),
        )),
    }
}

/// Convert an areal geometry to a MultiPolygon.
///
/// `feature_id` names the geometry in the error for non-areal input.
pub fn to_multi_polygon(geom: &Geometry, feature_id: &str) -> Result<geo::MultiPolygon> {
    match geom {
        Geometry::Polygon { coordinates } => Ok(geo::MultiPolygon::new(vec![to_polygon(coordinates)])),
        Geometry::MultiPolygon { coordinates } => {
            Ok(geo::MultiPolygon::new(coordinates.iter().map(|p| to_polygon(p)).collect()))
        }
        other => Err(RadiantError::InvalidGeometry {
            feature_id: feature_id.to_string(),
            reason: format!("expected Polygon or MultiPolygon, found {:?}", other.geometry_type()),
        }),
    }
}

/// Extension trait for Geometry with geo-crate operations
pub trait GeometryExt {
    /// Convert to geo::Geometry
    fn to_geo(&self) -> GeoGeometry;

    /// Get the centroid as coordinates
    fn centroid_coords(&self) -> Option<[f64; 2]>;

    /// Get the bounding box
    fn bounds(&self) -> Option<Bbox>;
}

impl GeometryExt for Geometry {
    fn to_geo(&self) -> GeoGeometry {
        to_geo_geometry(self)
    }

    fn centroid_coords(&self) -> Option<[f64; 2]> {
        use geo::algorithm::centroid::Centroid;
        self.to_geo().centroid().map(|p| [p.x(), p.y()])
    }

    fn bounds(&self) -> Option<Bbox> {
        use geo::algorithm::bounding_rect::BoundingRect;
        self.to_geo()
            .bounding_rect()
            .map(|r| Bbox::new(r.min().x, r.min().y, r.max().x, r.max().y))
    }
}

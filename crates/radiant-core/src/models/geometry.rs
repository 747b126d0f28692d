//! Canonical geometry types shared by all radiant crates.
//!
//! Footprints, shapes and AOIs arrive from the platform as GeoJSON geometry
//! objects in longitude/latitude. These types mirror that encoding; the
//! computational work happens in `radiant-geo` on `geo` crate types.

use crate::error::{RadiantError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed ring of `[lon, lat]` pairs
pub type Ring = Vec<[f64; 2]>;

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    Polygon,
    MultiPolygon,
}

/// GeoJSON-compatible geometry representation.
///
/// Positions may carry altitude or further values; only `[lon, lat]` is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(deserialize_with = "position::point")]
        coordinates: [f64; 2],
    },
    Polygon {
        #[serde(deserialize_with = "position::rings")]
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        #[serde(deserialize_with = "position::polygons")]
        coordinates: Vec<Vec<Ring>>,
    },
}

/// Deserializers for GeoJSON positions of two or more numbers
mod position {
    use super::Ring;
    use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer};
    use std::fmt;

    struct Position([f64; 2]);

    impl<'de> Deserialize<'de> for Position {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(PositionVisitor)
        }
    }

    struct PositionVisitor;

    impl<'de> Visitor<'de> for PositionVisitor {
        type Value = Position;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a position of at least two numbers")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Position, A::Error> {
            let x = seq.next_element::<f64>()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
            let y = seq.next_element::<f64>()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
            // altitude and anything after it
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Position([x, y]))
        }
    }

    fn ring(positions: Vec<Position>) -> Ring {
        positions.into_iter().map(|p| p.0).collect()
    }

    pub fn point<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 2], D::Error> {
        Position::deserialize(deserializer).map(|p| p.0)
    }

    pub fn rings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Ring>, D::Error> {
        let raw = Vec::<Vec<Position>>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(ring).collect())
    }

    pub fn polygons<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<Ring>>, D::Error> {
        let raw = Vec::<Vec<Vec<Position>>>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|polygon| polygon.into_iter().map(ring).collect()).collect())
    }
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point { coordinates: [x, y] }
    }

    pub fn polygon(rings: Vec<Ring>) -> Self {
        Geometry::Polygon { coordinates: rings }
    }

    pub fn multi_polygon(polygons: Vec<Vec<Ring>>) -> Self {
        Geometry::MultiPolygon { coordinates: polygons }
    }

    /// Build a polygon from an open or closed exterior ring.
    pub fn from_exterior(mut ring: Ring) -> Self {
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        Geometry::Polygon { coordinates: vec![ring] }
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::Polygon { .. } => GeometryType::Polygon,
            Geometry::MultiPolygon { .. } => GeometryType::MultiPolygon,
        }
    }

    /// Polygon and MultiPolygon geometries can serve as footprints or AOIs.
    pub fn is_areal(&self) -> bool {
        matches!(self, Geometry::Polygon { .. } | Geometry::MultiPolygon { .. })
    }

    /// Parse from a GeoJSON geometry value
    pub fn from_geojson(value: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Convert to a GeoJSON geometry value
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// The bare `coordinates` member as nested JSON lists.
    pub fn coordinates_value(&self) -> serde_json::Value {
        match self {
            Geometry::Point { coordinates } => serde_json::json!(coordinates),
            Geometry::Polygon { coordinates } => serde_json::json!(coordinates),
            Geometry::MultiPolygon { coordinates } => serde_json::json!(coordinates),
        }
    }
}

/// Axis-aligned bounding box in lon/lat, rendered by the platform as
/// `minx,miny,maxx,maxy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bbox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn from_array(bounds: [f64; 4]) -> Self {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// The box as a counter-clockwise closed polygon
    pub fn to_polygon(&self) -> Geometry {
        Geometry::polygon(vec![vec![
            [self.max_x, self.min_y],
            [self.max_x, self.max_y],
            [self.min_x, self.max_y],
            [self.min_x, self.min_y],
            [self.max_x, self.min_y],
        ]])
    }

    /// Grow the box by `margin` degrees on every side
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(self.min_x - margin, self.min_y - margin, self.max_x + margin, self.max_y + margin)
    }
}

impl fmt::Display for Bbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl FromStr for Bbox {
    type Err = RadiantError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RadiantError::InvalidSceneQuery {
                reason: format!("bbox '{}' is not a list of numbers: {}", s, e),
            })?;

        match parts.as_slice() {
            [min_x, min_y, max_x, max_y] => {
                if min_x > max_x || min_y > max_y {
                    return Err(RadiantError::InvalidSceneQuery {
                        reason: format!("bbox '{}' has min greater than max", s),
                    });
                }
                Ok(Bbox::new(*min_x, *min_y, *max_x, *max_y))
            }
            _ => Err(RadiantError::InvalidSceneQuery {
                reason: format!("bbox '{}' must have 4 values, found {}", s, parts.len()),
            }),
        }
    }
}

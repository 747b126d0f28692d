use crate::models::{to_multi_polygon, Geometry, GeometryExt};
use geo::algorithm::area::Area;
use geo::algorithm::intersects::Intersects;
use radiant_core::error::{RadiantError, Result};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    fn merge(&mut self, prefix: &str, other: ValidationResult) {
        for error in other.errors {
            self.add_error(format!("{}.{}", prefix, error.location), error.reason);
        }
    }

    /// First error as a typed failure for `feature_id`
    pub fn into_result(self, feature_id: &str) -> Result<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(error) => Err(RadiantError::InvalidGeometry {
                feature_id: feature_id.to_string(),
                reason: format!("{}: {}", error.location, error.reason),
            }),
        }
    }
}

/// Validate a geometry
pub fn validate_geometry(geometry: &Geometry) -> ValidationResult {
    match geometry {
        Geometry::Point { coordinates } => {
            let mut result = ValidationResult::valid();
            if !coordinates.iter().all(|c| c.is_finite()) {
                result.add_error("Point".to_string(), "Coordinates must be finite".to_string());
            }
            result
        }
        Geometry::Polygon { coordinates } => validate_polygon(coordinates),
        Geometry::MultiPolygon { coordinates } => {
            let mut result = ValidationResult::valid();
            if coordinates.is_empty() {
                result.add_error("MultiPolygon".to_string(), "MultiPolygon is empty".to_string());
            }
            for (i, polygon) in coordinates.iter().enumerate() {
                result.merge(&format!("MultiPolygon[{}]", i), validate_polygon(polygon));
            }
            result
        }
    }
}

fn validate_polygon(rings: &[Vec<[f64; 2]>]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if rings.is_empty() {
        result.add_error("Polygon".to_string(), "Polygon has no exterior ring".to_string());
        return result;
    }

    for (i, ring) in rings.iter().enumerate() {
        let location = if i == 0 { "exterior".to_string() } else { format!("interior[{}]", i - 1) };
        validate_ring(ring, &location, &mut result);
    }

    result
}

fn validate_ring(ring: &[[f64; 2]], location: &str, result: &mut ValidationResult) {
    if ring.len() < 4 {
        result.add_error(
            location.to_string(),
            format!("Ring must have at least 4 points, found {}", ring.len()),
        );
        return;
    }

    if let Some(i) = ring.iter().position(|c| !c[0].is_finite() || !c[1].is_finite()) {
        result.add_error(format!("{}[{}]", location, i), "Coordinates must be finite".to_string());
        return;
    }

    if ring.first() != ring.last() {
        result.add_error(
            location.to_string(),
            "Ring must be closed (first point == last point)".to_string(),
        );
        return;
    }

    if let Some((a, b)) = first_self_intersection(ring) {
        result.add_error(
            location.to_string(),
            format!("Ring self-intersects between segments {} and {}", a, b),
        );
    }
}

/// Find two non-adjacent segments of a closed ring that touch or cross.
fn first_self_intersection(ring: &[[f64; 2]]) -> Option<(usize, usize)> {
    let segments: Vec<geo::Line> = ring
        .windows(2)
        .map(|w| {
            geo::Line::new(
                geo::coord! { x: w[0][0], y: w[0][1] },
                geo::coord! { x: w[1][0], y: w[1][1] },
            )
        })
        .collect();
    let n = segments.len();

    for i in 0..n {
        for j in (i + 2)..n {
            // first and last segments share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments[i].intersects(&segments[j]) {
                return Some((i, j));
            }
        }
    }

    None
}

/// Require a valid, non-empty Polygon or MultiPolygon with a centroid and bounds.
pub fn ensure_areal(geometry: &Geometry, feature_id: &str) -> Result<()> {
    let multi = to_multi_polygon(geometry, feature_id)?;
    validate_geometry(geometry).into_result(feature_id)?;

    if multi.unsigned_area() == 0.0 {
        return Err(RadiantError::InvalidGeometry {
            feature_id: feature_id.to_string(),
            reason: "Geometry has zero area".to_string(),
        });
    }

    if geometry.centroid_coords().is_none() || geometry.bounds().is_none() {
        return Err(RadiantError::InvalidGeometry {
            feature_id: feature_id.to_string(),
            reason: "Geometry has no centroid or bounds".to_string(),
        });
    }

    Ok(())
}

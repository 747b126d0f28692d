use crate::models::geometry::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A shape uploaded to the platform, served as a GeoJSON Feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Shape {
    /// The `name` property set when the shape was uploaded
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_name() {
        let shape: Shape = serde_json::from_value(serde_json::json!({
            "type": "Feature",
            "id": "s1",
            "properties": {"name": "antigua"},
            "geometry": null
        }))
        .unwrap();
        assert_eq!(shape.name(), Some("antigua"));
        assert!(shape.geometry.is_none());
    }
}

//! Shape upload and lookup.
//!
//! Shapes are stored on the platform as GeoJSON Features whose only
//! property is the `name` chosen at upload time.

use crate::client::{decode, Client};
use radiant_core::error::{RadiantError, Result};
use radiant_core::models::{Geometry, ItemField, Shape};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

const FEATURE_KEYS: [&str; 3] = ["geometry", "properties", "type"];

/// Read a GeoJSON file into a JSON value
pub fn load_geojson(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| RadiantError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Check that `value` is a bare Feature and rename it to `name`.
fn prepare_feature(name: &str, value: Value) -> Result<geojson::Feature> {
    let invalid = |reason: String| RadiantError::InvalidFeature { name: name.to_string(), reason };

    let Value::Object(mut object) = value else {
        return Err(invalid("expected a GeoJSON Feature object".to_string()));
    };

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    if keys != FEATURE_KEYS {
        return Err(invalid(format!(
            "a Feature must have exactly the keys type, geometry and properties, found [{}]",
            keys.join(", ")
        )));
    }

    let mut properties = Map::new();
    properties.insert("name".to_string(), Value::String(name.to_string()));
    object.insert("properties".to_string(), Value::Object(properties));

    geojson::Feature::from_json_object(object).map_err(|e| invalid(e.to_string()))
}

impl Client {
    /// Upload named Features as shapes, returning name → shape id.
    ///
    /// Every value must be a single Feature (not a FeatureCollection). Its
    /// properties are replaced by `{"name": <key>}`.
    pub fn create_shapes<I>(&self, named_features: I) -> Result<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let features = named_features
            .into_iter()
            .map(|(name, value)| prepare_feature(&name, value))
            .collect::<Result<Vec<_>>>()?;

        let collection = geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        };
        let count = collection.features.len();

        let response = self.post_json("/shapes/", serde_json::to_value(&collection)?)?;
        let created: Vec<Shape> = match response {
            Value::Object(mut object) => decode(object.remove("features").unwrap_or(Value::Null))?,
            other => decode(other)?,
        };

        tracing::info!(count, "Created shapes");

        created
            .into_iter()
            .map(|shape| -> Result<(String, String)> {
                let name = shape
                    .name()
                    .ok_or_else(|| RadiantError::MissingField { field: "properties.name".to_string() })?
                    .to_string();
                Ok((name, shape.id))
            })
            .collect()
    }

    /// All shapes visible to the user, as shape id → name
    pub fn shapes(&self) -> Result<BTreeMap<String, String>> {
        let shapes: Vec<Shape> = self.collect("/shapes/", &[], &ItemField::features())?;
        Ok(shapes
            .into_iter()
            .map(|shape| {
                let name = shape.name().unwrap_or_default().to_string();
                (shape.id, name)
            })
            .collect())
    }

    pub fn shape(&self, shape_id: &str) -> Result<Shape> {
        decode(self.get_json(&format!("/shapes/{}", shape_id), &[])?)
    }

    /// Geometry of an uploaded shape
    pub fn shape_geometry(&self, shape_id: &str) -> Result<Geometry> {
        self.shape(shape_id)?
            .geometry
            .ok_or_else(|| RadiantError::MissingField { field: "geometry".to_string() })
    }

    /// The shape's coordinates as nested JSON lists, usable as an export mask
    pub fn shape_coordinates(&self, shape_id: &str) -> Result<Value> {
        Ok(self.shape_geometry(shape_id)?.coordinates_value())
    }
}

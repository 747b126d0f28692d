//! Scene records and the scene search query.

use crate::error::{RadiantError, Result};
use crate::models::datasource::DatasourceRef;
use crate::models::geometry::{Bbox, Geometry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An image acquisition as returned by `/scenes/` or a project's scene list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub datasource: DatasourceRef,
    /// Ground area covered by valid pixels
    pub data_footprint: Geometry,
    #[serde(default)]
    pub tile_footprint: Option<Geometry>,
    /// Datasource-specific metadata; layout depends on `datasource.id`
    #[serde(default)]
    pub scene_metadata: Map<String, Value>,
    #[serde(default)]
    pub scene_order: Option<i64>,
    #[serde(default)]
    pub status_fields: Option<StatusFields>,
    #[serde(default)]
    pub images: Vec<SceneImage>,
    #[serde(default)]
    pub filter_fields: Option<FilterFields>,
}

impl Scene {
    /// Build a scene with only the fields coverage needs
    pub fn new(id: impl Into<String>, datasource: DatasourceRef, footprint: Geometry) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            datasource,
            data_footprint: footprint,
            tile_footprint: None,
            scene_metadata: Map::new(),
            scene_order: None,
            status_fields: None,
            images: Vec::new(),
            filter_fields: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.scene_metadata.insert(key.into(), value);
        self
    }

    /// Look up a metadata field as a string
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.scene_metadata.get(key).and_then(Value::as_str)
    }

    /// Look up a metadata field as a number
    pub fn metadata_f64(&self, key: &str) -> Option<f64> {
        self.scene_metadata.get(key).and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFields {
    #[serde(default)]
    pub ingest_status: Option<String>,
    #[serde(default)]
    pub thumbnail_status: Option<String>,
    #[serde(default)]
    pub boundary_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneImage {
    #[serde(default)]
    pub id: Option<String>,
    pub source_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFields {
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    #[serde(default)]
    pub sun_azimuth: Option<f64>,
    #[serde(default)]
    pub sun_elevation: Option<f64>,
}

/// Where a scene search is anchored
#[derive(Debug, Clone, PartialEq)]
pub enum SceneArea {
    /// A shape previously uploaded to the platform
    Shape(String),
    Bbox(Bbox),
}

/// Filter parameters for `/scenes/`
#[derive(Debug, Clone, PartialEq)]
pub struct SceneQuery {
    pub shape_id: Option<String>,
    pub bbox: Option<Bbox>,
    pub datasources: Vec<String>,
    pub max_cloud_cover: f64,
    pub min_acquisition_datetime: Option<String>,
    pub max_acquisition_datetime: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl Default for SceneQuery {
    fn default() -> Self {
        Self {
            shape_id: None,
            bbox: None,
            datasources: Vec::new(),
            max_cloud_cover: 10.0,
            min_acquisition_datetime: None,
            max_acquisition_datetime: None,
            extra: Vec::new(),
        }
    }
}

impl SceneQuery {
    pub fn for_shape(shape_id: impl Into<String>) -> Self {
        Self { shape_id: Some(shape_id.into()), ..Default::default() }
    }

    pub fn for_bbox(bbox: Bbox) -> Self {
        Self { bbox: Some(bbox), ..Default::default() }
    }

    pub fn datasource(mut self, id: impl Into<String>) -> Self {
        self.datasources.push(id.into());
        self
    }

    pub fn max_cloud_cover(mut self, percent: f64) -> Self {
        self.max_cloud_cover = percent;
        self
    }

    pub fn acquired_between(mut self, min: Option<String>, max: Option<String>) -> Self {
        self.min_acquisition_datetime = min;
        self.max_acquisition_datetime = max;
        self
    }

    /// Pass an additional `/scenes/` parameter through unchanged
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Exactly one of `shape_id` or `bbox` must be set.
    pub fn area(&self) -> Result<SceneArea> {
        match (&self.shape_id, &self.bbox) {
            (Some(shape_id), None) if !shape_id.is_empty() => Ok(SceneArea::Shape(shape_id.clone())),
            (None, Some(bbox)) => Ok(SceneArea::Bbox(*bbox)),
            _ => Err(RadiantError::InvalidSceneQuery {
                reason: "exactly one of shape_id or bbox must be supplied".to_string(),
            }),
        }
    }

    /// Render as query parameters in a stable order.
    pub fn to_params(&self) -> Result<Vec<(String, String)>> {
        let mut params = vec![("maxCloudCover".to_string(), self.max_cloud_cover.to_string())];

        match self.area()? {
            SceneArea::Shape(id) => params.push(("shape".to_string(), id)),
            SceneArea::Bbox(bbox) => params.push(("bbox".to_string(), bbox.to_string())),
        }

        for ds in &self.datasources {
            params.push(("datasource".to_string(), ds.clone()));
        }

        if let Some(min) = &self.min_acquisition_datetime {
            params.push(("minAcquisitionDatetime".to_string(), min.clone()));
        }

        if let Some(max) = &self.max_acquisition_datetime {
            params.push(("maxAcquisitionDatetime".to_string(), max.clone()));
        }

        params.extend(self.extra.iter().cloned());
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scene_from_platform_json() {
        let raw = json!({
            "id": "scene-1",
            "name": "S2A_tile",
            "datasource": {"id": "4a50cb75-815d-4fe5-8bc1-144729ce5b42", "name": "Sentinel-2"},
            "dataFootprint": {
                "type": "MultiPolygon",
                "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]]
            },
            "sceneMetadata": {"cloudyPixelPercentage": 12.5},
            "sceneOrder": 2,
            "statusFields": {"ingestStatus": "INGESTED"},
            "images": [{"id": "img", "sourceUri": "s3://bucket/a.tif"}]
        });

        let scene: Scene = serde_json::from_value(raw).unwrap();
        assert_eq!(scene.id, "scene-1");
        assert_eq!(scene.metadata_f64("cloudyPixelPercentage"), Some(12.5));
        assert_eq!(scene.scene_order, Some(2));
        assert_eq!(scene.images[0].source_uri, "s3://bucket/a.tif");
        assert_eq!(
            scene.status_fields.and_then(|s| s.ingest_status).as_deref(),
            Some("INGESTED")
        );
    }

    #[test]
    fn test_query_requires_exactly_one_area() {
        assert!(SceneQuery::default().to_params().is_err());

        let both = SceneQuery {
            shape_id: Some("shape".into()),
            bbox: Some(Bbox::new(0.0, 0.0, 1.0, 1.0)),
            ..Default::default()
        };
        assert!(matches!(both.to_params(), Err(RadiantError::InvalidSceneQuery { .. })));
    }

    #[test]
    fn test_query_params() {
        let params = SceneQuery::for_bbox(Bbox::new(0.0, 1.0, 2.0, 3.0))
            .datasource("ds-1")
            .max_cloud_cover(13.26)
            .acquired_between(Some("2015-01-21T00:00:00.000Z".into()), None)
            .param("sunElevation", "40")
            .to_params()
            .unwrap();

        assert_eq!(
            params,
            vec![
                ("maxCloudCover".to_string(), "13.26".to_string()),
                ("bbox".to_string(), "0,1,2,3".to_string()),
                ("datasource".to_string(), "ds-1".to_string()),
                ("minAcquisitionDatetime".to_string(), "2015-01-21T00:00:00.000Z".to_string()),
                ("sunElevation".to_string(), "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_cloud_cover() {
        let params = SceneQuery::for_shape("abc").to_params().unwrap();
        assert_eq!(params[0], ("maxCloudCover".to_string(), "10".to_string()));
        assert_eq!(params[1], ("shape".to_string(), "abc".to_string()));
    }
}

//! Per-project operations.

use crate::client::{decode, ensure_success, Client};
use crate::ports::{ApiRequest, Method};
use radiant_core::error::{RadiantError, Result};
use radiant_core::models::{
    Bbox, ExportMask, ExportStatus, ItemField, MapToken, NewExport, NewProject, ProjectRecord, Scene,
};
use radiant_geo::spatial::extent_center;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Image encodings served by the tile export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Tiff,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Tiff => "image/tiff",
        }
    }
}

/// A project on the platform, bound to the client used to reach it
#[derive(Debug, Clone)]
pub struct Project<'a> {
    client: &'a Client,
    record: ProjectRecord,
}

impl<'a> Project<'a> {
    pub fn new(client: &'a Client, record: ProjectRecord) -> Self {
        Self { client, record }
    }

    /// Create a project via `POST /projects/`
    pub fn create(client: &'a Client, project: &NewProject) -> Result<Self> {
        let record: ProjectRecord = decode(client.post_json("/projects/", serde_json::to_value(project)?)?)?;
        tracing::info!(project_id = %record.id, name = %record.name, "Created project");
        Ok(Self::new(client, record))
    }

    /// Look up an existing project
    pub fn fetch(client: &'a Client, project_id: &str) -> Result<Self> {
        Ok(Self::new(client, client.project_record(project_id)?))
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }

    fn path(&self, suffix: &str) -> String {
        format!("/projects/{}{}", self.record.id, suffix)
    }

    // -- scenes -------------------------------------------------------------

    /// Add scenes without ordering them; returns the number being ingested
    pub fn add_scenes(&self, scene_ids: &[String]) -> Result<u64> {
        let response = self.client.post_json(&self.path("/scenes/"), json!(scene_ids))?;
        let added = match &response {
            Value::Number(n) => n.as_u64(),
            Value::Array(items) => Some(items.len() as u64),
            _ => None,
        }
        .ok_or_else(|| RadiantError::Serialization(format!("unexpected add-scenes response: {}", response)))?;

        tracing::info!(project_id = %self.record.id, added, "Added scenes to project");
        Ok(added)
    }

    /// Order the project's scenes; the first id is the top layer.
    ///
    /// `scene_ids` must name every scene of the project exactly once.
    pub fn set_scene_order(&self, scene_ids: &[String]) -> Result<()> {
        let mut remaining: HashSet<String> = self.scenes()?.into_iter().map(|s| s.id).collect();

        for id in scene_ids {
            if !remaining.remove(id) {
                return Err(self.order_mismatch(format!("scene {} is not in the project or is listed twice", id)));
            }
        }

        if !remaining.is_empty() {
            let mut missing: Vec<String> = remaining.into_iter().collect();
            missing.sort();
            return Err(self.order_mismatch(format!("order is missing scenes: {}", missing.join(", "))));
        }

        self.client.put_json(&self.path("/order/"), json!(scene_ids))?;
        tracing::debug!(project_id = %self.record.id, scenes = scene_ids.len(), "Set scene order");
        Ok(())
    }

    fn order_mismatch(&self, reason: String) -> RadiantError {
        RadiantError::SceneOrderMismatch { project_id: self.record.id.clone(), reason }
    }

    /// Add scenes, then order them as given
    pub fn add_ordered_scenes(&self, scene_ids: &[String]) -> Result<u64> {
        let added = self.add_scenes(scene_ids)?;
        self.set_scene_order(scene_ids)?;
        Ok(added)
    }

    /// All scenes in the project
    pub fn scenes(&self) -> Result<Vec<Scene>> {
        self.client.collect(&self.path("/scenes/"), &[], &ItemField::Results)
    }

    /// Scene order → scene id; 0 is the top-most layer
    pub fn ordered_scene_ids(&self) -> Result<BTreeMap<i64, String>> {
        Ok(self
            .scenes()?
            .into_iter()
            .filter_map(|scene| scene.scene_order.map(|order| (order, scene.id)))
            .collect())
    }

    /// Scene id → ingest status
    pub fn scenes_ingest_status(&self) -> Result<BTreeMap<String, Option<String>>> {
        Ok(self
            .scenes()?
            .into_iter()
            .map(|scene| {
                let status = scene.status_fields.and_then(|s| s.ingest_status);
                (scene.id, status)
            })
            .collect())
    }

    /// Source URIs of every image, top layer first
    pub fn image_source_uris(&self) -> Result<Vec<String>> {
        let mut scenes = self.scenes()?;
        // unordered scenes sink to the bottom, keeping server order
        scenes.sort_by_key(|scene| scene.scene_order.unwrap_or(i64::MAX));

        Ok(scenes
            .into_iter()
            .flat_map(|scene| scene.images.into_iter().map(|image| image.source_uri))
            .collect())
    }

    // -- display ------------------------------------------------------------

    /// Center of the project extent as `(lat, lon)`
    pub fn center(&self) -> Result<(f64, f64)> {
        let extent = self
            .record
            .extent
            .as_ref()
            .ok_or_else(|| RadiantError::MissingField { field: "extent".to_string() })?;
        extent_center(extent)
    }

    /// The first map token issued for this project, if any
    pub fn map_token(&self) -> Result<Option<MapToken>> {
        Ok(self.client.project_map_tokens(&self.record.id)?.into_iter().next())
    }

    /// Tile URL template with `{z}/{x}/{y}` placeholders
    pub fn tms_url(&self) -> String {
        format!(
            "{}?token={}",
            self.client.tile_url(&format!("/tiles/{}/{{z}}/{{x}}/{{y}}/", self.record.id)),
            self.client.api_token()
        )
    }

    /// Render `bbox` at `zoom` on the tile server and download the image
    pub fn thumbnail(&self, bbox: &Bbox, zoom: u32, format: ImageFormat, raw: bool) -> Result<Vec<u8>> {
        let url = self.client.tile_url(&format!("/tiles/{}/export/", self.record.id));
        let query = [
            ("bbox".to_string(), bbox.to_string()),
            ("zoom".to_string(), zoom.to_string()),
            ("token".to_string(), self.client.api_token().to_string()),
            ("colorCorrect".to_string(), (!raw).to_string()),
        ];
        let request = ApiRequest::new(Method::Get, url.clone()).query(&query).accept(format.mime_type());

        let response = self.client.send(request)?;
        if response.status == 504 {
            return Err(RadiantError::GatewayTimeout {
                message: "The export request timed out. Try decreasing the zoom level or using a smaller bounding box."
                    .to_string(),
            });
        }

        Ok(ensure_success(response, &url)?.body)
    }

    pub fn geotiff(&self, bbox: &Bbox, zoom: u32, raw: bool) -> Result<Vec<u8>> {
        self.thumbnail(bbox, zoom, ImageFormat::Tiff, raw)
    }

    pub fn png(&self, bbox: &Bbox, zoom: u32, raw: bool) -> Result<Vec<u8>> {
        self.thumbnail(bbox, zoom, ImageFormat::Png, raw)
    }

    // -- exports ------------------------------------------------------------

    /// Start an export, optionally cut to mask coordinates; returns its id.
    ///
    /// `mask_coordinates` may be Polygon (depth 3) or MultiPolygon (depth 4)
    /// coordinate lists. Without a mask the export covers every scene.
    pub fn create_export(&self, resolution: u32, mask_coordinates: Option<&Value>) -> Result<String> {
        let mask = mask_coordinates.map(ExportMask::from_coordinates).transpose()?;
        let body = NewExport::for_project(self.record.id.clone(), resolution, mask);

        let response = self.client.post_json("/exports/", serde_json::to_value(&body)?)?;
        let export_id = response
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| RadiantError::MissingField { field: "id".to_string() })?
            .to_string();

        tracing::info!(project_id = %self.record.id, export_id = %export_id, resolution, "Created export");
        Ok(export_id)
    }

    /// Export cut to an uploaded shape
    pub fn export_from_shape_id(&self, shape_id: &str, resolution: u32) -> Result<String> {
        let coordinates = self.client.shape_coordinates(shape_id)?;
        self.create_export(resolution, Some(&coordinates))
    }

    pub fn export_status(&self, export_id: &str) -> Result<ExportStatus> {
        Ok(self.client.export(export_id)?.export_status)
    }

    // -- annotations --------------------------------------------------------

    /// All annotation features of the project
    pub fn annotations(&self) -> Result<Vec<geojson::Feature>> {
        self.client.collect(&self.path("/annotations/"), &[], &ItemField::features())
    }

    /// Upload detector output as machine-generated annotations.
    ///
    /// Each feature's `class_name` and `score` properties become the
    /// annotation's `label` and `confidence`.
    pub fn post_annotations(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RadiantError::io(path, e))?;
        let mut collection: geojson::FeatureCollection = serde_json::from_str(&content)?;

        for feature in &mut collection.features {
            feature.properties = Some(annotation_properties(feature.properties.as_ref())?);
        }

        let count = collection.features.len();
        self.client.post_json(&self.path("/annotations/"), serde_json::to_value(&collection)?)?;
        tracing::info!(project_id = %self.record.id, count, "Posted annotations");
        Ok(())
    }

    /// Write the project's annotations to `path` as a FeatureCollection
    pub fn save_annotations_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let collection = geojson::FeatureCollection {
            bbox: None,
            features: self.annotations()?,
            foreign_members: None,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RadiantError::io(parent, e))?;
        }
        std::fs::write(path, serde_json::to_string(&collection)?).map_err(|e| RadiantError::io(path, e))?;

        tracing::debug!(project_id = %self.record.id, path = %path.display(), "Saved annotations");
        Ok(())
    }
}

fn annotation_properties(properties: Option<&Map<String, Value>>) -> Result<Map<String, Value>> {
    let get = |key: &str| {
        properties
            .and_then(|p| p.get(key))
            .cloned()
            .ok_or_else(|| RadiantError::MissingField { field: format!("properties.{}", key) })
    };

    let mut converted = Map::new();
    converted.insert("label".to_string(), get("class_name")?);
    converted.insert("description".to_string(), Value::String(String::new()));
    converted.insert("machineGenerated".to_string(), Value::Bool(true));
    converted.insert("confidence".to_string(), get("score")?);
    Ok(converted)
}

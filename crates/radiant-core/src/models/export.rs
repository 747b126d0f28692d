use crate::error::{RadiantError, Result};
use crate::models::geometry::{Geometry, Ring};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Server-side processing state of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportStatus {
    /// Export created
    NotExported,
    /// Export queued
    ToBeExported,
    /// Export in progress
    Exporting,
    /// Export complete, available for download
    Exported,
    /// Export failed
    Failed,
}

impl ExportStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportStatus::Exported | ExportStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStatus::NotExported => "NOTEXPORTED",
            ExportStatus::ToBeExported => "TOBEEXPORTED",
            ExportStatus::Exporting => "EXPORTING",
            ExportStatus::Exported => "EXPORTED",
            ExportStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub resolution: u32,
    #[serde(default)]
    pub crop: bool,
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub mask: Option<Geometry>,
}

/// An export as listed by `/exports/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub export_status: ExportStatus,
    #[serde(default)]
    pub export_type: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub export_options: Option<ExportOptions>,
}

impl Export {
    pub fn resolution(&self) -> Option<u32> {
        self.export_options.as_ref().map(|o| o.resolution)
    }

    pub fn mask(&self) -> Option<&Geometry> {
        self.export_options.as_ref().and_then(|o| o.mask.as_ref())
    }
}

/// Body of `POST /exports/`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExport {
    pub project_id: String,
    pub tool_run_id: Option<String>,
    pub export_status: ExportStatus,
    pub export_type: String,
    pub visibility: String,
    pub export_options: ExportOptions,
}

impl NewExport {
    /// A private S3 export of a project, optionally cut to `mask`
    pub fn for_project(project_id: impl Into<String>, resolution: u32, mask: Option<ExportMask>) -> Self {
        Self {
            project_id: project_id.into(),
            tool_run_id: None,
            export_status: ExportStatus::NotExported,
            export_type: "S3".to_string(),
            visibility: "PRIVATE".to_string(),
            export_options: ExportOptions {
                resolution,
                crop: false,
                raw: false,
                mask: mask.map(ExportMask::into_geometry),
            },
        }
    }
}

/// MultiPolygon coordinates an export is cut to
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMask(Vec<Vec<Ring>>);

impl ExportMask {
    /// Accept Polygon (depth 3) or MultiPolygon (depth 4) coordinate lists.
    ///
    /// Polygon coordinates are wrapped into a single-member MultiPolygon.
    pub fn from_coordinates(coordinates: &Value) -> Result<Self> {
        let polygons = match nesting_depth(coordinates) {
            3 => vec![serde_json::from_value::<Vec<Ring>>(coordinates.clone())?],
            4 => serde_json::from_value::<Vec<Vec<Ring>>>(coordinates.clone())?,
            depth => return Err(RadiantError::InvalidExportMask { depth }),
        };
        Ok(ExportMask(polygons))
    }

    pub fn polygons(&self) -> &[Vec<Ring>] {
        &self.0
    }

    pub fn into_geometry(self) -> Geometry {
        Geometry::multi_polygon(self.0)
    }
}

/// Depth of nested JSON arrays; scalars are 0, `[x, y]` is 1.
pub fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

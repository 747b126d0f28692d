use crate::models::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    #[default]
    Private,
    Public,
    Organization,
}

/// Which projects `/projects/` lists for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipType {
    #[default]
    Owned,
    Shared,
    Inherited,
}

impl OwnershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipType::Owned => "owned",
            OwnershipType::Shared => "shared",
            OwnershipType::Inherited => "inherited",
        }
    }
}

impl fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project as returned by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub tile_visibility: Visibility,
    #[serde(default, rename = "isAOIProject")]
    pub is_aoi_project: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub extent: Option<Geometry>,
}

/// Body of `POST /projects/`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub tile_visibility: Visibility,
    #[serde(rename = "isAOIProject")]
    pub is_aoi_project: bool,
    pub tags: Vec<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            visibility: Visibility::Private,
            tile_visibility: Visibility::Private,
            is_aoi_project: false,
            tags: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn tile_visibility(mut self, visibility: Visibility) -> Self {
        self.tile_visibility = visibility;
        self
    }

    /// AOI projects watch their area for newly available scenes
    pub fn aoi_project(mut self, is_aoi_project: bool) -> Self {
        self.is_aoi_project = is_aoi_project;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_body() {
        let body = NewProject::new("Antigua").tag("coast").aoi_project(true);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["name"], "Antigua");
        assert_eq!(value["visibility"], "PRIVATE");
        assert_eq!(value["tileVisibility"], "PRIVATE");
        assert_eq!(value["isAOIProject"], true);
        assert_eq!(value["tags"][0], "coast");
    }

    #[test]
    fn test_project_record_minimal() {
        let record: ProjectRecord =
            serde_json::from_str(r#"{"id": "p1", "name": "Test", "visibility": "PUBLIC"}"#).unwrap();
        assert_eq!(record.visibility, Visibility::Public);
        assert!(record.extent.is_none());
        assert!(record.tags.is_empty());
    }
}

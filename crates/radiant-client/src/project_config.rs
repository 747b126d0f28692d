//! Project config files listing the images and annotations of projects,
//! consumed by training-data preparation.

use crate::client::Client;
use crate::project::Project;
use radiant_core::error::{RadiantError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One project's entry in a project config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfigEntry {
    pub id: String,
    /// Image source URIs, top layer first
    pub images: Vec<String>,
    /// Local path of the project's annotation GeoJSON
    pub annotations: PathBuf,
}

impl Client {
    /// Build config entries for `project_ids`.
    ///
    /// With `annotation_paths`, entry `i` points at `annotation_paths[i]`.
    /// Without, each project's annotations are downloaded to
    /// `<temp_dir>/annotations/<uuid>.json` first.
    pub fn project_config(
        &self,
        project_ids: &[String],
        annotation_paths: Option<&[PathBuf]>,
    ) -> Result<Vec<ProjectConfigEntry>> {
        if let Some(paths) = annotation_paths {
            if paths.len() != project_ids.len() {
                return Err(RadiantError::ConfigInvalid {
                    key: "annotation_paths".to_string(),
                    reason: format!(
                        "expected one annotation path per project ({}), got {}",
                        project_ids.len(),
                        paths.len()
                    ),
                });
            }
        }

        project_ids
            .iter()
            .enumerate()
            .map(|(i, project_id)| -> Result<ProjectConfigEntry> {
                let project = Project::fetch(self, project_id)?;

                let annotations = match annotation_paths {
                    Some(paths) => paths[i].clone(),
                    None => {
                        let path = self
                            .temp_dir()
                            .join("annotations")
                            .join(format!("{}.json", uuid::Uuid::new_v4()));
                        project.save_annotations_json(&path)?;
                        path
                    }
                };

                Ok(ProjectConfigEntry {
                    id: project_id.clone(),
                    images: project.image_source_uris()?,
                    annotations,
                })
            })
            .collect()
    }

    /// Write [`Client::project_config`] to `output` as pretty JSON
    pub fn save_project_config(
        &self,
        project_ids: &[String],
        output: impl AsRef<Path>,
        annotation_paths: Option<&[PathBuf]>,
    ) -> Result<()> {
        let output = output.as_ref();
        let entries = self.project_config(project_ids, annotation_paths)?;

        std::fs::write(output, serde_json::to_string_pretty(&entries)?)
            .map_err(|e| RadiantError::io(output, e))?;

        tracing::info!(projects = entries.len(), path = %output.display(), "Saved project config");
        Ok(())
    }
}

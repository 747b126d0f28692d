//! AOI coverage accumulation.
//!
//! Scenes are consumed in the caller's order (typically most recent
//! acquisition first). Each footprint is merged into a running union and
//! accumulation stops as soon as that union contains the AOI.

use crate::models::{to_multi_polygon, Geometry};
use crate::spatial::covers;
use crate::validation::ensure_areal;
use geo::{BooleanOps, MultiPolygon};
use radiant_core::error::{RadiantError, Result};
use radiant_core::models::Scene;
use serde::Serialize;

/// Outcome of [`fill_aoi`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "scene_ids", rename_all = "snake_case")]
pub enum Coverage {
    /// Scene ids needed to cover the AOI, in consumption order
    Covered(Vec<String>),
    /// The scenes ran out before their union contained the AOI
    InsufficientImagery,
}

impl Coverage {
    pub fn scene_ids(&self) -> Option<&[String]> {
        match self {
            Coverage::Covered(ids) => Some(ids),
            Coverage::InsufficientImagery => None,
        }
    }
}

/// Running state of one coverage computation
#[derive(Debug)]
pub struct CoverageAccumulator {
    aoi: MultiPolygon,
    scene_ids: Vec<String>,
    union: MultiPolygon,
}

impl CoverageAccumulator {
    /// Start accumulating against `aoi`, which must be a valid areal geometry.
    pub fn new(aoi: &Geometry) -> Result<Self> {
        ensure_areal(aoi, "aoi")?;
        Ok(Self {
            aoi: to_multi_polygon(aoi, "aoi")?,
            scene_ids: Vec::new(),
            union: MultiPolygon::new(vec![]),
        })
    }

    /// Merge one scene's footprint and report whether the AOI is now covered.
    pub fn push(&mut self, scene: &Scene) -> Result<bool> {
        let footprint = to_multi_polygon(&scene.data_footprint, &scene.id)?;

        self.union = self.union.union(&footprint);
        self.scene_ids.push(scene.id.clone());

        let covered = covers(&self.union, &self.aoi);
        tracing::debug!(
            scene_id = %scene.id,
            scenes = self.scene_ids.len(),
            covered,
            "Merged scene footprint"
        );
        Ok(covered)
    }

    pub fn scene_ids(&self) -> &[String] {
        &self.scene_ids
    }

    pub fn union(&self) -> &MultiPolygon {
        &self.union
    }

    pub fn into_scene_ids(self) -> Vec<String> {
        self.scene_ids
    }
}

/// Pick scenes, in order, until their combined footprints cover `aoi`.
///
/// Every scene must belong to `expected_datasource_id`; the first scene
/// (in input order) that does not fails the call before any footprint is
/// merged.
pub fn fill_aoi(scenes: &[Scene], aoi: &Geometry, expected_datasource_id: &str) -> Result<Coverage> {
    if let Some(scene) = scenes.iter().find(|s| s.datasource.id != expected_datasource_id) {
        return Err(RadiantError::DatasourceMismatch {
            scene_id: scene.id.clone(),
            found: scene.datasource.id.clone(),
            expected: expected_datasource_id.to_string(),
        });
    }

    let mut accumulator = CoverageAccumulator::new(aoi)?;

    for scene in scenes {
        if accumulator.push(scene)? {
            tracing::info!(scenes = accumulator.scene_ids().len(), "AOI covered");
            return Ok(Coverage::Covered(accumulator.into_scene_ids()));
        }
    }

    tracing::info!(scenes = scenes.len(), "Insufficient imagery to cover AOI");
    Ok(Coverage::InsufficientImagery)
}

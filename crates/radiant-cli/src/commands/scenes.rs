//! Scene search and AOI coverage

use crate::cli::{FillAoiArgs, SceneFilterArgs, ScenesArgs};
use crate::errors::{from_radiant, invalid_scene_query};
use crate::output::OutputWriter;
use anyhow::Result;
use radiant_client::Client;
use radiant_core::models::{Geometry, KnownDatasource, Scene, SceneQuery};
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
struct SceneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Datasource")]
    datasource: String,
    #[tabled(rename = "Cloud %")]
    cloud_cover: String,
    #[tabled(rename = "Acquired")]
    acquired: String,
}

pub fn search(client: &Client, args: ScenesArgs, output: &OutputWriter) -> Result<()> {
    let query = args
        .datasource
        .iter()
        .fold(base_query(&args.filter)?, |query, ds| query.datasource(resolve_datasource(ds)));

    let scenes = match args.page {
        Some(page) => {
            let page = client.scenes_page(&query, page).map_err(from_radiant)?;
            if page.has_next && !output.is_json() {
                output.info(format!("More results available (page {})", page.page + 1));
            }
            page.items
        }
        None => client.scenes(&query).map_err(from_radiant)?,
    };

    let rows = scenes
        .iter()
        .map(|scene| scene_row(client, scene))
        .collect::<Result<Vec<_>>>()?;

    output.section(format!("Scenes ({})", rows.len()));
    output.table(rows);
    Ok(())
}

pub fn fill_aoi(client: &Client, args: FillAoiArgs, output: &OutputWriter) -> Result<()> {
    let datasource_id = resolve_datasource(&args.datasource);
    let query = base_query(&args.filter)?.datasource(datasource_id.clone());

    let aoi: Geometry = match (&args.filter.shape, &args.filter.bbox) {
        (Some(shape_id), _) => client.shape_geometry(shape_id).map_err(from_radiant)?,
        (None, Some(bbox)) => bbox.to_polygon(),
        (None, None) => return Err(invalid_scene_query("no area given").into()),
    };

    let scenes = client.scenes(&query).map_err(from_radiant)?;
    tracing::debug!(scenes = scenes.len(), datasource = %datasource_id, "Fetched candidate scenes");

    let coverage = client.fill_aoi(&scenes, &aoi, &datasource_id).map_err(from_radiant)?;

    if output.is_json() {
        return output.result(&coverage);
    }

    match coverage.scene_ids() {
        Some(ids) => {
            output.success(format!("AOI covered by {} of {} scenes", ids.len(), scenes.len()));
            for id in ids {
                output.kv("scene", id);
            }
        }
        None => {
            output.warning(format!(
                "Insufficient imagery: {} scenes do not cover the AOI",
                scenes.len()
            ));
            output.info("Try a higher --max-cloud-cover or a wider --after/--before window");
        }
    }
    Ok(())
}

/// Query for the area and filters shared by both commands
fn base_query(filter: &SceneFilterArgs) -> Result<SceneQuery> {
    let query = match (&filter.shape, &filter.bbox) {
        (Some(shape_id), None) => SceneQuery::for_shape(shape_id.clone()),
        (None, Some(bbox)) => SceneQuery::for_bbox(*bbox),
        _ => return Err(invalid_scene_query("exactly one of --shape or --bbox is required").into()),
    };

    Ok(query
        .max_cloud_cover(filter.max_cloud_cover)
        .acquired_between(filter.after.clone(), filter.before.clone()))
}

/// Accept a short datasource name in place of its id
fn resolve_datasource(value: &str) -> String {
    KnownDatasource::from_alias(value)
        .map(|ds| ds.id().to_string())
        .unwrap_or_else(|| value.to_string())
}

fn scene_row(client: &Client, scene: &Scene) -> Result<SceneRow> {
    let acquired = client.timestamp(scene).map_err(from_radiant)?;
    let datasource = if scene.datasource.name.is_empty() {
        scene.datasource.id.clone()
    } else {
        scene.datasource.name.clone()
    };

    Ok(SceneRow {
        id: scene.id.clone(),
        name: scene.name.clone(),
        datasource,
        cloud_cover: client.cloud_cover(scene).map(|c| format!("{:.1}", c)).unwrap_or_default(),
        acquired: acquired.unwrap_or_default(),
    })
}

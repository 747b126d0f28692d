//! Listing commands

use crate::cli::ProjectsArgs;
use crate::errors::from_radiant;
use crate::output::OutputWriter;
use anyhow::Result;
use radiant_client::Client;
use radiant_core::models::OwnershipType;
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Visibility")]
    visibility: String,
    #[tabled(rename = "AOI")]
    aoi: bool,
}

pub fn projects(client: &Client, args: ProjectsArgs, output: &OutputWriter) -> Result<()> {
    let ownership = OwnershipType::from(args.ownership);
    let projects = client.projects(ownership).map_err(from_radiant)?;

    output.section(format!("Projects ({})", ownership));
    output.table(
        projects
            .into_iter()
            .map(|p| ProjectRow {
                id: p.id,
                name: p.name,
                visibility: format!("{:?}", p.visibility),
                aoi: p.is_aoi_project,
            })
            .collect(),
    );
    Ok(())
}

#[derive(Tabled, Serialize)]
struct ExportRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Resolution")]
    resolution: String,
}

pub fn exports(client: &Client, output: &OutputWriter) -> Result<()> {
    let exports = client.exports().map_err(from_radiant)?;

    output.section("Exports");
    output.table(
        exports
            .into_iter()
            .map(|e| ExportRow {
                resolution: e.resolution().map(|r| r.to_string()).unwrap_or_default(),
                id: e.id,
                project: e.project_id.unwrap_or_default(),
                status: e.export_status.to_string(),
            })
            .collect(),
    );
    Ok(())
}

#[derive(Tabled, Serialize)]
struct AnalysisRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

pub fn analyses(client: &Client, output: &OutputWriter) -> Result<()> {
    let analyses = client.analyses().map_err(from_radiant)?;

    output.section("Analyses");
    output.table(
        analyses
            .into_iter()
            .map(|a| AnalysisRow {
                id: a.id,
                name: a.name,
                created_at: a.created_at.unwrap_or_default(),
            })
            .collect(),
    );
    Ok(())
}

#[derive(Tabled, Serialize)]
struct NamedRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn datasources(client: &Client, output: &OutputWriter) -> Result<()> {
    let datasources = client.datasources().map_err(from_radiant)?;

    output.section("Datasources");
    output.table(datasources.into_iter().map(|(name, d)| NamedRow { name, id: d.id }).collect());
    Ok(())
}

pub fn shapes(client: &Client, output: &OutputWriter) -> Result<()> {
    let shapes = client.shapes().map_err(from_radiant)?;

    output.section("Shapes");
    let mut rows: Vec<NamedRow> = shapes.into_iter().map(|(id, name)| NamedRow { name, id }).collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    output.table(rows);
    Ok(())
}

#[derive(Tabled, Serialize)]
struct MapTokenRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Project")]
    project: String,
}

pub fn map_tokens(client: &Client, output: &OutputWriter) -> Result<()> {
    let tokens = client.map_tokens().map_err(from_radiant)?;

    output.section("Map Tokens");
    output.table(
        tokens
            .into_iter()
            .map(|t| MapTokenRow {
                id: t.id,
                name: t.name,
                project: t.project.unwrap_or_default(),
            })
            .collect(),
    );
    Ok(())
}

use clap::{Args, Parser, Subcommand, ValueEnum};
use radiant_core::models::{Bbox, OwnershipType};
use std::path::PathBuf;

/// Radiant - Radiant Earth platform client
#[derive(Parser, Debug)]
#[command(name = "radiant")]
#[command(about = "Query projects, scenes and exports on the Radiant Earth platform", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// API host (overrides RADIANT_HOST and the config file)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects
    Projects(ProjectsArgs),

    /// List exports
    Exports,

    /// List lab analyses
    Analyses,

    /// List datasources
    Datasources,

    /// List uploaded shapes
    Shapes,

    /// List map tokens
    MapTokens,

    /// Search scenes
    Scenes(ScenesArgs),

    /// Pick the most recent scenes that together cover an area
    FillAoi(FillAoiArgs),

    /// Show the status of an export
    ExportStatus(ExportStatusArgs),

    /// Show effective configuration and where each value came from
    Config,
}

/// Ownership filter for project listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Ownership {
    Owned,
    Shared,
    Inherited,
}

impl From<Ownership> for OwnershipType {
    fn from(value: Ownership) -> Self {
        match value {
            Ownership::Owned => OwnershipType::Owned,
            Ownership::Shared => OwnershipType::Shared,
            Ownership::Inherited => OwnershipType::Inherited,
        }
    }
}

#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Which projects to list
    #[arg(long, value_enum, default_value = "owned")]
    pub ownership: Ownership,
}

/// Scene search filters shared by `scenes` and `fill-aoi`
#[derive(Args, Debug)]
pub struct SceneFilterArgs {
    /// Platform shape id to search within
    #[arg(long, conflicts_with = "bbox", required_unless_present = "bbox")]
    pub shape: Option<String>,

    /// Bounding box as minx,miny,maxx,maxy
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<Bbox>,

    /// Maximum cloud cover percentage
    #[arg(long, default_value = "10")]
    pub max_cloud_cover: f64,

    /// Earliest acquisition time (ISO-8601)
    #[arg(long)]
    pub after: Option<String>,

    /// Latest acquisition time (ISO-8601)
    #[arg(long)]
    pub before: Option<String>,
}

#[derive(Args, Debug)]
pub struct ScenesArgs {
    #[command(flatten)]
    pub filter: SceneFilterArgs,

    /// Datasource id or alias (landsat8, sentinel2, modis-terra, modis-aqua); repeatable
    #[arg(long)]
    pub datasource: Vec<String>,

    /// Fetch only this page instead of all pages
    #[arg(long)]
    pub page: Option<u32>,
}

#[derive(Args, Debug)]
pub struct FillAoiArgs {
    #[command(flatten)]
    pub filter: SceneFilterArgs,

    /// Datasource id or alias every scene must belong to
    #[arg(long)]
    pub datasource: String,
}

#[derive(Args, Debug)]
pub struct ExportStatusArgs {
    /// Project id
    pub project: String,

    /// Export id
    pub export: String,
}

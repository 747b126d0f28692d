use serde::{Deserialize, Serialize};

/// A sensor/platform identity as listed by `/datasources/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub extras: serde_json::Value,
}

/// The datasource reference embedded in a scene record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl DatasourceRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// Datasources whose scene metadata layout the client understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownDatasource {
    Landsat8,
    Sentinel2,
    ModisTerra,
    ModisAqua,
}

impl KnownDatasource {
    pub const ALL: [KnownDatasource; 4] = [
        KnownDatasource::Landsat8,
        KnownDatasource::Sentinel2,
        KnownDatasource::ModisTerra,
        KnownDatasource::ModisAqua,
    ];

    /// Platform identifier of this datasource
    pub fn id(&self) -> &'static str {
        match self {
            KnownDatasource::Landsat8 => "697a0b91-b7a8-446e-842c-97cda155554d",
            KnownDatasource::Sentinel2 => "4a50cb75-815d-4fe5-8bc1-144729ce5b42",
            KnownDatasource::ModisTerra => "a11b768b-d869-476e-a1ed-0ac3205ed761",
            KnownDatasource::ModisAqua => "55735945-9da5-47c3-8ae4-572b5e11205b",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            KnownDatasource::Landsat8 => "Landsat 8",
            KnownDatasource::Sentinel2 => "Sentinel-2",
            KnownDatasource::ModisTerra => "MODIS/Terra",
            KnownDatasource::ModisAqua => "MODIS/Aqua",
        }
    }

    /// Look up a datasource by platform id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ds| ds.id() == id)
    }

    /// Short command-line name
    pub fn alias(&self) -> &'static str {
        match self {
            KnownDatasource::Landsat8 => "landsat8",
            KnownDatasource::Sentinel2 => "sentinel2",
            KnownDatasource::ModisTerra => "modis-terra",
            KnownDatasource::ModisAqua => "modis-aqua",
        }
    }

    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ds| ds.alias().eq_ignore_ascii_case(alias))
    }
}

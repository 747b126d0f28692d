use serde::{Deserialize, Serialize};

/// A token granting tile access to a project or tool run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapToken {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub tool_run: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

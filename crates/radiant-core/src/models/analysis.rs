use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A lab analysis (tool run) over one or more projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// The analysis graph as submitted; layout is tool-specific
    #[serde(default)]
    pub execution_parameters: Option<Value>,
}

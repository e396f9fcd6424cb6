use serde::{Deserialize, Serialize};

use crate::catalog::bodies::CelestialBodyDescriptor;

/// Serialized catalog: the list of bodies a viewer loads at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    /// Human-readable catalog name (e.g., "solar-system").
    #[serde(default = "default_name")]
    pub name: String,
    /// All bodies, central body included.
    pub bodies: Vec<CelestialBodyDescriptor>,
}

fn default_name() -> String {
    "catalog".to_string()
}

impl CatalogManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,
}

/// OpenAPI 3.x components; only reusable schemas are consumed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,
}

/// A loaded Swagger 2.0 or OpenAPI 3.x document.
///
/// Paths and operations are not modelled; the definitions map is the
/// only input the reference model needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    #[serde(default)]
    pub info: Info,

    /// Swagger 2.0 definitions, keyed by fully-qualified name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl ApiSpec {
    /// The declared `swagger` or `openapi` version string.
    pub fn version(&self) -> Option<&str> {
        self.swagger.as_deref().or(self.openapi.as_deref())
    }

    /// All named schemas in the document, in document order.
    pub fn definitions(&self) -> impl Iterator<Item = (&String, &Schema)> {
        let component_schemas = self.components.iter().flat_map(|c| c.schemas.iter());
        self.definitions.iter().chain(component_schemas)
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len() + self.components.as_ref().map_or(0, |c| c.schemas.len())
    }
}

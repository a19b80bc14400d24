use serde::Serialize;

use super::definition::LinkStyle;
use super::identity::DefinitionKey;
use super::registry::Definitions;

/// One named, typed member of a definition's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    /// Declared type, e.g. `string`, `Container array` or `PodSpec`.
    pub type_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_merge_key: Option<String>,
    /// The definition the declared type resolves to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<DefinitionKey>,
}

impl Field {
    pub fn is_reference(&self) -> bool {
        self.definition.is_some()
    }

    /// The type name with the referenced kind replaced by a markdown link.
    pub fn md_type(&self, definitions: &Definitions, style: LinkStyle) -> String {
        let target = self
            .definition
            .as_ref()
            .and_then(|key| definitions.get_by_key(key.as_str()));
        match target {
            Some(def) => self.type_name.replacen(&def.name, &def.md_link(style), 1),
            None => self.type_name.clone(),
        }
    }
}

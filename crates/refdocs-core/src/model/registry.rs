use indexmap::IndexMap;

use super::definition::Definition;
use super::identity::{DefinitionKey, schema_group_version_kind};
use crate::parse::schema::Schema;

/// Index over every definition in the loaded documents.
///
/// Owns all [`Definition`]s. Cross references between definitions are
/// stored as [`DefinitionKey`]s and looked up here.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    by_key: IndexMap<DefinitionKey, Definition>,
    by_kind: IndexMap<String, Vec<DefinitionKey>>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, replacing any previous one with the same key.
    pub fn put(&mut self, definition: Definition) -> Option<Definition> {
        self.by_key.insert(definition.key(), definition)
    }

    pub fn get_by_key(&self, key: &str) -> Option<&Definition> {
        self.by_key.get(key)
    }

    pub fn get_by_group_version_kind(
        &self,
        group: &str,
        version: &str,
        kind: &str,
    ) -> Option<&Definition> {
        self.get_by_key(DefinitionKey::new(group, version, kind).as_str())
    }

    /// The registered definition a property schema refers to, if any.
    pub fn get_for_schema(&self, schema: &Schema) -> Option<&Definition> {
        let gvk = schema_group_version_kind(schema)?;
        self.get_by_group_version_kind(&gvk.group, &gvk.version, &gvk.kind)
    }

    /// True if the schema names a definition kind rather than a primitive.
    pub fn is_complex(&self, schema: &Schema) -> bool {
        schema_group_version_kind(schema).is_some()
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Definition> {
        self.by_key.get_mut(key)
    }

    pub fn all(&self) -> impl Iterator<Item = &Definition> {
        self.by_key.values()
    }

    pub(crate) fn all_mut(&mut self) -> impl Iterator<Item = &mut Definition> {
        self.by_key.values_mut()
    }

    pub fn keys(&self) -> Vec<DefinitionKey> {
        self.by_key.keys().cloned().collect()
    }

    /// Look up a list of keys, skipping any that are not registered.
    pub fn resolve<'a>(
        &'a self,
        keys: &'a [DefinitionKey],
    ) -> impl Iterator<Item = &'a Definition> + 'a {
        keys.iter().filter_map(|k| self.get_by_key(k.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Rebuild the kind-name index from the current entries.
    pub fn build_kind_index(&mut self) {
        self.by_kind.clear();
        for (key, def) in &self.by_key {
            self.by_kind
                .entry(def.name.clone())
                .or_default()
                .push(key.clone());
        }
    }

    /// Every version of a kind; newest first once versions are ranked.
    pub fn by_kind(&self, kind: &str) -> &[DefinitionKey] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.by_kind.keys().map(String::as_str)
    }

    pub(crate) fn set_kind_order(&mut self, kind: &str, ordered: Vec<DefinitionKey>) {
        if let Some(entry) = self.by_kind.get_mut(kind) {
            *entry = ordered;
        }
    }

    /// Definitions sharing this one's kind but not its version.
    pub fn other_versions(&self, definition: &Definition) -> Vec<DefinitionKey> {
        self.resolve(self.by_kind(&definition.name))
            .filter(|d| d.version != definition.version)
            .map(Definition::key)
            .collect()
    }
}

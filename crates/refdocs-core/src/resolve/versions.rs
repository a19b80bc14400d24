use std::collections::HashSet;

use crate::model::version::newest_first;
use crate::model::{Definition, DefinitionKey, Definitions};

/// A definition's identity as seen by the version ranker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedKey {
    pub key: DefinitionKey,
    pub group: String,
    pub version: String,
}

impl From<&Definition> for VersionedKey {
    fn from(definition: &Definition) -> Self {
        Self {
            key: definition.key(),
            group: definition.group.clone(),
            version: definition.version.clone(),
        }
    }
}

/// Sort newest version first. Identical version strings from different
/// groups are ordered by group name. The sort is stable.
pub fn order_by_version(mut entries: Vec<VersionedKey>) -> Vec<VersionedKey> {
    entries.sort_by(|a, b| {
        newest_first(&a.version, &b.version).then_with(|| a.group.cmp(&b.group))
    });
    entries
}

/// Keys of every entry after the first of an already ordered sequence.
pub fn superseded(ordered: &[VersionedKey]) -> HashSet<DefinitionKey> {
    ordered.iter().skip(1).map(|e| e.key.clone()).collect()
}

/// Order each kind's versions newest first and mark the rest as old.
///
/// Requires the kind index to be built. Kinds with a single version are
/// left alone.
pub fn rank_versions(definitions: &mut Definitions) {
    let kinds: Vec<String> = definitions.kinds().map(String::from).collect();
    for kind in kinds {
        let entries: Vec<VersionedKey> = definitions
            .resolve(definitions.by_kind(&kind))
            .map(VersionedKey::from)
            .collect();
        if entries.len() <= 1 {
            continue;
        }

        let ordered = order_by_version(entries);
        let old = superseded(&ordered);
        let keys: Vec<DefinitionKey> = ordered.into_iter().map(|e| e.key).collect();
        for key in &keys {
            if let Some(definition) = definitions.get_mut(key.as_str()) {
                definition.is_old_version = old.contains(key);
            }
        }
        definitions.set_kind_order(&kind, keys);
    }
}

/// Populate `other_versions` for every definition, newest first.
pub fn initialize_other_versions(definitions: &mut Definitions) {
    for key in definitions.keys() {
        let Some(definition) = definitions.get_by_key(key.as_str()) else {
            continue;
        };
        let others = definitions.other_versions(definition);
        if let Some(definition) = definitions.get_mut(key.as_str()) {
            definition.other_versions = others;
        }
    }
}

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{InlineRule, RESOURCE_PLACEHOLDER};
use crate::model::{Definition, DefinitionKey, Definitions};

/// Referencing definitions keyed by target, ordered by display name then key.
type ReverseIndex = BTreeMap<DefinitionKey, BTreeSet<(String, DefinitionKey)>>;

/// Record, on every definition, which definitions use it as a field type.
pub fn initialize_appears_in(definitions: &mut Definitions) {
    let mut appears_in = ReverseIndex::new();
    for parent in definitions.all() {
        for target in parent.fields.iter().filter_map(|f| f.definition.as_ref()) {
            appears_in
                .entry(target.clone())
                .or_default()
                .insert((parent.name.clone(), parent.key()));
        }
    }

    for definition in definitions.all_mut() {
        definition.appears_in.clear();
    }
    for (target, parents) in appears_in {
        if let Some(definition) = definitions.get_mut(target.as_str()) {
            definition.appears_in = parents.into_iter().map(|(_, key)| key).collect();
        }
    }
}

/// The owning kind a pattern extracts from `kind`.
///
/// `owner_kind("DeploymentSpec", "${resource}Spec")` is `Some("Deployment")`.
/// Patterns without the placeholder never match.
pub fn owner_kind<'a>(kind: &'a str, pattern: &str) -> Option<&'a str> {
    let (prefix, suffix) = pattern.split_once(RESOURCE_PLACEHOLDER)?;
    let owner = kind.strip_prefix(prefix)?.strip_suffix(suffix)?;
    (!owner.is_empty()).then_some(owner)
}

/// The definition `child` should be documented inside, if any.
///
/// Owners are looked up in the child's own group and version. Rules and
/// their patterns are tried in order and the first registered owner wins.
pub fn find_owner(
    definitions: &Definitions,
    child: &Definition,
    rules: &[InlineRule],
) -> Option<DefinitionKey> {
    let child_key = child.key();
    rules
        .iter()
        .flat_map(|rule| rule.patterns.iter())
        .find_map(|pattern| {
            let owner = owner_kind(&child.kind, pattern)?;
            definitions
                .get_by_group_version_kind(&child.group, &child.version, owner)
                .map(Definition::key)
                .filter(|key| *key != child_key)
        })
}

/// Mark subordinate definitions as inlined into their owners.
pub fn initialize_inlined(definitions: &mut Definitions, rules: &[InlineRule]) {
    let assignments: Vec<(DefinitionKey, String, DefinitionKey)> = definitions
        .all()
        .filter_map(|child| {
            find_owner(definitions, child, rules).map(|owner| (child.key(), child.name.clone(), owner))
        })
        .collect();

    for definition in definitions.all_mut() {
        definition.is_inlined = false;
        definition.inline.clear();
    }

    let mut inline = ReverseIndex::new();
    for (child, name, owner) in assignments {
        if let Some(definition) = definitions.get_mut(child.as_str()) {
            definition.is_inlined = true;
            definition.in_toc = false;
        }
        inline.entry(owner).or_default().insert((name, child));
    }
    for (owner, children) in inline {
        if let Some(definition) = definitions.get_mut(owner.as_str()) {
            definition.inline = children.into_iter().map(|(_, key)| key).collect();
        }
    }
}

use log::{debug, warn};
use serde::Serialize;

use crate::config::ResourceCategory;
use crate::model::{DefinitionKey, Definitions};

/// One rendered table-of-contents section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocSection {
    pub name: String,
    pub include: String,
    pub definitions: Vec<DefinitionKey>,
}

/// Set `in_toc` on every definition a resource category lists.
///
/// Inlined definitions are never listed. Category entries that do not
/// resolve to a registered definition are skipped with a warning.
pub fn mark_toc(definitions: &mut Definitions, categories: &[ResourceCategory]) {
    for definition in definitions.all_mut() {
        definition.in_toc = false;
    }
    for category in categories {
        for resource in &category.resources {
            let key = DefinitionKey::new(&resource.group, &resource.version, &resource.name);
            match definitions.get_mut(key.as_str()) {
                Some(definition) if definition.is_inlined => {
                    debug!("{key} is inlined and stays out of the table of contents")
                }
                Some(definition) => definition.in_toc = true,
                None => warn!(
                    "could not find definition {} {}/{} listed in category {}",
                    resource.name, resource.group, resource.version, category.name
                ),
            }
        }
    }
}

/// The table of contents, keeping category and resource order.
pub fn table_of_contents(
    definitions: &Definitions,
    categories: &[ResourceCategory],
) -> Vec<TocSection> {
    categories
        .iter()
        .map(|category| TocSection {
            name: category.name.clone(),
            include: category.include.clone(),
            definitions: category
                .resources
                .iter()
                .filter_map(|r| definitions.get_by_group_version_kind(&r.group, &r.version, &r.name))
                .filter(|d| d.in_toc)
                .map(|d| d.key())
                .collect(),
        })
        .collect()
}

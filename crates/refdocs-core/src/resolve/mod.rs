pub mod fields;
pub mod relations;
pub mod toc;
pub mod versions;
pub mod visit;

use log::debug;

use crate::config::{DocsConfig, InlineRule, ResourceCategory, default_inline_rules};
use crate::error::ModelError;
use crate::model::Definitions;
use crate::parse::spec::ApiSpec;

/// Inputs to the relationship and table-of-contents phases.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Applied in declaration order; the first matching pattern wins.
    pub inline_rules: Vec<InlineRule>,
    pub resource_categories: Vec<ResourceCategory>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            inline_rules: default_inline_rules(),
            resource_categories: Vec::new(),
        }
    }
}

impl From<&DocsConfig> for BuildOptions {
    fn from(config: &DocsConfig) -> Self {
        Self {
            inline_rules: config.inline_definitions.clone(),
            resource_categories: config.resource_categories.clone(),
        }
    }
}

/// Build the resolved definition model with the default inline rules.
pub fn build_definitions(specs: &[ApiSpec]) -> Result<Definitions, ModelError> {
    build_definitions_with_options(specs, &BuildOptions::default())
}

/// Build the resolved definition model.
///
/// Each phase relies on every earlier phase having completed for all
/// definitions; the order below is load-bearing.
pub fn build_definitions_with_options(
    specs: &[ApiSpec],
    options: &BuildOptions,
) -> Result<Definitions, ModelError> {
    // Phase 1: Index every resource definition
    let mut definitions = Definitions::new();
    visit::visit_definitions(specs, |definition| {
        definitions.put(definition);
    })?;
    debug!("indexed {} definitions", definitions.len());

    // Phase 2: Resolve fields against the complete index
    fields::initialize_fields_for_all(&mut definitions);

    // Phase 3: Group by kind and mark superseded versions
    definitions.build_kind_index();
    versions::rank_versions(&mut definitions);
    versions::initialize_other_versions(&mut definitions);

    // Phase 4: Derived relations
    relations::initialize_appears_in(&mut definitions);
    relations::initialize_inlined(&mut definitions, &options.inline_rules);

    // Phase 5: Table of contents
    toc::mark_toc(&mut definitions, &options.resource_categories);

    Ok(definitions)
}

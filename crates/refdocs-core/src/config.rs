use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::LinkStyle;

/// Placeholder an inline rule pattern uses for the owning kind.
pub const RESOURCE_PLACEHOLDER: &str = "${resource}";

/// Top-level project configuration loaded from `.refdocs.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// API specification documents to load, in order.
    pub specs: Vec<String>,
    pub link_style: LinkStyle,
    pub resource_categories: Vec<ResourceCategory>,
    pub inline_definitions: Vec<InlineRule>,
    pub samples: Vec<SampleTemplate>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            specs: vec!["swagger.json".to_string()],
            link_style: LinkStyle::Grouped,
            resource_categories: Vec::new(),
            inline_definitions: default_inline_rules(),
            samples: Vec::new(),
        }
    }
}

/// A named table-of-contents section listing top-level resources.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResourceCategory {
    pub name: String,
    /// Anchor or include name used by the renderer.
    pub include: String,
    pub resources: Vec<ResourceRef>,
}

/// A resource listed in a category, by kind name, version and group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResourceRef {
    pub name: String,
    pub version: String,
    pub group: String,
    pub description_warning: Option<String>,
    pub description_note: Option<String>,
    pub concept_guide: Option<String>,
    pub related_tasks: Vec<String>,
}

/// Rule for documenting a subordinate definition inside its owner.
///
/// Each pattern contains [`RESOURCE_PLACEHOLDER`], e.g. `${resource}Spec`
/// inlines `DeploymentSpec` into `Deployment`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InlineRule {
    /// Display name of the inlined section, e.g. `Spec`.
    pub name: String,
    #[serde(rename = "match")]
    pub patterns: Vec<String>,
}

impl InlineRule {
    pub fn new(name: &str, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// A template-backed sample provider entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SampleTemplate {
    /// Tab title, e.g. `kubectl`.
    pub tab: String,
    /// Syntax of the rendered text, e.g. `bash` or `yaml`.
    pub kind: String,
    pub template: String,
}

/// Inline rules used when the config does not list any.
pub fn default_inline_rules() -> Vec<InlineRule> {
    vec![
        InlineRule::new("Spec", &["${resource}Spec"]),
        InlineRule::new("Status", &["${resource}Status"]),
        InlineRule::new("List", &["${resource}List"]),
        InlineRule::new("Strategy", &["${resource}Strategy"]),
        InlineRule::new("Rollback", &["${resource}Rollback"]),
        InlineRule::new("RollingUpdate", &["RollingUpdate${resource}"]),
        InlineRule::new("EventSource", &["${resource}EventSource"]),
    ]
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".refdocs.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DocsConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DocsConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# refdocs configuration
specs:
  - swagger.json
link_style: grouped   # grouped | tags

resource_categories:
  - name: Workloads
    include: workloads
    resources:
      - name: Deployment
        version: v1beta1
        group: apps
      - name: Pod
        version: v1
        group: core

inline_definitions:
  - name: Spec
    match: ["${resource}Spec"]
  - name: Status
    match: ["${resource}Status"]
  - name: List
    match: ["${resource}List"]
  - name: Strategy
    match: ["${resource}Strategy"]
  - name: Rollback
    match: ["${resource}Rollback"]
  - name: RollingUpdate
    match: ["RollingUpdate${resource}"]
  - name: EventSource
    match: ["${resource}EventSource"]

samples: []
  # - tab: kubectl
  #   kind: bash
  #   template: "kubectl create -f {{ name | lower }}.yaml"
"#
}

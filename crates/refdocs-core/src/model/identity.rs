use std::borrow::Borrow;
use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::error::ModelError;
use crate::parse::reference::ref_target;
use crate::parse::schema::Schema;

/// Group marker for core types, e.g. `io.k8s.kubernetes.pkg.api.v1.Pod`.
const CORE_MARKER: &str = "api";
/// Group marker for named groups, e.g. `io.k8s.kubernetes.pkg.apis.apps.v1beta1.Deployment`.
const GROUPS_MARKER: &str = "apis";
const CORE_GROUP: &str = "core";

/// The three-part identity of an API resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    pub fn key(&self) -> DefinitionKey {
        DefinitionKey::new(&self.group, &self.version, &self.kind)
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.group, self.version, self.kind)
    }
}

/// Composite registry key, `group.version.kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DefinitionKey(String);

impl DefinitionKey {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self(format!("{group}.{version}.{kind}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DefinitionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefinitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a fully-qualified definition name denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameShape {
    /// A versioned API resource type.
    Resource(GroupVersionKind),
    /// A utility or primitive type such as `IntOrString` or `RawExtension`.
    Utility,
    /// Fewer than four dot-separated segments.
    TooShort,
}

/// Derive the (group, version, kind) of a fully-qualified schema name.
///
/// Names of an unknown shape mean the input document is not one this
/// model understands, so they are reported as an error rather than skipped.
pub fn parse_definition_name(name: &str) -> Result<NameShape, ModelError> {
    let parts: Vec<&str> = name.split('.').collect();
    let n = parts.len();
    if n < 4 {
        return Ok(NameShape::TooShort);
    }

    let (group, version, kind) = if parts[n - 3] == CORE_MARKER {
        (CORE_GROUP, parts[n - 2], parts[n - 1])
    } else if parts[n - 4] == GROUPS_MARKER {
        (parts[n - 3], parts[n - 2], parts[n - 1])
    } else if parts[n - 3] == "util" || parts[n - 3] == "pkg" {
        return Ok(NameShape::Utility);
    } else {
        return Err(ModelError::UnrecognizedName(name.to_string()));
    };

    if group.is_empty() || version.is_empty() || kind.is_empty() {
        return Err(ModelError::UnrecognizedName(name.to_string()));
    }
    Ok(NameShape::Resource(GroupVersionKind::new(group, version, kind)))
}

/// Derive the (group, version, kind) a property schema points at.
///
/// Follows `$ref`, array items and map values. Anything that is not a
/// reference to a resource definition yields `None`.
pub fn schema_group_version_kind(schema: &Schema) -> Option<GroupVersionKind> {
    if let Some(ref_path) = &schema.ref_path {
        let name = match ref_target(ref_path) {
            Ok(name) => name,
            Err(e) => {
                debug!("ignoring reference: {e}");
                return None;
            }
        };
        return match parse_definition_name(name) {
            Ok(NameShape::Resource(gvk)) => Some(gvk),
            Ok(_) => None,
            Err(e) => {
                warn!("unresolvable reference {ref_path}: {e}");
                None
            }
        };
    }
    if let Some(items) = schema.array_items() {
        return schema_group_version_kind(items);
    }
    if let Some(values) = schema.map_values() {
        return schema_group_version_kind(values);
    }
    None
}

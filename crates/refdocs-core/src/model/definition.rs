use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::identity::{DefinitionKey, GroupVersionKind};
use crate::parse::schema::Schema;

const RESOURCE_NAME_KEY: &str = "x-kubernetes-resource";

/// How documentation anchors are formed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
    /// `name-version`; used when versions are rendered as tags.
    Tags,
    /// `name-version-group`.
    #[default]
    Grouped,
}

/// The documentation model of one versioned API resource schema.
#[derive(Debug, Clone, Serialize)]
pub struct Definition {
    #[serde(skip)]
    schema: Schema,

    /// Display name, e.g. `Deployment`.
    pub name: String,
    pub group: String,
    pub version: String,
    pub kind: String,
    /// The fully-qualified name the definition was declared under.
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Rendered as a standalone table-of-contents entry.
    pub in_toc: bool,
    /// Documented inside another definition instead of standalone.
    pub is_inlined: bool,
    /// Superseded by a newer version of the same kind.
    pub is_old_version: bool,

    /// Definitions documented inline with this one, e.g. `PodSpec` in `Pod`.
    pub inline: Vec<DefinitionKey>,
    /// Definitions with a field whose type is this one.
    pub appears_in: Vec<DefinitionKey>,
    /// Same kind, different version; newest first.
    pub other_versions: Vec<DefinitionKey>,

    pub fields: Vec<Field>,
}

impl Definition {
    pub fn new(full_name: impl Into<String>, gvk: GroupVersionKind, schema: Schema) -> Self {
        let resource = schema.extension_str(RESOURCE_NAME_KEY).map(String::from);
        Self {
            name: gvk.kind.clone(),
            group: gvk.group,
            version: gvk.version,
            kind: gvk.kind,
            full_name: full_name.into(),
            resource,
            schema,
            in_toc: false,
            is_inlined: false,
            is_old_version: false,
            inline: Vec::new(),
            appears_in: Vec::new(),
            other_versions: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn key(&self) -> DefinitionKey {
        DefinitionKey::new(&self.group, &self.version, &self.kind)
    }

    pub fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind::new(&self.group, &self.version, &self.kind)
    }

    /// The raw schema this definition was built from.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn description(&self) -> &str {
        self.schema.description.as_deref().unwrap_or_default()
    }

    pub fn group_display_name(&self) -> String {
        if self.group.is_empty() || self.group == "core" {
            return "Core".to_string();
        }
        self.group.clone()
    }

    /// Name of the operation group for this definition's API group.
    pub fn operation_group_name(&self) -> String {
        if self.group.eq_ignore_ascii_case("rbac") {
            return "RbacAuthorization".to_string();
        }
        self.group.to_upper_camel_case()
    }

    /// Fields ordered by name.
    pub fn sorted_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    pub fn anchor(&self, style: LinkStyle) -> String {
        let name = self.name.to_lowercase();
        match style {
            LinkStyle::Tags => format!("{}-{}", name, self.version),
            LinkStyle::Grouped => format!("{}-{}-{}", name, self.version, self.group),
        }
    }

    pub fn md_link(&self, style: LinkStyle) -> String {
        format!("[{}](#{})", self.name, self.anchor(style))
    }

    pub fn href_link(&self, style: LinkStyle) -> String {
        format!("<a href=\"#{}\">{}</a>", self.anchor(style), self.name)
    }

    pub fn version_link(&self, style: LinkStyle) -> String {
        format!("<a href=\"#{}\">{}</a>", self.anchor(style), self.version)
    }
}

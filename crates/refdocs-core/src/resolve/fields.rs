use crate::model::{Definition, Definitions, Field};
use crate::parse::schema::{Schema, SchemaType};

const PATCH_STRATEGY_KEY: &str = "x-kubernetes-patch-strategy";
const PATCH_MERGE_KEY_KEY: &str = "x-kubernetes-patch-merge-key";

/// Display type of a property schema.
///
/// References become the referenced kind, arrays `<item> array` and maps
/// `map[string]<value>`. Objects without a value schema and schemas with
/// no type information are `object`.
pub fn type_name(schema: &Schema) -> String {
    if let Some(ref_path) = &schema.ref_path {
        let name = ref_path.rsplit('/').next().unwrap_or(ref_path);
        return name.rsplit('.').next().unwrap_or(name).to_string();
    }
    if let Some(items) = schema.array_items() {
        return format!("{} array", type_name(items));
    }
    if let Some(values) = schema.map_values() {
        return format!("map[string]{}", type_name(values));
    }
    match schema.primary_type() {
        Some(SchemaType::Object) | None => "object".to_string(),
        Some(t) => t.as_str().to_string(),
    }
}

fn normalize_description(description: &str) -> String {
    description.replace("\r\n", " ").replace('\n', " ")
}

/// Build the field list of one definition.
///
/// Must run after every definition has been registered, since a property
/// may reference a definition indexed later than its parent.
pub fn resolve_fields(definitions: &Definitions, definition: &Definition) -> Vec<Field> {
    definition
        .schema()
        .properties
        .iter()
        .map(|(name, property)| Field {
            name: name.clone(),
            type_name: type_name(property),
            description: normalize_description(property.description.as_deref().unwrap_or_default()),
            patch_strategy: property.extension_str(PATCH_STRATEGY_KEY).map(String::from),
            patch_merge_key: property.extension_str(PATCH_MERGE_KEY_KEY).map(String::from),
            definition: definitions.get_for_schema(property).map(Definition::key),
        })
        .collect()
}

/// Replace the fields of the definition stored under `key`.
///
/// Returns `false` if no such definition is registered.
pub fn initialize_fields(definitions: &mut Definitions, key: &str) -> bool {
    let Some(definition) = definitions.get_by_key(key) else {
        return false;
    };
    let fields = resolve_fields(definitions, definition);
    match definitions.get_mut(key) {
        Some(definition) => {
            definition.fields = fields;
            true
        }
        None => false,
    }
}

pub fn initialize_fields_for_all(definitions: &mut Definitions) {
    for key in definitions.keys() {
        initialize_fields(definitions, key.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DefinitionKey, GroupVersionKind};

    fn schema(value: serde_json::Value) -> Schema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&schema(serde_json::json!({"type": "string"}))), "string");
        assert_eq!(type_name(&schema(serde_json::json!({"type": "integer", "format": "int32"}))), "integer");
        assert_eq!(
            type_name(&schema(serde_json::json!({
                "$ref": "#/definitions/io.k8s.kubernetes.pkg.api.v1.PodSpec"
            }))),
            "PodSpec"
        );
        assert_eq!(
            type_name(&schema(serde_json::json!({
                "type": "array",
                "items": {"$ref": "#/definitions/io.k8s.kubernetes.pkg.api.v1.Container"}
            }))),
            "Container array"
        );
        assert_eq!(
            type_name(&schema(serde_json::json!({
                "type": "array",
                "items": {"type": "array", "items": {"type": "string"}}
            }))),
            "string array array"
        );
        assert_eq!(
            type_name(&schema(serde_json::json!({
                "type": "object",
                "additionalProperties": {"type": "string"}
            }))),
            "map[string]string"
        );
        assert_eq!(type_name(&schema(serde_json::json!({"type": "object"}))), "object");
        assert_eq!(type_name(&schema(serde_json::json!({}))), "object");
        assert_eq!(
            type_name(&schema(serde_json::json!({
                "$ref": "#/definitions/io.k8s.apimachinery.pkg.util.intstr.IntOrString"
            }))),
            "IntOrString"
        );
    }

    fn registry() -> Definitions {
        let deployment = schema(serde_json::json!({
            "properties": {
                "spec": {
                    "$ref": "#/definitions/io.k8s.kubernetes.pkg.apis.apps.v1beta1.DeploymentSpec",
                    "description": "Specification of the desired\nbehavior of the Deployment."
                },
                "kind": {"type": "string"}
            }
        }));
        let spec = schema(serde_json::json!({
            "properties": {
                "replicas": {"type": "integer"},
                "containers": {
                    "type": "array",
                    "items": {"$ref": "#/definitions/io.k8s.kubernetes.pkg.api.v1.Container"},
                    "x-kubernetes-patch-strategy": "merge",
                    "x-kubernetes-patch-merge-key": "name"
                }
            }
        }));
        let mut defs = Definitions::new();
        // The referenced spec is registered after its parent.
        defs.put(Definition::new(
            "io.k8s.kubernetes.pkg.apis.apps.v1beta1.Deployment",
            GroupVersionKind::new("apps", "v1beta1", "Deployment"),
            deployment,
        ));
        defs.put(Definition::new(
            "io.k8s.kubernetes.pkg.apis.apps.v1beta1.DeploymentSpec",
            GroupVersionKind::new("apps", "v1beta1", "DeploymentSpec"),
            spec,
        ));
        defs
    }

    #[test]
    fn test_resolves_forward_references() {
        let mut defs = registry();
        initialize_fields_for_all(&mut defs);

        let deployment = defs.get_by_key("apps.v1beta1.Deployment").unwrap();
        let spec_field = deployment.fields.iter().find(|f| f.name == "spec").unwrap();
        assert_eq!(spec_field.type_name, "DeploymentSpec");
        assert_eq!(
            spec_field.definition,
            Some(DefinitionKey::new("apps", "v1beta1", "DeploymentSpec"))
        );
        assert_eq!(
            spec_field.description,
            "Specification of the desired behavior of the Deployment."
        );

        let kind_field = deployment.fields.iter().find(|f| f.name == "kind").unwrap();
        assert!(!kind_field.is_reference());
        assert_eq!(kind_field.description, "");
    }

    #[test]
    fn test_patch_metadata_and_unregistered_reference() {
        let mut defs = registry();
        initialize_fields_for_all(&mut defs);

        let spec = defs.get_by_key("apps.v1beta1.DeploymentSpec").unwrap();
        let containers = spec.fields.iter().find(|f| f.name == "containers").unwrap();
        assert_eq!(containers.type_name, "Container array");
        assert_eq!(containers.patch_strategy.as_deref(), Some("merge"));
        assert_eq!(containers.patch_merge_key.as_deref(), Some("name"));
        // Container is not registered, so there is no edge.
        assert!(containers.definition.is_none());

        let replicas = spec.fields.iter().find(|f| f.name == "replicas").unwrap();
        assert!(replicas.patch_strategy.is_none());
        assert!(replicas.patch_merge_key.is_none());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut defs = registry();
        assert!(initialize_fields(&mut defs, "apps.v1beta1.Deployment"));
        let first = defs.get_by_key("apps.v1beta1.Deployment").unwrap().fields.clone();
        assert!(initialize_fields(&mut defs, "apps.v1beta1.Deployment"));
        let second = &defs.get_by_key("apps.v1beta1.Deployment").unwrap().fields;
        assert_eq!(&first, second);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_initialize_unknown_key() {
        let mut defs = registry();
        assert!(!initialize_fields(&mut defs, "core.v1.Pod"));
    }
}

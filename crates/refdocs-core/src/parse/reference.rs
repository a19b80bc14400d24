use crate::error::ModelError;

const SWAGGER_PREFIX: &str = "#/definitions/";
const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// Extract the definition name from a `$ref` pointer such as
/// `#/definitions/io.k8s.kubernetes.pkg.api.v1.Pod`.
pub fn ref_target(ref_path: &str) -> Result<&str, ModelError> {
    let name = ref_path
        .strip_prefix(SWAGGER_PREFIX)
        .or_else(|| ref_path.strip_prefix(COMPONENTS_PREFIX))
        .ok_or_else(|| ModelError::InvalidRefFormat(ref_path.to_string()))?;
    if name.is_empty() || name.contains('/') {
        return Err(ModelError::InvalidRefFormat(ref_path.to_string()));
    }
    Ok(name)
}

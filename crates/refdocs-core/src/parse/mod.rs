pub mod reference;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::ApiSpec;

/// Parse an API specification document from YAML.
pub fn from_yaml(input: &str) -> Result<ApiSpec, ParseError> {
    let spec: ApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an API specification document from JSON.
pub fn from_json(input: &str) -> Result<ApiSpec, ParseError> {
    let spec: ApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Accepts Swagger 2.0 and OpenAPI 3.x documents.
fn validate_version(spec: &ApiSpec) -> Result<(), ParseError> {
    match (spec.swagger.as_deref(), spec.openapi.as_deref()) {
        (Some("2.0"), _) => Ok(()),
        (_, Some(v)) if v.starts_with("3.") => Ok(()),
        (Some(v), _) | (None, Some(v)) => Err(ParseError::UnsupportedVersion(v.to_string())),
        (None, None) => Err(ParseError::UnsupportedVersion("<missing>".to_string())),
    }
}

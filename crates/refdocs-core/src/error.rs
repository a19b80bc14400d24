use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported API specification version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not locate group for definition {0}")]
    UnrecognizedName(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("no example available for {0}")]
    NoExample(String),

    #[error("failed to render sample: {0}")]
    Render(#[from] minijinja::Error),

    #[error("failed to encode example: {0}")]
    Encode(#[from] serde_yaml_ng::Error),
}

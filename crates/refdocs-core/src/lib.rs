pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod samples;

pub use model::{Definition, DefinitionKey, Definitions, Field, GroupVersionKind, LinkStyle};
pub use resolve::{BuildOptions, build_definitions, build_definitions_with_options};

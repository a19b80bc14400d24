pub mod definition;
pub mod field;
pub mod identity;
pub mod registry;
pub mod version;

pub use definition::{Definition, LinkStyle};
pub use field::Field;
pub use identity::{DefinitionKey, GroupVersionKind, NameShape};
pub use registry::Definitions;
pub use version::{Stability, VersionPrecedence};

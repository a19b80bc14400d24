use log::{debug, warn};

use crate::error::ModelError;
use crate::model::identity::{NameShape, parse_definition_name};
use crate::model::Definition;
use crate::parse::spec::ApiSpec;

/// Call `f` with a new [`Definition`] for every resource schema in `specs`.
///
/// Utility types and names too short to carry a group are skipped. A name
/// of any other unrecognized shape aborts the walk.
pub fn visit_definitions<F>(specs: &[ApiSpec], mut f: F) -> Result<(), ModelError>
where
    F: FnMut(Definition),
{
    for spec in specs {
        for (name, schema) in spec.definitions() {
            match parse_definition_name(name)? {
                NameShape::Resource(gvk) => f(Definition::new(name, gvk, schema.clone())),
                NameShape::Utility => debug!("skipping utility type {name}"),
                NameShape::TooShort => {
                    warn!("could not find version and type for definition {name}")
                }
            }
        }
    }
    Ok(())
}

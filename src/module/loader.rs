//! Module loader
//!
//! Resolves an on-disk module artifact to a registered module image and
//! instantiates it inside an isolated context. The artifact's file stem is the
//! module name; a missing file or an unregistered name are both unresolvable.

use crate::harness::error::{HarnessError, HarnessResult};
use crate::module::context::{IsolatedContext, LoadedModule, LoadedType};
use crate::module::image::ModuleImage;
use crate::module::registry;
use crate::module::value::TypeIdentity;
use std::path::Path;

/// Load the module at `path` into the given context.
pub(crate) fn load_module(path: &str, context: &IsolatedContext) -> HarnessResult<()> {
    let artifact = Path::new(path);
    if !artifact.is_file() {
        return Err(HarnessError::ModuleNotFound {
            path: path.to_string(),
        });
    }

    let name = artifact
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| HarnessError::ModuleNotFound {
            path: path.to_string(),
        })?;

    let image = registry::find_image(name).ok_or_else(|| {
        log::debug!(
            "no image registered for '{}' (registered: {:?})",
            name,
            registry::registered_names()
        );
        HarnessError::ModuleNotFound {
            path: path.to_string(),
        }
    })?;

    let type_count = image.types.len();
    context.install_module(instantiate(image, context.id()));
    log::debug!(
        "loaded module '{}' into context {} ({} type(s))",
        name,
        context.id(),
        type_count
    );
    Ok(())
}

/// Instantiate an image inside a context: every type derived from the module
/// gets an identity stamped with the loading context's id.
fn instantiate(image: ModuleImage, context_id: u64) -> LoadedModule {
    LoadedModule {
        name: image.name,
        types: image
            .types
            .into_iter()
            .map(|decl| LoadedType {
                identity: TypeIdentity::new(decl.qualified_name, context_id),
                methods: decl.methods,
            })
            .collect(),
    }
}

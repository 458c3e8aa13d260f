//! Module image registry
//!
//! Compile-time registration of module images. Images use the `module_image!`
//! macro to register themselves; the loader resolves them by module name and
//! calls the factory so every load instantiates a fresh image.

use crate::module::image::ModuleImage;
use inventory;

/// Entry for a module image in the registry
pub struct ModuleImageEntry {
    pub factory: fn() -> ModuleImage,
}

// Collect all module image entries
inventory::collect!(ModuleImageEntry);

/// Macro for registering module images
#[macro_export]
macro_rules! module_image {
    ($factory_expr:expr) => {
        inventory::submit!($crate::module::registry::ModuleImageEntry {
            factory: $factory_expr
        });
    };
}

/// Look up a registered module image by name, instantiating it fresh
pub(crate) fn find_image(name: &str) -> Option<ModuleImage> {
    inventory::iter::<ModuleImageEntry>()
        .map(|entry| (entry.factory)())
        .find(|image| image.name == name)
}

/// Names of all registered module images, for diagnostics
pub(crate) fn registered_names() -> Vec<String> {
    let mut names: Vec<String> = inventory::iter::<ModuleImageEntry>()
        .map(|entry| (entry.factory)().name)
        .collect();
    names.sort();
    names
}

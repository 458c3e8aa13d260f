//! Public API for the module model
//!
//! This module provides the complete public API for the module model.
//! External modules should import from here rather than directly from
//! internal modules.

// Context lifecycle and observation
pub use crate::module::context::{
    ContextRetainer, ContextSnapshot, InvocationScope, IsolatedContext, ObservationHandle,
};

// Module image declarations and registration
pub use crate::module::image::{MethodBody, MethodDecl, MethodReturn, ModuleImage, ParamDecl, TypeDecl};
pub use crate::module::registry::ModuleImageEntry;

// Value and type model
pub use crate::module::value::{ParamType, RecordValue, TypeIdentity, Value, HOST_CONTEXT_ID};

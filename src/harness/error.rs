//! Harness Error Types
//!
//! One typed error per failing stage; every stage fails fast and the caller
//! sees exactly the first failure. Only the reclamation verifier retries, and
//! it retries the check, not the operation.

/// Result type alias for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Malformed invocation descriptor field
    #[error("Invalid invocation field '{field}': {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// The path did not resolve to a loadable module
    #[error("Module not found: {path}")]
    ModuleNotFound { path: String },

    /// The loaded module does not contain the requested type
    #[error("Type not found in module: {type_name}")]
    TypeNotFound { type_name: String },

    /// No invokable method of that name on the type
    #[error("Method not found: {type_name}::{method_name}")]
    MethodNotFound {
        type_name: String,
        method_name: String,
    },

    /// Several same-named candidates and no arguments to disambiguate with
    #[error("Method '{method_name}' is ambiguous ({candidates} candidates); supply arguments to disambiguate")]
    AmbiguousMethod {
        method_name: String,
        candidates: usize,
    },

    /// An argument could not be carried across the isolation boundary
    #[error("Argument {index} could not be marshaled across the boundary: {reason}")]
    ArgumentMarshalFailure { index: usize, reason: String },

    /// The target method's own body failed; the original cause is preserved
    #[error("Target method '{method}' failed: {cause}")]
    TargetInvocationFailure {
        method: String,
        #[source]
        cause: TargetFault,
    },

    /// The isolated context stayed reachable after teardown
    #[error("Isolated context was not reclaimed after {passes} collection passes")]
    ReclamationFailed { passes: usize },
}

/// Error raised by a target method body, preserved as the source of
/// `TargetInvocationFailure`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TargetFault {
    pub message: String,
}

impl TargetFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

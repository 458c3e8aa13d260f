//! Public API for the harness
//!
//! This module provides the complete public API for the invocation and
//! reclamation-verification harness. External modules should import from
//! here rather than directly from internal modules.

// Builder surface
pub use crate::harness::builder::{ExecutionBuilder, ModuleSelector, TypeSelector, UnloadCheck};

// Invocation descriptor
pub use crate::harness::descriptor::{InvocationDescriptor, MarshalPolicy};

// Error handling
pub use crate::harness::error::{HarnessError, HarnessResult, TargetFault};

// Diagnostics
pub use crate::harness::diagnostics::{DiagnosticsSink, LogSink};

// Verification tuning
pub use crate::harness::verifier::RECLAIM_PROBE_PASSES;

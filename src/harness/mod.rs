//! Invocation & Reclamation-Verification Harness
//!
//! Orchestrates one invocation against a module loaded into a fresh isolated
//! context and then proves the context was actually reclaimed after teardown.

// Internal modules - all access should go through api module
pub(crate) mod builder;
pub(crate) mod descriptor;
pub(crate) mod diagnostics;
pub(crate) mod error;
pub(crate) mod executor;
pub(crate) mod marshal;
pub(crate) mod resolver;
pub(crate) mod verifier;

// Public API module - the only public interface for the harness
pub mod api;

#[cfg(test)]
mod tests;

//! unloadcheck - isolated invocation and reclamation-verification harness
//!
//! Loads a plugin module into a fresh isolated context, invokes a named entry
//! point, then destroys the context and verifies through a non-owning
//! observation handle that the module and everything rooted in the context
//! were actually reclaimed, not merely asked to go away.

pub mod core;
pub mod harness;
pub mod module;

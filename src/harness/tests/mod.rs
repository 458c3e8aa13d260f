//! Test modules for the harness
//!
//! Scenario tests drive full invocations against a registered sample target
//! module, mirroring how a plugin author would use the builder surface.

mod fixtures;
mod utils;

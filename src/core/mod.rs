//! Core services and infrastructure

pub mod logging;
pub mod validation;

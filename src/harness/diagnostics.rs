//! Diagnostics sink
//!
//! Structured log lines during a run, plus a dump of what remained loaded
//! when reclamation verification fails. Both operations are fire-and-forget:
//! a sink must never propagate its own failures into the harness.

use crate::module::context::ContextSnapshot;

/// Receiver for harness log lines and post-failure context dumps
pub trait DiagnosticsSink: Send + Sync {
    /// Fire-and-forget text line
    fn log(&self, message: &str);

    /// Enumerates everything still reachable from a context after a failed
    /// reclamation, for debugging
    fn dump(&self, snapshot: &ContextSnapshot);
}

/// Default sink routing through the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn log(&self, message: &str) {
        log::info!("{message}");
    }

    fn dump(&self, snapshot: &ContextSnapshot) {
        log::error!(
            "context {} state dump ({} type(s) still loaded):",
            snapshot.context_id,
            snapshot.types.len()
        );
        if let Some(module) = &snapshot.module {
            log::error!("  loaded module: {module}");
        }
        for type_name in &snapshot.types {
            log::error!("  loaded type: {type_name}");
        }
    }
}

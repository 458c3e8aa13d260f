//! Reclamation verifier
//!
//! Destroys the isolated context and confirms through the observation handle
//! that it actually became unreachable. A collection pass here is a request,
//! not a guarantee: worker threads spawned by asynchronous target methods may
//! still be releasing their clones, so the probe retries a bounded number of
//! times before declaring failure.

use crate::harness::diagnostics::DiagnosticsSink;
use crate::harness::error::{HarnessError, HarnessResult};
use crate::module::context::{IsolatedContext, ObservationHandle};
use std::time::Duration;

/// Bounded probe count. A tuned heuristic, not a proof.
pub const RECLAIM_PROBE_PASSES: usize = 10;

const PROBE_BACKOFF: Duration = Duration::from_millis(2);

/// Destroy `context` and verify the probe goes dead within the retry bound.
pub(crate) fn verify_reclaimed(
    context: IsolatedContext,
    probe: ObservationHandle,
    sink: &dyn DiagnosticsSink,
) -> HarnessResult<()> {
    let context_id = context.id();
    sink.log(&format!("destroying context {context_id}"));
    context.destroy();

    for pass in 0..RECLAIM_PROBE_PASSES {
        if !probe.is_alive() {
            sink.log(&format!(
                "context {context_id} reclaimed after {pass} collection pass(es)"
            ));
            return Ok(());
        }
        collection_pass();
    }

    if probe.is_alive() {
        // The verdict is in; a single upgrade for the dump is safe now.
        if let Some(snapshot) = probe.snapshot() {
            sink.dump(&snapshot);
        }
        return Err(HarnessError::ReclamationFailed {
            passes: RECLAIM_PROBE_PASSES,
        });
    }

    sink.log(&format!(
        "context {context_id} reclaimed on the final collection pass"
    ));
    Ok(())
}

// Give other threads a chance to release their strong references before the
// next probe.
fn collection_pass() {
    std::thread::yield_now();
    std::thread::sleep(PROBE_BACKOFF);
}

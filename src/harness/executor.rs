//! Invocation executor
//!
//! Drives one invocation through its linear state machine: create context,
//! load module, resolve method, prepare arguments, invoke, normalize the
//! result. Verification only runs when both the load and the invocation
//! completed cleanly, so an early failure is reported as-is and never
//! obscured by an unrelated teardown complaint.

use crate::harness::descriptor::InvocationDescriptor;
use crate::harness::diagnostics::DiagnosticsSink;
use crate::harness::error::{HarnessError, HarnessResult, TargetFault};
use crate::harness::marshal;
use crate::harness::resolver::{self, ResolvedMethod};
use crate::harness::verifier;
use crate::module::context::IsolatedContext;
use crate::module::image::{MethodDecl, MethodReturn};
use crate::module::loader;
use crate::module::value::Value;
use std::sync::Mutex;

// One invocation at a time process-wide: a context's liveness probing must
// not race another invocation's context churn.
static INVOCATION_GATE: Mutex<()> = Mutex::new(());

/// Completion markers gating reclamation verification
#[derive(Debug, Default, Clone, Copy)]
struct CompletionFlags {
    module_loaded: bool,
    invocation_executed: bool,
}

/// Run one invocation end to end, including reclamation verification.
pub(crate) fn run(
    descriptor: &InvocationDescriptor,
    sink: &dyn DiagnosticsSink,
) -> HarnessResult<()> {
    let _gate = INVOCATION_GATE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let context = IsolatedContext::new();
    let probe = context.observe();
    let mut flags = CompletionFlags::default();

    let outcome = run_stages(descriptor, &context, sink, &mut flags);

    if outcome.is_ok() && flags.module_loaded && flags.invocation_executed {
        verifier::verify_reclaimed(context, probe, sink)
    } else {
        // Early failure: the context is released without being observed so
        // the caller sees the original error.
        drop(context);
        outcome
    }
}

fn run_stages(
    descriptor: &InvocationDescriptor,
    context: &IsolatedContext,
    sink: &dyn DiagnosticsSink,
    flags: &mut CompletionFlags,
) -> HarnessResult<()> {
    loader::load_module(descriptor.module_path(), context)?;
    flags.module_loaded = true;
    sink.log(&format!(
        "loaded '{}' into context {}",
        descriptor.module_path(),
        context.id()
    ));

    let ty = context.find_type(descriptor.type_name())?;
    let resolved = resolver::resolve(
        ty,
        descriptor.method_name(),
        descriptor.arguments(),
        descriptor.marshal_policy(),
    )?;
    sink.log(&format!(
        "resolved {}::{} ({} parameter(s))",
        descriptor.type_name(),
        descriptor.method_name(),
        resolved.method.params.len()
    ));

    let prepared = prepare_arguments(descriptor, context, &resolved)?;

    let returned = invoke(context, &resolved, &prepared, descriptor.method_name())?;
    normalize_return(returned, descriptor.method_name())?;
    flags.invocation_executed = true;
    sink.log(&format!(
        "invocation of {}::{} completed",
        descriptor.type_name(),
        descriptor.method_name()
    ));

    Ok(())
}

fn prepare_arguments(
    descriptor: &InvocationDescriptor,
    context: &IsolatedContext,
    resolved: &ResolvedMethod<'_>,
) -> HarnessResult<Vec<Option<Value>>> {
    if descriptor.arguments().is_empty() {
        // Default-argument execution synthesizes zero values / absent and
        // never triggers boundary marshaling.
        return Ok(synthesize_defaults(resolved.method));
    }

    if resolved.needs_marshaling() {
        marshal::prepare_arguments(context, resolved, descriptor.arguments().to_vec())
    } else {
        Ok(descriptor.arguments().to_vec())
    }
}

/// One positional value per declared parameter: value types get their zero
/// value, reference types get absent. The target's declared defaults are not
/// consulted.
fn synthesize_defaults(method: &MethodDecl) -> Vec<Option<Value>> {
    method.params.iter().map(|p| p.ty.zero_value()).collect()
}

fn invoke(
    context: &IsolatedContext,
    resolved: &ResolvedMethod<'_>,
    arguments: &[Option<Value>],
    method_name: &str,
) -> HarnessResult<MethodReturn> {
    let scope = context.scope();
    (resolved.method.body)(&scope, arguments).map_err(|cause| {
        HarnessError::TargetInvocationFailure {
            method: method_name.to_string(),
            cause,
        }
    })
}

/// Await an asynchronous result on the calling thread; failures from within
/// surface as the invocation's failure, unwrapped from the async wrapper.
fn normalize_return(returned: MethodReturn, method_name: &str) -> HarnessResult<()> {
    match returned {
        MethodReturn::Unit | MethodReturn::Value(_) => Ok(()),
        MethodReturn::Pending(receiver) => match receiver.blocking_recv() {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(cause)) => Err(HarnessError::TargetInvocationFailure {
                method: method_name.to_string(),
                cause,
            }),
            Err(_) => Err(HarnessError::TargetInvocationFailure {
                method: method_name.to_string(),
                cause: TargetFault::new("asynchronous result was dropped before completion"),
            }),
        },
    }
}

//! Boundary marshaler
//!
//! Carries nominal-type-mismatch arguments across the isolation boundary via
//! a serialize/deserialize round trip: encoded with the host-side codec,
//! decoded with a codec instantiated inside the target context, so the
//! decoded value's type identity belongs to the target's type system.
//! Marshaling never coerces between different types - it only repairs
//! identity for types that share a qualified name.

use crate::harness::error::{HarnessError, HarnessResult};
use crate::harness::resolver::ResolvedMethod;
use crate::module::codec::BoundaryCodec;
use crate::module::context::IsolatedContext;
use crate::module::value::{ParamType, Value};

/// Prepare supplied arguments for invocation inside `context`, marshaling the
/// positions the resolver flagged.
pub(crate) fn prepare_arguments(
    context: &IsolatedContext,
    resolved: &ResolvedMethod<'_>,
    arguments: Vec<Option<Value>>,
) -> HarnessResult<Vec<Option<Value>>> {
    let host_codec = BoundaryCodec::host();
    let mut prepared = Vec::with_capacity(arguments.len());

    for (index, argument) in arguments.into_iter().enumerate() {
        if !resolved.marshal_positions.contains(&index) {
            prepared.push(argument);
            continue;
        }

        let param = &resolved.method.params[index];
        prepared.push(marshal_one(
            context,
            &host_codec,
            index,
            argument,
            &param.ty,
        )?);
    }

    Ok(prepared)
}

fn marshal_one(
    context: &IsolatedContext,
    host_codec: &BoundaryCodec,
    index: usize,
    argument: Option<Value>,
    param: &ParamType,
) -> HarnessResult<Option<Value>> {
    let value = match argument {
        // absent passes through unchanged
        None => return Ok(None),
        Some(value) => value,
    };

    // mismatches are per-parameter; an already-compatible value passes through
    if value.is_assignable_to(param, context.id()) {
        return Ok(Some(value));
    }

    // different qualified names are unrecoverable, not a boundary problem
    if !value.nominally_matches(param) {
        return Err(HarnessError::ArgumentMarshalFailure {
            index,
            reason: format!(
                "declared type '{}' and runtime type '{}' are different types",
                param.type_name(),
                value.type_name()
            ),
        });
    }

    let record = match value {
        Value::Record(record) => record,
        // scalars are context-free; a nominally matching scalar is already
        // compatible and never reaches this point
        other => {
            return Err(HarnessError::ArgumentMarshalFailure {
                index,
                reason: format!(
                    "value of type '{}' cannot require boundary transfer",
                    other.type_name()
                ),
            })
        }
    };

    let text = host_codec
        .encode(&record)
        .map_err(|err| HarnessError::ArgumentMarshalFailure {
            index,
            reason: format!("serialize failed: {err}"),
        })?;

    // decode with the serializer instance loaded inside the target context
    let rebound = context.boundary_codec().decode(&text).map_err(|err| {
        HarnessError::ArgumentMarshalFailure {
            index,
            reason: format!("deserialize failed: {err}"),
        }
    })?;

    log::debug!(
        "marshaled argument {} ('{}') into context {}",
        index,
        rebound.identity.qualified_name,
        context.id()
    );
    Ok(Some(Value::Record(rebound)))
}

//! Method resolver
//!
//! Selects the unique overload to invoke. Candidates are examined in
//! declaration order - an ordered decision table where the first candidate
//! satisfying the predicate wins. Enumeration order is part of the contract.

use crate::harness::descriptor::MarshalPolicy;
use crate::harness::error::{HarnessError, HarnessResult};
use crate::module::context::LoadedType;
use crate::module::image::MethodDecl;
use crate::module::value::Value;

/// The overload chosen for invocation plus the argument positions that need
/// boundary marshaling.
#[derive(Debug)]
pub(crate) struct ResolvedMethod<'a> {
    pub method: &'a MethodDecl,
    pub marshal_positions: Vec<usize>,
}

impl ResolvedMethod<'_> {
    pub fn needs_marshaling(&self) -> bool {
        !self.marshal_positions.is_empty()
    }
}

/// Resolve `method_name` on the loaded type against the supplied arguments.
pub(crate) fn resolve<'a>(
    ty: &'a LoadedType,
    method_name: &str,
    arguments: &[Option<Value>],
    policy: MarshalPolicy,
) -> HarnessResult<ResolvedMethod<'a>> {
    // Both public and non-public static methods are candidates
    let candidates: Vec<&MethodDecl> = ty
        .methods
        .iter()
        .filter(|m| m.name == method_name)
        .collect();

    if candidates.is_empty() {
        return Err(method_not_found(ty, method_name));
    }

    if !arguments.is_empty() {
        match_on_arguments(ty, &candidates, arguments, policy)
            .ok_or_else(|| method_not_found(ty, method_name))
    } else {
        select_single(ty, &candidates, method_name)
    }
}

/// First candidate whose parameters match the arguments 1:1 wins; no
/// ambiguity check in this path.
fn match_on_arguments<'a>(
    ty: &LoadedType,
    candidates: &[&'a MethodDecl],
    arguments: &[Option<Value>],
    policy: MarshalPolicy,
) -> Option<ResolvedMethod<'a>> {
    let context_id = ty.identity.context_id;

    'candidates: for &method in candidates {
        if method.params.len() != arguments.len() {
            continue;
        }

        let mut marshal_positions = Vec::new();
        for (index, (param, argument)) in method.params.iter().zip(arguments).enumerate() {
            let value = match argument {
                // null/absent matches any parameter
                None => continue,
                Some(value) => value,
            };

            if value.is_assignable_to(&param.ty, context_id) {
                continue;
            }

            // Nominally identical but loaded elsewhere: still a match when
            // marshaling is enabled, flagged for boundary transfer.
            if value.nominally_matches(&param.ty) && policy == MarshalPolicy::SerializeIfNeeded {
                marshal_positions.push(index);
                continue;
            }

            continue 'candidates;
        }

        return Some(ResolvedMethod {
            method,
            marshal_positions,
        });
    }

    None
}

/// No arguments supplied: zero-parameter candidates can never be valid entry
/// points, and the remainder must be unambiguous.
fn select_single<'a>(
    ty: &LoadedType,
    candidates: &[&'a MethodDecl],
    method_name: &str,
) -> HarnessResult<ResolvedMethod<'a>> {
    let with_params: Vec<&MethodDecl> = candidates
        .iter()
        .copied()
        .filter(|m| !m.params.is_empty())
        .collect();

    match with_params.len() {
        0 => Err(method_not_found(ty, method_name)),
        1 => Ok(ResolvedMethod {
            method: with_params[0],
            marshal_positions: Vec::new(),
        }),
        count => Err(HarnessError::AmbiguousMethod {
            method_name: method_name.to_string(),
            candidates: count,
        }),
    }
}

fn method_not_found(ty: &LoadedType, method_name: &str) -> HarnessError {
    HarnessError::MethodNotFound {
        type_name: ty.identity.qualified_name.clone(),
        method_name: method_name.to_string(),
    }
}

//! Invocation descriptor
//!
//! Immutable record of what to call and how. Construction validates the
//! string fields; both builder entry styles funnel through the same
//! constructor so they cannot diverge in defaulting.

use crate::core::validation::require_non_blank;
use crate::harness::error::{HarnessError, HarnessResult};
use crate::module::value::Value;

/// How nominal-type-mismatch arguments are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarshalPolicy {
    /// Serialize arguments across the isolation boundary when their type is
    /// nominally identical but loaded in another context (the default)
    #[default]
    SerializeIfNeeded,
    /// Reject nominal mismatches during resolution
    Strict,
}

/// Immutable description of one invocation
#[derive(Debug, Clone)]
pub struct InvocationDescriptor {
    module_path: String,
    type_name: String,
    method_name: String,
    arguments: Vec<Option<Value>>,
    marshal_policy: MarshalPolicy,
}

impl InvocationDescriptor {
    /// Build a descriptor, validating that path and names are non-blank.
    pub fn new(
        module_path: impl Into<String>,
        type_name: impl Into<String>,
        method_name: impl Into<String>,
        arguments: Vec<Option<Value>>,
        marshal_policy: MarshalPolicy,
    ) -> HarnessResult<Self> {
        let module_path = module_path.into();
        let type_name = type_name.into();
        let method_name = method_name.into();

        require_non_blank(&module_path).map_err(|reason| HarnessError::InvalidArgument {
            field: "module_path",
            reason,
        })?;
        require_non_blank(&type_name).map_err(|reason| HarnessError::InvalidArgument {
            field: "type_name",
            reason,
        })?;
        require_non_blank(&method_name).map_err(|reason| HarnessError::InvalidArgument {
            field: "method_name",
            reason,
        })?;

        Ok(Self {
            module_path,
            type_name,
            method_name,
            arguments,
            marshal_policy,
        })
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Empty means "resolve without argument-shape disambiguation"
    pub fn arguments(&self) -> &[Option<Value>] {
        &self.arguments
    }

    pub fn marshal_policy(&self) -> MarshalPolicy {
        self.marshal_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_each_field() {
        for (path, ty, method, field) in [
            ("", "T", "m", "module_path"),
            ("mod.plugin", "  ", "m", "type_name"),
            ("mod.plugin", "T", "\t", "method_name"),
        ] {
            let err = InvocationDescriptor::new(
                path,
                ty,
                method,
                Vec::new(),
                MarshalPolicy::default(),
            )
            .unwrap_err();
            assert!(
                matches!(err, HarnessError::InvalidArgument { field: f, .. } if f == field),
                "expected InvalidArgument for {field}"
            );
        }
    }

    #[test]
    fn keeps_argument_order() {
        let descriptor = InvocationDescriptor::new(
            "mod.plugin",
            "Targets.SimpleTarget",
            "two_args",
            vec![Some(Value::Int(5)), None],
            MarshalPolicy::default(),
        )
        .unwrap();

        assert_eq!(descriptor.arguments().len(), 2);
        assert_eq!(descriptor.arguments()[0], Some(Value::Int(5)));
        assert_eq!(descriptor.arguments()[1], None);
        assert_eq!(descriptor.marshal_policy(), MarshalPolicy::SerializeIfNeeded);
    }
}

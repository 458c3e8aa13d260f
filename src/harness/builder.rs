//! Builder surface
//!
//! Two equivalent entry styles for test authors: the fluent chain
//! `select_module(..).select_type(..).select_method(..).execute()` and the
//! compact `invoke(path, type, method, args).execute()`. Both defer
//! descriptor construction (and validation) to `execute()`, so identical
//! inputs always produce identical semantics.

use crate::harness::descriptor::{InvocationDescriptor, MarshalPolicy};
use crate::harness::diagnostics::{DiagnosticsSink, LogSink};
use crate::harness::error::HarnessResult;
use crate::harness::executor;
use crate::module::value::Value;
use std::sync::Arc;

/// Entry points for building an unload check
pub struct UnloadCheck;

impl UnloadCheck {
    /// Start building with fluent syntax
    pub fn select_module(module_path: impl Into<String>) -> ModuleSelector {
        ModuleSelector {
            module_path: module_path.into(),
        }
    }

    /// Build with compact syntax, all fields positional
    pub fn invoke(
        module_path: impl Into<String>,
        type_name: impl Into<String>,
        method_name: impl Into<String>,
        arguments: Vec<Option<Value>>,
    ) -> ExecutionBuilder {
        ExecutionBuilder {
            module_path: module_path.into(),
            type_name: type_name.into(),
            method_name: method_name.into(),
            arguments,
            marshal_policy: MarshalPolicy::default(),
            sink: None,
        }
    }
}

/// Fluent step: module selected, type pending
#[derive(Debug, Clone)]
pub struct ModuleSelector {
    module_path: String,
}

impl ModuleSelector {
    /// Specify the type hosting the entry point
    pub fn select_type(self, type_name: impl Into<String>) -> TypeSelector {
        TypeSelector {
            module_path: self.module_path,
            type_name: type_name.into(),
        }
    }
}

/// Fluent step: type selected, method pending
#[derive(Debug, Clone)]
pub struct TypeSelector {
    module_path: String,
    type_name: String,
}

impl TypeSelector {
    /// Specify the entry-point method to invoke
    pub fn select_method(self, method_name: impl Into<String>) -> ExecutionBuilder {
        ExecutionBuilder {
            module_path: self.module_path,
            type_name: self.type_name,
            method_name: method_name.into(),
            arguments: Vec::new(),
            marshal_policy: MarshalPolicy::default(),
            sink: None,
        }
    }
}

/// Final step: optionally attach arguments, policy, and a sink, then execute
pub struct ExecutionBuilder {
    module_path: String,
    type_name: String,
    method_name: String,
    arguments: Vec<Option<Value>>,
    marshal_policy: MarshalPolicy,
    sink: Option<Arc<dyn DiagnosticsSink>>,
}

impl ExecutionBuilder {
    /// Attach call arguments and the boundary-marshaling policy
    pub fn with_arguments(
        mut self,
        marshal_policy: MarshalPolicy,
        arguments: Vec<Option<Value>>,
    ) -> Self {
        self.marshal_policy = marshal_policy;
        self.arguments = arguments;
        self
    }

    /// Route diagnostics to a custom sink instead of the log facade
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Execute the invocation and verify reclamation
    pub fn execute(self) -> HarnessResult<()> {
        let descriptor = InvocationDescriptor::new(
            self.module_path,
            self.type_name,
            self.method_name,
            self.arguments,
            self.marshal_policy,
        )?;
        let sink: Arc<dyn DiagnosticsSink> = self.sink.unwrap_or_else(|| Arc::new(LogSink));
        executor::run(&descriptor, sink.as_ref())
    }
}

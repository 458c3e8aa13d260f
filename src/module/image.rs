//! Module image declarations
//!
//! A `ModuleImage` is the loadable blueprint of a plugin module: its types,
//! their entry-point methods, and the callable handles behind them. Images are
//! the compile-time stand-in for runtime reflection metadata; loading
//! instantiates an image inside one isolated context.

use crate::harness::error::TargetFault;
use crate::module::context::InvocationScope;
use crate::module::value::{ParamType, Value};
use std::fmt;
use tokio::sync::oneshot;

/// Callable handle of an entry-point method. Bodies receive a scope view of
/// the isolated context they were loaded into plus the prepared arguments.
pub type MethodBody =
    fn(&InvocationScope<'_>, &[Option<Value>]) -> Result<MethodReturn, TargetFault>;

/// What a target method hands back to the executor
pub enum MethodReturn {
    Unit,
    Value(Value),
    /// Asynchronous result; the executor joins it with a blocking receive.
    Pending(oneshot::Receiver<Result<Option<Value>, TargetFault>>),
}

impl fmt::Debug for MethodReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodReturn::Unit => write!(f, "Unit"),
            MethodReturn::Value(value) => f.debug_tuple("Value").field(value).finish(),
            MethodReturn::Pending(_) => write!(f, "Pending(..)"),
        }
    }
}

/// Loadable blueprint of a plugin module
#[derive(Debug, Clone)]
pub struct ModuleImage {
    /// Module name; the file stem of the on-disk artifact must match it
    pub name: String,
    pub types: Vec<TypeDecl>,
}

/// A type hosting entry-point methods
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub qualified_name: String,
    /// Declaration order is the resolver's enumeration order
    pub methods: Vec<MethodDecl>,
}

/// A static entry-point method, public or not - both are invokable
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub is_public: bool,
    pub params: Vec<ParamDecl>,
    pub body: MethodBody,
}

/// A declared method parameter
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub ty: ParamType,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

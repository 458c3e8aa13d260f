//! Value and type model for arguments crossing the isolation boundary
//!
//! Scalars are context-free. Record values carry a `TypeIdentity`: the same
//! qualified name loaded in two different contexts is two distinct types, and
//! only boundary marshaling can repair that.

use serde_json::Map;

/// Context id of the host side (values constructed outside any isolated context)
pub const HOST_CONTEXT_ID: u64 = 0;

/// Identity of a record type: qualified name plus the loading context it
/// belongs to. Two identities with equal names but different context ids are
/// nominally identical, not identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIdentity {
    pub qualified_name: String,
    pub context_id: u64,
}

impl TypeIdentity {
    pub fn new(qualified_name: impl Into<String>, context_id: u64) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            context_id,
        }
    }

    /// Identity of a record type as seen by the host side
    pub fn host(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, HOST_CONTEXT_ID)
    }
}

/// A call argument value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Text(String),
    Record(RecordValue),
}

/// A composite value of a plugin-declared record type
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub identity: TypeIdentity,
    pub fields: Map<String, serde_json::Value>,
}

impl RecordValue {
    pub fn new(identity: TypeIdentity, fields: Map<String, serde_json::Value>) -> Self {
        Self { identity, fields }
    }
}

/// Declared type of a method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Int,
    Bool,
    Text,
    Record(String),
}

impl ParamType {
    /// Qualified type name used for nominal comparison
    pub fn type_name(&self) -> &str {
        match self {
            ParamType::Int => "int",
            ParamType::Bool => "bool",
            ParamType::Text => "string",
            ParamType::Record(name) => name,
        }
    }

    /// Synthesized argument when the caller supplied none: value types get
    /// their zero value, reference types are absent. Declared defaults on the
    /// target method are deliberately not consulted.
    pub fn zero_value(&self) -> Option<Value> {
        match self {
            ParamType::Int => Some(Value::Int(0)),
            ParamType::Bool => Some(Value::Bool(false)),
            ParamType::Text | ParamType::Record(_) => None,
        }
    }
}

impl Value {
    /// Qualified name of this value's runtime type
    pub fn type_name(&self) -> &str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Text(_) => "string",
            Value::Record(record) => &record.identity.qualified_name,
        }
    }

    /// True if this value can be passed as-is for a parameter declared in the
    /// given context. Records must match by name and by loading context.
    pub fn is_assignable_to(&self, param: &ParamType, context_id: u64) -> bool {
        match (self, param) {
            (Value::Int(_), ParamType::Int) => true,
            (Value::Bool(_), ParamType::Bool) => true,
            (Value::Text(_), ParamType::Text) => true,
            (Value::Record(record), ParamType::Record(name)) => {
                record.identity.qualified_name == *name && record.identity.context_id == context_id
            }
            _ => false,
        }
    }

    /// True if the runtime type name equals the declared parameter type name,
    /// regardless of identity. The nominal-match gate for boundary marshaling.
    pub fn nominally_matches(&self, param: &ParamType) -> bool {
        self.type_name() == param.type_name()
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<RecordValue> for Value {
    fn from(v: RecordValue) -> Self {
        Value::Record(v)
    }
}

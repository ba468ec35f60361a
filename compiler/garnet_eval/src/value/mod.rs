//! Runtime values.
//!
//! [`Value`] is a closed sum over every payload the evaluator handles. Two
//! variants are indirections rather than user-facing data:
//! - `VarRef` names a storage slot in the [`VariableStore`]; evaluating an
//!   identifier yields one so assignment knows which slot to write.
//! - `FuncRef` names an entry in the function table; evaluating a
//!   function's identifier yields one so calls know what to invoke.
//!
//! Both must be resolved before a value is used as an operand.
//!
//! [`VariableStore`]: crate::VariableStore

mod scalar;

use std::fmt;
use std::rc::Rc;

use garnet_ir::{Name, StringInterner};

use crate::store::VariableKey;

pub use scalar::{ScalarType, Working};

/// Tagged runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Unit value; also the value of the `nil`/`void` type.
    Nil,
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(Rc<str>),
    /// Handle to a variable's storage slot.
    VarRef(VariableKey),
    /// Handle to a function table entry.
    FuncRef(Name),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Name of the value's type as written in source.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::VarRef(_) => "variable reference",
            Value::FuncRef(_) => "function",
            numeric => ScalarType::of(numeric).map_or("nil", ScalarType::name),
        }
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        ScalarType::of(self)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::VarRef(key) => write!(f, "<ref {key}>"),
            Value::FuncRef(name) => write!(f, "<fn #{}>", name.raw()),
        }
    }
}

/// Format a value for output, resolving function names.
pub fn format_value(value: &Value, interner: &StringInterner) -> String {
    match value {
        Value::FuncRef(name) => format!("<fn {}>", interner.lookup(*name)),
        other => other.to_string(),
    }
}

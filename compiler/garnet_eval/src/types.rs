//! Declared types and their zero-value constructors.

use garnet_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;

use crate::value::{ScalarType, Value};

/// A type a variable, parameter or result can be declared with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Scalar(ScalarType),
    Bool,
    Str,
    /// The unit type, spelled `nil` or `void`.
    Nil,
}

impl DeclaredType {
    /// Value a freshly declared variable of this type holds.
    pub fn zero_value(self) -> Value {
        match self {
            Self::Scalar(ty) => ty.narrow(crate::value::Working::Unsigned(0)),
            Self::Bool => Value::Bool(false),
            Self::Str => Value::string(""),
            Self::Nil => Value::Nil,
        }
    }

    /// The declared type a value's variant represents.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(_) => Some(Self::Bool),
            Value::Str(_) => Some(Self::Str),
            Value::Nil => Some(Self::Nil),
            Value::VarRef(_) | Value::FuncRef(_) => None,
            numeric => ScalarType::of(numeric).map(Self::Scalar),
        }
    }
}

/// Type name → declared type.
#[derive(Debug)]
pub struct TypeTable {
    types: FxHashMap<Name, DeclaredType>,
}

impl TypeTable {
    /// Table pre-populated with the builtin types.
    pub fn with_builtins(interner: &StringInterner) -> Self {
        const SCALARS: [ScalarType; 10] = [
            ScalarType::U8,
            ScalarType::U16,
            ScalarType::U32,
            ScalarType::U64,
            ScalarType::I8,
            ScalarType::I16,
            ScalarType::I32,
            ScalarType::I64,
            ScalarType::F32,
            ScalarType::F64,
        ];
        let mut types = FxHashMap::default();
        for ty in SCALARS {
            types.insert(interner.intern(ty.name()), DeclaredType::Scalar(ty));
        }
        types.insert(interner.intern("bool"), DeclaredType::Bool);
        types.insert(interner.intern("string"), DeclaredType::Str);
        types.insert(interner.intern("nil"), DeclaredType::Nil);
        types.insert(interner.intern("void"), DeclaredType::Nil);
        TypeTable { types }
    }

    pub fn lookup(&self, name: Name) -> Option<DeclaredType> {
        self.types.get(&name).copied()
    }
}

//! Function table: every callable visible to a program.
//!
//! User functions are stored by signature and body id (the AST outlives the
//! interpreter, so no cloning of bodies is needed). Builtins are plain
//! function pointers sharing the same call protocol.

use garnet_ir::{BlockId, FunctionInfo, Name, SourceRegion};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::environment::Redeclared;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Native function body.
pub type NativeFn = fn(&mut Interpreter<'_>, CallArgs) -> EvalResult;

/// Evaluated arguments of one call.
///
/// Values are passed as evaluated: an identifier argument arrives as a
/// `VarRef`, and the callee decides whether to copy or alias it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    /// Keyword arguments in source order, names unique.
    pub keyword: SmallVec<[(Name, Value); 2]>,
}

impl CallArgs {
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        CallArgs {
            positional: values.into_iter().collect(),
            keyword: SmallVec::new(),
        }
    }

    /// Add a keyword argument. Returns `false` if `name` was already given.
    #[must_use]
    pub fn push_keyword(&mut self, name: Name, value: Value) -> bool {
        if self.keyword.iter().any(|(n, _)| *n == name) {
            return false;
        }
        self.keyword.push((name, value));
        true
    }

    /// Remove and return the keyword argument called `name`.
    pub fn take_keyword(&mut self, name: Name) -> Option<Value> {
        let index = self.keyword.iter().position(|(n, _)| *n == name)?;
        Some(self.keyword.remove(index).1)
    }
}

/// A function table entry.
#[derive(Copy, Clone)]
pub enum Function {
    /// Function with a body.
    User {
        info: FunctionInfo,
        body: BlockId,
        region: SourceRegion,
    },
    /// Declared by a prototype, body not (yet) seen.
    Prototype { info: FunctionInfo },
    /// Builtin implemented in Rust.
    Native(NativeFn),
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User { info, body, .. } => f
                .debug_struct("User")
                .field("name", &info.name)
                .field("body", body)
                .finish(),
            Self::Prototype { info } => f.debug_struct("Prototype").field("name", &info.name).finish(),
            Self::Native(_) => f.write_str("Native"),
        }
    }
}

/// Function name → entry.
#[derive(Debug, Default)]
pub struct FunctionTable {
    entries: FxHashMap<Name, Function>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_native(&mut self, name: Name, func: NativeFn) {
        self.entries.insert(name, Function::Native(func));
    }

    /// Record a prototype. Repeating a prototype, or declaring one for a
    /// function that is already defined, is allowed.
    pub fn declare(&mut self, info: FunctionInfo) -> Result<(), Redeclared> {
        match self.entries.get(&info.name) {
            Some(Function::Native(_)) => Err(Redeclared(info.name)),
            Some(_) => Ok(()),
            None => {
                self.entries.insert(info.name, Function::Prototype { info });
                Ok(())
            }
        }
    }

    /// Record a definition, completing a prototype if one exists.
    pub fn define(
        &mut self,
        info: FunctionInfo,
        body: BlockId,
        region: SourceRegion,
    ) -> Result<(), Redeclared> {
        match self.entries.get(&info.name) {
            Some(Function::User { .. } | Function::Native(_)) => Err(Redeclared(info.name)),
            Some(Function::Prototype { .. }) | None => {
                self.entries
                    .insert(info.name, Function::User { info, body, region });
                Ok(())
            }
        }
    }

    pub fn get(&self, name: Name) -> Option<Function> {
        self.entries.get(&name).copied()
    }

    pub fn contains(&self, name: Name) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

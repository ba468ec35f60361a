//! RAII scope management for the interpreter.
//!
//! [`ScopedInterpreter`] pushes a scope on creation and pops it on drop, so
//! a scope is closed on every exit path: normal completion, `break`,
//! `return`, or an error propagated with `?`.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::ScopeKind;

/// Guard holding `&mut Interpreter` for the lifetime of one scope.
///
/// Derefs to the interpreter, so evaluation methods are called on the
/// guard directly.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Open a scope that is closed when the guard drops.
    pub fn scoped(&mut self, kind: ScopeKind) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope(kind);
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a fresh scope.
    pub fn with_scope<T, F>(&mut self, kind: ScopeKind, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped(kind);
        f(&mut scoped)
    }
}

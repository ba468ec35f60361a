//! `InterpreterBuilder` for configuring Interpreter instances.

use garnet_ir::{ExprArena, StringInterner};

use super::Interpreter;
use crate::builtins;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::function_table::FunctionTable;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::types::TypeTable;

/// Store name of the per-call result slot. The slot is reached by key, never
/// by name lookup, so user variables of the same name do not interfere.
const RETURN_SLOT: &str = "__return__";

/// Builder for [`Interpreter`].
///
/// Defaults: output to stdout, unlimited call depth, entry point `main`.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    arena: &'a ExprArena,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    entry_point: &'a str,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner, arena: &'a ExprArena) -> Self {
        Self {
            interner,
            arena,
            print_handler: None,
            max_call_depth: None,
            entry_point: "main",
        }
    }

    /// Where `print` and `println` write.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Fail with a recursion error beyond `depth` nested user calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Function run by [`Interpreter::run`].
    #[must_use]
    pub fn entry_point(mut self, name: &'a str) -> Self {
        self.entry_point = name;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let mut functions = FunctionTable::new();
        builtins::register(&mut functions, self.interner);
        Interpreter {
            interner: self.interner,
            arena: self.arena,
            env: Environment::new(),
            functions,
            types: TypeTable::with_builtins(self.interner),
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            entry_point: self.interner.intern(self.entry_point),
            return_slot: self.interner.intern(RETURN_SLOT),
            current_return: None,
        }
    }
}

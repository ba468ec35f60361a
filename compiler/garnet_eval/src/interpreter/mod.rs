//! The tree-walking interpreter.
//!
//! # Architecture
//!
//! - `mod.rs`: state, entry points (`run`, `load`, `call`) and reference
//!   resolution.
//! - `declarations.rs`: global registration and variable declarations.
//! - `expr.rs`: expression evaluation.
//! - `control.rs`: statements, blocks and the [`Flow`] signal.
//! - `function_call.rs`: the call protocol.
//! - `scope_guard.rs`: RAII scopes.
//! - `builder.rs`: [`InterpreterBuilder`].
//!
//! Expressions produce [`Value`]s; an identifier produces a `VarRef` so
//! that assignment can address the slot, and operators resolve references
//! through [`Interpreter::deref`] before computing. Faults propagate as
//! [`EvalError`]; `break` and `return` propagate as [`Flow`].

mod builder;
mod control;
mod declarations;
mod expr;
mod function_call;
mod scope_guard;


use garnet_ir::{ExprArena, Module, Name, SourceRegion, StringInterner};

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{missing_entry_point, stale_reference, EvalError, EvalResult};
use crate::function_table::{CallArgs, FunctionTable};
use crate::print_handler::SharedPrintHandler;
use crate::store::VariableKey;
use crate::types::TypeTable;
use crate::value::{ScalarType, Value, Working};

pub use builder::InterpreterBuilder;
pub use control::Flow;
pub use scope_guard::ScopedInterpreter;

/// Evaluator state for one program.
///
/// Borrows the interner and the AST arena; owns every piece of mutable
/// program state.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) arena: &'a ExprArena,
    pub(crate) env: Environment,
    pub(crate) functions: FunctionTable,
    pub(crate) types: TypeTable,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
    /// Function run by [`Interpreter::run`].
    pub(crate) entry_point: Name,
    /// Name recorded in the store for per-call result slots.
    pub(crate) return_slot: Name,
    /// Result slot of the innermost active user call.
    pub(crate) current_return: Option<VariableKey>,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with default configuration (stdout, no depth limit).
    pub fn new(interner: &'a StringInterner, arena: &'a ExprArena) -> Self {
        InterpreterBuilder::new(interner, arena).build()
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured so far; empty unless a buffer handler is installed.
    pub fn get_print_output(&self) -> String {
        self.print_handler.output()
    }

    pub fn clear_print_output(&self) {
        self.print_handler.clear();
    }

    /// Run a compilation unit: register its globals, then call the entry
    /// point with a single nil argument.
    ///
    /// Returns the exit code: the entry point's integer result narrowed to
    /// `i32`, or 0 for any other result.
    ///
    /// Every error returned here carries a region; faults with no node of
    /// their own (such as a missing entry point) get the unit's region, which
    /// for an empty unit is the start of its file.
    #[tracing::instrument(level = "debug", skip_all, fields(items = module.items.len()))]
    pub fn run(&mut self, module: &Module) -> Result<i32, EvalError> {
        let unit_region = module.region();
        let result = self
            .load(module)
            .and_then(|()| self.call_entry_point(unit_region));
        tracing::trace!(store = %self.dump_variables(), "variable store after run");
        let value = result.map_err(|e| e.at(unit_region))?;
        Ok(exit_code(&value))
    }

    /// Register every top-level function and global variable of `module`.
    pub fn load(&mut self, module: &Module) -> Result<(), EvalError> {
        self.register_globals(module)
    }

    /// Call a function by name, as a call expression would.
    ///
    /// There is no call site in source, so an error raised by the call
    /// itself (unknown function, bad arguments at a builtin) carries
    /// [`SourceRegion::DUMMY`]. Errors raised inside a user function body
    /// keep the region of the failing node.
    pub fn call(&mut self, name: &str, args: CallArgs) -> EvalResult {
        let name = self.interner.intern(name);
        self.call_function(name, args, SourceRegion::DUMMY)
    }

    fn call_entry_point(&mut self, region: SourceRegion) -> EvalResult {
        if !self.functions.contains(self.entry_point) {
            return Err(missing_entry_point(self.interner.lookup(self.entry_point)).at(region));
        }
        self.call_function(self.entry_point, CallArgs::positional([Value::Nil]), region)
    }

    /// Strip every layer of variable reference from `value`.
    ///
    /// A reference whose scope has exited is a `NameError`.
    pub fn deref(&self, value: Value, region: SourceRegion) -> EvalResult {
        let mut current = value;
        while let Value::VarRef(key) = current {
            current = self
                .env
                .read(key)
                .cloned()
                .ok_or_else(|| stale_reference(key).at(region))?;
        }
        Ok(current)
    }

    /// Render the variable store, one `#key name = value` line per slot.
    pub fn dump_variables(&self) -> String {
        self.env.store().dump(self.interner)
    }
}

fn exit_code(value: &Value) -> i32 {
    match (value.scalar_type(), Working::of(value)) {
        (Some(ty), Some(working)) if ty.is_integer() => match ScalarType::I32.narrow(working) {
            Value::I32(code) => code,
            _ => 0,
        },
        _ => 0,
    }
}

//! Tree-walking interpreter for Garnet programs.
//!
//! Executes a finalized [`garnet_ir::Module`] directly by walking its AST,
//! keeping all mutable program state (variables, scopes, functions) inside
//! one [`Interpreter`] instance.
//!
//! # Architecture
//!
//! Leaves first:
//! - [`Value`]: tagged runtime value, including the two indirections
//!   (`VarRef`, `FuncRef`) the interpreter uses for locations and callables.
//! - [`VariableStore`]: flat key → `(name, value)` table.
//! - [`Environment`]: parent-linked scope chain over the store.
//! - [`evaluate_binary`] / [`evaluate_unary`]: numeric promotion and
//!   operator semantics on already-dereferenced operands.
//! - [`FunctionTable`]: user functions, prototypes and native builtins.
//! - [`Interpreter`]: the visitor tying it all together; `break` and
//!   `return` travel as [`Flow`] signals, faults as [`EvalError`].

mod builtins;
mod diagnostics;
mod environment;
mod errors;
mod function_table;
mod interpreter;
mod logging;
mod operators;
mod print_handler;
mod stack;
mod store;
mod types;
mod unary_operators;
mod value;

#[cfg(test)]
mod tests;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, Redeclared, ScopeKind};
pub use errors::{
    BacktraceFrame, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use function_table::{CallArgs, Function, FunctionTable, NativeFn};
pub use interpreter::{Flow, Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use logging::init_tracing;
pub use operators::{convert_for_assignment, evaluate_binary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use store::{Variable, VariableKey, VariableStore};
pub use types::{DeclaredType, TypeTable};
pub use unary_operators::evaluate_unary;
pub use value::{format_value, ScalarType, Value, Working};

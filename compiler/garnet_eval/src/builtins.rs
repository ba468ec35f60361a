//! Native `print` and `println`.
//!
//! Arguments are formatted separated by single spaces. An argument that is
//! a variable reference is read once; nothing stored is a reference, so no
//! further indirection is followed.

use garnet_ir::StringInterner;

use crate::errors::{stale_reference, unexpected_keyword, EvalResult};
use crate::function_table::{CallArgs, FunctionTable};
use crate::interpreter::Interpreter;
use crate::value::{format_value, Value};

/// Register the builtins in a fresh function table.
pub(crate) fn register(functions: &mut FunctionTable, interner: &StringInterner) {
    functions.register_native(interner.intern("print"), print);
    functions.register_native(interner.intern("println"), println);
}

fn print(interp: &mut Interpreter<'_>, args: CallArgs) -> EvalResult {
    let text = format_args(interp, "print", &args)?;
    interp.print_handler.print(&text);
    Ok(Value::Nil)
}

fn println(interp: &mut Interpreter<'_>, args: CallArgs) -> EvalResult {
    let text = format_args(interp, "println", &args)?;
    interp.print_handler.println(&text);
    Ok(Value::Nil)
}

fn format_args(interp: &Interpreter<'_>, function: &str, args: &CallArgs) -> EvalResult<String> {
    if !args.keyword.is_empty() {
        return Err(unexpected_keyword(function));
    }
    let mut parts = Vec::with_capacity(args.positional.len());
    for arg in &args.positional {
        let value = match arg {
            Value::VarRef(key) => interp.env.read(*key).ok_or_else(|| stale_reference(*key))?,
            other => other,
        };
        parts.push(format_value(value, interp.interner));
    }
    Ok(parts.join(" "))
}

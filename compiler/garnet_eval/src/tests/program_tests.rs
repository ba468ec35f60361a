//! End-to-end tests: programs assembled with `AstBuilder` and run through
//! `Interpreter::run` with captured output.

use crate::errors::{ErrorCategory, EvalError, EvalErrorKind};
use crate::interpreter::InterpreterBuilder;
use crate::print_handler::buffer_handler;
use garnet_ir::{AstBuilder, BinaryOp, ExprId, StmtId, StringInterner, UnaryOp};
use pretty_assertions::assert_eq;

struct Outcome {
    result: Result<i32, EvalError>,
    output: String,
    report: Option<String>,
}

impl Outcome {
    fn err(&self) -> &EvalError {
        match &self.result {
            Err(err) => err,
            Ok(code) => panic!("expected an error, program exited with {code}"),
        }
    }
}

fn run_program(build: impl FnOnce(&mut AstBuilder<'_>)) -> Outcome {
    run_program_with_depth(None, build)
}

fn run_program_with_depth(
    max_depth: Option<usize>,
    build: impl FnOnce(&mut AstBuilder<'_>),
) -> Outcome {
    crate::init_tracing();
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner, "test.gt");
    build(&mut b);
    let (arena, module) = b.finish();

    let handler = buffer_handler();
    let mut builder = InterpreterBuilder::new(&interner, &arena).print_handler(handler.clone());
    if let Some(depth) = max_depth {
        builder = builder.max_call_depth(depth);
    }
    let mut interpreter = builder.build();
    let result = interpreter.run(&module);
    let report = result.as_ref().err().map(|e| e.render(&interner));
    Outcome {
        result,
        output: handler.output(),
        report,
    }
}

fn main_fn(b: &mut AstBuilder<'_>, stmts: Vec<StmtId>) {
    let body = b.block(stmts);
    b.function("main", [], None, body);
}

fn println_stmt(b: &mut AstBuilder<'_>, args: Vec<ExprId>) -> StmtId {
    let call = b.call("println", args);
    b.expr_stmt(call)
}

/// `name = name + 1;`
fn increment(b: &mut AstBuilder<'_>, name: &str) -> StmtId {
    let current = b.ident(name);
    let one = b.int(1);
    let sum = b.binary(BinaryOp::Add, current, one);
    let assign = b.assign(name, sum);
    b.expr_stmt(assign)
}

/// `if (name == limit) { break; }`
fn break_when(b: &mut AstBuilder<'_>, name: &str, limit: i64) -> StmtId {
    let current = b.ident(name);
    let limit = b.int(limit);
    let cond = b.binary(BinaryOp::Eq, current, limit);
    let brk = b.break_stmt();
    let then = b.block([brk]);
    b.if_stmt([(Some(cond), then)])
}

#[test]
fn test_println_sum() {
    let out = run_program(|b| {
        let label = b.string("sum:");
        let two = b.int(2);
        let three = b.int(3);
        let sum = b.binary(BinaryOp::Add, two, three);
        let print = println_stmt(b, vec![label, sum]);
        main_fn(b, vec![print]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "sum: 5\n");
}

#[test]
fn test_print_without_newline() {
    let out = run_program(|b| {
        let a = b.string("a");
        let first = b.call("print", [a]);
        let first = b.expr_stmt(first);
        let bee = b.string("b");
        let flag = b.boolean(true);
        let second = b.call("print", [bee, flag]);
        let second = b.expr_stmt(second);
        main_fn(b, vec![first, second]);
    });
    assert_eq!(out.output, "ab true");
}

#[test]
fn test_assign_string_to_i32_is_type_error() {
    let out = run_program(|b| {
        let five = b.int(5);
        let decl = b.var("x", "i32", Some(five));
        let hello = b.string("hello");
        let assign = b.assign("x", hello);
        let assign = b.expr_stmt(assign);
        main_fn(b, vec![decl, assign]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert!(err.message().contains("i32"), "{}", err.message());
    assert!(err.message().contains("string"), "{}", err.message());
    assert!(err.region.is_some());
}

#[test]
fn test_declaration_initializer_type_error() {
    let out = run_program(|b| {
        let hello = b.string("hello");
        let decl = b.var("x", "i32", Some(hello));
        main_fn(b, vec![decl]);
    });
    assert_eq!(out.err().category(), ErrorCategory::TypeError);
}

/// `fn sub(a: i32, b: i32) -> i32 { return a - b; }`
fn define_sub(b: &mut AstBuilder<'_>) {
    let a = b.ident("a");
    let rhs = b.ident("b");
    let diff = b.binary(BinaryOp::Sub, a, rhs);
    let ret = b.ret(Some(diff));
    let body = b.block([ret]);
    let pa = b.param("a", "i32");
    let pb = b.param("b", "i32");
    b.function("sub", [pa, pb], Some("i32"), body);
}

#[test]
fn test_keyword_argument_binds_other_parameter() {
    let out = run_program(|b| {
        define_sub(b);
        let ten = b.int(10);
        let three = b.int(3);
        let call = b.call_kw("sub", [ten], [("a", three)]);
        let print = println_stmt(b, vec![call]);
        main_fn(b, vec![print]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "-7\n");
}

#[test]
fn test_missing_arguments_is_invalid_argument() {
    let out = run_program(|b| {
        define_sub(b);
        let call = b.call("sub", []);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    assert!(matches!(err.kind, EvalErrorKind::MissingArgument { .. }));
}

#[test]
fn test_unknown_and_duplicate_keywords() {
    let out = run_program(|b| {
        define_sub(b);
        let one = b.int(1);
        let two = b.int(2);
        let call = b.call_kw("sub", [one], [("c", two)]);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    assert!(matches!(out.err().kind, EvalErrorKind::UnknownKeyword { .. }));

    let out = run_program(|b| {
        define_sub(b);
        let one = b.int(1);
        let two = b.int(2);
        let call = b.call_kw("sub", [], [("a", one), ("a", two)]);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    assert!(matches!(err.kind, EvalErrorKind::DuplicateKeyword { .. }));
}

#[test]
fn test_extra_positional_arguments_are_ignored() {
    let out = run_program(|b| {
        define_sub(b);
        let args = [b.int(5), b.int(2), b.int(100)];
        let call = b.call("sub", args);
        let print = println_stmt(b, vec![call]);
        main_fn(b, vec![print]);
    });
    assert_eq!(out.output, "3\n");
}

#[test]
fn test_builtin_rejects_keyword_argument() {
    let out = run_program(|b| {
        let x = b.int(1);
        let call = b.call_kw("println", [], [("value", x)]);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    assert_eq!(out.err().category(), ErrorCategory::InvalidArgument);
}

#[test]
fn test_assert_failure_carries_message() {
    let out = run_program(|b| {
        let one = b.int(1);
        let two = b.int(2);
        let cond = b.binary(BinaryOp::Gt, one, two);
        let message = b.string("should fail");
        let assert = b.assert_stmt(cond, Some(message));
        main_fn(b, vec![assert]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::AssertionError);
    assert_eq!(
        err.kind,
        EvalErrorKind::AssertionFailed {
            message: Some("should fail".to_string())
        }
    );
}

#[test]
fn test_assert_success_and_non_bool_condition() {
    let out = run_program(|b| {
        let t = b.boolean(true);
        let assert = b.assert_stmt(t, None);
        main_fn(b, vec![assert]);
    });
    assert_eq!(out.result, Ok(0));

    let out = run_program(|b| {
        let one = b.int(1);
        let assert = b.assert_stmt(one, None);
        main_fn(b, vec![assert]);
    });
    assert_eq!(out.err().category(), ErrorCategory::TypeError);
}

#[test]
fn test_redeclaration_in_same_block() {
    let out = run_program(|b| {
        let first = b.var("x", "i32", None);
        let second = b.var("x", "i64", None);
        main_fn(b, vec![first, second]);
    });
    assert_eq!(out.err().category(), ErrorCategory::InvalidRedeclarationError);
}

#[test]
fn test_shadowing_in_nested_block() {
    let out = run_program(|b| {
        let one = b.int(1);
        let outer = b.var("x", "i32", Some(one));
        let inner_value = b.string("inner");
        let inner = b.var("x", "string", Some(inner_value));
        let x = b.ident("x");
        let print_inner = println_stmt(b, vec![x]);
        let block = b.block([inner, print_inner]);
        let block = b.block_stmt(block);
        let x = b.ident("x");
        let print_outer = println_stmt(b, vec![x]);
        main_fn(b, vec![outer, block, print_outer]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "inner\n1\n");
}

#[test]
fn test_block_variable_unresolvable_after_exit() {
    let out = run_program(|b| {
        let decl = b.var("y", "i32", None);
        let block = b.block([decl]);
        let block = b.block_stmt(block);
        let y = b.ident("y");
        let print = println_stmt(b, vec![y]);
        main_fn(b, vec![block, print]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::NameError);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedVariable { .. }));
}

#[test]
fn test_initializer_sees_outer_binding() {
    let out = run_program(|b| {
        let two = b.int(2);
        let outer = b.var("x", "i32", Some(two));
        let x = b.ident("x");
        let ten = b.int(10);
        let product = b.binary(BinaryOp::Mul, x, ten);
        let inner = b.var("x", "i32", Some(product));
        let x = b.ident("x");
        let print = println_stmt(b, vec![x]);
        let block = b.block([inner, print]);
        let block = b.block_stmt(block);
        main_fn(b, vec![outer, block]);
    });
    assert_eq!(out.output, "20\n");
}

#[test]
fn test_break_exits_only_innermost_loop() {
    let out = run_program(|b| {
        let i = b.var("i", "i32", None);
        let total = b.var("total", "i32", None);

        let stop_outer = break_when(b, "i", 3);
        let j = b.var("j", "i32", None);
        let stop_inner = break_when(b, "j", 2);
        let count = increment(b, "total");
        let step_j = increment(b, "j");
        let inner_body = b.block([stop_inner, count, step_j]);
        let inner_loop = b.loop_stmt(inner_body);
        let step_i = increment(b, "i");
        let outer_body = b.block([stop_outer, j, inner_loop, step_i]);
        let outer_loop = b.loop_stmt(outer_body);

        let total_ref = b.ident("total");
        let print = println_stmt(b, vec![total_ref]);
        main_fn(b, vec![i, total, outer_loop, print]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "6\n");
}

#[test]
fn test_if_else_chain() {
    let out = run_program(|b| {
        let f = b.boolean(false);
        let first = b.string("first");
        let first = println_stmt(b, vec![first]);
        let first = b.block([first]);
        let t = b.boolean(true);
        let second = b.string("second");
        let second = println_stmt(b, vec![second]);
        let second = b.block([second]);
        let other = b.string("else");
        let other = println_stmt(b, vec![other]);
        let other = b.block([other]);
        let chain = b.if_stmt([(Some(f), first), (Some(t), second), (None, other)]);
        main_fn(b, vec![chain]);
    });
    assert_eq!(out.output, "second\n");
}

#[test]
fn test_if_condition_must_be_bool() {
    let out = run_program(|b| {
        let s = b.string("yes");
        let empty = b.block([]);
        let stmt = b.if_stmt([(Some(s), empty)]);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert!(matches!(err.kind, EvalErrorKind::NonBoolCondition { .. }));
}

#[test]
fn test_main_result_is_exit_code() {
    let out = run_program(|b| {
        let value = b.int(42);
        let ret = b.ret(Some(value));
        let body = b.block([ret]);
        b.function("main", [], Some("i32"), body);
    });
    assert_eq!(out.result, Ok(42));
}

#[test]
fn test_return_narrows_to_result_type() {
    let out = run_program(|b| {
        let seven = b.int(7);
        let two = b.int(2);
        let half = b.binary(BinaryOp::Div, seven, two);
        let ret = b.ret(Some(half));
        let body = b.block([ret]);
        b.function("half", [], Some("i32"), body);

        let call = b.call("half", []);
        let ret = b.ret(Some(call));
        let body = b.block([ret]);
        b.function("main", [], Some("i32"), body);
    });
    assert_eq!(out.result, Ok(3));
}

#[test]
fn test_return_skips_rest_of_body() {
    let out = run_program(|b| {
        let ret = b.ret(None);
        let after = b.string("unreachable");
        let print = println_stmt(b, vec![after]);
        let body = b.block([ret, print]);
        let forever = b.loop_stmt(body);
        main_fn(b, vec![forever]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "");
}

#[test]
fn test_break_at_function_boundary_ends_call() {
    let out = run_program(|b| {
        let brk = b.break_stmt();
        let body = b.block([brk]);
        b.function("stop", [], Some("i32"), body);

        let call = b.call("stop", []);
        let four = b.int(4);
        let sum = b.binary(BinaryOp::Add, call, four);
        let ret = b.ret(Some(sum));
        let body = b.block([ret]);
        b.function("main", [], Some("i32"), body);
    });
    assert_eq!(out.result, Ok(4));
}

#[test]
fn test_recursive_factorial() {
    let out = run_program(|b| {
        let n = b.ident("n");
        let one = b.int(1);
        let base = b.binary(BinaryOp::LtEq, n, one);
        let one = b.int(1);
        let ret_one = b.ret(Some(one));
        let then = b.block([ret_one]);
        let guard = b.if_stmt([(Some(base), then)]);
        let n = b.ident("n");
        let n2 = b.ident("n");
        let one = b.int(1);
        let pred = b.binary(BinaryOp::Sub, n2, one);
        let rec = b.call("fact", [pred]);
        let product = b.binary(BinaryOp::Mul, n, rec);
        let ret = b.ret(Some(product));
        let body = b.block([guard, ret]);
        let param = b.param("n", "i64");
        b.function("fact", [param], Some("i64"), body);

        let ten = b.int(10);
        let call = b.call("fact", [ten]);
        let print = println_stmt(b, vec![call]);
        main_fn(b, vec![print]);
    });
    assert_eq!(out.output, "3628800\n");
}

#[test]
fn test_recursion_limit() {
    let out = run_program_with_depth(Some(32), |b| {
        let n = b.ident("n");
        let call = b.call("forever", [n]);
        let stmt = b.expr_stmt(call);
        let body = b.block([stmt]);
        let param = b.param("n", "i32");
        b.function("forever", [param], None, body);

        let zero = b.int(0);
        let call = b.call("forever", [zero]);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::RecursionError);
    let backtrace = err.backtrace.as_ref().unwrap();
    assert_eq!(backtrace.len(), 32);
    assert_eq!(backtrace.frames()[0].name, "forever");
    assert_eq!(backtrace.frames()[31].name, "main");
}

#[test]
fn test_error_backtrace_and_report() {
    let out = run_program(|b| {
        let f = b.boolean(false);
        let assert = b.assert_stmt(f, None);
        let body = b.block([assert]);
        b.function("inner", [], None, body);

        let call = b.call("inner", []);
        let stmt = b.expr_stmt(call);
        let body = b.block([stmt]);
        b.function("outer", [], None, body);

        let call = b.call("outer", []);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    let names: Vec<&str> = err
        .backtrace
        .as_ref()
        .unwrap()
        .frames()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["inner", "outer", "main"]);

    let report = out.report.as_deref().unwrap();
    assert!(report.starts_with("interpreter error: AssertionError\n"), "{report}");
    assert!(report.contains("at test.gt:"), "{report}");
    assert!(report.contains("what(): assertion failed"), "{report}");
    assert!(report.contains("stack backtrace:"), "{report}");
}

#[test]
fn test_call_scope_cannot_see_caller_locals() {
    let out = run_program(|b| {
        let secret = b.ident("secret");
        let print = println_stmt(b, vec![secret]);
        let body = b.block([print]);
        b.function("peek", [], None, body);

        let one = b.int(1);
        let decl = b.var("secret", "i32", Some(one));
        let call = b.call("peek", []);
        let call = b.expr_stmt(call);
        main_fn(b, vec![decl, call]);
    });
    assert_eq!(out.err().category(), ErrorCategory::NameError);
}

#[test]
fn test_globals_visible_in_functions_and_initialized_by_calls() {
    let out = run_program(|b| {
        let five = b.int(5);
        let ret = b.ret(Some(five));
        let body = b.block([ret]);
        b.function("five", [], Some("u8"), body);

        let call = b.call("five", []);
        b.global("g", "u8", Some(call));

        let g = b.ident("g");
        let print = println_stmt(b, vec![g]);
        let body = b.block([print]);
        b.function("show", [], None, body);

        let bump = increment(b, "g");
        let call = b.call("show", []);
        let call = b.expr_stmt(call);
        main_fn(b, vec![bump, call]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "6\n");
}

/// `fn bump(ref n: i32) { n = n + 1; }`
fn define_bump(b: &mut AstBuilder<'_>) {
    let step = increment(b, "n");
    let body = b.block([step]);
    let param = b.ref_param("n", "i32");
    b.function("bump", [param], None, body);
}

#[test]
fn test_reference_parameter_aliases_caller_variable() {
    let out = run_program(|b| {
        define_bump(b);
        let one = b.int(1);
        let decl = b.var("x", "i32", Some(one));
        let x = b.ident("x");
        let first = b.call("bump", [x]);
        let first = b.expr_stmt(first);
        let x = b.ident("x");
        let second = b.call("bump", [x]);
        let second = b.expr_stmt(second);
        let x = b.ident("x");
        let print = println_stmt(b, vec![x]);
        main_fn(b, vec![decl, first, second, print]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "3\n");
}

#[test]
fn test_reference_parameter_requires_variable_of_declared_type() {
    let out = run_program(|b| {
        define_bump(b);
        let one = b.int(1);
        let call = b.call("bump", [one]);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    assert!(matches!(err.kind, EvalErrorKind::NotAReference { .. }));

    let out = run_program(|b| {
        define_bump(b);
        let decl = b.var("wide", "i64", None);
        let wide = b.ident("wide");
        let call = b.call("bump", [wide]);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![decl, stmt]);
    });
    assert_eq!(out.err().category(), ErrorCategory::TypeError);
}

#[test]
fn test_value_parameter_is_a_copy() {
    let out = run_program(|b| {
        let nine = b.int(9);
        let assign = b.assign("n", nine);
        let assign = b.expr_stmt(assign);
        let body = b.block([assign]);
        let param = b.param("n", "i32");
        b.function("clobber", [param], None, body);

        let one = b.int(1);
        let decl = b.var("x", "i32", Some(one));
        let x = b.ident("x");
        let call = b.call("clobber", [x]);
        let call = b.expr_stmt(call);
        let x = b.ident("x");
        let print = println_stmt(b, vec![x]);
        main_fn(b, vec![decl, call, print]);
    });
    assert_eq!(out.output, "1\n");
}

#[test]
fn test_prototype_completed_by_later_definition() {
    let out = run_program(|b| {
        b.prototype("later", [], Some("i32"));

        let call = b.call("later", []);
        let ret = b.ret(Some(call));
        let body = b.block([ret]);
        b.function("main", [], Some("i32"), body);

        let eleven = b.int(11);
        let ret = b.ret(Some(eleven));
        let body = b.block([ret]);
        b.function("later", [], Some("i32"), body);
    });
    assert_eq!(out.result, Ok(11));
}

#[test]
fn test_undefined_prototype_call_is_name_error() {
    let out = run_program(|b| {
        b.prototype("ghost", [], None);
        let call = b.call("ghost", []);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::NameError);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedFunction { .. }));
}

#[test]
fn test_function_redefinition() {
    let out = run_program(|b| {
        let body = b.block([]);
        b.function("twice", [], None, body);
        let body = b.block([]);
        b.function("twice", [], None, body);
        main_fn(b, vec![]);
    });
    assert_eq!(out.err().category(), ErrorCategory::InvalidRedeclarationError);

    let out = run_program(|b| {
        let body = b.block([]);
        b.function("println", [], None, body);
        main_fn(b, vec![]);
    });
    assert_eq!(out.err().category(), ErrorCategory::InvalidRedeclarationError);
}

#[test]
fn test_chained_assignment() {
    let out = run_program(|b| {
        let a = b.var("a", "i32", None);
        let c = b.var("c", "u8", None);
        let three = b.int(3);
        let inner = b.assign("c", three);
        let outer = b.assign("a", inner);
        let stmt = b.expr_stmt(outer);
        let a_ref = b.ident("a");
        let c_ref = b.ident("c");
        let print = println_stmt(b, vec![a_ref, c_ref]);
        main_fn(b, vec![a, c, stmt, print]);
    });
    assert_eq!(out.output, "3 3\n");
}

#[test]
fn test_assign_to_non_variable() {
    let out = run_program(|b| {
        let one = b.int(1);
        let two = b.int(2);
        let assign = b.binary(BinaryOp::Assign, one, two);
        let stmt = b.expr_stmt(assign);
        main_fn(b, vec![stmt]);
    });
    assert!(matches!(out.err().kind, EvalErrorKind::NotAssignable { .. }));
}

#[test]
fn test_calling_a_variable_is_type_error() {
    let out = run_program(|b| {
        let decl = b.var("x", "i32", None);
        let call = b.call("x", []);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![decl, stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert!(matches!(err.kind, EvalErrorKind::NotCallable { .. }));
}

#[test]
fn test_unary_operators_in_program() {
    let out = run_program(|b| {
        let five = b.int(5);
        let neg = b.unary(UnaryOp::Neg, five);
        let t = b.boolean(true);
        let not = b.unary(UnaryOp::Not, t);
        let print = println_stmt(b, vec![neg, not]);
        main_fn(b, vec![print]);
    });
    assert_eq!(out.output, "-5 false\n");
}

#[test]
fn test_unknown_type_is_name_error() {
    let out = run_program(|b| {
        let decl = b.var("x", "i128", None);
        main_fn(b, vec![decl]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::NameError);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedType { .. }));
}

#[test]
fn test_syntax_error_sentinels() {
    let out = run_program(|b| {
        b.error_item();
        main_fn(b, vec![]);
    });
    assert_eq!(
        out.err().kind,
        EvalErrorKind::InvalidSyntax { node: "item" }
    );

    let out = run_program(|b| {
        let bad = b.error_stmt();
        main_fn(b, vec![bad]);
    });
    assert_eq!(
        out.err().kind,
        EvalErrorKind::InvalidSyntax { node: "statement" }
    );

    let out = run_program(|b| {
        let bad = b.error_sentence();
        main_fn(b, vec![bad]);
    });
    assert_eq!(
        out.err().kind,
        EvalErrorKind::InvalidSyntax { node: "sentence" }
    );

    let out = run_program(|b| {
        let bad = b.error_expr();
        let stmt = b.expr_stmt(bad);
        main_fn(b, vec![stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::SyntaxError);
    assert_eq!(err.kind, EvalErrorKind::InvalidSyntax { node: "expression" });
}

#[test]
fn test_unimplemented_constructs() {
    let out = run_program(|b| {
        b.type_decl("Point");
        main_fn(b, vec![]);
    });
    assert_eq!(out.err().category(), ErrorCategory::UnImplementedError);

    let out = run_program(|b| {
        let decl = b.var("p", "i32", None);
        let p = b.ident("p");
        let field = b.field(p, "x");
        let stmt = b.expr_stmt(field);
        main_fn(b, vec![decl, stmt]);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::UnImplementedError);
    assert!(err.region.is_some());
}

#[test]
fn test_missing_main() {
    let out = run_program(|b| {
        let body = b.block([]);
        b.function("helper", [], None, body);
    });
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::NameError);
    assert!(matches!(err.kind, EvalErrorKind::MissingEntryPoint { .. }));
}

#[test]
fn test_local_named_like_result_slot_does_not_capture_return() {
    let out = run_program(|b| {
        let decl = b.var("__return__", "string", None);
        let five = b.int(5);
        let ret = b.ret(Some(five));
        let body = b.block([decl, ret]);
        b.function("f", [], Some("i32"), body);

        let call = b.call("f", []);
        let print = println_stmt(b, vec![call]);
        main_fn(b, vec![print]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "5\n");
}

#[test]
fn test_parameter_named_like_result_slot() {
    let out = run_program(|b| {
        let param_value = b.ident("__return__");
        let ret = b.ret(Some(param_value));
        let body = b.block([ret]);
        let param = b.param("__return__", "i32");
        b.function("echo", [param], Some("i32"), body);

        let nine = b.int(9);
        let call = b.call("echo", [nine]);
        let print = println_stmt(b, vec![call]);
        main_fn(b, vec![print]);
    });
    assert_eq!(out.result, Ok(0));
    assert_eq!(out.output, "9\n");
}

#[test]
fn test_nested_calls_return_into_their_own_slots() {
    let out = run_program(|b| {
        let two = b.int(2);
        let ret = b.ret(Some(two));
        let body = b.block([ret]);
        b.function("inner", [], Some("i32"), body);

        let call = b.call("inner", []);
        let ten = b.int(10);
        let sum = b.binary(BinaryOp::Add, call, ten);
        let ret = b.ret(Some(sum));
        let body = b.block([ret]);
        b.function("outer", [], Some("string"), body);

        let call = b.call("outer", []);
        let stmt = b.expr_stmt(call);
        main_fn(b, vec![stmt]);
    });
    // `outer` returns an integer into its string slot, not into `inner`'s.
    let err = out.err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert!(err.message().contains("string"), "{}", err.message());
}

#[test]
fn test_empty_unit_error_points_at_file_start() {
    let out = run_program(|_| {});
    let err = out.err();
    assert!(matches!(err.kind, EvalErrorKind::MissingEntryPoint { .. }));
    let region = err.region.unwrap();
    assert!(!region.is_dummy());
    let report = out.report.as_deref().unwrap();
    assert!(report.contains("at test.gt:1:1"), "{report}");
}

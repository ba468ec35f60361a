//! Binary operator implementations for the evaluator.
//!
//! Operands arrive fully dereferenced. Numeric operands are promoted per
//! [`ScalarType`]'s rules, computed in a 64-bit [`Working`] representation
//! and narrowed back into the declared result type. Outside the numeric
//! family only `bool && bool`, `bool || bool` and `string + string` are
//! defined; everything else is a type error naming both operand types.

use garnet_ir::BinaryOp;

use crate::errors::{assign_type_mismatch, binary_type_mismatch, modulo_by_zero, EvalResult};
use crate::value::{ScalarType, Value, Working};

/// Evaluate a binary operation on dereferenced operands.
///
/// `BinaryOp::Assign` needs a storage slot and is handled by the
/// interpreter; passing it here is a type error.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::And => Ok(Value::Bool(*a && *b)),
            BinaryOp::Or => Ok(Value::Bool(*a || *b)),
            _ => Err(binary_type_mismatch(op, left, right)),
        },
        (Value::Str(a), Value::Str(b)) => match op {
            BinaryOp::Add => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::string(joined))
            }
            _ => Err(binary_type_mismatch(op, left, right)),
        },
        _ => match (ScalarType::of(left), ScalarType::of(right)) {
            (Some(lt), Some(rt)) => eval_numeric_binary(left, lt, right, rt, op),
            _ => Err(binary_type_mismatch(op, left, right)),
        },
    }
}

/// Convert `source` into the declared type of the slot currently holding
/// `target`, as `=` does.
///
/// Any numeric value converts to any numeric type through the narrowing
/// cast; `bool`, `string` and `nil` only accept their own type.
pub fn convert_for_assignment(target: &Value, source: &Value) -> EvalResult {
    match (target, source) {
        (Value::Bool(_), Value::Bool(_))
        | (Value::Str(_), Value::Str(_))
        | (Value::Nil, Value::Nil) => Ok(source.clone()),
        _ => match (ScalarType::of(target), Working::of(source)) {
            (Some(ty), Some(working)) => Ok(ty.narrow(working)),
            _ => Err(assign_type_mismatch(target, source)),
        },
    }
}

fn eval_numeric_binary(
    left: &Value,
    lt: ScalarType,
    right: &Value,
    rt: ScalarType,
    op: BinaryOp,
) -> EvalResult {
    let (Some(a), Some(b)) = (Working::of(left), Working::of(right)) else {
        return Err(binary_type_mismatch(op, left, right));
    };
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Mod => {
            eval_arithmetic(a, b, op, lt, rt)
        }
        // No integer division: `/` always produces f64.
        BinaryOp::Div => Ok(Value::F64(a.as_f64() / b.as_f64())),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor | BinaryOp::Shl | BinaryOp::Shr => {
            if lt.is_float() || rt.is_float() {
                return Err(binary_type_mismatch(op, left, right));
            }
            Ok(eval_bitwise(a, b, op, lt, rt))
        }
        BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq
        | BinaryOp::Eq
        | BinaryOp::NotEq => eval_comparison(a, b, op, lt, rt)
            .map(Value::Bool)
            .ok_or_else(|| binary_type_mismatch(op, left, right)),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Assign => {
            Err(binary_type_mismatch(op, left, right))
        }
    }
}

/// `+ - * %` with silent wrap-around on the working representation.
fn eval_arithmetic(
    a: Working,
    b: Working,
    op: BinaryOp,
    lt: ScalarType,
    rt: ScalarType,
) -> EvalResult {
    let result = ScalarType::arithmetic_result(lt, rt);
    let working = if result.is_float() {
        let (x, y) = (a.as_f64(), b.as_f64());
        Working::Float(match op {
            BinaryOp::Add => x + y,
            BinaryOp::Sub => x - y,
            BinaryOp::Mul => x * y,
            _ => x % y,
        })
    } else if lt.is_unsigned() && rt.is_unsigned() {
        let (x, y) = (a.as_u64(), b.as_u64());
        Working::Unsigned(match op {
            BinaryOp::Add => x.wrapping_add(y),
            BinaryOp::Sub => x.wrapping_sub(y),
            BinaryOp::Mul => x.wrapping_mul(y),
            _ => x.checked_rem(y).ok_or_else(modulo_by_zero)?,
        })
    } else {
        let (x, y) = (a.as_i64(), b.as_i64());
        Working::Signed(match op {
            BinaryOp::Add => x.wrapping_add(y),
            BinaryOp::Sub => x.wrapping_sub(y),
            BinaryOp::Mul => x.wrapping_mul(y),
            _ => {
                if y == 0 {
                    return Err(modulo_by_zero());
                }
                x.wrapping_rem(y)
            }
        })
    };
    Ok(result.narrow(working))
}

/// `& | ^ << >>` on two integers.
///
/// Shift amounts are taken modulo 64, matching the working width.
#[allow(
    clippy::cast_possible_truncation,
    reason = "shift amount is masked to 0..64 by wrapping_shl/shr"
)]
fn eval_bitwise(a: Working, b: Working, op: BinaryOp, lt: ScalarType, rt: ScalarType) -> Value {
    let result = ScalarType::bitwise_result(lt, rt);
    let shift = b.as_u64() as u32;
    let working = if lt.is_unsigned() && rt.is_unsigned() {
        let (x, y) = (a.as_u64(), b.as_u64());
        Working::Unsigned(match op {
            BinaryOp::BitAnd => x & y,
            BinaryOp::BitOr => x | y,
            BinaryOp::BitXor => x ^ y,
            BinaryOp::Shl => x.wrapping_shl(shift),
            _ => x.wrapping_shr(shift),
        })
    } else {
        let (x, y) = (a.as_i64(), b.as_i64());
        Working::Signed(match op {
            BinaryOp::BitAnd => x & y,
            BinaryOp::BitOr => x | y,
            BinaryOp::BitXor => x ^ y,
            BinaryOp::Shl => x.wrapping_shl(shift),
            _ => x.wrapping_shr(shift),
        })
    };
    result.narrow(working)
}

/// Relational operators. `None` when the operands may not be compared:
/// only float/float and same-signedness integer pairs are allowed.
fn eval_comparison(
    a: Working,
    b: Working,
    op: BinaryOp,
    lt: ScalarType,
    rt: ScalarType,
) -> Option<bool> {
    if lt.is_float() && rt.is_float() {
        Some(compare(a.as_f64(), b.as_f64(), op))
    } else if lt.is_unsigned() && rt.is_unsigned() {
        Some(compare(a.as_u64(), b.as_u64(), op))
    } else if lt.is_signed() && rt.is_signed() {
        Some(compare(a.as_i64(), b.as_i64(), op))
    } else {
        None
    }
}

#[allow(clippy::float_cmp, reason = "language `==` is exact IEEE equality")]
fn compare<T: PartialOrd>(a: T, b: T, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        BinaryOp::Eq => a == b,
        _ => a != b,
    }
}

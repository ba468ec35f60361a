//! Unary operator implementations for the evaluator.
//!
//! `+` and `-` accept any numeric operand and keep its type, `!` accepts
//! only `bool`, and `~` accepts any integer (and `bool`, where it is a
//! logical negation).

use garnet_ir::UnaryOp;

use crate::errors::{unary_type_mismatch, EvalResult};
use crate::value::Value;

/// Evaluate a unary operation on a dereferenced operand.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Plus => match value {
            v if v.scalar_type().is_some() => Ok(v.clone()),
            _ => Err(unary_type_mismatch(op, value)),
        },
        UnaryOp::Neg => eval_negate(value).ok_or_else(|| unary_type_mismatch(op, value)),
        UnaryOp::Not => match value {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            _ => Err(unary_type_mismatch(op, value)),
        },
        UnaryOp::BitNot => eval_bit_not(value).ok_or_else(|| unary_type_mismatch(op, value)),
    }
}

/// Arithmetic negation; unsigned values wrap.
fn eval_negate(value: &Value) -> Option<Value> {
    Some(match *value {
        Value::U8(v) => Value::U8(v.wrapping_neg()),
        Value::U16(v) => Value::U16(v.wrapping_neg()),
        Value::U32(v) => Value::U32(v.wrapping_neg()),
        Value::U64(v) => Value::U64(v.wrapping_neg()),
        Value::I8(v) => Value::I8(v.wrapping_neg()),
        Value::I16(v) => Value::I16(v.wrapping_neg()),
        Value::I32(v) => Value::I32(v.wrapping_neg()),
        Value::I64(v) => Value::I64(v.wrapping_neg()),
        Value::F32(v) => Value::F32(-v),
        Value::F64(v) => Value::F64(-v),
        _ => return None,
    })
}

fn eval_bit_not(value: &Value) -> Option<Value> {
    Some(match *value {
        Value::U8(v) => Value::U8(!v),
        Value::U16(v) => Value::U16(!v),
        Value::U32(v) => Value::U32(!v),
        Value::U64(v) => Value::U64(!v),
        Value::I8(v) => Value::I8(!v),
        Value::I16(v) => Value::I16(!v),
        Value::I32(v) => Value::I32(!v),
        Value::I64(v) => Value::I64(!v),
        Value::Bool(b) => Value::Bool(!b),
        _ => return None,
    })
}

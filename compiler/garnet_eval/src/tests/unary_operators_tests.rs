//! Tests for unary operator implementations.

use crate::errors::ErrorCategory;
use crate::unary_operators::evaluate_unary;
use crate::value::Value;
use garnet_ir::UnaryOp;
use pretty_assertions::assert_eq;

#[test]
fn test_negate_keeps_type() {
    assert_eq!(evaluate_unary(&Value::I32(5), UnaryOp::Neg).unwrap(), Value::I32(-5));
    assert_eq!(evaluate_unary(&Value::F32(1.5), UnaryOp::Neg).unwrap(), Value::F32(-1.5));
    assert_eq!(
        evaluate_unary(&Value::I8(i8::MIN), UnaryOp::Neg).unwrap(),
        Value::I8(i8::MIN)
    );
    assert_eq!(evaluate_unary(&Value::U8(1), UnaryOp::Neg).unwrap(), Value::U8(255));
}

#[test]
fn test_plus_is_identity_on_numbers() {
    assert_eq!(evaluate_unary(&Value::U16(7), UnaryOp::Plus).unwrap(), Value::U16(7));
    assert!(evaluate_unary(&Value::Bool(true), UnaryOp::Plus).is_err());
}

#[test]
fn test_not_requires_bool() {
    assert_eq!(
        evaluate_unary(&Value::Bool(true), UnaryOp::Not).unwrap(),
        Value::Bool(false)
    );
    let err = evaluate_unary(&Value::I32(0), UnaryOp::Not).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
}

#[test]
fn test_bit_not() {
    assert_eq!(evaluate_unary(&Value::U8(0), UnaryOp::BitNot).unwrap(), Value::U8(255));
    assert_eq!(evaluate_unary(&Value::I32(0), UnaryOp::BitNot).unwrap(), Value::I32(-1));
    assert_eq!(
        evaluate_unary(&Value::Bool(false), UnaryOp::BitNot).unwrap(),
        Value::Bool(true)
    );
    assert!(evaluate_unary(&Value::F64(1.0), UnaryOp::BitNot).is_err());
}

#[test]
fn test_string_operand_rejected() {
    for op in [UnaryOp::Plus, UnaryOp::Neg, UnaryOp::Not, UnaryOp::BitNot] {
        let err = evaluate_unary(&Value::string("s"), op).unwrap_err();
        assert!(err.message().contains("string"), "{}", err.message());
    }
}

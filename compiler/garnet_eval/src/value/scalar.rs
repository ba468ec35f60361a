//! Numeric classification, promotion and narrowing.
//!
//! Mixed-width arithmetic happens in three steps:
//! 1. classify each operand as a [`ScalarType`];
//! 2. compute in a 64-bit [`Working`] representation chosen from both
//!    classifications;
//! 3. narrow the working result back into a declared type with
//!    [`ScalarType::narrow`], a plain `as` cast that wraps or truncates.

use super::Value;

/// The ten numeric value types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

/// A numeric value widened to 64 bits, keeping its category.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Working {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl ScalarType {
    /// Classify a value; `None` for non-numeric values.
    pub fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::U8(_) => Self::U8,
            Value::U16(_) => Self::U16,
            Value::U32(_) => Self::U32,
            Value::U64(_) => Self::U64,
            Value::I8(_) => Self::I8,
            Value::I16(_) => Self::I16,
            Value::I32(_) => Self::I32,
            Value::I64(_) => Self::I64,
            Value::F32(_) => Self::F32,
            Value::F64(_) => Self::F64,
            _ => return None,
        })
    }

    /// Width in bytes.
    pub const fn width(self) -> u8 {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Declared result type of `+ - * %`.
    ///
    /// Two unsigned operands keep the wider unsigned type. Two integers with
    /// at least one signed take the wider operand's type, the signed operand
    /// winning a width tie. Any float involvement yields `f64`.
    pub fn arithmetic_result(left: Self, right: Self) -> Self {
        if left.is_float() || right.is_float() {
            return Self::F64;
        }
        if left.width() != right.width() {
            return if left.width() > right.width() {
                left
            } else {
                right
            };
        }
        if right.is_signed() {
            right
        } else {
            left
        }
    }

    /// Declared result type of `& | ^ << >>`: the wider operand's type,
    /// the left operand winning a width tie. Both operands must be integers.
    pub fn bitwise_result(left: Self, right: Self) -> Self {
        if right.width() > left.width() {
            right
        } else {
            left
        }
    }

    /// Narrow a working value into this type.
    ///
    /// Integer targets wrap, float → integer truncates toward zero
    /// (saturating at the target range), `f64` → `f32` rounds.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        reason = "narrowing is a plain numeric cast by definition"
    )]
    pub fn narrow(self, working: Working) -> Value {
        macro_rules! cast {
            ($variant:ident, $ty:ty) => {
                Value::$variant(match working {
                    Working::Unsigned(v) => v as $ty,
                    Working::Signed(v) => v as $ty,
                    Working::Float(v) => v as $ty,
                })
            };
        }
        match self {
            Self::U8 => cast!(U8, u8),
            Self::U16 => cast!(U16, u16),
            Self::U32 => cast!(U32, u32),
            Self::U64 => cast!(U64, u64),
            Self::I8 => cast!(I8, i8),
            Self::I16 => cast!(I16, i16),
            Self::I32 => cast!(I32, i32),
            Self::I64 => cast!(I64, i64),
            Self::F32 => cast!(F32, f32),
            Self::F64 => cast!(F64, f64),
        }
    }
}

impl Working {
    /// Widen a numeric value; `None` for non-numeric values.
    pub fn of(value: &Value) -> Option<Self> {
        Some(match *value {
            Value::U8(v) => Self::Unsigned(u64::from(v)),
            Value::U16(v) => Self::Unsigned(u64::from(v)),
            Value::U32(v) => Self::Unsigned(u64::from(v)),
            Value::U64(v) => Self::Unsigned(v),
            Value::I8(v) => Self::Signed(i64::from(v)),
            Value::I16(v) => Self::Signed(i64::from(v)),
            Value::I32(v) => Self::Signed(i64::from(v)),
            Value::I64(v) => Self::Signed(v),
            Value::F32(v) => Self::Float(f64::from(v)),
            Value::F64(v) => Self::Float(v),
            _ => return None,
        })
    }

    /// Reinterpret as unsigned 64-bit (wrapping for negatives).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "working conversions wrap like C casts"
    )]
    pub fn as_u64(self) -> u64 {
        match self {
            Self::Unsigned(v) => v,
            Self::Signed(v) => v as u64,
            Self::Float(v) => v as u64,
        }
    }

    /// Reinterpret as signed 64-bit (wrapping above `i64::MAX`).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "working conversions wrap like C casts"
    )]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Unsigned(v) => v as i64,
            Self::Signed(v) => v,
            Self::Float(v) => v as i64,
        }
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "float promotion loses precision like C"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Unsigned(v) => v as f64,
            Self::Signed(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arithmetic_result_unsigned_keeps_wider() {
        assert_eq!(ScalarType::arithmetic_result(ScalarType::U8, ScalarType::U32), ScalarType::U32);
        assert_eq!(ScalarType::arithmetic_result(ScalarType::U64, ScalarType::U16), ScalarType::U64);
    }

    #[test]
    fn test_arithmetic_result_mixed_sign() {
        // Wider operand wins regardless of sign.
        assert_eq!(ScalarType::arithmetic_result(ScalarType::I32, ScalarType::U8), ScalarType::I32);
        assert_eq!(ScalarType::arithmetic_result(ScalarType::I8, ScalarType::U32), ScalarType::U32);
        // Ties go to the signed operand.
        assert_eq!(ScalarType::arithmetic_result(ScalarType::U32, ScalarType::I32), ScalarType::I32);
        assert_eq!(ScalarType::arithmetic_result(ScalarType::I16, ScalarType::U16), ScalarType::I16);
    }

    #[test]
    fn test_arithmetic_result_float_is_f64() {
        assert_eq!(ScalarType::arithmetic_result(ScalarType::F32, ScalarType::F32), ScalarType::F64);
        assert_eq!(ScalarType::arithmetic_result(ScalarType::U8, ScalarType::F32), ScalarType::F64);
    }

    #[test]
    fn test_bitwise_result_left_wins_tie() {
        assert_eq!(ScalarType::bitwise_result(ScalarType::U8, ScalarType::I8), ScalarType::U8);
        assert_eq!(ScalarType::bitwise_result(ScalarType::I32, ScalarType::U32), ScalarType::I32);
        assert_eq!(ScalarType::bitwise_result(ScalarType::U8, ScalarType::I64), ScalarType::I64);
    }

    #[test]
    fn test_narrow_wraps() {
        assert_eq!(ScalarType::U8.narrow(Working::Unsigned(256)), Value::U8(0));
        assert_eq!(ScalarType::U8.narrow(Working::Signed(-1)), Value::U8(255));
        assert_eq!(ScalarType::I8.narrow(Working::Signed(200)), Value::I8(-56));
        assert_eq!(ScalarType::I32.narrow(Working::Float(3.9)), Value::I32(3));
        assert_eq!(ScalarType::F32.narrow(Working::Signed(2)), Value::F32(2.0));
    }

    #[test]
    fn test_working_widening() {
        assert_eq!(Working::of(&Value::I8(-3)), Some(Working::Signed(-3)));
        assert_eq!(Working::of(&Value::U16(7)), Some(Working::Unsigned(7)));
        assert_eq!(Working::of(&Value::Bool(true)), None);
        assert_eq!(Working::Signed(-1).as_u64(), u64::MAX);
        assert_eq!(Working::Unsigned(u64::MAX).as_i64(), -1);
    }
}

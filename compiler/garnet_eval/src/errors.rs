//! Error types for evaluation.
//!
//! Every fault the interpreter can raise is an [`EvalError`]: a structured
//! [`EvalErrorKind`] (whose `Display` is the user-facing message), the
//! source region of the node that failed, and an optional backtrace of the
//! user function calls that were live at the time.
//!
//! Kinds are grouped into the language's error taxonomy by
//! [`EvalErrorKind::category`]. Factory functions below are the public way
//! to build errors; the interpreter attaches regions with [`EvalError::at`].
//!
//! `break` and `return` are not errors and never travel through this type.

use std::fmt;

use garnet_ir::{BinaryOp, SourceRegion, StringInterner, UnaryOp};
use thiserror::Error;

use crate::store::VariableKey;
use crate::value::Value;

/// Result of evaluating an expression (or, with `T`, a statement).
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// The language-level error taxonomy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A node the parser flagged as unrecoverable was visited.
    SyntaxError,
    /// Operator, assignment, condition or call-target type rule violated.
    TypeError,
    /// Name, type or function could not be resolved.
    NameError,
    /// Name declared twice in the same scope.
    InvalidRedeclarationError,
    /// Call arguments do not fit the callee's parameters.
    InvalidArgument,
    /// A failed `assert`.
    AssertionError,
    /// Recognized construct that the evaluator does not support yet.
    UnImplementedError,
    /// Integer remainder by zero.
    ZeroDivisionError,
    /// Configured call depth exceeded.
    RecursionError,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SyntaxError => "SyntaxError",
            Self::TypeError => "TypeError",
            Self::NameError => "NameError",
            Self::InvalidRedeclarationError => "InvalidRedeclarationError",
            Self::InvalidArgument => "InvalidArgument",
            Self::AssertionError => "AssertionError",
            Self::UnImplementedError => "UnImplementedError",
            Self::ZeroDivisionError => "ZeroDivisionError",
            Self::RecursionError => "RecursionError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error condition.
///
/// Type names are the `&'static str` names from [`Value::type_name`];
/// identifiers are resolved to strings at construction so the error can
/// outlive the interpreter.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Syntax
    #[error("invalid syntax: the parser marked this {node} as unrecoverable")]
    InvalidSyntax { node: &'static str },

    // Type
    #[error("operator `{}` cannot be applied to `{left}` and `{right}`", .op.as_symbol())]
    BinaryTypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    #[error("operator `{}` cannot be applied to `{operand}`", .op.as_symbol())]
    UnaryTypeMismatch { op: UnaryOp, operand: &'static str },
    #[error("cannot assign `{got}` to a variable of type `{target}`")]
    AssignTypeMismatch {
        target: &'static str,
        got: &'static str,
    },
    #[error("left side of `=` must be a variable, found `{got}`")]
    NotAssignable { got: &'static str },
    #[error("`{got}` is not callable")]
    NotCallable { got: &'static str },
    #[error("{context} condition must be `bool`, found `{got}`")]
    NonBoolCondition {
        context: &'static str,
        got: &'static str,
    },

    // Name
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },
    #[error("unknown type `{name}`")]
    UndefinedType { name: String },
    #[error("function `{name}` is declared but never defined")]
    UndefinedFunction { name: String },
    #[error("stale reference: variable {key} no longer exists")]
    StaleReference { key: VariableKey },
    #[error("no `{name}` function to run")]
    MissingEntryPoint { name: String },

    // Redeclaration
    #[error("`{name}` is already declared in this scope")]
    Redeclaration { name: String },

    // Arguments
    #[error("missing argument for parameter `{param}` of `{function}`")]
    MissingArgument { function: String, param: String },
    #[error("`{function}` has no parameter named `{name}`")]
    UnknownKeyword { function: String, name: String },
    #[error("keyword argument `{name}` given twice")]
    DuplicateKeyword { name: String },
    #[error("reference parameter `{param}` of `{function}` needs a variable argument")]
    NotAReference { function: String, param: String },
    #[error("`{function}` takes no keyword arguments")]
    UnexpectedKeyword { function: String },

    // Assertion
    #[error("{}", assertion_message(.message.as_deref()))]
    AssertionFailed { message: Option<String> },

    // Not implemented
    #[error("{feature} is not implemented yet")]
    NotImplemented { feature: &'static str },

    // Arithmetic
    #[error("integer modulo by zero")]
    ModuloByZero,

    // Resources
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    RecursionLimit { depth: usize },
}

fn assertion_message(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("assertion failed: {message}"),
        None => "assertion failed".to_string(),
    }
}

impl EvalErrorKind {
    /// Taxonomy bucket for this condition.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSyntax { .. } => ErrorCategory::SyntaxError,
            Self::BinaryTypeMismatch { .. }
            | Self::UnaryTypeMismatch { .. }
            | Self::AssignTypeMismatch { .. }
            | Self::NotAssignable { .. }
            | Self::NotCallable { .. }
            | Self::NonBoolCondition { .. } => ErrorCategory::TypeError,
            Self::UndefinedVariable { .. }
            | Self::UndefinedType { .. }
            | Self::UndefinedFunction { .. }
            | Self::StaleReference { .. }
            | Self::MissingEntryPoint { .. } => ErrorCategory::NameError,
            Self::Redeclaration { .. } => ErrorCategory::InvalidRedeclarationError,
            Self::MissingArgument { .. }
            | Self::UnknownKeyword { .. }
            | Self::DuplicateKeyword { .. }
            | Self::NotAReference { .. }
            | Self::UnexpectedKeyword { .. } => ErrorCategory::InvalidArgument,
            Self::AssertionFailed { .. } => ErrorCategory::AssertionError,
            Self::NotImplemented { .. } => ErrorCategory::UnImplementedError,
            Self::ModuloByZero => ErrorCategory::ZeroDivisionError,
            Self::RecursionLimit { .. } => ErrorCategory::RecursionError,
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name.
    pub name: String,
    /// Source location of the call site.
    pub region: Option<SourceRegion>,
}

/// Snapshot of the user call stack at an error site, most recent call
/// first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(region) = frame.region {
                write!(f, " at {region:?}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Region of the innermost node that failed.
    pub region: Option<SourceRegion>,
    /// User call stack at the error site.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            region: None,
            backtrace: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Attach a source region unless a more precise one is already set.
    #[must_use]
    pub fn at(mut self, region: SourceRegion) -> Self {
        if self.region.is_none() {
            self.region = Some(region);
        }
        self
    }

    /// Attach a backtrace unless one was already captured deeper down.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    /// Multi-line report for a driver: kind, location, message and the
    /// backtrace if one was captured.
    pub fn render(&self, interner: &StringInterner) -> String {
        let mut out = format!("interpreter error: {}\n", self.category());
        if let Some(region) = &self.region {
            out.push_str(&format!("  at {}\n", region.display(interner)));
        }
        out.push_str(&format!("  what(): {}\n", self.kind));
        if let Some(backtrace) = &self.backtrace {
            out.push_str(&backtrace.to_string());
        }
        out
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.kind)
    }
}

impl std::error::Error for EvalError {}

// Syntax

/// Visited a parser error sentinel.
#[cold]
pub fn invalid_syntax(node: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSyntax { node })
}

// Type

/// Binary operator applied to operands it does not accept.
#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.type_name(),
        right: right.type_name(),
    })
}

/// Unary operator applied to an operand it does not accept.
#[cold]
pub fn unary_type_mismatch(op: UnaryOp, operand: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnaryTypeMismatch {
        op,
        operand: operand.type_name(),
    })
}

/// Source value has no conversion to the slot's declared type.
#[cold]
pub fn assign_type_mismatch(target: &Value, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssignTypeMismatch {
        target: target.type_name(),
        got: got.type_name(),
    })
}

#[cold]
pub fn not_assignable(got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAssignable {
        got: got.type_name(),
    })
}

#[cold]
pub fn not_callable(got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        got: got.type_name(),
    })
}

/// `context` names the construct, e.g. "`if`" or "`assert`".
#[cold]
pub fn non_bool_condition(context: &'static str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonBoolCondition {
        context,
        got: got.type_name(),
    })
}

// Name

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_type(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedType {
        name: name.to_string(),
    })
}

/// Called a prototype that never got a body.
#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

/// Read or wrote through a reference whose scope has exited.
#[cold]
pub fn stale_reference(key: VariableKey) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StaleReference { key })
}

#[cold]
pub fn missing_entry_point(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingEntryPoint {
        name: name.to_string(),
    })
}

// Redeclaration

#[cold]
pub fn redeclaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Redeclaration {
        name: name.to_string(),
    })
}

// Arguments

#[cold]
pub fn missing_argument(function: &str, param: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument {
        function: function.to_string(),
        param: param.to_string(),
    })
}

#[cold]
pub fn unknown_keyword(function: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownKeyword {
        function: function.to_string(),
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_keyword(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateKeyword {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_a_reference(function: &str, param: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAReference {
        function: function.to_string(),
        param: param.to_string(),
    })
}

#[cold]
pub fn unexpected_keyword(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedKeyword {
        function: function.to_string(),
    })
}

// Assertion

#[cold]
pub fn assertion_failed(message: Option<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed { message })
}

// Not implemented

#[cold]
pub fn not_implemented(feature: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotImplemented { feature })
}

// Arithmetic

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

// Resources

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

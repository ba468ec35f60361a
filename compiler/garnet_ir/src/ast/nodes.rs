//! AST node definitions.
//!
//! One enum per syntactic category: expressions, statements and top-level
//! items. The evaluator matches on these exhaustively, so a new node kind
//! cannot be added without deciding how it executes.

use super::{BinaryOp, BlockId, CallArgRange, CondBlockRange, ExprId, ParamRange, StmtRange, UnaryOp};
use crate::{Name, SourcePosition, SourceRegion};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub region: SourceRegion,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Reference to a variable or function by name.
    Ident(Name),

    /// Signed integer literal (evaluates to `i64`).
    SignedInt(i64),
    /// Unsigned integer literal (evaluates to `u64`).
    UnsignedInt(u64),
    /// Floating point literal (evaluates to `f64`).
    Float(f64),
    /// String literal, interned.
    Str(Name),
    Bool(bool),
    Nil,

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    /// Function call: `callee(args)`.
    Call {
        callee: ExprId,
        args: CallArgRange,
    },

    /// Member access: `receiver.field`. Parsed but not evaluated.
    Field {
        receiver: ExprId,
        field: Name,
    },

    /// Parser placeholder for an unparseable expression.
    Error,
}

/// One call argument. A `name` marks a keyword argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallArg {
    pub name: Option<Name>,
    pub value: ExprId,
    pub region: SourceRegion,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub region: SourceRegion,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Expression evaluated for its side effects.
    Expr(ExprId),
    /// `var name: ty = init;`
    VarDecl(VariableDecl),
    /// `return expr;` or bare `return;`
    Return(Option<ExprId>),
    /// `loop { ... }`; exits only through `break` or `return`.
    Loop(BlockId),
    Break,
    /// Ordered arms; an arm without a condition is the `else`.
    If(CondBlockRange),
    Assert {
        cond: ExprId,
        message: Option<ExprId>,
    },
    /// Nested `{ ... }` block.
    Block(BlockId),
    /// Parser placeholder for an unparseable declaration-or-statement.
    ErrorSentence,
    /// Parser placeholder for an unparseable statement.
    Error,
}

/// `{ stmts }`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub stmts: StmtRange,
    pub region: SourceRegion,
}

/// One arm of an `if` statement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CondBlock {
    /// `None` for the trailing `else` arm.
    pub cond: Option<ExprId>,
    pub block: BlockId,
    pub region: SourceRegion,
}

/// Variable declaration, both top-level and in blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    pub name: Name,
    /// Declared type name, resolved by the evaluator's type table.
    pub ty: Name,
    pub init: Option<ExprId>,
}

/// How an argument is bound to a parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Passing {
    /// The parameter is a fresh variable initialized from the argument.
    #[default]
    Value,
    /// The parameter aliases the caller's variable.
    Reference,
}

/// Function parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
    pub ty: Name,
    pub passing: Passing,
    pub region: SourceRegion,
}

/// Function signature shared by prototypes and definitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: Name,
    pub params: ParamRange,
    /// Declared result type; `None` means the nil type.
    pub result: Option<Name>,
}

/// `type Name;`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: Name,
}

/// Top-level item.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub region: SourceRegion,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    /// Function with a body.
    Function { info: FunctionInfo, body: BlockId },
    /// Prototype without a body.
    FunctionDecl(FunctionInfo),
    /// Global variable.
    Variable(VariableDecl),
    Type(TypeDecl),
    /// Parser placeholder for an unparseable item.
    Error,
}

/// Compilation unit: the items of one source file, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    /// Interned path of the source file.
    pub file: Name,
    pub items: Vec<Item>,
}

impl Module {
    /// Region spanning every item, or the start of the file when the unit
    /// has no items.
    pub fn region(&self) -> SourceRegion {
        match (self.items.first(), self.items.last()) {
            (Some(first), Some(last)) => first.region.merge(last.region),
            _ => {
                let start = SourcePosition::new(1, 1);
                SourceRegion::new(self.file, start, start)
            }
        }
    }
}

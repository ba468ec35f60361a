//! Intermediate representation consumed by the Garnet interpreter.
//!
//! The parser (an external collaborator) produces a finalized, immutable
//! [`Module`] whose nodes live in a flat [`ExprArena`] and are addressed by
//! typed ids. Every node carries a [`SourceRegion`] so that any fault raised
//! while evaluating it can point back at the program text.
//!
//! # Architecture
//!
//! - [`Name`] / [`StringInterner`]: identifiers as 32-bit handles into an
//!   instance-owned table.
//! - [`SourceRegion`]: file + line/column range.
//! - [`ast`]: node kinds, operator enums and the arena.
//! - [`AstBuilder`]: the construction API used by parsers and tests.

mod builder;
mod interner;
mod name;
mod region;

pub mod ast;

pub use ast::{
    BinaryOp, Block, BlockId, CallArg, CallArgRange, CondBlock, CondBlockRange, Expr, ExprArena,
    ExprId, ExprKind, FunctionInfo, Item, ItemKind, Module, Param, ParamRange, Passing, Stmt,
    StmtId, StmtKind, StmtRange, TypeDecl, UnaryOp, VariableDecl,
};
pub use builder::AstBuilder;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use region::{SourcePosition, SourceRegion};

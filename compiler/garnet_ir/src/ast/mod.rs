//! Flat AST for Garnet programs.
//!
//! All nodes of one compilation unit live in an [`ExprArena`]. Children are
//! referenced by typed ids and lists by `(start, len)` ranges into the
//! arena's flattened storage, so the tree is immutable and cheap to share
//! by reference once the parser has finished with it.

mod arena;
mod ids;
mod nodes;
mod operators;

pub use arena::ExprArena;
pub use ids::{BlockId, CallArgRange, CondBlockRange, ExprId, ParamRange, StmtId, StmtRange};
pub use nodes::{
    Block, CallArg, CondBlock, Expr, ExprKind, FunctionInfo, Item, ItemKind, Module, Param,
    Passing, Stmt, StmtKind, TypeDecl, VariableDecl,
};
pub use operators::{BinaryOp, UnaryOp};

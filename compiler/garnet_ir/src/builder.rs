//! Programmatic AST construction.
//!
//! `AstBuilder` is the write side of the arena: the parser drives it while
//! reducing productions, and tests use it to assemble programs without
//! source text. Nodes built here get a synthetic region (one line per
//! node, in allocation order) so every node can be located in diagnostics.

use crate::ast::{
    BinaryOp, BlockId, CallArg, CondBlock, Expr, ExprArena, ExprId, ExprKind, FunctionInfo, Item,
    ItemKind, Module, Param, Passing, Stmt, StmtId, StmtKind, TypeDecl, UnaryOp, VariableDecl,
};
use crate::{Name, SourcePosition, SourceRegion, StringInterner};

/// Incremental builder for one compilation unit.
pub struct AstBuilder<'i> {
    interner: &'i StringInterner,
    arena: ExprArena,
    items: Vec<Item>,
    file: Name,
    next_line: u32,
}

impl<'i> AstBuilder<'i> {
    /// Start a compilation unit for `file`.
    pub fn new(interner: &'i StringInterner, file: &str) -> Self {
        AstBuilder {
            interner,
            arena: ExprArena::new(),
            items: Vec::new(),
            file: interner.intern(file),
            next_line: 1,
        }
    }

    pub fn interner(&self) -> &'i StringInterner {
        self.interner
    }

    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Intern `s` in the builder's table.
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Finish the unit, yielding the arena and the item list.
    pub fn finish(self) -> (ExprArena, Module) {
        (
            self.arena,
            Module {
                file: self.file,
                items: self.items,
            },
        )
    }

    fn next_region(&mut self) -> SourceRegion {
        let line = self.next_line;
        self.next_line += 1;
        SourceRegion::new(
            self.file,
            SourcePosition::new(line, 1),
            SourcePosition::new(line, 1),
        )
    }

    // ===== Expressions =====

    pub fn expr(&mut self, kind: ExprKind) -> ExprId {
        let region = self.next_region();
        self.arena.alloc_expr(Expr { kind, region })
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.expr(ExprKind::SignedInt(value))
    }

    pub fn uint(&mut self, value: u64) -> ExprId {
        self.expr(ExprKind::UnsignedInt(value))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.expr(ExprKind::Float(value))
    }

    pub fn string(&mut self, value: &str) -> ExprId {
        let name = self.name(value);
        self.expr(ExprKind::Str(name))
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Bool(value))
    }

    pub fn nil(&mut self) -> ExprId {
        self.expr(ExprKind::Nil)
    }

    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.name(name);
        self.expr(ExprKind::Ident(name))
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Unary { op, operand })
    }

    /// `name = value`
    pub fn assign(&mut self, name: &str, value: ExprId) -> ExprId {
        let target = self.ident(name);
        self.binary(BinaryOp::Assign, target, value)
    }

    /// Call with positional arguments only.
    pub fn call(&mut self, callee: &str, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        self.call_kw(callee, args, [])
    }

    /// Call with positional arguments followed by keyword arguments.
    pub fn call_kw<'s>(
        &mut self,
        callee: &str,
        positional: impl IntoIterator<Item = ExprId>,
        keyword: impl IntoIterator<Item = (&'s str, ExprId)>,
    ) -> ExprId {
        let mut args: Vec<CallArg> = Vec::new();
        for value in positional {
            let region = self.arena.get_expr(value).region;
            args.push(CallArg {
                name: None,
                value,
                region,
            });
        }
        for (name, value) in keyword {
            let region = self.arena.get_expr(value).region;
            args.push(CallArg {
                name: Some(self.name(name)),
                value,
                region,
            });
        }
        let callee = self.ident(callee);
        let args = self.arena.alloc_call_args(args);
        self.expr(ExprKind::Call { callee, args })
    }

    pub fn field(&mut self, receiver: ExprId, field: &str) -> ExprId {
        let field = self.name(field);
        self.expr(ExprKind::Field { receiver, field })
    }

    pub fn error_expr(&mut self) -> ExprId {
        self.expr(ExprKind::Error)
    }

    // ===== Statements =====

    pub fn stmt(&mut self, kind: StmtKind) -> StmtId {
        let region = self.next_region();
        self.arena.alloc_stmt(Stmt { kind, region })
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Expr(expr))
    }

    /// `var name: ty = init;`
    pub fn var(&mut self, name: &str, ty: &str, init: Option<ExprId>) -> StmtId {
        let decl = self.variable_decl(name, ty, init);
        self.stmt(StmtKind::VarDecl(decl))
    }

    pub fn ret(&mut self, value: Option<ExprId>) -> StmtId {
        self.stmt(StmtKind::Return(value))
    }

    pub fn loop_stmt(&mut self, body: BlockId) -> StmtId {
        self.stmt(StmtKind::Loop(body))
    }

    pub fn break_stmt(&mut self) -> StmtId {
        self.stmt(StmtKind::Break)
    }

    /// `if` with ordered arms; a `None` condition is the `else` arm.
    pub fn if_stmt(&mut self, arms: impl IntoIterator<Item = (Option<ExprId>, BlockId)>) -> StmtId {
        let arms: Vec<CondBlock> = arms
            .into_iter()
            .map(|(cond, block)| CondBlock {
                cond,
                block,
                region: self.arena.get_block(block).region,
            })
            .collect();
        let arms = self.arena.alloc_cond_blocks(arms);
        self.stmt(StmtKind::If(arms))
    }

    pub fn assert_stmt(&mut self, cond: ExprId, message: Option<ExprId>) -> StmtId {
        self.stmt(StmtKind::Assert { cond, message })
    }

    pub fn block_stmt(&mut self, block: BlockId) -> StmtId {
        self.stmt(StmtKind::Block(block))
    }

    pub fn error_sentence(&mut self) -> StmtId {
        self.stmt(StmtKind::ErrorSentence)
    }

    pub fn error_stmt(&mut self) -> StmtId {
        self.stmt(StmtKind::Error)
    }

    pub fn block(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> BlockId {
        let region = self.next_region();
        self.arena.alloc_block(stmts, region)
    }

    // ===== Items =====

    /// By-value parameter.
    pub fn param(&mut self, name: &str, ty: &str) -> Param {
        self.param_with(name, ty, Passing::Value)
    }

    /// By-reference parameter.
    pub fn ref_param(&mut self, name: &str, ty: &str) -> Param {
        self.param_with(name, ty, Passing::Reference)
    }

    fn param_with(&mut self, name: &str, ty: &str, passing: Passing) -> Param {
        Param {
            name: self.name(name),
            ty: self.name(ty),
            passing,
            region: self.next_region(),
        }
    }

    /// `fn name(params) -> result { body }`
    pub fn function(
        &mut self,
        name: &str,
        params: impl IntoIterator<Item = Param>,
        result: Option<&str>,
        body: BlockId,
    ) {
        let info = self.function_info(name, params, result);
        self.item(ItemKind::Function { info, body });
    }

    /// Prototype without a body.
    pub fn prototype(
        &mut self,
        name: &str,
        params: impl IntoIterator<Item = Param>,
        result: Option<&str>,
    ) {
        let info = self.function_info(name, params, result);
        self.item(ItemKind::FunctionDecl(info));
    }

    /// Top-level `var name: ty = init;`
    pub fn global(&mut self, name: &str, ty: &str, init: Option<ExprId>) {
        let decl = self.variable_decl(name, ty, init);
        self.item(ItemKind::Variable(decl));
    }

    pub fn type_decl(&mut self, name: &str) {
        let name = self.name(name);
        self.item(ItemKind::Type(TypeDecl { name }));
    }

    pub fn error_item(&mut self) {
        self.item(ItemKind::Error);
    }

    pub fn item(&mut self, kind: ItemKind) {
        let region = self.next_region();
        self.items.push(Item { kind, region });
    }

    fn function_info(
        &mut self,
        name: &str,
        params: impl IntoIterator<Item = Param>,
        result: Option<&str>,
    ) -> FunctionInfo {
        FunctionInfo {
            name: self.name(name),
            params: self.arena.alloc_params(params),
            result: result.map(|ty| self.name(ty)),
        }
    }

    fn variable_decl(&mut self, name: &str, ty: &str, init: Option<ExprId>) -> VariableDecl {
        VariableDecl {
            name: self.name(name),
            ty: self.name(ty),
            init,
        }
    }
}

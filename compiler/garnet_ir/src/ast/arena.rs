//! Arena storage for the flat AST.

use super::{
    Block, BlockId, CallArg, CallArgRange, CondBlock, CondBlockRange, Expr, ExprId, Param,
    ParamRange, Stmt, StmtId, StmtRange,
};

/// Contiguous storage for every node of one compilation unit.
///
/// Child references are ids into these vectors; lists (block statements,
/// call arguments, parameters, `if` arms) are ranges into the flattened
/// list vectors. Nodes are never mutated after allocation.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    blocks: Vec<Block>,
    /// Flattened statement lists referenced by `Block::stmts`.
    stmt_lists: Vec<StmtId>,
    call_args: Vec<CallArg>,
    params: Vec<Param>,
    cond_blocks: Vec<CondBlock>,
}

/// Convert a storage length to a `u32` index.
///
/// # Panics
/// Panics if the arena holds more than `u32::MAX` nodes of one kind.
#[inline]
fn to_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("AST arena overflow: {len} nodes"))
}

/// Append `items` to `storage` and return the `(start, len)` of the run.
fn extend_run<T>(storage: &mut Vec<T>, items: impl IntoIterator<Item = T>) -> (u32, u32) {
    let start = to_index(storage.len());
    storage.extend(items);
    (start, to_index(storage.len()) - start)
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expressions =====

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_index(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Statements =====

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    // ===== Blocks =====

    /// Allocate a block over already-allocated statements.
    pub fn alloc_block(
        &mut self,
        stmts: impl IntoIterator<Item = StmtId>,
        region: crate::SourceRegion,
    ) -> BlockId {
        let (start, len) = extend_run(&mut self.stmt_lists, stmts);
        let id = BlockId::new(to_index(self.blocks.len()));
        self.blocks.push(Block {
            stmts: StmtRange::new(start, len),
            region,
        });
        id
    }

    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Statement ids of a block, in execution order.
    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.bounds()]
    }

    // ===== Lists =====

    pub fn alloc_call_args(&mut self, args: impl IntoIterator<Item = CallArg>) -> CallArgRange {
        let (start, len) = extend_run(&mut self.call_args, args);
        CallArgRange::new(start, len)
    }

    #[inline]
    pub fn get_call_args(&self, range: CallArgRange) -> &[CallArg] {
        &self.call_args[range.bounds()]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Param>) -> ParamRange {
        let (start, len) = extend_run(&mut self.params, params);
        ParamRange::new(start, len)
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Param] {
        &self.params[range.bounds()]
    }

    pub fn alloc_cond_blocks(
        &mut self,
        arms: impl IntoIterator<Item = CondBlock>,
    ) -> CondBlockRange {
        let (start, len) = extend_run(&mut self.cond_blocks, arms);
        CondBlockRange::new(start, len)
    }

    #[inline]
    pub fn get_cond_blocks(&self, range: CondBlockRange) -> &[CondBlock] {
        &self.cond_blocks[range.bounds()]
    }
}

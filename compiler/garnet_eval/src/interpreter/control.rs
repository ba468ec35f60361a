//! Statements, blocks and control flow.
//!
//! `break` and `return` are not errors: they travel up as [`Flow`] values
//! until a loop or the function boundary consumes them.

use garnet_ir::{BlockId, CondBlockRange, ExprId, SourceRegion, StmtId, StmtKind};

use super::Interpreter;
use crate::environment::ScopeKind;
use crate::errors::{
    assertion_failed, invalid_syntax, non_bool_condition, stale_reference, undefined_variable,
    EvalResult,
};
use crate::operators::convert_for_assignment;
use crate::stack::ensure_sufficient_stack;
use crate::value::format_value;

/// How a statement finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Fell through to the next statement.
    Normal,
    /// `break`: unwinding to the innermost loop.
    Break,
    /// `return`: unwinding to the function boundary.
    Return,
}

impl Interpreter<'_> {
    /// Run a block in a fresh scope.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn exec_block(&mut self, id: BlockId) -> EvalResult<Flow> {
        let arena = self.arena;
        let block = arena.get_block(id);
        ensure_sufficient_stack(|| {
            self.with_scope(ScopeKind::Block, |scoped| -> EvalResult<Flow> {
                for &stmt in arena.get_stmt_list(block.stmts) {
                    match scoped.exec_stmt(stmt)? {
                        Flow::Normal => {}
                        signal => return Ok(signal),
                    }
                }
                Ok(Flow::Normal)
            })
        })
    }

    pub fn exec_stmt(&mut self, id: StmtId) -> EvalResult<Flow> {
        let arena = self.arena;
        let stmt = arena.get_stmt(id);
        let region = stmt.region;
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(*expr)?;
                Ok(Flow::Normal)
            }
            StmtKind::VarDecl(decl) => {
                self.declare_variable(decl, region)?;
                Ok(Flow::Normal)
            }
            StmtKind::Return(value) => self.exec_return(*value, region),
            StmtKind::Loop(body) => self.exec_loop(*body),
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::If(arms) => self.exec_if(*arms),
            StmtKind::Assert { cond, message } => {
                self.exec_assert(*cond, *message, region)?;
                Ok(Flow::Normal)
            }
            StmtKind::Block(block) => self.exec_block(*block),
            StmtKind::ErrorSentence => Err(invalid_syntax("sentence").at(region)),
            StmtKind::Error => Err(invalid_syntax("statement").at(region)),
        }
    }

    fn exec_loop(&mut self, body: BlockId) -> EvalResult<Flow> {
        loop {
            match self.exec_block(body)? {
                Flow::Normal => {}
                Flow::Break => return Ok(Flow::Normal),
                Flow::Return => return Ok(Flow::Return),
            }
        }
    }

    /// First arm whose condition holds runs; an arm without a condition
    /// always matches.
    fn exec_if(&mut self, arms: CondBlockRange) -> EvalResult<Flow> {
        let arena = self.arena;
        for arm in arena.get_cond_blocks(arms) {
            let taken = match arm.cond {
                Some(cond) => self.eval_condition(cond, "`if`")?,
                None => true,
            };
            if taken {
                return self.exec_block(arm.block);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_assert(
        &mut self,
        cond: ExprId,
        message: Option<ExprId>,
        region: SourceRegion,
    ) -> EvalResult<()> {
        if self.eval_condition(cond, "`assert`")? {
            return Ok(());
        }
        let message = match message {
            Some(expr) => {
                let value = self.eval_operand(expr)?;
                Some(format_value(&value, self.interner))
            }
            None => None,
        };
        Err(assertion_failed(message).at(region))
    }

    /// Store the value in the current call's return slot, then unwind.
    fn exec_return(&mut self, value: Option<ExprId>, region: SourceRegion) -> EvalResult<Flow> {
        let Some(expr) = value else {
            return Ok(Flow::Return);
        };
        let result = self.eval_operand(expr)?;
        let slot = self
            .current_return
            .ok_or_else(|| undefined_variable(self.interner.lookup(self.return_slot)).at(region))?;
        let current = self
            .env
            .read(slot)
            .ok_or_else(|| stale_reference(slot).at(region))?;
        let converted = convert_for_assignment(current, &result).map_err(|e| e.at(region))?;
        if !self.env.write(slot, converted) {
            return Err(stale_reference(slot).at(region));
        }
        Ok(Flow::Return)
    }

    fn eval_condition(&mut self, cond: ExprId, context: &'static str) -> EvalResult<bool> {
        let value = self.eval_operand(cond)?;
        value.as_bool().ok_or_else(|| {
            let region = self.arena.get_expr(cond).region;
            non_bool_condition(context, &value).at(region)
        })
    }
}

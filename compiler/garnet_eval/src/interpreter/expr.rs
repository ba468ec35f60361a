//! Expression evaluation.

use garnet_ir::{BinaryOp, CallArgRange, ExprId, ExprKind, SourceRegion, UnaryOp};

use super::Interpreter;
use crate::errors::{
    duplicate_keyword, invalid_syntax, not_assignable, not_callable, not_implemented,
    stale_reference, undefined_variable, EvalResult,
};
use crate::function_table::CallArgs;
use crate::operators::{convert_for_assignment, evaluate_binary};
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;
use crate::value::Value;

impl Interpreter<'_> {
    /// Evaluate an expression.
    ///
    /// An identifier naming a variable evaluates to a `VarRef`; callers that
    /// need the stored value go through [`Interpreter::eval_operand`].
    pub fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(id))
    }

    fn eval_expr_inner(&mut self, id: ExprId) -> EvalResult {
        let arena = self.arena;
        let expr = arena.get_expr(id);
        let region = expr.region;
        match &expr.kind {
            ExprKind::Ident(name) => {
                if let Some(key) = self.env.resolve(*name) {
                    Ok(Value::VarRef(key))
                } else if self.functions.contains(*name) {
                    Ok(Value::FuncRef(*name))
                } else {
                    Err(undefined_variable(self.interner.lookup(*name)).at(region))
                }
            }
            ExprKind::SignedInt(n) => Ok(Value::I64(*n)),
            ExprKind::UnsignedInt(n) => Ok(Value::U64(*n)),
            ExprKind::Float(f) => Ok(Value::F64(*f)),
            ExprKind::Str(s) => Ok(Value::string(self.interner.lookup(*s))),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Nil => Ok(Value::Nil),
            ExprKind::Binary {
                op: BinaryOp::Assign,
                left,
                right,
            } => self.eval_assign(*left, *right, region),
            ExprKind::Binary { op, left, right } => {
                let (op, left, right) = (*op, *left, *right);
                let lhs = self.eval_operand(left)?;
                let rhs = self.eval_operand(right)?;
                evaluate_binary(&lhs, &rhs, op).map_err(|e| e.at(region))
            }
            ExprKind::Unary { op, operand } => self.eval_unary(*op, *operand, region),
            ExprKind::Call { callee, args } => self.eval_call(*callee, *args, region),
            ExprKind::Field { .. } => Err(not_implemented("member access").at(region)),
            ExprKind::Error => Err(invalid_syntax("expression").at(region)),
        }
    }

    /// Evaluate an expression and resolve any variable reference it yields.
    pub fn eval_operand(&mut self, id: ExprId) -> EvalResult {
        let value = self.eval_expr(id)?;
        let region = self.arena.get_expr(id).region;
        self.deref(value, region)
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: ExprId, region: SourceRegion) -> EvalResult {
        let value = self.eval_operand(operand)?;
        evaluate_unary(&value, op).map_err(|e| e.at(region))
    }

    /// `target = value`: convert into the target's type and store.
    ///
    /// Evaluates to the target reference, so assignments chain.
    fn eval_assign(&mut self, target: ExprId, value: ExprId, region: SourceRegion) -> EvalResult {
        let target = self.eval_expr(target)?;
        let Value::VarRef(key) = target else {
            return Err(not_assignable(&target).at(region));
        };
        let source = self.eval_operand(value)?;
        let current = self
            .env
            .read(key)
            .ok_or_else(|| stale_reference(key).at(region))?;
        let converted = convert_for_assignment(current, &source).map_err(|e| e.at(region))?;
        if !self.env.write(key, converted) {
            return Err(stale_reference(key).at(region));
        }
        Ok(Value::VarRef(key))
    }

    /// Evaluate the callee to a function and its arguments in source order.
    ///
    /// Arguments stay unresolved: a `VarRef` lets a reference parameter
    /// alias the caller's variable.
    fn eval_call(&mut self, callee: ExprId, args: CallArgRange, region: SourceRegion) -> EvalResult {
        let callee = self.eval_operand(callee)?;
        let Value::FuncRef(name) = callee else {
            return Err(not_callable(&callee).at(region));
        };

        let arena = self.arena;
        let mut call_args = CallArgs::default();
        for arg in arena.get_call_args(args) {
            let value = self.eval_expr(arg.value)?;
            match arg.name {
                Some(keyword) => {
                    if !call_args.push_keyword(keyword, value) {
                        return Err(duplicate_keyword(self.interner.lookup(keyword)).at(arg.region));
                    }
                }
                None => call_args.positional.push(value),
            }
        }
        self.call_function(name, call_args, region)
    }
}

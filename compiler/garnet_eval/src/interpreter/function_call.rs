//! The call protocol.
//!
//! Arguments are matched to parameters in declaration order: a keyword
//! argument naming the parameter wins, otherwise the next positional
//! argument is consumed. Each user call runs in a call scope parented at
//! the global scope, holding the parameters and the `__return__` slot.

use garnet_ir::{BlockId, FunctionInfo, Name, Passing, SourceRegion};

use super::{Flow, Interpreter};
use crate::diagnostics::CallFrame;
use crate::environment::ScopeKind;
use crate::errors::{
    assign_type_mismatch, missing_argument, not_a_reference, redeclaration, stale_reference,
    undefined_function, undefined_variable, unknown_keyword, EvalResult,
};
use crate::function_table::{CallArgs, Function};
use crate::operators::convert_for_assignment;
use crate::types::DeclaredType;
use crate::value::Value;

impl Interpreter<'_> {
    /// Invoke the function called `name`.
    #[tracing::instrument(level = "debug", skip_all, fields(function = self.interner.lookup(name)))]
    pub(crate) fn call_function(
        &mut self,
        name: Name,
        args: CallArgs,
        region: SourceRegion,
    ) -> EvalResult {
        match self.functions.get(name) {
            Some(Function::Native(native)) => native(self, args).map_err(|e| e.at(region)),
            Some(Function::User { info, body, .. }) => self.call_user(info, body, args, region),
            Some(Function::Prototype { .. }) => {
                Err(undefined_function(self.interner.lookup(name)).at(region))
            }
            None => Err(undefined_variable(self.interner.lookup(name)).at(region)),
        }
    }

    fn call_user(
        &mut self,
        info: FunctionInfo,
        body: BlockId,
        args: CallArgs,
        region: SourceRegion,
    ) -> EvalResult {
        let frame = CallFrame {
            name: info.name,
            call_region: (!region.is_dummy()).then_some(region),
        };
        if let Err(e) = self.call_stack.push(frame) {
            return Err(self.call_stack.attach_backtrace(e.at(region), self.interner));
        }
        let result = self.with_scope(ScopeKind::Call, |scoped| {
            scoped.run_function_body(info, body, args, region)
        });
        let result = result.map_err(|e| self.call_stack.attach_backtrace(e, self.interner));
        self.call_stack.pop();
        result
    }

    /// Bind arguments, run the body, and read back the result slot.
    ///
    /// A `break` that reaches the function boundary ends the call like a
    /// bare `return`.
    fn run_function_body(
        &mut self,
        info: FunctionInfo,
        body: BlockId,
        args: CallArgs,
        region: SourceRegion,
    ) -> EvalResult {
        self.bind_arguments(&info, args, region)?;

        let initial = match info.result {
            Some(ty) => self.resolve_type(ty, region)?.zero_value(),
            None => Value::Nil,
        };
        let slot = self.env.declare_unbound(self.return_slot, initial);

        let caller_slot = self.current_return.replace(slot);
        let flow = self.exec_block(body);
        self.current_return = caller_slot;
        match flow? {
            Flow::Normal | Flow::Return => {}
            Flow::Break => tracing::debug!("`break` reached the function boundary"),
        }

        self.env
            .read(slot)
            .cloned()
            .ok_or_else(|| stale_reference(slot).at(region))
    }

    fn bind_arguments(
        &mut self,
        info: &FunctionInfo,
        mut args: CallArgs,
        region: SourceRegion,
    ) -> EvalResult<()> {
        let arena = self.arena;
        let interner = self.interner;
        let params = arena.get_params(info.params);
        let function = interner.lookup(info.name);

        if let Some((name, _)) = args
            .keyword
            .iter()
            .find(|(name, _)| !params.iter().any(|p| p.name == *name))
        {
            return Err(unknown_keyword(function, interner.lookup(*name)).at(region));
        }

        let mut positional = std::mem::take(&mut args.positional).into_iter();
        for param in params {
            let param_name = interner.lookup(param.name);
            let arg = match args.take_keyword(param.name) {
                Some(value) => value,
                None => positional
                    .next()
                    .ok_or_else(|| missing_argument(function, param_name).at(region))?,
            };
            let ty = self.resolve_type(param.ty, param.region)?;

            match param.passing {
                Passing::Value => {
                    let value = self.deref(arg, region)?;
                    let converted = convert_for_assignment(&ty.zero_value(), &value)
                        .map_err(|e| e.at(region))?;
                    self.env
                        .declare(param.name, converted)
                        .map_err(|_| redeclaration(param_name).at(param.region))?;
                }
                Passing::Reference => {
                    let Value::VarRef(key) = arg else {
                        return Err(not_a_reference(function, param_name).at(region));
                    };
                    let current = self
                        .env
                        .read(key)
                        .ok_or_else(|| stale_reference(key).at(region))?;
                    if DeclaredType::of(current) != Some(ty) {
                        return Err(assign_type_mismatch(&ty.zero_value(), current).at(region));
                    }
                    self.env
                        .bind_alias(param.name, key)
                        .map_err(|_| redeclaration(param_name).at(param.region))?;
                }
            }
        }

        let leftover = positional.len();
        if leftover > 0 {
            tracing::debug!(function, leftover, "ignoring extra positional arguments");
        }
        Ok(())
    }
}

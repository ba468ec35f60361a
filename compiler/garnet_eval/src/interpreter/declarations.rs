//! Global registration and variable declarations.

use garnet_ir::{ItemKind, Module, Name, SourceRegion, VariableDecl};

use super::Interpreter;
use crate::environment::Redeclared;
use crate::errors::{
    invalid_syntax, not_implemented, redeclaration, undefined_type, EvalError, EvalResult,
};
use crate::operators::convert_for_assignment;
use crate::store::VariableKey;
use crate::types::DeclaredType;

impl Interpreter<'_> {
    /// Register a unit's items in two passes: functions first, then global
    /// variables in source order, so initializers may call any function.
    pub(crate) fn register_globals(&mut self, module: &Module) -> Result<(), EvalError> {
        for item in &module.items {
            let registered = match &item.kind {
                ItemKind::Function { info, body } => self.functions.define(*info, *body, item.region),
                ItemKind::FunctionDecl(info) => self.functions.declare(*info),
                ItemKind::Type(_) => {
                    return Err(not_implemented("type declarations").at(item.region));
                }
                ItemKind::Error => return Err(invalid_syntax("item").at(item.region)),
                ItemKind::Variable(_) => Ok(()),
            };
            registered.map_err(|Redeclared(name)| {
                redeclaration(self.interner.lookup(name)).at(item.region)
            })?;
        }

        for item in &module.items {
            if let ItemKind::Variable(decl) = &item.kind {
                self.declare_variable(decl, item.region)?;
            }
        }
        tracing::debug!(
            functions = self.functions.len(),
            variables = self.env.store().len(),
            "globals registered"
        );
        Ok(())
    }

    /// Declare a variable in the innermost scope.
    ///
    /// The initializer is evaluated before the name is bound, so it sees
    /// any outer variable of the same name.
    pub(crate) fn declare_variable(
        &mut self,
        decl: &VariableDecl,
        region: SourceRegion,
    ) -> EvalResult<VariableKey> {
        let ty = self.resolve_type(decl.ty, region)?;
        if self.env.is_declared_locally(decl.name) {
            return Err(redeclaration(self.interner.lookup(decl.name)).at(region));
        }

        let zero = ty.zero_value();
        let value = match decl.init {
            Some(init) => {
                let init = self.eval_operand(init)?;
                convert_for_assignment(&zero, &init).map_err(|e| e.at(region))?
            }
            None => zero,
        };
        tracing::debug!(
            name = self.interner.lookup(decl.name),
            value = %value,
            "declare variable"
        );
        self.env
            .declare(decl.name, value)
            .map_err(|Redeclared(name)| redeclaration(self.interner.lookup(name)).at(region))
    }

    pub(crate) fn resolve_type(&self, name: Name, region: SourceRegion) -> EvalResult<DeclaredType> {
        self.types
            .lookup(name)
            .ok_or_else(|| undefined_type(self.interner.lookup(name)).at(region))
    }
}

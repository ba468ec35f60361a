//! Scope chain over the variable store.
//!
//! Scopes live on a stack; each records the index of its parent. A block
//! scope's parent is the scope it was opened in, while a call scope's
//! parent is always the global scope, so a function body sees its own
//! parameters and the globals but never its caller's locals.
//!
//! Popping a scope removes from the store every key that scope allocated.
//! Keymaps are recycled through a small free list to avoid reallocating
//! on every block entry.

use garnet_ir::Name;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::store::{VariableKey, VariableStore};
use crate::value::Value;

/// Maximum number of keymaps kept for reuse.
const KEYMAP_POOL_LIMIT: usize = 16;

/// Index of the global scope in the stack.
const GLOBAL: usize = 0;

/// What kind of construct opened a scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// `{ ... }`: parented at the current scope.
    Block,
    /// Function activation: parented at the global scope.
    Call,
}

/// `name` is already bound in the innermost scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Redeclared(pub Name);

/// One scope: name → key bindings plus the keys it owns.
#[derive(Debug)]
struct Scope {
    parent: Option<usize>,
    keymap: FxHashMap<Name, VariableKey>,
    /// Keys allocated by this scope. Aliases (reference parameters) are
    /// bound in `keymap` but not listed here.
    owned: SmallVec<[VariableKey; 8]>,
}

/// Variable store plus the live scope chain.
#[derive(Debug)]
pub struct Environment {
    store: VariableStore,
    scopes: Vec<Scope>,
    keymap_pool: Vec<FxHashMap<Name, VariableKey>>,
}

impl Environment {
    /// Create an environment holding only the global scope.
    pub fn new() -> Self {
        Environment {
            store: VariableStore::new(),
            scopes: vec![Scope {
                parent: None,
                keymap: FxHashMap::default(),
                owned: SmallVec::new(),
            }],
            keymap_pool: Vec::new(),
        }
    }

    /// Number of live scopes, counting the global scope.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn push_scope(&mut self, kind: ScopeKind) {
        let parent = match kind {
            ScopeKind::Block => self.scopes.len() - 1,
            ScopeKind::Call => GLOBAL,
        };
        let keymap = self.keymap_pool.pop().unwrap_or_default();
        self.scopes.push(Scope {
            parent: Some(parent),
            keymap,
            owned: SmallVec::new(),
        });
        tracing::trace!(?kind, depth = self.scopes.len(), "push scope");
    }

    /// Pop the innermost scope, dropping every variable it declared.
    ///
    /// The global scope is never popped.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "pop_scope() on the global scope");
        if self.scopes.len() <= 1 {
            return;
        }
        if let Some(mut scope) = self.scopes.pop() {
            for key in scope.owned.drain(..) {
                self.store.remove(key);
            }
            if self.keymap_pool.len() < KEYMAP_POOL_LIMIT {
                scope.keymap.clear();
                self.keymap_pool.push(scope.keymap);
            }
        }
        tracing::trace!(depth = self.scopes.len(), "pop scope");
    }

    fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// True if `name` is bound in the innermost scope.
    pub fn is_declared_locally(&self, name: Name) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.keymap.contains_key(&name))
    }

    /// Declare `name` in the innermost scope with an initial value.
    pub fn declare(&mut self, name: Name, value: Value) -> Result<VariableKey, Redeclared> {
        if self.is_declared_locally(name) {
            return Err(Redeclared(name));
        }
        let key = self.store.allocate(name, value);
        let scope = self.current_mut();
        scope.keymap.insert(name, key);
        scope.owned.push(key);
        Ok(key)
    }

    /// Allocate a slot owned by the innermost scope without binding any
    /// name to it. Only the returned key reaches it, so no declaration can
    /// shadow it.
    pub fn declare_unbound(&mut self, name: Name, value: Value) -> VariableKey {
        let key = self.store.allocate(name, value);
        self.current_mut().owned.push(key);
        key
    }

    /// Bind `name` in the innermost scope to an existing slot without
    /// taking ownership of it.
    pub fn bind_alias(&mut self, name: Name, key: VariableKey) -> Result<(), Redeclared> {
        if self.is_declared_locally(name) {
            return Err(Redeclared(name));
        }
        self.current_mut().keymap.insert(name, key);
        Ok(())
    }

    /// Find the nearest binding of `name`, walking parent links outward.
    pub fn resolve(&self, name: Name) -> Option<VariableKey> {
        let mut index = Some(self.scopes.len() - 1);
        while let Some(i) = index {
            let scope = &self.scopes[i];
            if let Some(&key) = scope.keymap.get(&name) {
                return Some(key);
            }
            index = scope.parent;
        }
        None
    }

    /// Current value of a slot; `None` once the owning scope has exited.
    pub fn read(&self, key: VariableKey) -> Option<&Value> {
        self.store.value(key)
    }

    /// Overwrite a slot. Returns `false` if the slot no longer exists.
    #[must_use]
    pub fn write(&mut self, key: VariableKey, value: Value) -> bool {
        match self.store.value_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

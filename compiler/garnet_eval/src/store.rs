//! Variable store: the single owner of every variable's value.
//!
//! Slots are addressed by [`VariableKey`], a counter that only ever grows,
//! so a key removed with its scope is never handed out again. Reading a
//! removed key is a detectable miss, not a read of some newer variable.

use std::fmt;

use garnet_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;

use crate::value::{format_value, Value};

/// Unique handle to one storage slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableKey(u64);

impl VariableKey {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        VariableKey(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named storage slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: Name,
    pub value: Value,
}

/// Flat key → variable table, independent of scoping.
#[derive(Debug, Default)]
pub struct VariableStore {
    slots: FxHashMap<VariableKey, Variable>,
    next_key: u64,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot and return its fresh key.
    pub fn allocate(&mut self, name: Name, value: Value) -> VariableKey {
        let key = VariableKey(self.next_key);
        self.next_key += 1;
        self.slots.insert(key, Variable { name, value });
        key
    }

    pub fn get(&self, key: VariableKey) -> Option<&Variable> {
        self.slots.get(&key)
    }

    pub fn value(&self, key: VariableKey) -> Option<&Value> {
        self.slots.get(&key).map(|var| &var.value)
    }

    pub fn value_mut(&mut self, key: VariableKey) -> Option<&mut Value> {
        self.slots.get_mut(&key).map(|var| &mut var.value)
    }

    pub fn remove(&mut self, key: VariableKey) -> Option<Variable> {
        self.slots.remove(&key)
    }

    pub fn contains(&self, key: VariableKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Live slots ordered by key (i.e. by allocation order).
    pub fn iter_ordered(&self) -> Vec<(VariableKey, &Variable)> {
        let mut entries: Vec<_> = self.slots.iter().map(|(k, v)| (*k, v)).collect();
        entries.sort_unstable_by_key(|(key, _)| *key);
        entries
    }

    /// Render every live slot as `#key name = value`, one per line.
    pub fn dump(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        for (key, var) in self.iter_ordered() {
            out.push_str(&format!(
                "{key} {} = {}\n",
                interner.lookup(var.name),
                format_value(&var.value, interner)
            ));
        }
        out
    }
}

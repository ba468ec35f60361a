//! String interner for identifiers and string literals.
//!
//! Provides O(1) interning and lookup. The table is owned by whoever
//! constructs it (usually the driver that also owns the parser output) and
//! is handed to the interpreter by reference; there is no process-wide
//! instance.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Backing storage for interned strings.
struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw`.
    strings: Vec<&'static str>,
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// The table exceeded `u32::MAX` entries.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Identifier table.
///
/// Interned strings are leaked so lookups can hand out `&'static str`
/// without holding the lock.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the builtin type names and well-known
    /// identifiers already interned.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        let interner = StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        };
        interner.pre_intern_well_known();
        interner
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: already interned
        if let Some(&index) = self.table.read().map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let mut guard = self.table.write();
        // Double-check after acquiring write lock
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the table exceeds `u32::MAX` entries.
    /// Use `try_intern` for fallible interning.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a Name.
    ///
    /// Names not produced by this interner resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn pre_intern_well_known(&self) {
        const WELL_KNOWN: &[&str] = &[
            // Builtin type names
            "u8",
            "u16",
            "u32",
            "u64",
            "i8",
            "i16",
            "i32",
            "i64",
            "f32",
            "f64",
            "bool",
            "string",
            "nil",
            "void",
            // Entry point, builtins, return slot
            "main",
            "print",
            "println",
            "__return__",
        ];
        for s in WELL_KNOWN {
            self.intern(s);
        }
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("counter");
        let b = interner.intern("counter");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "counter");
    }

    #[test]
    fn test_distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("x"), interner.intern("y"));
    }

    #[test]
    fn test_empty_string_is_pre_interned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
    }

    #[test]
    fn test_well_known_names_do_not_grow_table() {
        let interner = StringInterner::new();
        let before = interner.len();
        interner.intern("main");
        interner.intern("__return__");
        interner.intern("i32");
        assert_eq!(interner.len(), before);
    }

    #[test]
    fn test_lookup_foreign_name_is_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
    }
}

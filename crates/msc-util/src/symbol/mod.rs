//! String interning.
//!
//! Identifiers and string-literal contents are interned into a small `Copy`
//! handle so that two occurrences of the same name compare by index rather
//! than by string content. The pipeline never runs more than one stage at a
//! time (see the concurrency model this crate is descended from), so the
//! table is a plain [`std::cell::RefCell`]-guarded map rather than a
//! lock-free concurrent structure — there is no concurrent writer to defend
//! against here.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

thread_local! {
    static TABLE: RefCell<Interner> = RefCell::new(Interner::new());
}

struct Interner {
    strings: Vec<&'static str>,
    lookup: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self { strings: Vec::new(), lookup: FxHashMap::default() }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.lookup.get(s) {
            return idx;
        }
        let idx = self.strings.len() as u32;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.lookup.insert(leaked, idx);
        idx
    }

    fn get(&self, idx: u32) -> &'static str {
        self.strings[idx as usize]
    }
}

/// A handle into the interning table. Cheap to copy, compare, and hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Symbol {
        TABLE.with(|t| Symbol(t.borrow_mut().intern(s)))
    }

    pub fn as_str(&self) -> &'static str {
        TABLE.with(|t| t.borrow().get(self.0))
    }

    pub fn eq_str(&self, other: &str) -> bool {
        self.as_str() == other
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_equal_symbol() {
        let a = Symbol::intern("x");
        let b = Symbol::intern("x");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "x");
    }

    #[test]
    fn different_strings_intern_to_different_symbols() {
        let a = Symbol::intern("x");
        let b = Symbol::intern("y");
        assert_ne!(a, b);
    }

    proptest::proptest! {
        #[test]
        fn prop_interning_round_trips_through_as_str(s in "[a-zA-Z_][a-zA-Z0-9_]{0,15}") {
            let symbol = Symbol::intern(&s);
            proptest::prop_assert_eq!(symbol.as_str(), s.as_str());
        }

        #[test]
        fn prop_symbols_are_equal_iff_their_strings_are(
            a in "[a-zA-Z_][a-zA-Z0-9_]{0,15}",
            b in "[a-zA-Z_][a-zA-Z0-9_]{0,15}",
        ) {
            let sa = Symbol::intern(&a);
            let sb = Symbol::intern(&b);
            proptest::prop_assert_eq!(sa == sb, a == b);
        }
    }
}

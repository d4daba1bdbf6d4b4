//! Scope-nesting symbol table (§3, §4.3).
//!
//! A stack of per-scope maps rather than the single flat
//! `(name, scope_level) -> Symbol` map the design notes describe as the
//! source's own storage: each scope owns its own map, so lookup is O(depth)
//! instead of a rescan, and exiting a scope is dropping one map instead of
//! filtering a shared one.

use std::collections::HashMap;

use crate::types::DataType;

#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub data_type: DataType,
    pub scope_level: u32,
    pub is_function: bool,
}

pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()] }
    }

    pub fn current_scope_level(&self) -> u32 {
        (self.scopes.len() - 1) as u32
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "exited the outermost scope");
    }

    /// Fails (returns `false`) if `name` is already declared in the
    /// *current* scope; shadowing an outer declaration is allowed.
    pub fn declare(&mut self, name: &str, data_type: DataType, is_function: bool) -> bool {
        let level = self.current_scope_level();
        let scope = self.scopes.last_mut().expect("at least one scope");
        if scope.contains_key(name) {
            return false;
        }
        scope.insert(
            name.to_string(),
            Symbol { name: name.to_string(), data_type, scope_level: level, is_function },
        );
        true
    }

    /// Innermost-first lookup: the first scope (searching outward from the
    /// top of the stack) that holds `name` wins.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        for scope in self.scopes.iter().rev() {
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
        }
        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaration_in_same_scope_fails() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", DataType::Auto, false));
        assert!(!table.declare("x", DataType::Auto, false));
    }

    #[test]
    fn innermost_shadowing_wins_and_unwinds_on_exit() {
        let mut table = SymbolTable::new();
        table.declare("x", DataType::Int, false);
        table.enter_scope();
        table.declare("x", DataType::String, false);
        assert_eq!(table.lookup("x").unwrap().data_type, DataType::String);
        table.exit_scope();
        assert_eq!(table.lookup("x").unwrap().data_type, DataType::Int);
    }

    #[test]
    fn exiting_scope_restores_lookup_for_names_declared_within() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare("y", DataType::Auto, false);
        assert!(table.lookup("y").is_some());
        table.exit_scope();
        assert!(table.lookup("y").is_none());
    }

    #[test]
    fn lookup_of_undeclared_name_is_none() {
        let table = SymbolTable::new();
        assert!(table.lookup("missing").is_none());
    }

    proptest::proptest! {
        #[test]
        fn prop_nesting_depth_is_restored_after_matching_exits(depth in 0usize..20) {
            let mut table = SymbolTable::new();
            table.declare("x", DataType::Int, false);
            for _ in 0..depth {
                table.enter_scope();
                table.declare("x", DataType::String, false);
            }
            if depth > 0 {
                proptest::prop_assert_eq!(table.lookup("x").unwrap().data_type, DataType::String);
            }
            for _ in 0..depth {
                table.exit_scope();
            }
            proptest::prop_assert_eq!(table.lookup("x").unwrap().data_type, DataType::Int);
            proptest::prop_assert_eq!(table.current_scope_level(), 0);
        }
    }
}

//! Symbol table: lexical scoping with shadowing.

use crate::types::Type;
use cranelift_entity::{entity_impl, EntityRef, PrimaryMap};
use std::collections::HashMap;

/// A declared name: its type and the properties a definite-assignment or
/// linkage pass would care about.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub is_global: bool,
    pub is_constant: bool,
    pub is_defined: bool,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty, is_global: false, is_constant: false, is_defined: true }
    }

    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }

    pub fn constant(mut self) -> Self {
        self.is_constant = true;
        self
    }

    pub fn undefined(mut self) -> Self {
        self.is_defined = false;
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);
entity_impl!(ScopeId, "scope");

#[derive(Debug, Clone)]
struct ScopeData {
    name: String,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    symbols: HashMap<String, Symbol>,
}

/// A symbol table: a tree of scopes rooted at a global scope, with a cursor
/// (`current`) tracking where new declarations land.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: PrimaryMap<ScopeId, ScopeData>,
    global: ScopeId,
    current: ScopeId,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut scopes = PrimaryMap::new();
        let global = scopes.push(ScopeData {
            name: "global".to_string(),
            parent: None,
            children: Vec::new(),
            symbols: HashMap::new(),
        });
        Self { scopes, global, current: global }
    }

    pub fn enter_scope(&mut self, name: impl Into<String>) -> ScopeId {
        let parent = self.current;
        let child = self.scopes.push(ScopeData {
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            symbols: HashMap::new(),
        });
        self.scopes[parent].children.push(child);
        self.current = child;
        child
    }

    /// Moves the cursor back to the current scope's parent. A no-op at the
    /// global scope.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    pub fn add_symbol(
        &mut self,
        name: impl Into<String>,
        ty: Type,
        is_global: bool,
        is_constant: bool,
        is_defined: bool,
    ) {
        let name = name.into();
        let mut symbol = Symbol::new(name.clone(), ty);
        symbol.is_global = is_global;
        symbol.is_constant = is_constant;
        symbol.is_defined = is_defined;
        self.scopes[self.current].symbols.insert(name, symbol);
    }

    /// Looks up `name` starting at the current scope. If `current_scope_only`
    /// is false, walks up through parent scopes until found.
    pub fn lookup_symbol(&self, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        if current_scope_only {
            return self.scopes[self.current].symbols.get(name);
        }
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if let Some(symbol) = self.scopes[id].symbols.get(name) {
                return Some(symbol);
            }
            scope = self.scopes[id].parent;
        }
        None
    }

    /// All symbols visible from the current scope; inner declarations shadow
    /// outer ones of the same name when `include_parent_scopes` is set.
    pub fn get_scope_symbols(&self, include_parent_scopes: bool) -> HashMap<String, &Symbol> {
        let mut result = HashMap::new();
        if !include_parent_scopes {
            for (name, symbol) in &self.scopes[self.current].symbols {
                result.insert(name.clone(), symbol);
            }
            return result;
        }
        let mut chain = Vec::new();
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            chain.push(id);
            scope = self.scopes[id].parent;
        }
        for id in chain.into_iter().rev() {
            for (name, symbol) in &self.scopes[id].symbols {
                result.insert(name.clone(), symbol);
            }
        }
        result
    }

    pub fn get_global_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.scopes[self.global].symbols.values().filter(|s| s.is_global)
    }

    pub fn clear_scope(&mut self) {
        self.scopes[self.current].symbols.clear();
    }

    /// Discards the whole table, replacing it with a fresh global scope.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

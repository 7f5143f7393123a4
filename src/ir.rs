//! The top-level IR: a collection of modules sharing one type system.

use crate::module::Module;
use crate::symbol::SymbolTable;
use crate::types::TypeSystem;
use indexmap::IndexMap;

/// The root container for a whole program's IR.
#[derive(Debug, Clone)]
pub struct IR {
    modules: IndexMap<String, Module>,
    pub type_system: TypeSystem,
    /// Name resolution shared across every module's top-level declarations,
    /// distinct from each `Function`'s local value symbol map.
    pub global_symbols: SymbolTable,
}

impl IR {
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
            type_system: TypeSystem::new(),
            global_symbols: SymbolTable::new(),
        }
    }

    /// Creates an empty module named `name`, adds it, and returns its name for
    /// a subsequent `get_module` (modules are owned by the `IR`, not handed
    /// back by value).
    pub fn create_module(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        self.modules.insert(name.clone(), Module::new(name.clone()));
        name
    }

    pub fn add_module(&mut self, module: Module) {
        self.modules.insert(module.name.clone(), module);
    }

    pub fn get_module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn get_module_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.get_mut(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }
}

impl Default for IR {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_module_then_get_module_round_trips() {
        let mut ir = IR::new();
        let name = ir.create_module("app");
        assert!(ir.get_module(&name).is_some());
        assert!(ir.get_module("nonexistent").is_none());
    }

    #[test]
    fn shared_type_system_starts_seeded_with_builtins() {
        let ir = IR::new();
        assert!(ir.type_system.get_type("i32").is_some());
    }
}

//! Modules: a named collection of functions and globals sharing a local type
//! system.

use crate::function::Function;
use crate::types::{Type, TypeSystem};
use indexmap::IndexMap;

/// A module-level global variable.
#[derive(Debug, Clone)]
pub struct GlobalVariable {
    pub name: String,
    pub ty: Type,
    pub is_constant: bool,
    pub initializer: Option<crate::value::Literal>,
}

/// A module: functions, globals, and a type system local to this module.
///
/// The base data model keeps this local `type_system` distinct from
/// [`crate::ir::IR`]'s shared one; see `DESIGN.md` for why that duplication is
/// kept rather than centralized.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    functions: IndexMap<String, Function>,
    globals: IndexMap<String, GlobalVariable>,
    pub type_system: TypeSystem,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: IndexMap::new(),
            globals: IndexMap::new(),
            type_system: TypeSystem::new(),
        }
    }

    /// Inserts `function`, overwriting any prior function of the same name.
    pub fn add_function(&mut self, function: Function) {
        self.functions.insert(function.name.clone(), function);
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn get_function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.get_mut(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Inserts `global`, overwriting any prior global of the same name.
    pub fn add_global(&mut self, global: GlobalVariable) {
        self.globals.insert(global.name.clone(), global);
    }

    pub fn get_global(&self, name: &str) -> Option<&GlobalVariable> {
        self.globals.get(name)
    }

    pub fn globals(&self) -> impl Iterator<Item = &GlobalVariable> {
        self.globals.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_a_function_with_the_same_name_overwrites() {
        let mut m = Module::new("main");
        m.add_function(Function::new("f", Type::Void));
        m.add_function(Function::new("f", Type::integer(32, true)));
        assert_eq!(m.functions().count(), 1);
        assert_eq!(m.get_function("f").unwrap().return_type, Type::integer(32, true));
    }

    #[test]
    fn get_global_returns_none_when_absent() {
        let m = Module::new("main");
        assert!(m.get_global("missing").is_none());
    }
}

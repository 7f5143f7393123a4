//! The IR type system: a small, closed catalog of primitive and composite types,
//! interned by structural name.
//!
//! Types are immutable and value-equal by structural name (never by identity),
//! unlike IR graph entities such as [`crate::value::ValueId`], which are
//! identity-equal. See `crate::value` for that distinction.

use std::fmt;

/// A type in the IR.
///
/// Two `Type` values are equal iff their structural names would be equal, which
/// `#[derive(PartialEq, Eq, Hash)]` gives us directly since every variant's
/// fields fully determine its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Integer { bits: u32, signed: bool },
    Float { bits: u32 },
    Pointer { pointee: Box<Type> },
    Array { element: Box<Type>, length: Option<u64> },
    Struct { name: String, fields: Vec<(String, Type)> },
    Function { return_type: Box<Type>, parameters: Vec<Type> },
}

impl Type {
    pub fn integer(bits: u32, signed: bool) -> Self {
        Type::Integer { bits, signed }
    }

    pub fn float(bits: u32) -> Self {
        Type::Float { bits }
    }

    pub fn pointer(pointee: Type) -> Self {
        Type::Pointer { pointee: Box::new(pointee) }
    }

    pub fn array(element: Type, length: Option<u64>) -> Self {
        Type::Array { element: Box::new(element), length }
    }

    pub fn structure(name: impl Into<String>, fields: Vec<(String, Type)>) -> Self {
        Type::Struct { name: name.into(), fields }
    }

    pub fn function(return_type: Type, parameters: Vec<Type>) -> Self {
        Type::Function { return_type: Box::new(return_type), parameters }
    }

    /// The structural name used for interning and display, e.g. `i32`, `f64*`,
    /// `i32[4]`, `struct Point`, `i32 (i32, i32)`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Size in bits, when statically known.
    ///
    /// Arrays and structs are `None` when any constituent size is unknown;
    /// pointers are always 64 bits.
    pub fn size(&self) -> Option<u64> {
        match self {
            Type::Void => None,
            Type::Integer { bits, .. } => Some(*bits as u64),
            Type::Float { bits } => Some(*bits as u64),
            Type::Pointer { .. } => Some(64),
            Type::Array { element, length } => match (element.size(), length) {
                (Some(elem_size), Some(len)) => Some(elem_size * len),
                _ => None,
            },
            Type::Struct { fields, .. } => {
                let mut total = 0u64;
                for (_, field_ty) in fields {
                    total += field_ty.size()?;
                }
                Some(total)
            }
            Type::Function { .. } => None,
        }
    }

    /// Strict structural equality, per the base specification.
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self == other
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Integer { bits, signed } => {
                write!(f, "{}{}", if *signed { "i" } else { "u" }, bits)
            }
            Type::Float { bits } => write!(f, "f{}", bits),
            Type::Pointer { pointee } => write!(f, "{}*", pointee),
            Type::Array { element, length } => match length {
                Some(len) => write!(f, "{}[{}]", element, len),
                None => write!(f, "{}[]", element),
            },
            Type::Struct { name, .. } => write!(f, "struct {}", name),
            Type::Function { return_type, parameters } => {
                write!(f, "{} (", return_type)?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A mapping from type-name to [`Type`], seeded with the built-in primitive
/// types. Composite-type factory methods intern by the constructed name.
#[derive(Debug, Clone)]
pub struct TypeSystem {
    types: indexmap::IndexMap<String, Type>,
}

impl TypeSystem {
    pub fn new() -> Self {
        let mut system = Self { types: indexmap::IndexMap::new() };
        system.register(Type::Void);
        for bits in [8, 16, 32, 64] {
            system.register(Type::integer(bits, true));
            system.register(Type::integer(bits, false));
        }
        for bits in [32, 64] {
            system.register(Type::float(bits));
        }
        system
    }

    /// Register (or overwrite, last-write-wins) a type under its structural name.
    pub fn register(&mut self, ty: Type) {
        self.types.insert(ty.name(), ty);
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn create_pointer_type(&mut self, pointee: Type) -> Type {
        let ty = Type::pointer(pointee);
        self.register(ty.clone());
        ty
    }

    pub fn create_array_type(&mut self, element: Type, length: Option<u64>) -> Type {
        let ty = Type::array(element, length);
        self.register(ty.clone());
        ty
    }

    pub fn create_struct_type(
        &mut self,
        name: impl Into<String>,
        fields: Vec<(String, Type)>,
    ) -> Type {
        let ty = Type::structure(name, fields);
        self.register(ty.clone());
        ty
    }

    pub fn create_function_type(&mut self, return_type: Type, parameters: Vec<Type>) -> Type {
        let ty = Type::function(return_type, parameters);
        self.register(ty.clone());
        ty
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

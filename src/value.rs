//! Values: the nodes of the use-def graph.
//!
//! Every [`ValueId`] is an arena slot inside a [`crate::function::Function`];
//! identity, not structure, is what makes two values the same (invariant I1).
//! Compare this to [`crate::types::Type`], which is structurally value-equal.

use crate::instruction::InstructionData;
use crate::types::Type;
use cranelift_entity::{entity_impl, EntityRef};
use indexmap::IndexSet;

/// A source position, carried on values and instructions for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self { file: file.into(), line, column, end_line: None, end_column: None }
    }

    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }
}

/// A literal constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Unit,
}

/// Identifies a [`ValueData`] inside a single function's value arena.
///
/// `ValueId` equality is arena-slot equality, which is exactly the identity
/// semantics invariant I1 requires: two operands referring to "the same value"
/// are the same `ValueId`, never merely structurally-equal data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(u32);
entity_impl!(ValueId, "value");

/// What kind of node this value is in the use-def graph.
#[derive(Debug, Clone)]
pub enum ValueKind {
    /// A compile-time constant.
    Constant(Literal),
    /// The result of executing an instruction.
    Instruction(InstructionData),
    /// A reference to a module-level global, by name.
    Global(String),
    /// A function parameter; the index is its position in the parameter list.
    Param(usize),
}

/// A node in the use-def graph: either a constant, an instruction result, a
/// global reference, or a parameter.
#[derive(Debug, Clone)]
pub struct ValueData {
    pub ty: Type,
    pub name: Option<String>,
    pub location: Option<Location>,
    pub kind: ValueKind,
    /// The set of instructions that use this value as an operand (invariant I1,
    /// kept in lock-step with every `operands` edit by `Function`'s mutators).
    pub users: IndexSet<ValueId>,
}

impl ValueData {
    pub fn new(ty: Type, kind: ValueKind) -> Self {
        Self { ty, name: None, location: None, kind, users: IndexSet::new() }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.kind, ValueKind::Constant(_))
    }

    pub fn is_instruction(&self) -> bool {
        matches!(self.kind, ValueKind::Instruction(_))
    }

    pub fn as_instruction(&self) -> Option<&InstructionData> {
        match &self.kind {
            ValueKind::Instruction(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_instruction_mut(&mut self) -> Option<&mut InstructionData> {
        match &mut self.kind {
            ValueKind::Instruction(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Literal> {
        match &self.kind {
            ValueKind::Constant(lit) => Some(lit),
            _ => None,
        }
    }
}

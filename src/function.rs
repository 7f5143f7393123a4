//! Functions: the owning arena for a graph of values and blocks.
//!
//! A `Function` is the unit of "stable index" ownership (Design Note 9): every
//! [`ValueId`]/[`BlockId`] minted by one function is meaningless in another.

use crate::block::{BlockData, BlockId};
use crate::instruction::{InstructionData, InstructionVariant};
use crate::types::Type;
use crate::value::{Location, ValueData, ValueKind};
use cranelift_entity::PrimaryMap;
use std::collections::HashMap;

/// A function parameter's declared name and type, independent of its
/// materialized [`ValueId`] (kept for signature introspection without walking
/// the value arena).
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

/// A function: its signature, its value arena, and its block arena.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<Parameter>,
    parameter_values: Vec<ValueId>,
    values: PrimaryMap<ValueId, ValueData>,
    blocks: PrimaryMap<BlockId, BlockData>,
    block_order: Vec<BlockId>,
    symbols: HashMap<String, ValueId>,
}

impl Function {
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            parameter_values: Vec::new(),
            values: PrimaryMap::new(),
            blocks: PrimaryMap::new(),
            block_order: Vec::new(),
            symbols: HashMap::new(),
        }
    }

    // --- Parameters ---

    pub fn add_parameter(&mut self, name: impl Into<String>, ty: Type) -> ValueId {
        let name = name.into();
        let index = self.parameters.len();
        let value_id = self.values.push(
            ValueData::new(ty.clone(), ValueKind::Param(index)).named(name.clone()),
        );
        self.parameters.push(Parameter { name: name.clone(), ty });
        self.parameter_values.push(value_id);
        self.symbols.insert(name, value_id);
        value_id
    }

    pub fn parameter_values(&self) -> &[ValueId] {
        &self.parameter_values
    }

    // --- Blocks ---

    pub fn add_block(&mut self, name: impl Into<String>) -> BlockId {
        let id = self.blocks.push(BlockData::new(name));
        self.block_order.push(id);
        id
    }

    /// First block whose name matches, scanning in insertion order.
    pub fn get_block(&self, name: &str) -> Option<BlockId> {
        self.block_order.iter().copied().find(|&id| self.blocks[id].name == name)
    }

    pub fn block(&self, id: BlockId) -> &BlockData {
        &self.blocks[id]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut BlockData {
        &mut self.blocks[id]
    }

    pub fn block_order(&self) -> &[BlockId] {
        &self.block_order
    }

    pub fn entry_block(&self) -> Option<BlockId> {
        self.block_order.first().copied()
    }

    pub fn add_predecessor(&mut self, block: BlockId, predecessor: BlockId) {
        self.blocks[block].predecessors.insert(predecessor);
        self.blocks[predecessor].successors.insert(block);
    }

    pub fn add_successor(&mut self, block: BlockId, successor: BlockId) {
        self.blocks[block].successors.insert(successor);
        self.blocks[successor].predecessors.insert(block);
    }

    pub fn remove_predecessor(&mut self, block: BlockId, predecessor: BlockId) {
        self.blocks[block].predecessors.shift_remove(&predecessor);
        self.blocks[predecessor].successors.shift_remove(&block);
    }

    pub fn remove_successor(&mut self, block: BlockId, successor: BlockId) {
        self.blocks[block].successors.shift_remove(&successor);
        self.blocks[successor].predecessors.shift_remove(&block);
    }

    // --- Values / instructions ---

    pub fn value(&self, id: ValueId) -> &ValueData {
        &self.values[id]
    }

    pub fn value_mut(&mut self, id: ValueId) -> &mut ValueData {
        &mut self.values[id]
    }

    pub fn add_constant(&mut self, data: ValueData) -> ValueId {
        self.values.push(data)
    }

    /// Appends a new instruction to `block`, registering this instruction as a
    /// user of every operand it references (invariant I1).
    pub fn add_instruction(
        &mut self,
        block: BlockId,
        ty: Type,
        variant: InstructionVariant,
        operands: Vec<ValueId>,
        name: Option<String>,
        location: Option<Location>,
    ) -> ValueId {
        let mut inst = InstructionData::new(variant, operands.clone());
        inst.parent = Some(block);
        let mut data = ValueData::new(ty, ValueKind::Instruction(inst));
        if let Some(name) = &name {
            data.name = Some(name.clone());
        }
        if let Some(location) = location {
            data = data.at(location);
        }
        let value_id = self.values.push(data);
        if let Some(name) = name {
            self.symbols.insert(name, value_id);
        }
        for operand in operands {
            self.values[operand].users.insert(value_id);
        }
        self.blocks[block].instructions.push(value_id);
        value_id
    }

    pub fn add_operand(&mut self, instruction: ValueId, operand: ValueId) {
        if let Some(inst) = self.values[instruction].as_instruction_mut() {
            inst.operands.push(operand);
        }
        self.values[operand].users.insert(instruction);
    }

    pub fn remove_operand(&mut self, instruction: ValueId, operand: ValueId) {
        if let Some(inst) = self.values[instruction].as_instruction_mut() {
            inst.operands.retain(|&o| o != operand);
        }
        let still_used = self.values[instruction]
            .as_instruction()
            .map(|inst| inst.operands.contains(&operand))
            .unwrap_or(false);
        if !still_used {
            self.values[operand].users.shift_remove(&instruction);
        }
    }

    pub fn replace_operand(&mut self, instruction: ValueId, old: ValueId, new: ValueId) {
        let mut replaced = false;
        if let Some(inst) = self.values[instruction].as_instruction_mut() {
            for operand in inst.operands.iter_mut() {
                if *operand == old {
                    *operand = new;
                    replaced = true;
                }
            }
        }
        if replaced {
            let still_used = self.values[instruction]
                .as_instruction()
                .map(|inst| inst.operands.contains(&old))
                .unwrap_or(false);
            if !still_used {
                self.values[old].users.shift_remove(&instruction);
            }
            self.values[new].users.insert(instruction);
        }
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<ValueId> {
        self.symbols.get(name).copied()
    }
}

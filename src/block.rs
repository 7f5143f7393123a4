//! Basic blocks: straight-line instruction sequences joined by control flow.

use crate::value::ValueId;
use cranelift_entity::entity_impl;
use indexmap::IndexSet;

/// Identifies a [`BlockData`] inside a function's block arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);
entity_impl!(BlockId, "block");

/// A basic block: a label, its instructions in execution order, and the
/// predecessor/successor edges that make up the function's control-flow graph
/// (invariant I2: these edges are always mirrored by `Function`'s mutators).
#[derive(Debug, Clone)]
pub struct BlockData {
    pub name: String,
    pub instructions: Vec<ValueId>,
    pub predecessors: IndexSet<BlockId>,
    pub successors: IndexSet<BlockId>,
}

impl BlockData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: Vec::new(),
            predecessors: IndexSet::new(),
            successors: IndexSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction that ends the block, if any has been added yet.
    pub fn terminator(&self) -> Option<ValueId> {
        self.instructions.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cranelift_entity::EntityRef;

    #[test]
    fn fresh_block_has_no_edges() {
        let block = BlockData::new("entry");
        assert!(block.predecessors.is_empty());
        assert!(block.successors.is_empty());
        assert_eq!(block.terminator(), None);
    }

    #[test]
    fn block_id_is_identity() {
        assert_eq!(BlockId::new(0), BlockId::new(0));
        assert_ne!(BlockId::new(0), BlockId::new(1));
    }
}

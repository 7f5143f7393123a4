//! Control-flow graph view over a function's blocks.
//!
//! `BlockId` is already an arena-slot identity, so a [`CfgNode`] is just a
//! snapshot of one block's edges at the time the graph was built; there is no
//! separate node identity to maintain.

use crate::block::BlockId;
use crate::function::Function;
use indexmap::{IndexMap, IndexSet};

/// One node of the control-flow graph: a block and its edges, snapshotted
/// when the graph was built.
#[derive(Debug, Clone)]
pub struct CfgNode {
    pub block: BlockId,
    pub instructions: Vec<crate::value::ValueId>,
    pub predecessors: IndexSet<BlockId>,
    pub successors: IndexSet<BlockId>,
}

/// The control-flow graph of a single function.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    entry: Option<BlockId>,
    nodes: IndexMap<BlockId, CfgNode>,
}

impl ControlFlowGraph {
    pub fn build(function: &Function) -> Self {
        let mut nodes = IndexMap::new();
        for &block_id in function.block_order() {
            let block = function.block(block_id);
            nodes.insert(
                block_id,
                CfgNode {
                    block: block_id,
                    instructions: block.instructions.clone(),
                    predecessors: block.predecessors.clone(),
                    successors: block.successors.clone(),
                },
            );
        }
        Self { entry: function.entry_block(), nodes }
    }

    pub fn get_nodes(&self) -> impl Iterator<Item = &CfgNode> {
        self.nodes.values()
    }

    pub fn node(&self, block: BlockId) -> Option<&CfgNode> {
        self.nodes.get(&block)
    }

    /// Depth-first traversal order starting at `start` (or the function's
    /// entry block if `None`). Unreachable blocks are omitted.
    pub fn traverse(&self, start: Option<BlockId>) -> Vec<BlockId> {
        let start = match start.or(self.entry) {
            Some(start) => start,
            None => return Vec::new(),
        };
        let mut visited = IndexSet::new();
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(block) = stack.pop() {
            if visited.contains(&block) {
                continue;
            }
            visited.insert(block);
            order.push(block);
            if let Some(node) = self.nodes.get(&block) {
                for &successor in node.successors.iter().rev() {
                    if !visited.contains(&successor) {
                        stack.push(successor);
                    }
                }
            }
        }
        order
    }
}

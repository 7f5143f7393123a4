//! The generic monotone-framework worklist solver, parameterized by an
//! analysis's direction, lattice, transfer function, and meet operator.
//!
//! The worklist itself is a deterministic FIFO queue with a seen-guard against
//! double-queuing, not the arbitrary-order `set.pop()` a naive port of the
//! reference worklist would use. A fixed point is still a fixed point either
//! way, but reruns now reproduce the same sequence of iterations.

pub mod available_expressions;
pub mod constant_propagation;
pub mod live_variables;
pub mod reaching_definitions;

use crate::block::BlockId;
use crate::cfg::{CfgNode, ControlFlowGraph};
use crate::function::Function;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

/// A classical dataflow analysis: a lattice (`Data`), a direction, a transfer
/// function, and a meet operator.
pub trait DataFlowAnalysis {
    type Data: Clone + PartialEq;

    fn is_forward(&self) -> bool {
        true
    }

    fn initial_data(&self) -> Self::Data;

    fn flow_function(&mut self, function: &Function, node: &CfgNode, input: &Self::Data) -> Self::Data;

    fn meet(&self, sets: Vec<&Self::Data>) -> Self::Data;
}

/// The result of running an analysis to a fixed point: the data flowing into
/// and out of every reachable block.
pub struct AnalysisResult<D> {
    pub in_sets: IndexMap<BlockId, D>,
    pub out_sets: IndexMap<BlockId, D>,
}

/// Runs `analysis` over `cfg` to a fixed point and returns the in/out sets for
/// every node `cfg` knows about.
pub fn analyze<A: DataFlowAnalysis>(
    function: &Function,
    cfg: &ControlFlowGraph,
    analysis: &mut A,
) -> AnalysisResult<A::Data> {
    let node_ids: Vec<BlockId> = cfg.get_nodes().map(|n| n.block).collect();
    let mut in_sets: IndexMap<BlockId, A::Data> = IndexMap::new();
    let mut out_sets: IndexMap<BlockId, A::Data> = IndexMap::new();
    for &id in &node_ids {
        in_sets.insert(id, analysis.initial_data());
        out_sets.insert(id, analysis.initial_data());
    }

    let mut queue: VecDeque<BlockId> = node_ids.iter().copied().collect();
    let mut queued: IndexSet<BlockId> = node_ids.iter().copied().collect();

    while let Some(node_id) = queue.pop_front() {
        queued.shift_remove(&node_id);
        let node = match cfg.node(node_id) {
            Some(node) => node,
            None => continue,
        };

        if analysis.is_forward() {
            let neighbor_sets: Vec<A::Data> = if node.predecessors.is_empty() {
                vec![analysis.initial_data()]
            } else {
                node.predecessors.iter().map(|p| out_sets[p].clone()).collect()
            };
            let new_in = analysis.meet(neighbor_sets.iter().collect());
            in_sets.insert(node_id, new_in.clone());
            let new_out = analysis.flow_function(function, node, &new_in);
            if new_out != out_sets[&node_id] {
                log::trace!("dataflow: block {:?} out-set changed, requeuing successors", node_id);
                out_sets.insert(node_id, new_out);
                for &successor in node.successors.iter() {
                    if queued.insert(successor) {
                        queue.push_back(successor);
                    }
                }
            }
        } else {
            let neighbor_sets: Vec<A::Data> = if node.successors.is_empty() {
                vec![analysis.initial_data()]
            } else {
                node.successors.iter().map(|s| in_sets[s].clone()).collect()
            };
            let new_out = analysis.meet(neighbor_sets.iter().collect());
            out_sets.insert(node_id, new_out.clone());
            let new_in = analysis.flow_function(function, node, &new_out);
            if new_in != in_sets[&node_id] {
                log::trace!("dataflow: block {:?} in-set changed, requeuing predecessors", node_id);
                in_sets.insert(node_id, new_in);
                for &predecessor in node.predecessors.iter() {
                    if queued.insert(predecessor) {
                        queue.push_back(predecessor);
                    }
                }
            }
        }
    }

    AnalysisResult { in_sets, out_sets }
}

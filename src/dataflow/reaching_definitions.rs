//! Reaching definitions: forward, union-over-predecessors.
//!
//! A definition `(name, instruction)` reaches a program point if some path to
//! that point assigns `name` via `instruction` without another definition of
//! `name` coming after it on that path.

use super::DataFlowAnalysis;
use crate::cfg::CfgNode;
use crate::function::Function;
use crate::value::ValueId;
use indexmap::IndexSet;

pub type Definitions = IndexSet<(String, ValueId)>;

#[derive(Debug, Default)]
pub struct ReachingDefinitionsAnalysis;

impl DataFlowAnalysis for ReachingDefinitionsAnalysis {
    type Data = Definitions;

    fn initial_data(&self) -> Self::Data {
        IndexSet::new()
    }

    fn flow_function(&mut self, function: &Function, node: &CfgNode, input: &Self::Data) -> Self::Data {
        let mut out_set = input.clone();
        for &value_id in &node.instructions {
            let value = function.value(value_id);
            let Some(name) = value.name.clone() else { continue };
            let kill_set: Vec<_> =
                out_set.iter().filter(|(n, _)| *n == name).cloned().collect();
            for killed in kill_set {
                out_set.shift_remove(&killed);
            }
            out_set.insert((name, value_id));
        }
        out_set
    }

    fn meet(&self, sets: Vec<&Self::Data>) -> Self::Data {
        let mut result = IndexSet::new();
        for set in sets {
            result.extend(set.iter().cloned());
        }
        result
    }
}

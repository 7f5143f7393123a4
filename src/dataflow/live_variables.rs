//! Live variables: backward, union-over-successors.
//!
//! A variable is live at a point if some path from that point uses it before
//! it is redefined.

use super::DataFlowAnalysis;
use crate::cfg::CfgNode;
use crate::function::Function;
use crate::instruction::InstructionData;
use crate::value::ValueId;
use indexmap::IndexSet;

pub type LiveSet = IndexSet<String>;

#[derive(Debug, Default)]
pub struct LiveVariableAnalysis;

/// The operand names an instruction reads: every operand that resolves to a
/// named value (an instruction result or a parameter), skipping unnamed
/// constants.
fn used_variables(function: &Function, instruction: &InstructionData) -> Vec<String> {
    instruction
        .operands
        .iter()
        .filter_map(|&operand: &ValueId| function.value(operand).name.clone())
        .collect()
}

impl DataFlowAnalysis for LiveVariableAnalysis {
    type Data = LiveSet;

    fn is_forward(&self) -> bool {
        false
    }

    fn initial_data(&self) -> Self::Data {
        IndexSet::new()
    }

    fn flow_function(&mut self, function: &Function, node: &CfgNode, input: &Self::Data) -> Self::Data {
        let mut in_set = input.clone();
        for &value_id in node.instructions.iter().rev() {
            let value = function.value(value_id);
            if let Some(name) = &value.name {
                in_set.shift_remove(name);
            }
            if let Some(inst) = value.as_instruction() {
                for used in used_variables(function, inst) {
                    in_set.insert(used);
                }
            }
        }
        in_set
    }

    fn meet(&self, sets: Vec<&Self::Data>) -> Self::Data {
        let mut result = IndexSet::new();
        for set in sets {
            result.extend(set.iter().cloned());
        }
        result
    }
}

//! Constant propagation: forward, element-wise intersection meet.
//!
//! Tracks only whether a variable is a known compile-time constant at a
//! point, not which literal (`CONST` vs `TOP`, unknown/varying). A variable
//! absent from the map is implicitly `TOP`.

use super::DataFlowAnalysis;
use crate::cfg::CfgNode;
use crate::function::Function;
use crate::value::ValueKind;
use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Lattice {
    Const,
    Top,
}

pub type ConstantMap = IndexMap<String, Lattice>;

#[derive(Debug, Default)]
pub struct ConstantPropagationAnalysis;

impl DataFlowAnalysis for ConstantPropagationAnalysis {
    type Data = ConstantMap;

    fn initial_data(&self) -> Self::Data {
        IndexMap::new()
    }

    fn flow_function(&mut self, function: &Function, node: &CfgNode, input: &Self::Data) -> Self::Data {
        let mut out_set = input.clone();
        let mut defined: IndexSet<String> = IndexSet::new();

        for &value_id in &node.instructions {
            let value = function.value(value_id);
            let Some(name) = value.name.clone() else { continue };
            let Some(inst) = value.as_instruction() else { continue };
            defined.insert(name.clone());

            let status = match inst.operands.len() {
                0 => Lattice::Top,
                1 => operand_status(function, &out_set, input, inst.operands[0]),
                _ => {
                    let all_const = inst
                        .operands
                        .iter()
                        .all(|&op| operand_status(function, &out_set, input, op) == Lattice::Const);
                    if all_const { Lattice::Const } else { Lattice::Top }
                }
            };
            out_set.insert(name, status);
        }

        for (name, status) in input {
            if !defined.contains(name) {
                out_set.insert(name.clone(), *status);
            }
        }
        out_set
    }

    fn meet(&self, sets: Vec<&Self::Data>) -> Self::Data {
        if sets.is_empty() {
            return IndexMap::new();
        }
        let mut keys: IndexSet<&String> = IndexSet::new();
        for set in &sets {
            keys.extend(set.keys());
        }
        let mut result = IndexMap::new();
        for key in keys {
            let mut values = sets.iter().map(|s| s.get(key).copied().unwrap_or(Lattice::Top));
            let first = values.next().unwrap();
            let status = if values.all(|v| v == first) { first } else { Lattice::Top };
            result.insert(key.clone(), status);
        }
        result
    }
}

/// A value's constant status: a literal constant is always `CONST`; a named
/// instruction's status is read from the evolving `out` set, falling back to
/// `in`, falling back to `TOP`; anything else (an unnamed instruction, a
/// parameter, a global) is `TOP`.
fn operand_status(
    function: &Function,
    out_set: &ConstantMap,
    in_set: &ConstantMap,
    operand: crate::value::ValueId,
) -> Lattice {
    let value = function.value(operand);
    if matches!(value.kind, ValueKind::Constant(_)) {
        return Lattice::Const;
    }
    match &value.name {
        Some(name) => out_set
            .get(name)
            .copied()
            .or_else(|| in_set.get(name).copied())
            .unwrap_or(Lattice::Top),
        None => Lattice::Top,
    }
}

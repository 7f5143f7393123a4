//! Available expressions: forward, intersection meet, with a deliberate
//! global-kill weakening carried over from the reference implementation (see
//! `DESIGN.md`'s Open Question on `killed_vars`).
//!
//! An expression is available at a point if every path reaching that point
//! computes it and none of those paths has since redefined one of its
//! operands.

use super::DataFlowAnalysis;
use crate::block::BlockId;
use crate::cfg::CfgNode;
use crate::function::Function;
use crate::instruction::{InstructionData, InstructionKind};
use crate::value::Literal;
use indexmap::{IndexMap, IndexSet};

/// The operator an instruction contributes to an expression. The tag set is
/// closed: `Assign` exists because the base spec names it, but no variant in
/// this catalogue currently maps to it (the catalogue has no bare copy/assign
/// instruction), see §9's "preserve as-is unless extended."
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Multiply,
    Assign,
}

fn operator_for(kind: InstructionKind) -> Option<Operator> {
    match kind {
        InstructionKind::Add => Some(Operator::Add),
        InstructionKind::Mul => Some(Operator::Multiply),
        _ => None,
    }
}

fn literal_token(literal: &Literal) -> String {
    match literal {
        Literal::Integer(n) => format!("const_{n}"),
        Literal::Float(f) => format!("const_{f}"),
        Literal::Bool(b) => format!("const_{b}"),
        Literal::String(s) => format!("const_{s}"),
        Literal::Unit => "const_unit".to_string(),
    }
}

/// `(operator_tag, sorted_operand_names)`, derived from an instruction with
/// at least two operands whose kind is in the closed tag set above.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    pub operator: Operator,
    pub operands: Vec<String>,
}

impl Expression {
    /// `None` when the instruction has fewer than two operands, maps to no
    /// tag, or has an operand that is neither named nor a constant.
    pub fn from_instruction(function: &Function, instruction: &InstructionData) -> Option<Self> {
        if instruction.operands.len() < 2 {
            return None;
        }
        let operator = operator_for(instruction.kind())?;
        let mut names = Vec::with_capacity(instruction.operands.len());
        for &operand in &instruction.operands {
            let value = function.value(operand);
            if let Some(name) = &value.name {
                names.push(name.clone());
            } else if let Some(literal) = value.as_constant() {
                names.push(literal_token(literal));
            } else {
                return None;
            }
        }
        names.sort();
        Some(Expression { operator, operands: names })
    }
}

pub type ExpressionSet = IndexSet<Expression>;

/// Available expressions. Beyond the generic `in_sets`/`out_sets` the solver
/// exposes, this analysis remembers the killed-variable set of every node it
/// has processed (`killed_vars`), because the meet operator applies a global
/// kill across all of them, not just the nodes being merged. See the base
/// spec §4.5.3 and `DESIGN.md` for why this history-dependent weakening is
/// kept rather than "fixed."
#[derive(Debug, Default)]
pub struct AvailableExpressionsAnalysis {
    killed_vars: IndexMap<BlockId, IndexSet<String>>,
}

impl AvailableExpressionsAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    fn all_killed_vars(&self) -> IndexSet<String> {
        let mut all = IndexSet::new();
        for killed in self.killed_vars.values() {
            all.extend(killed.iter().cloned());
        }
        all
    }
}

impl DataFlowAnalysis for AvailableExpressionsAnalysis {
    type Data = ExpressionSet;

    fn initial_data(&self) -> Self::Data {
        IndexSet::new()
    }

    fn flow_function(&mut self, function: &Function, node: &CfgNode, input: &Self::Data) -> Self::Data {
        let killed: IndexSet<String> = node
            .instructions
            .iter()
            .filter_map(|&id| function.value(id).name.clone())
            .collect();
        self.killed_vars.insert(node.block, killed.clone());

        let mut out_set: ExpressionSet = input
            .iter()
            .filter(|expr| !expr.operands.iter().any(|v| killed.contains(v)))
            .cloned()
            .collect();

        for &value_id in &node.instructions {
            let Some(inst) = function.value(value_id).as_instruction() else { continue };
            if let Some(expr) = Expression::from_instruction(function, inst) {
                out_set.insert(expr);
            }
        }
        out_set
    }

    fn meet(&self, sets: Vec<&Self::Data>) -> Self::Data {
        let mut result = match sets.split_first() {
            None => return IndexSet::new(),
            Some((first, rest)) => {
                let mut acc = (*first).clone();
                for set in rest {
                    acc.retain(|expr| set.contains(expr));
                }
                acc
            }
        };
        let global_kill = self.all_killed_vars();
        result.retain(|expr| !expr.operands.iter().any(|v| global_kill.contains(v)));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::ControlFlowGraph;
    use crate::dataflow::analyze;
    use crate::instruction::InstructionVariant;
    use crate::types::Type;
    use crate::value::{Literal, ValueData, ValueKind};

    fn diamond() -> (Function, BlockId, BlockId, BlockId, BlockId) {
        let mut f = Function::new("f", Type::Void);
        let entry = f.add_block("entry");
        let b1 = f.add_block("b1");
        let b2 = f.add_block("b2");
        let exit = f.add_block("exit");
        f.add_successor(entry, b1);
        f.add_successor(entry, b2);
        f.add_successor(b1, exit);
        f.add_successor(b2, exit);
        (f, entry, b1, b2, exit)
    }

    fn constant(f: &mut Function, n: i64) -> crate::value::ValueId {
        f.add_constant(ValueData::new(
            Type::integer(32, true),
            ValueKind::Constant(Literal::Integer(n)),
        ))
    }

    /// Scenario S3: entry: x=1; y=2; b1: a=x+y, b=x*y; b2: x=2, c=x+y; exit empty.
    #[test]
    fn s3_available_expressions_diamond() {
        let (mut f, entry, b1, b2, exit) = diamond();

        let one = constant(&mut f, 1);
        let two = constant(&mut f, 2);
        // `x = 1` and `y = 2` are single-operand assignments: not expressions
        // (Expression::from_instruction needs >=2 operands), so entry's
        // out-set stays empty.
        let x = f.add_instruction(
            entry,
            Type::integer(32, true),
            InstructionVariant::Convert { op: InstructionKind::Bitcast, target_type: Type::integer(32, true) },
            vec![one],
            Some("x".to_string()),
            None,
        );
        let y = f.add_instruction(
            entry,
            Type::integer(32, true),
            InstructionVariant::Convert { op: InstructionKind::Bitcast, target_type: Type::integer(32, true) },
            vec![two],
            Some("y".to_string()),
            None,
        );

        f.add_instruction(
            b1,
            Type::integer(32, true),
            InstructionVariant::Binary { op: InstructionKind::Add },
            vec![x, y],
            Some("a".to_string()),
            None,
        );
        f.add_instruction(
            b1,
            Type::integer(32, true),
            InstructionVariant::Binary { op: InstructionKind::Mul },
            vec![x, y],
            Some("b".to_string()),
            None,
        );

        let two_again = constant(&mut f, 2);
        let x2 = f.add_instruction(
            b2,
            Type::integer(32, true),
            InstructionVariant::Convert { op: InstructionKind::Bitcast, target_type: Type::integer(32, true) },
            vec![two_again],
            Some("x".to_string()),
            None,
        );
        f.add_instruction(
            b2,
            Type::integer(32, true),
            InstructionVariant::Binary { op: InstructionKind::Add },
            vec![x2, y],
            Some("c".to_string()),
            None,
        );

        let cfg = ControlFlowGraph::build(&f);
        let mut analysis = AvailableExpressionsAnalysis::new();
        let result = analyze(&f, &cfg, &mut analysis);

        assert!(result.out_sets[&entry].is_empty());
        assert_eq!(
            result.out_sets[&b1],
            IndexSet::from([
                Expression { operator: Operator::Add, operands: vec!["x".into(), "y".into()] },
                Expression { operator: Operator::Multiply, operands: vec!["x".into(), "y".into()] },
            ])
        );
        assert_eq!(
            result.out_sets[&b2],
            IndexSet::from([
                Expression { operator: Operator::Add, operands: vec!["x".into(), "y".into()] },
            ])
        );
        // the global kill of `x` (redefined in b2) weakens the merge at exit
        assert!(result.out_sets[&exit].is_empty());
    }

    #[test]
    fn unsupported_instruction_kinds_yield_no_expression() {
        let mut f = Function::new("f", Type::Void);
        let entry = f.add_block("entry");
        let a = constant(&mut f, 1);
        let b = constant(&mut f, 2);
        let sub = f.add_instruction(
            entry,
            Type::integer(32, true),
            InstructionVariant::Binary { op: InstructionKind::Sub },
            vec![a, b],
            Some("s".to_string()),
            None,
        );
        let inst = function_instruction(&f, sub);
        assert!(Expression::from_instruction(&f, inst).is_none());
    }

    fn function_instruction(f: &Function, id: crate::value::ValueId) -> &InstructionData {
        f.value(id).as_instruction().unwrap()
    }
}

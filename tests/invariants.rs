//! Property-based checks of the invariants the base specification calls out
//! by name (§8): use-def consistency (I1) and CFG symmetry (I2).

use ir_dataflow::function::Function;
use ir_dataflow::instruction::InstructionVariant;
use ir_dataflow::instruction::InstructionKind;
use ir_dataflow::types::Type;
use ir_dataflow::value::{Literal, ValueData, ValueKind};
use proptest::prelude::*;

/// I1: for every instruction `i` and every `v` in `i.operands`, `i` is in
/// `v.users`, and vice versa.
fn assert_use_def_consistent(f: &Function) {
    for &block_id in f.block_order() {
        for &value_id in &f.block(block_id).instructions {
            let Some(inst) = f.value(value_id).as_instruction() else { continue };
            for &operand in &inst.operands {
                assert!(
                    f.value(operand).users.contains(&value_id),
                    "operand {:?} of {:?} does not list it as a user",
                    operand,
                    value_id
                );
            }
        }
    }
}

#[test]
fn use_def_consistent_after_add_remove_replace() {
    let mut f = Function::new("f", Type::integer(32, true));
    let entry = f.add_block("entry");
    let a = f.add_constant(ValueData::new(Type::integer(32, true), ValueKind::Constant(Literal::Integer(1))));
    let b = f.add_constant(ValueData::new(Type::integer(32, true), ValueKind::Constant(Literal::Integer(2))));
    let c = f.add_constant(ValueData::new(Type::integer(32, true), ValueKind::Constant(Literal::Integer(3))));

    let inst = f.add_instruction(
        entry,
        Type::integer(32, true),
        InstructionVariant::Binary { op: InstructionKind::Add },
        vec![a, b],
        None,
        None,
    );
    assert_use_def_consistent(&f);

    f.add_operand(inst, c);
    assert_use_def_consistent(&f);
    assert!(f.value(c).users.contains(&inst));

    f.remove_operand(inst, a);
    assert_use_def_consistent(&f);
    assert!(!f.value(a).users.contains(&inst));

    f.replace_operand(inst, b, c);
    assert_use_def_consistent(&f);
    // `c` appears twice now (added directly, then via replace); removing `b`
    // must not spuriously deregister `c`.
    assert!(f.value(c).users.contains(&inst));
}

proptest! {
    /// A random sequence of add/remove/replace-operand ops on a single
    /// instruction never breaks I1.
    #[test]
    fn i1_survives_arbitrary_operand_edits(ops in prop::collection::vec(0u8..3, 0..50)) {
        let mut f = Function::new("f", Type::integer(32, true));
        let entry = f.add_block("entry");
        let pool: Vec<_> = (0..4)
            .map(|n| f.add_constant(ValueData::new(Type::integer(32, true), ValueKind::Constant(Literal::Integer(n)))))
            .collect();
        let inst = f.add_instruction(
            entry,
            Type::integer(32, true),
            InstructionVariant::Binary { op: InstructionKind::Add },
            vec![pool[0], pool[1]],
            None,
            None,
        );

        for (i, op) in ops.iter().enumerate() {
            let candidate = pool[i % pool.len()];
            match op {
                0 => f.add_operand(inst, candidate),
                1 => f.remove_operand(inst, candidate),
                _ => {
                    let replacement = pool[(i + 1) % pool.len()];
                    f.replace_operand(inst, candidate, replacement);
                }
            }
            assert_use_def_consistent(&f);
        }
    }
}

/// I2: `b` is in `a.successors` iff `a` is in `b.predecessors`.
fn assert_cfg_symmetric(f: &Function) {
    for &block_id in f.block_order() {
        for &succ in &f.block(block_id).successors {
            assert!(f.block(succ).predecessors.contains(&block_id));
        }
        for &pred in &f.block(block_id).predecessors {
            assert!(f.block(pred).successors.contains(&block_id));
        }
    }
}

proptest! {
    #[test]
    fn i2_survives_arbitrary_edge_edits(ops in prop::collection::vec((0u8..4, 0usize..4, 0usize..4), 0..60)) {
        let mut f = Function::new("f", Type::Void);
        let blocks: Vec<_> = (0..4).map(|i| f.add_block(format!("b{i}"))).collect();

        for (op, i, j) in ops {
            if i == j {
                continue;
            }
            match op {
                0 => f.add_successor(blocks[i], blocks[j]),
                1 => f.add_predecessor(blocks[i], blocks[j]),
                2 => f.remove_successor(blocks[i], blocks[j]),
                _ => f.remove_predecessor(blocks[i], blocks[j]),
            }
            assert_cfg_symmetric(&f);
        }
    }
}

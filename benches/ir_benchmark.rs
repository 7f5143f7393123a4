use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ir_dataflow::cfg::ControlFlowGraph;
use ir_dataflow::dataflow::analyze;
use ir_dataflow::dataflow::constant_propagation::ConstantPropagationAnalysis;
use ir_dataflow::dataflow::live_variables::LiveVariableAnalysis;
use ir_dataflow::dataflow::reaching_definitions::ReachingDefinitionsAnalysis;
use ir_dataflow::function::Function;
use ir_dataflow::instruction::{InstructionKind, InstructionVariant};
use ir_dataflow::types::Type;
use ir_dataflow::value::{Literal, ValueData, ValueKind};

/// A chain of `n` diamonds: entry -> {left_i, right_i} -> join_i -> entry_{i+1}.
/// Each branch defines and redefines a handful of named variables, giving the
/// worklist solver genuine re-convergence work to do.
fn build_diamond_chain(diamonds: usize) -> Function {
    let mut f = Function::new("bench", Type::integer(32, true));
    let mut prev_join = f.add_block("entry");

    for i in 0..diamonds {
        let left = f.add_block(format!("left_{i}"));
        let right = f.add_block(format!("right_{i}"));
        let join = f.add_block(format!("join_{i}"));
        f.add_successor(prev_join, left);
        f.add_successor(prev_join, right);
        f.add_successor(left, join);
        f.add_successor(right, join);

        let one = f.add_constant(ValueData::new(
            Type::integer(32, true),
            ValueKind::Constant(Literal::Integer(1)),
        ));
        let def_left = f.add_instruction(
            left,
            Type::integer(32, true),
            InstructionVariant::Binary { op: InstructionKind::Add },
            vec![one, one],
            Some(format!("v{i}")),
            None,
        );
        f.add_instruction(
            right,
            Type::integer(32, true),
            InstructionVariant::Binary { op: InstructionKind::Mul },
            vec![def_left, one],
            Some(format!("v{i}")),
            None,
        );
        prev_join = join;
    }
    f
}

fn bench_reaching_definitions(c: &mut Criterion) {
    let f = build_diamond_chain(200);
    let cfg = ControlFlowGraph::build(&f);
    c.bench_function("reaching_definitions_200_diamonds", |b| {
        b.iter(|| {
            let mut analysis = ReachingDefinitionsAnalysis;
            black_box(analyze(&f, &cfg, &mut analysis))
        });
    });
}

fn bench_live_variables(c: &mut Criterion) {
    let f = build_diamond_chain(200);
    let cfg = ControlFlowGraph::build(&f);
    c.bench_function("live_variables_200_diamonds", |b| {
        b.iter(|| {
            let mut analysis = LiveVariableAnalysis;
            black_box(analyze(&f, &cfg, &mut analysis))
        });
    });
}

fn bench_constant_propagation(c: &mut Criterion) {
    let f = build_diamond_chain(200);
    let cfg = ControlFlowGraph::build(&f);
    c.bench_function("constant_propagation_200_diamonds", |b| {
        b.iter(|| {
            let mut analysis = ConstantPropagationAnalysis;
            black_box(analyze(&f, &cfg, &mut analysis))
        });
    });
}

fn bench_cfg_construction(c: &mut Criterion) {
    let f = build_diamond_chain(200);
    c.bench_function("cfg_construction_200_diamonds", |b| {
        b.iter(|| black_box(ControlFlowGraph::build(&f)));
    });
}

criterion_group!(
    benches,
    bench_cfg_construction,
    bench_reaching_definitions,
    bench_live_variables,
    bench_constant_propagation,
);
criterion_main!(benches);

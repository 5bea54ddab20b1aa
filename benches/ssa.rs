//! Benchmarks for CFG construction and SSA conversion.
//!
//! Measures the pipeline on synthetic functions of growing size:
//! - Block formation and dominator computation on a chain of diamonds
//! - Full SSA conversion of the same functions
//! - Sequential vs parallel whole-program conversion

extern crate bril_ssa;

use bril_ssa::{
    analysis::ssa::{convert_program, convert_program_parallel},
    ir::{Argument, Code, Function, Instruction, Program, Type},
    ControlFlowGraph, SsaConfig,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Builds `diamonds` if/else diamonds in a row, each assigning `x` on both arms.
fn diamond_chain(name: &str, diamonds: usize) -> Function {
    let int = Type::primitive("int");
    let mut instrs: Vec<Code> = vec![Instruction::constant("x", int.clone(), 0).into()];

    for i in 0..diamonds {
        instrs.push(Instruction::br("c", format!("l{i}"), format!("r{i}")).into());
        instrs.push(Code::label(format!("l{i}")));
        instrs.push(Instruction::value("add", "x", int.clone(), ["x", "x"]).into());
        instrs.push(Instruction::jmp(format!("j{i}")).into());
        instrs.push(Code::label(format!("r{i}")));
        instrs.push(Instruction::value("sub", "x", int.clone(), ["x", "x"]).into());
        instrs.push(Code::label(format!("j{i}")));
    }
    instrs.push(Instruction::ret(["x"]).into());

    Function::new(name)
        .with_args([Argument::new("c", Type::primitive("bool"))])
        .with_return_type(int)
        .with_instrs(instrs)
}

/// Benchmark building the CFG and its dominators.
fn bench_dominators(c: &mut Criterion) {
    let mut group = c.benchmark_group("dominators");
    for diamonds in [8, 64, 256] {
        let function = diamond_chain("chain", diamonds);
        group.bench_with_input(BenchmarkId::from_parameter(diamonds), &function, |b, f| {
            b.iter(|| {
                let cfg = ControlFlowGraph::new(black_box(f)).unwrap();
                black_box(cfg.dominators().unwrap())
            });
        });
    }
    group.finish();
}

/// Benchmark the full SSA conversion of one function.
fn bench_convert_to_ssa(c: &mut Criterion) {
    let config = SsaConfig::default();
    let mut group = c.benchmark_group("convert_to_ssa");
    for diamonds in [8, 64, 256] {
        let function = diamond_chain("chain", diamonds);
        group.bench_with_input(BenchmarkId::from_parameter(diamonds), &function, |b, f| {
            b.iter(|| {
                let mut cfg = ControlFlowGraph::new(black_box(f)).unwrap();
                cfg.convert_to_ssa(&config).unwrap();
                black_box(cfg)
            });
        });
    }
    group.finish();
}

/// Benchmark whole-program conversion, sequential against parallel.
fn bench_program(c: &mut Criterion) {
    let config = SsaConfig::default();
    let program = Program::new((0..32).map(|i| diamond_chain(&format!("f{i}"), 32)));

    c.bench_function("program_sequential", |b| {
        b.iter(|| black_box(convert_program(black_box(&program), &config).unwrap()));
    });
    c.bench_function("program_parallel", |b| {
        b.iter(|| black_box(convert_program_parallel(black_box(&program), &config).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_dominators,
    bench_convert_to_ssa,
    bench_program
);
criterion_main!(benches);

use cim_capability::{extend, resolve_behavior, Module, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn module_with(behaviors: usize, data: usize) -> Module {
    let builder = (0..behaviors).fold(Module::builder(), |builder, i| {
        builder.behavior(format!("behavior_{}", i), |_, _| Ok(Value::Null))
    });
    (0..data)
        .fold(builder, |builder, i| builder.data(format!("data_{}", i), i as f64))
        .build()
}

fn benchmark_extend(c: &mut Criterion) {
    let mut group = c.benchmark_group("extend");

    for size in [10, 100, 1_000].iter() {
        let source = module_with(*size, *size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let target = Module::new();
                extend(black_box(&target), black_box(&source)).unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_resolve_through_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_behavior");

    for depth in [1, 8, 32].iter() {
        let root = module_with(0, 0);
        let leaf = (0..*depth).fold(root.clone(), |parent, _| {
            let child = Module::new();
            extend(&child, &parent).unwrap();
            child
        });
        root.define_behavior("deep", |_, _| Ok(Value::Null)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, depth| {
            b.iter(|| resolve_behavior(black_box(&leaf), "deep", *depth).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_extend, benchmark_resolve_through_chain);

criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swarmopt::random::{
    Cmwc4096, Engine, Kiss, LEcuyer, MersenneTwister, Mwc256, QuickDirty, Random, Seedable,
    SharedEngine, XorShift,
};

fn engines() -> Vec<Box<dyn Engine>> {
    vec![
        Box::new(QuickDirty::with_seed(1)),
        Box::new(LEcuyer::with_seed(1)),
        Box::new(Mwc256::with_seed(1)),
        Box::new(Cmwc4096::with_seed(1)),
        Box::new(XorShift::with_seed(1)),
        Box::new(Kiss::with_seed(1)),
        Box::new(MersenneTwister::with_seed(1)),
    ]
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    for mut engine in engines() {
        group.bench_function(BenchmarkId::from_parameter(engine.name()), |b| {
            b.iter(|| black_box(engine.draw()))
        });
    }

    let mut shared = SharedEngine::new(MersenneTwister::with_seed(1));
    group.bench_function(BenchmarkId::from_parameter("shared-mt19937"), |b| {
        b.iter(|| black_box(shared.draw()))
    });
    group.finish();
}

fn bench_distributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("distributions");
    let mut rng = Random::new(MersenneTwister::with_seed(1)).unwrap();

    group.bench_function("uniform", |b| b.iter(|| black_box(rng.uniform())));
    group.bench_function("gaussian", |b| b.iter(|| black_box(rng.gaussian(0.0, 1.0))));
    group.bench_function("index", |b| b.iter(|| black_box(rng.index(black_box(100)))));

    for n in [3, 30, 300].iter() {
        group.bench_with_input(BenchmarkId::new("sphere", n), n, |b, &n| {
            b.iter(|| black_box(rng.sphere(n, 1.0)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_draw, bench_distributions);
criterion_main!(benches);

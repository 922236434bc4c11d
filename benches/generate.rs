//! Benchmarks for galaxy generation and per-frame jitter.
//!
//! Run with: `cargo bench --bench generate`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use galaxy::{generate, perturb, Parameters};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const COUNTS: [u32; 3] = [10_000, 200_000, 1_000_000];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);

    for count in COUNTS {
        let params = Parameters {
            count,
            ..Parameters::default()
        };
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &params, |b, params| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| generate(black_box(params), &mut rng).unwrap());
        });
    }

    group.finish();
}

fn bench_perturb(c: &mut Criterion) {
    let mut group = c.benchmark_group("perturb");

    for count in COUNTS {
        let params = Parameters {
            count,
            ..Parameters::default()
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let mut field = generate(&params, &mut rng).unwrap();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| perturb(&mut field, black_box(params.noise), &mut rng));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_perturb);
criterion_main!(benches);

mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flow_sigil::frame::Bounds;
use flow_sigil::sampling::{LatticeSampling, PoissonDiskSampling, PositionSampling};
use glam::Vec2;
use rand::rngs::ChaCha8Rng;
use rand::SeedableRng;

const RADII: [f32; 4] = [100.0, 50.0, 20.0, 10.0];

fn sampling_poisson_benches(c: &mut Criterion) {
    let domain = Bounds::new(Vec2::ZERO, Vec2::splat(800.0));
    let mut group = c.benchmark_group("sampling/poisson_disk");

    for &radius in &RADII {
        let strategy = PoissonDiskSampling::new(radius, 30);
        let expected = strategy
            .generate(domain, &mut ChaCha8Rng::seed_from_u64(0xBEEF))
            .len();
        group.throughput(common::elements_throughput(expected));

        let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE ^ radius as u64);
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, _| {
            b.iter(|| black_box(strategy.generate(domain, &mut rng).len()));
        });
    }

    group.finish();
}

fn sampling_lattice_benches(c: &mut Criterion) {
    let domain = Bounds::new(Vec2::splat(-160.0), Vec2::splat(960.0));
    let mut group = c.benchmark_group("sampling/lattice");

    for spacing in [50.0f32, 15.0, 5.0] {
        let strategy = LatticeSampling::new(spacing);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        group.throughput(common::elements_throughput(
            strategy.generate(domain, &mut rng).len(),
        ));
        group.bench_with_input(BenchmarkId::from_parameter(spacing), &spacing, |b, _| {
            b.iter(|| black_box(strategy.generate(domain, &mut rng).len()));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_poisson_benches, sampling_lattice_benches
}
criterion_main!(benches);

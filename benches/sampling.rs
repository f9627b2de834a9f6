//! Criterion benchmarks for samplers and field-of-view transforms.
//!
//! Run with: cargo bench --bench sampling
//!
//! Tracks:
//! - dense Normal fields (noise parameters)
//! - random patch extraction with and without boundary synthesis
//! - pad/crop with each boundary mode

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use medaug::random::{get_rng, SampleShape, Sampler};
use medaug::transforms::{PadTransform, RandomGaussianNoiseTransform, RandomPatchTransform, Transform};
use medaug::Bound;
use ndarray::{ArrayD, IxDyn};

/// Channel-first test volume
fn create_test_volume(shape: &[usize]) -> ArrayD<f32> {
    let numel: usize = shape.iter().product();
    let data: Vec<f32> = (0..numel).map(|i| (i % 256) as f32).collect();
    ArrayD::from_shape_vec(IxDyn(shape), data).unwrap()
}

fn bench_dense_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_sampling");
    let normal = Sampler::normal(0.0, 1.0).unwrap();
    for &side in &[32usize, 64, 128] {
        let shape = vec![side, side, side];
        group.throughput(Throughput::Elements((side * side * side) as u64));
        group.bench_with_input(BenchmarkId::new("normal", side), &shape, |b, shape| {
            let mut rng = get_rng(Some(0));
            b.iter(|| {
                let field = normal
                    .sample(&mut rng, SampleShape::Shape(black_box(shape.clone())))
                    .unwrap();
                black_box(field)
            })
        });
    }
    group.finish();
}

fn bench_random_patch(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_patch");
    let volume = create_test_volume(&[1, 128, 128, 128]);
    for &patch in &[32usize, 96, 160] {
        let t = RandomPatchTransform::new(&[patch]);
        group.bench_with_input(BenchmarkId::new("patch", patch), &volume, |b, volume| {
            let mut rng = get_rng(Some(0));
            b.iter(|| black_box(t.call(black_box(volume), &mut rng).unwrap()))
        });
    }
    group.finish();
}

fn bench_pad_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pad");
    let volume = create_test_volume(&[1, 64, 64, 64]);
    for bound in [Bound::Constant, Bound::Replicate, Bound::Dct2, Bound::Dft] {
        let t = PadTransform::new(vec![8.0]).bound(bound);
        group.bench_with_input(
            BenchmarkId::new("pad8", bound.to_string()),
            &volume,
            |b, volume| {
                let mut rng = get_rng(Some(0));
                b.iter(|| black_box(t.call(black_box(volume), &mut rng).unwrap()))
            },
        );
    }
    group.finish();
}

fn bench_noise(c: &mut Criterion) {
    let volume = create_test_volume(&[2, 64, 64, 64]);
    let t = RandomGaussianNoiseTransform::from_range(0.1).unwrap();
    c.bench_function("gaussian_noise_2x64^3", |b| {
        let mut rng = get_rng(Some(0));
        b.iter(|| black_box(t.call(black_box(&volume), &mut rng).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_dense_sampling,
    bench_random_patch,
    bench_pad_modes,
    bench_noise
);
criterion_main!(benches);

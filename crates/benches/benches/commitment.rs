//! Benchmarks for commitments and blinding-factor balancing

use confidential_core::{ConfidentialContext, Scalar};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pedersen::{Commitment, CommitmentEngine};
use rand::thread_rng;

fn bench_commit(c: &mut Criterion) {
    let ctx = ConfidentialContext::new().unwrap();
    let engine = CommitmentEngine::new(&ctx);
    let blind = Scalar::random(&mut thread_rng());

    c.bench_function("commit", |b| {
        b.iter(|| engine.commit(black_box(&blind), black_box(1_000_000)).unwrap())
    });
}

fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify_tally");
    let ctx = ConfidentialContext::new().unwrap();
    let engine = CommitmentEngine::new(&ctx);
    let mut rng = thread_rng();

    for n in [2usize, 16, 128] {
        group.throughput(Throughput::Elements(2 * n as u64));

        let mut blinds: Vec<Scalar> = (0..2 * n - 1).map(|_| Scalar::random(&mut rng)).collect();
        blinds.push(engine.blind_sum(&blinds, n).unwrap());
        let commitments: Vec<Commitment> = blinds
            .iter()
            .map(|b| engine.commit(b, 100).unwrap())
            .collect();
        let (inputs, outputs) = commitments.split_at(n);

        group.bench_with_input(BenchmarkId::new("balanced", n), &n, |b, _| {
            b.iter(|| assert!(engine.verify_tally(black_box(inputs), black_box(outputs))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_commit, bench_tally);
criterion_main!(benches);

//! Benchmarks for Borromean ring signatures

use borromean::{BorromeanProver, BorromeanVerifier, Ring, RingWitness};
use confidential_core::{Generator, GroupElement, Scalar};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use curve25519_dalek::ristretto::RistrettoPoint;
use rand::thread_rng;

fn setup(rings: usize, size: usize) -> (Vec<Ring>, Vec<RingWitness>) {
    let mut rng = thread_rng();
    let base = Generator::basepoint().element();
    let mut out = Vec::with_capacity(rings);
    let mut witnesses = Vec::with_capacity(rings);

    for i in 0..rings {
        let index = i % size;
        let secret = Scalar::random(&mut rng);
        let members = (0..size)
            .map(|j| {
                if j == index {
                    base * secret
                } else {
                    GroupElement::from(RistrettoPoint::random(&mut rng))
                }
            })
            .collect();
        out.push(Ring::new(members).unwrap());
        witnesses.push(RingWitness::new(index, secret, Scalar::random(&mut rng)));
    }
    (out, witnesses)
}

fn bench_borromean(c: &mut Criterion) {
    let mut group = c.benchmark_group("borromean");
    let prover = BorromeanProver::default();
    let verifier = BorromeanVerifier::default();

    for rings in [1usize, 8, 32] {
        group.throughput(Throughput::Elements((rings * 4) as u64));
        let (ring_set, witnesses) = setup(rings, 4);
        let signature = prover
            .sign_with_rng(&mut thread_rng(), &ring_set, &witnesses, b"bench")
            .unwrap();

        group.bench_with_input(BenchmarkId::new("sign", rings), &rings, |b, _| {
            let mut rng = thread_rng();
            b.iter(|| {
                prover
                    .sign_with_rng(&mut rng, black_box(&ring_set), &witnesses, b"bench")
                    .unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("verify", rings), &rings, |b, _| {
            b.iter(|| {
                assert!(verifier
                    .verify(black_box(&signature), &ring_set, b"bench")
                    .unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_borromean);
criterion_main!(benches);

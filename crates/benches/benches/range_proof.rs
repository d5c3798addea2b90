//! Benchmarks for range proof generation, verification and rewinding

use confidential_core::{ConfidentialContext, Scalar};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pedersen::CommitmentEngine;
use rand::thread_rng;
use rangeproof::{BatchItem, ProofOptions, RangeProver, RangeVerifier};

const NONCE: [u8; 32] = [7u8; 32];

fn bench_range_proofs(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof");
    let ctx = ConfidentialContext::new().unwrap();
    let engine = CommitmentEngine::new(&ctx);
    let prover = RangeProver::new(&ctx);
    let verifier = RangeVerifier::new(&ctx);

    for bits in [8u32, 32, 64] {
        group.throughput(Throughput::Elements(bits as u64));

        let value = (1u64 << (bits - 1)) - 1;
        let blind = Scalar::random(&mut thread_rng());
        let commitment = engine.commit(&blind, value).unwrap();
        let options = ProofOptions::default().with_min_bits(bits);
        let proof = prover
            .sign(&commitment, &blind, &NONCE, value, &options, b"", b"")
            .unwrap();

        group.bench_with_input(BenchmarkId::new("sign", bits), &bits, |b, _| {
            b.iter(|| {
                prover
                    .sign(&commitment, &blind, &NONCE, black_box(value), &options, b"", b"")
                    .unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("verify", bits), &bits, |b, _| {
            b.iter(|| verifier.verify(&commitment, black_box(&proof), b"").unwrap())
        });

        group.bench_with_input(BenchmarkId::new("rewind", bits), &bits, |b, _| {
            b.iter(|| {
                verifier
                    .rewind(&commitment, black_box(&proof), b"", &NONCE)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_batch_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_batch");
    let ctx = ConfidentialContext::new().unwrap();
    let engine = CommitmentEngine::new(&ctx);
    let prover = RangeProver::new(&ctx);
    let verifier = RangeVerifier::new(&ctx);
    let mut rng = thread_rng();

    for n in [4usize, 16, 64] {
        group.throughput(Throughput::Elements(n as u64));

        let proofs: Vec<_> = (0..n as u64)
            .map(|i| {
                let value = 1_000 + i;
                let blind = Scalar::random(&mut rng);
                let commitment = engine.commit(&blind, value).unwrap();
                let proof = prover
                    .sign(&commitment, &blind, &NONCE, value, &ProofOptions::default(), b"", b"")
                    .unwrap();
                (commitment, proof)
            })
            .collect();
        let items: Vec<BatchItem<'_>> = proofs
            .iter()
            .map(|(commitment, proof)| BatchItem {
                commitment,
                proof,
                extra: b"",
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("verify_batch", n), &n, |b, _| {
            b.iter(|| {
                let results = verifier.verify_batch(black_box(&items));
                assert!(results.iter().all(|r| r.is_ok()));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_range_proofs, bench_batch_verification);
criterion_main!(benches);

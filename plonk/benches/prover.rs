use criterion::{criterion_group, criterion_main, Criterion};
use merlin::Transcript;
use plonk_algebra::{bls12_381::BLSScalar, prelude::*};
use plonk_prover::plonk::constraint_system::{SparseR1CS, Variable};
use plonk_prover::plonk::indexer::indexer;
use plonk_prover::plonk::prover::prover;
use plonk_prover::plonk::verifier::verifier;
use plonk_prover::poly_commit::kzg_poly_com::KZGCommitmentSchemeBLS;
use plonk_prover::poly_commit::pcs::PolyComScheme;

/// A chain of `n_gates` multiply-add gates: acc = acc * x + acc.
fn build_cs(n_gates: usize) -> SparseR1CS<BLSScalar> {
    let mut cs = SparseR1CS::new();
    let x = cs.new_public_input();
    let mut acc: Variable = cs.new_secret_input();
    for _ in 0..n_gates / 2 {
        let prod = cs.mul(acc, x);
        acc = cs.add(prod, acc);
    }
    cs
}

fn bench_plonk(c: &mut Criterion) {
    let mut prng = test_rng();
    let cs = build_cs(1 << 10);
    let pcs = KZGCommitmentSchemeBLS::new(2048, &mut prng);
    let prover_params = indexer(&cs, &pcs).unwrap();

    let public = [BLSScalar::from(3u32)];
    let secret = [BLSScalar::from(5u32)];

    let mut prover_group = c.benchmark_group("bench_prover");
    prover_group.sample_size(10);
    prover_group.bench_function("prover".to_string(), |b| {
        b.iter(|| {
            let mut transcript = Transcript::new(b"BenchPlonk");
            prover(
                &mut transcript,
                &pcs,
                &cs,
                &prover_params,
                &public,
                &secret,
            )
            .unwrap()
        })
    });
    prover_group.finish();

    let proof = {
        let mut transcript = Transcript::new(b"BenchPlonk");
        prover(&mut transcript, &pcs, &cs, &prover_params, &public, &secret).unwrap()
    };
    let verifier_pcs = pcs.shrink_to_verifier_only();
    let verifier_params_ref = prover_params.get_verifier_params_ref();

    let mut verifier_group = c.benchmark_group("bench_verifier");
    verifier_group.bench_function("verifier".to_string(), |b| {
        b.iter(|| {
            let mut transcript = Transcript::new(b"BenchPlonk");
            verifier(
                &mut transcript,
                &verifier_pcs,
                verifier_params_ref,
                &public,
                &proof,
            )
            .unwrap()
        })
    });
    verifier_group.finish();
}

criterion_group!(benches, bench_plonk);
criterion_main!(benches);

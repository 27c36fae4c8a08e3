use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::ConstraintSystem,
    helpers::{
        coset_generator, compute_h, compute_linearized_polynomial, compute_lro, compute_z,
        eval_constraint_ordering, eval_constraints, eval_id_cosets, eval_starts_at_one,
        evaluate_cosets, first_lagrange_eval, fold_h, shift_z, OpenedValues, PlonkChallenges,
    },
    indexer::{get_domain_and_root, PlonkPK, PlonkPf, PlonkProof},
    transcript::{transcript_init_plonk, ChallengeTranscript, PLONK_CHALLENGES},
};
use crate::poly_commit::{field_polynomial::FpPolynomial, pcs::PolyComScheme};
use crate::utils::join;
use ark_std::{end_timer, start_timer};
use merlin::Transcript;
use plonk_algebra::prelude::*;

/// PLONK Prover: it solves the constraint system `cs` on the `public` and `secret` inputs,
/// and produces a proof that the resulting witness satisfies it.
/// Proof verifier must use a transcript with same state as prover and match the public parameters.
/// It returns [PlonkError] if the inputs do not satisfy `cs`, before any commitment is computed,
/// or if an error occurs in computing proof commitments, meaning parameters of the polynomial
/// commitment scheme `pcs` do not match the constraint system parameters.
/// # Example
/// ```
/// use plonk_prover::plonk::{
///     constraint_system::SparseR1CS,
///     verifier::verifier,
///     prover::prover,
///     indexer::indexer
/// };
/// use plonk_prover::poly_commit::kzg_poly_com::KZGCommitmentSchemeBLS;
/// use merlin::Transcript;
/// use rand_chacha::ChaChaRng;
/// use plonk_algebra::{prelude::*, bls12_381::BLSScalar};
///
/// let mut prng = ChaChaRng::from_seed([0u8; 32]);
/// let pcs = KZGCommitmentSchemeBLS::new(20, &mut prng);
/// let mut cs = SparseR1CS::new();
///
/// // circuit (x_0 + x_1) * x_1;
/// let x_0 = cs.new_public_input();
/// let x_1 = cs.new_secret_input();
/// let sum = cs.add(x_0, x_1);
/// cs.mul(sum, x_1);
///
/// let one = BLSScalar::one();
/// let two = one.add(&one);
/// let prover_params = indexer(&cs, &pcs).unwrap();
///
/// let proof = {
///     let mut transcript = Transcript::new(b"Test");
///     prover(&mut transcript, &pcs, &cs, &prover_params, &[one], &[two]).unwrap()
/// };
///
/// let mut transcript = Transcript::new(b"Test");
/// assert!(
///     verifier(&mut transcript, &pcs, prover_params.get_verifier_params_ref(), &[one], &proof).is_ok()
/// )
/// ```
pub fn prover<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    transcript: &mut Transcript,
    pcs: &PCS,
    cs: &CS,
    prover_params: &PlonkPK<PCS>,
    public: &[PCS::Field],
    secret: &[PCS::Field],
) -> Result<PlonkPf<PCS>> {
    let solve_timer = start_timer!(|| "Solve the constraint system");
    let witness = cs.solve(public, secret)?;
    end_timer!(solve_timer);

    prover_with_solution(transcript, pcs, cs, prover_params, &witness)
}

/// PLONK Prover over an assignment of every variable of `cs`.
/// The assignment is not checked against the constraints: a proof for an
/// unsatisfying assignment is computed as usual, and is rejected by the verifier.
pub fn prover_with_solution<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    transcript: &mut Transcript,
    pcs: &PCS,
    cs: &CS,
    prover_params: &PlonkPK<PCS>,
    witness: &[PCS::Field],
) -> Result<PlonkPf<PCS>> {
    let prover_timer = start_timer!(|| "PLONK::Prover");

    let verifier_params = prover_params.get_verifier_params_ref();
    let n = verifier_params.cs_size;
    if cs.size() != n || witness.len() != cs.num_vars() {
        return Err(PlonkError::FuncParamsError);
    }

    let get_domain_and_root_timer = start_timer!(|| "Get the domain and a root");
    let (domain, root) = get_domain_and_root::<PCS::Field>(&verifier_params.domain)?;
    let (quotient_domain, _) = get_domain_and_root::<PCS::Field>(&prover_params.quotient_domain)?;
    let u = coset_generator::<PCS::Field>(n)?;
    end_timer!(get_domain_and_root_timer);

    let public_inputs: Vec<PCS::Field> = cs
        .public_vars_witness_indices()
        .iter()
        .map(|index| witness[*index])
        .collect();

    transcript_init_plonk(transcript, verifier_params, &public_inputs);
    let mut challenges = ChallengeTranscript::new(transcript, &PLONK_CHALLENGES);

    // 1. lay out the witness over the wires, interpolate and commit
    let w_timer = start_timer!(|| "Round 1: witness polynomials");
    let layout_timer = start_timer!(|| "Lay out the wires");
    cs.check_wiring()?;
    let lro = compute_lro(&cs.wiring(), witness);
    end_timer!(layout_timer);

    let w_poly_timer = start_timer!(|| "Prepare the polynomials");
    let ifft = |evals: &[PCS::Field]| FpPolynomial::ifft_with_domain(&domain, evals);
    let (l_poly, (r_poly, o_poly)) = join(
        || ifft(&lro[0]),
        || join(|| ifft(&lro[1]), || ifft(&lro[2])),
    );
    let lro_polys = vec![l_poly, r_poly, o_poly];
    end_timer!(w_poly_timer);

    let w_comm_timer = start_timer!(|| "Commit the polynomials");
    let cm_lro = lro_polys
        .iter()
        .map(|poly| pcs.commit(poly))
        .collect::<Result<Vec<_>>>()?;
    end_timer!(w_comm_timer);
    end_timer!(w_timer);

    // 2. get challenge gamma, bound to the wire commitments in the order l, r, o
    for cm in cm_lro.iter() {
        challenges.bind_commitment("gamma", cm)?;
    }
    let gamma = challenges.compute_field_challenge::<PCS::Field>("gamma")?;

    // 3. build z while the wires are evaluated on the cosets, and commit
    let z_timer = start_timer!(|| "Round 2: z polynomial");
    let z_poly_timer = start_timer!(|| "Prepare the polynomial and the wire cosets");
    let ((z_lagrange, zu_lagrange), lro_cosets) = join(
        || {
            let z = compute_z(
                &lro,
                &prover_params.s_lagrange,
                &verifier_params.k,
                &root,
                &gamma,
            );
            let zu = shift_z(&z);
            (z, zu)
        },
        || {
            lro_polys
                .iter()
                .map(|poly| evaluate_cosets(poly, &domain, &u))
                .collect::<Vec<_>>()
        },
    );
    let z_poly = ifft(&z_lagrange);
    end_timer!(z_poly_timer);

    let z_comm_timer = start_timer!(|| "Commit the polynomial");
    let cm_z = pcs.commit(&z_poly)?;
    end_timer!(z_comm_timer);
    end_timer!(z_timer);

    // 4. get challenge alpha
    challenges.bind_commitment("alpha", &cm_z)?;
    let alpha = challenges.compute_field_challenge::<PCS::Field>("alpha")?;

    // 5. build h from the gate, ordering and starting terms, split into 3 pieces and commit
    let h_timer = start_timer!(|| "Round 3: h polynomial");
    let terms_timer = start_timer!(|| "Evaluate the terms on the cosets");
    let z_cosets = evaluate_cosets(&z_poly, &domain, &u);
    let zu_cosets = evaluate_cosets(&ifft(&zu_lagrange), &domain, &u);

    // qk, completed with the public inputs on their rows.
    let mut qk_full = prover_params.qk_lagrange.clone();
    for (row, value) in verifier_params
        .public_vars_constraint_indices
        .iter()
        .zip(public_inputs.iter())
    {
        qk_full[*row].add_assign(value);
    }
    let qk_full_cosets = evaluate_cosets(&ifft(&qk_full), &domain, &u);
    let id_cosets = eval_id_cosets(&u, n);

    let constraints = eval_constraints(&lro_cosets, &prover_params.q_coset_evals, &qk_full_cosets);
    let ordering = eval_constraint_ordering(
        &lro_cosets,
        &prover_params.s_coset_evals,
        &z_cosets,
        &zu_cosets,
        &id_cosets,
        &verifier_params.k,
        &gamma,
    );
    let starts_at_one = eval_starts_at_one(&prover_params.l1_coset_evals, &z_cosets);
    end_timer!(terms_timer);

    let h_poly_timer = start_timer!(|| "Prepare the polynomial");
    let h_polys = compute_h(
        &quotient_domain,
        &constraints,
        &ordering,
        &starts_at_one,
        &alpha,
        &u,
        n,
    )?;
    end_timer!(h_poly_timer);

    let h_comm_timer = start_timer!(|| "Commit the polynomial");
    let cm_h = h_polys
        .iter()
        .map(|poly| pcs.commit(poly))
        .collect::<Result<Vec<_>>>()?;
    end_timer!(h_comm_timer);
    end_timer!(h_timer);

    // 6. get challenge zeta, outside of the domain
    for cm in cm_h.iter() {
        challenges.bind_commitment("zeta", cm)?;
    }
    let zeta = challenges.compute_field_challenge_outside_domain::<PCS::Field>("zeta", n)?;

    // 7. a) Evaluate the openings of wire/permutation polynomials at \zeta, and
    // the opening of z(X) at \omega * \zeta.
    let r_timer = start_timer!(|| "Round 4: r polynomial and the rest");
    let eval_timer = start_timer!(|| "Compute the evaluation of polynomials");
    let zeta_omega = zeta.mul(&root);
    let z_shifted_opening = pcs.open(&z_poly, &zeta_omega)?;

    let evals = OpenedValues {
        l: lro_polys[0].eval(&zeta),
        r: lro_polys[1].eval(&zeta),
        o: lro_polys[2].eval(&zeta),
        s1: prover_params.s_polys[0].eval(&zeta),
        s2: prover_params.s_polys[1].eval(&zeta),
        zu: z_shifted_opening.claimed_value,
    };
    end_timer!(eval_timer);

    // b) build the linearization polynomial r, and fold the pieces of h at \zeta^n.
    let r_poly_timer = start_timer!(|| "Compute r polynomial");
    let l1_eval_zeta = first_lagrange_eval(&zeta, n)?;
    let lin_poly = compute_linearized_polynomial(
        &prover_params.q_polys,
        &prover_params.s_polys[2],
        &z_poly,
        &verifier_params.k,
        &evals,
        &PlonkChallenges { gamma, alpha, zeta },
        &l1_eval_zeta,
    );
    let cm_lin = pcs.commit(&lin_poly)?;

    let zeta_to_n = zeta.pow(&[n as u64]);
    let folded_h = fold_h(&h_polys, &zeta_to_n);
    let cm_folded_h = fold_h(&cm_h, &zeta_to_n);
    end_timer!(r_poly_timer);

    // c) batch open at \zeta.
    let zeta_proof_timer = start_timer!(|| "Compute the witness for opening at zeta");
    let batched_proof = pcs.batch_open_single_point(
        &[
            &folded_h,
            &lin_poly,
            &lro_polys[0],
            &lro_polys[1],
            &lro_polys[2],
            &prover_params.s_polys[0],
            &prover_params.s_polys[1],
        ],
        &[
            &cm_folded_h,
            &cm_lin,
            &cm_lro[0],
            &cm_lro[1],
            &cm_lro[2],
            &verifier_params.cm_s_vec[0],
            &verifier_params.cm_s_vec[1],
        ],
        &zeta,
    )?;
    end_timer!(zeta_proof_timer);
    end_timer!(r_timer);

    end_timer!(prover_timer);
    Ok(PlonkProof {
        cm_lro,
        cm_z,
        cm_h,
        batched_proof,
        z_shifted_opening,
    })
}

use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::{N_SELECTORS, N_WIRES_PER_GATE},
    helpers::{
        compute_linearized_polynomial, eval_public_var_poly, first_lagrange_eval, fold_h,
        OpenedValues, PlonkChallenges,
    },
    indexer::{PlonkPf, PlonkVK},
    transcript::{transcript_init_plonk, ChallengeTranscript, PLONK_CHALLENGES},
};
use crate::poly_commit::pcs::PolyComScheme;
use ark_std::{end_timer, start_timer};
use merlin::Transcript;
use plonk_algebra::prelude::*;

/// The number of polynomials opened at \zeta in a batch.
const N_BATCHED_OPENINGS: usize = 7;

/// Verify a proof.
/// The transcript must be in the same state as the prover's before proving.
/// It returns [PlonkError::VerificationError] if the proof is malformed or invalid.
pub fn verifier<PCS: PolyComScheme>(
    transcript: &mut Transcript,
    pcs: &PCS,
    verifier_params: &PlonkVK<PCS>,
    public_inputs: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()> {
    let verifier_timer = start_timer!(|| "PLONK::Verifier");

    if proof.cm_lro.len() != N_WIRES_PER_GATE
        || proof.cm_h.len() != N_WIRES_PER_GATE
        || proof.batched_proof.claimed_values.len() != N_BATCHED_OPENINGS
        || public_inputs.len() != verifier_params.public_vars_constraint_indices.len()
        || verifier_params.cm_q_vec.len() != N_SELECTORS
        || verifier_params.cm_s_vec.len() != N_WIRES_PER_GATE
        || verifier_params.k.len() != N_WIRES_PER_GATE
    {
        return Err(PlonkError::VerificationError);
    }
    let n = verifier_params.cs_size;

    let challenges_timer = start_timer!(|| "Replay the challenges");
    transcript_init_plonk(transcript, verifier_params, public_inputs);
    let mut challenges = ChallengeTranscript::new(transcript, &PLONK_CHALLENGES);
    for cm in proof.cm_lro.iter() {
        challenges.bind_commitment("gamma", cm)?;
    }
    let gamma = challenges.compute_field_challenge::<PCS::Field>("gamma")?;
    challenges.bind_commitment("alpha", &proof.cm_z)?;
    let alpha = challenges.compute_field_challenge::<PCS::Field>("alpha")?;
    for cm in proof.cm_h.iter() {
        challenges.bind_commitment("zeta", cm)?;
    }
    let zeta = challenges.compute_field_challenge_outside_domain::<PCS::Field>("zeta", n)?;
    end_timer!(challenges_timer);

    let values = &proof.batched_proof.claimed_values;
    let (h_eval_zeta, lin_eval_zeta) = (values[0], values[1]);
    let evals = OpenedValues {
        l: values[2],
        r: values[3],
        o: values[4],
        s1: values[5],
        s2: values[6],
        zu: proof.z_shifted_opening.claimed_value,
    };

    let openings_timer = start_timer!(|| "Check the openings");
    let l1_eval_zeta = first_lagrange_eval(&zeta, n)?;
    let cm_lin = compute_linearized_polynomial(
        &verifier_params.cm_q_vec,
        &verifier_params.cm_s_vec[2],
        &proof.cm_z,
        &verifier_params.k,
        &evals,
        &PlonkChallenges { gamma, alpha, zeta },
        &l1_eval_zeta,
    );
    let zeta_to_n = zeta.pow(&[n as u64]);
    let cm_folded_h = fold_h(&proof.cm_h, &zeta_to_n);

    pcs.batch_verify_single_point(
        &[
            &cm_folded_h,
            &cm_lin,
            &proof.cm_lro[0],
            &proof.cm_lro[1],
            &proof.cm_lro[2],
            &verifier_params.cm_s_vec[0],
            &verifier_params.cm_s_vec[1],
        ],
        &zeta,
        &proof.batched_proof,
    )?;
    pcs.verify(
        &proof.cm_z,
        &zeta.mul(&verifier_params.root),
        &proof.z_shifted_opening,
    )?;
    end_timer!(openings_timer);

    // lin(\zeta) + PI(\zeta) + \alpha * zu * (l + s1 + \gamma)(r + s2 + \gamma)(o + \gamma)
    //     - \alpha^2 * L1(\zeta) == h(\zeta) * (\zeta^n - 1)
    let pi_eval_zeta = eval_public_var_poly::<PCS>(verifier_params, public_inputs, &zeta)?;
    let ordering_remainder = alpha
        .mul(&evals.zu)
        .mul(&evals.l.add(&evals.s1).add(&gamma))
        .mul(&evals.r.add(&evals.s2).add(&gamma))
        .mul(&evals.o.add(&gamma));
    let lhs = lin_eval_zeta
        .add(&pi_eval_zeta)
        .add(&ordering_remainder)
        .sub(&alpha.square().mul(&l1_eval_zeta));
    let rhs = h_eval_zeta.mul(&zeta_to_n.sub(&PCS::Field::one()));

    end_timer!(verifier_timer);
    if lhs == rhs {
        Ok(())
    } else {
        Err(PlonkError::VerificationError)
    }
}

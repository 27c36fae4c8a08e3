use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::ConstraintSystem,
    helpers::{coset_generator, evaluate_cosets, N_COSETS},
};
use crate::poly_commit::{
    field_polynomial::{domain_generator, evaluation_domain, FpDomain, FpPolynomial},
    pcs::{BatchOpeningProof, OpeningProof, PolyComScheme},
};
use ark_poly::EvaluationDomain;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{end_timer, start_timer};
use plonk_algebra::prelude::*;

/// Position of the `ql` selector.
pub const QL: usize = 0;
/// Position of the `qr` selector.
pub const QR: usize = 1;
/// Position of the `qm` selector.
pub const QM: usize = 2;
/// Position of the `qo` selector.
pub const QO: usize = 3;
/// Position of the `qk` selector.
pub const QK: usize = 4;

/// The data structure of a Plonk proof.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize, Clone)]
pub struct PlonkProof<C, F> {
    /// The commitments of the left, right and output wire polynomials.
    pub cm_lro: Vec<C>,
    /// The commitment of the permutation accumulator.
    pub cm_z: C,
    /// The commitments of the three pieces of the quotient polynomial.
    pub cm_h: Vec<C>,
    /// The opening at \zeta of the folded quotient, the linearized polynomial,
    /// the three wires and the first two permutation polynomials, in this order.
    pub batched_proof: BatchOpeningProof<C, F>,
    /// The opening of the accumulator at \zeta * \omega.
    pub z_shifted_opening: OpeningProof<C, F>,
}

/// The type of the Plonk proof with a specific polynomial commitment scheme.
pub type PlonkPf<PCS> =
    PlonkProof<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

/// Plonk prover parameters.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlonkProverParams<O, C, F> {
    /// The polynomials of the selectors ql, qr, qm, qo, qk.
    pub q_polys: Vec<O>,
    /// The values of qk over the domain, completed by the public inputs at proving time.
    pub qk_lagrange: Vec<F>,
    /// The polynomials of perm1, perm2, perm3.
    pub s_polys: Vec<O>,
    /// The values of perm1, perm2, perm3 over the domain.
    pub s_lagrange: Vec<Vec<F>>,
    /// The evaluations of ql, qr, qm, qo over the four cosets.
    pub q_coset_evals: Vec<Vec<F>>,
    /// The evaluations of perm1, perm2, perm3 over the four cosets.
    pub s_coset_evals: Vec<Vec<F>>,
    /// The evaluations of the first Lagrange polynomial over the four cosets.
    pub l1_coset_evals: Vec<F>,
    /// The domain of size 4n the quotient polynomial is interpolated over, compressed.
    pub quotient_domain: Vec<u8>,
    /// The Plonk verifier parameters.
    pub verifier_params: PlonkVerifierParams<C, F>,
}

/// Prover parameters over a particular polynomial commitment scheme.
pub type PlonkPK<PCS> = PlonkProverParams<
    FpPolynomial<<PCS as PolyComScheme>::Field>,
    <PCS as PolyComScheme>::Commitment,
    <PCS as PolyComScheme>::Field,
>;

impl<O, C, F> PlonkProverParams<O, C, F> {
    /// Return the verifier parameters.
    pub fn get_verifier_params(self) -> PlonkVerifierParams<C, F> {
        self.verifier_params
    }

    /// Return a reference of verifier parameters.
    pub fn get_verifier_params_ref(&self) -> &PlonkVerifierParams<C, F> {
        &self.verifier_params
    }
}

/// Plonk verifier parameters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlonkVerifierParams<C, F> {
    /// The commitments of the selectors ql, qr, qm, qo, qk.
    pub cm_q_vec: Vec<C>,
    /// The commitments of perm1, perm2, perm3.
    pub cm_s_vec: Vec<C>,
    /// The coset shifters of the three wires: 1, g and g^2.
    pub k: Vec<F>,
    /// The generator of the domain.
    pub root: F,
    /// The primitive evaluation domain, compressed.
    pub domain: Vec<u8>,
    /// The size of constraint system.
    pub cs_size: usize,
    /// The public constrain variables indices.
    pub public_vars_constraint_indices: Vec<usize>,
}

/// Define the PLONK verifier params by given `PolyComScheme`.
pub type PlonkVK<PCS> =
    PlonkVerifierParams<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

/// Perform deserialization, then return domain and root(a generator of the subgroup).
pub fn get_domain_and_root<F: Domain>(domain: &[u8]) -> Result<(FpDomain<F>, F)> {
    let domain = FpDomain::<F>::deserialize_compressed(domain)
        .map_err(|_| PlonkError::Algebra(AlgebraError::DeserializationError))?;
    let root = domain_generator(&domain);
    Ok((domain, root))
}

/// Convert the domain to bytes in the compressed representation.
fn compress_domain<F: Domain>(domain: &FpDomain<F>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    domain
        .serialize_compressed(&mut buf)
        .map_err(|_| PlonkError::Algebra(AlgebraError::SerializationError))?;
    Ok(buf)
}

/// Return the coset shifters `1, g, g^2`, with `g` the multiplicative generator.
/// The cosets `k_i * H` are pairwise disjoint for every radix-2 domain `H`
/// smaller than the two-adic subgroup of the field.
pub fn coset_shifters<F: Scalar>(n_wires_per_gate: usize) -> Vec<F> {
    let g = F::multiplicative_generator();
    let mut k = Vec::with_capacity(n_wires_per_gate);
    let mut current = F::one();
    for _ in 0..n_wires_per_gate {
        k.push(current);
        current.mul_assign(&g);
    }
    k
}

/// Encode the permutation value, from an index to a group element.
/// Position `p` maps to `k[p / n] * \omega^{p % n}`.
pub fn encode_perm_to_group<F: Scalar>(group: &[F], perm: &[usize], k: &[F]) -> Vec<F> {
    let n = group.len();
    perm.iter()
        .map(|pi| k[pi / n].mul(&group[pi % n]))
        .collect()
}

/// Run the Plonk indexer.
///
/// The selector and permutation polynomials are interpolated over the domain
/// of size `cs.size()`, committed with `pcs`, and evaluated over the four cosets
/// used by the quotient polynomial.
pub fn indexer<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    pcs: &PCS,
) -> Result<PlonkPK<PCS>> {
    let indexer_time = start_timer!(|| "PLONK indexer");

    if cs.num_vars() == 0 {
        return Err(PlonkError::SetupError);
    }
    let n_wires_per_gate = CS::n_wires_per_gate();
    let n = cs.size();
    let domain = evaluation_domain::<PCS::Field>(n).ok_or(PlonkError::GroupNotFound(n))?;
    let m = N_COSETS * n;
    let quotient_domain =
        evaluation_domain::<PCS::Field>(m).ok_or(PlonkError::GroupNotFound(m))?;
    let root = domain_generator(&domain);
    let u = coset_generator::<PCS::Field>(n)?;
    let group = domain
        .elements()
        .map(PCS::Field::from_field)
        .collect::<Vec<_>>();
    let k = coset_shifters::<PCS::Field>(n_wires_per_gate);

    // Step 1: compute permutation polynomials and commit them.
    let perm_time = start_timer!(|| "Permutation polynomials");
    let raw_perm = cs.compute_permutation()?;
    let s_lagrange: Vec<Vec<PCS::Field>> = raw_perm
        .chunks(n)
        .map(|chunk| encode_perm_to_group(&group, chunk, &k))
        .collect();
    let s_polys: Vec<FpPolynomial<PCS::Field>> = s_lagrange
        .iter()
        .map(|evals| FpPolynomial::ifft_with_domain(&domain, evals))
        .collect();
    let s_coset_evals = s_polys
        .iter()
        .map(|poly| evaluate_cosets(poly, &domain, &u))
        .collect();
    let cm_s_vec = s_polys
        .iter()
        .map(|poly| pcs.commit(poly))
        .collect::<Result<Vec<_>>>()?;
    end_timer!(perm_time);

    // Step 2: compute selector polynomials and commit them.
    let selector_time = start_timer!(|| "Selector polynomials");
    let mut q_lagrange = (0..cs.num_selectors())
        .map(|i| cs.selector(i))
        .collect::<Result<Vec<_>>>()?;
    let q_polys: Vec<FpPolynomial<PCS::Field>> = q_lagrange
        .iter()
        .map(|evals| FpPolynomial::ifft_with_domain(&domain, evals))
        .collect();
    // qk is completed by the public inputs, so its coset evaluations are left to the prover.
    let q_coset_evals = q_polys[..QK]
        .iter()
        .map(|poly| evaluate_cosets(poly, &domain, &u))
        .collect();
    let cm_q_vec = q_polys
        .iter()
        .map(|poly| pcs.commit(poly))
        .collect::<Result<Vec<_>>>()?;
    let qk_lagrange = q_lagrange.swap_remove(QK);
    end_timer!(selector_time);

    // Step 3: precompute L1, whose coefficients are all 1/n.
    let mut l1_evals = vec![PCS::Field::zero(); n];
    l1_evals[0] = PCS::Field::one();
    let l1_poly = FpPolynomial::ifft_with_domain(&domain, &l1_evals);
    let l1_coset_evals = evaluate_cosets(&l1_poly, &domain, &u);

    let verifier_params = PlonkVerifierParams {
        cm_q_vec,
        cm_s_vec,
        k,
        root,
        domain: compress_domain::<PCS::Field>(&domain)?,
        cs_size: n,
        public_vars_constraint_indices: cs.public_vars_constraint_indices(),
    };

    end_timer!(indexer_time);
    Ok(PlonkProverParams {
        q_polys,
        qk_lagrange,
        s_polys,
        s_lagrange,
        q_coset_evals,
        s_coset_evals,
        l1_coset_evals,
        quotient_domain: compress_domain::<PCS::Field>(&quotient_domain)?,
        verifier_params,
    })
}

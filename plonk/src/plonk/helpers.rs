use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::VarIndex,
    indexer::{PlonkVK, QK, QL, QM, QO, QR},
};
use crate::poly_commit::{
    field_polynomial::{FpDomain, FpPolynomial},
    pcs::{HomomorphicPolyComElem, PolyComScheme},
};
use crate::utils::join;
use ark_ff::FftField;
use ark_poly::EvaluationDomain;
use plonk_algebra::prelude::*;

/// The number of cosets the quotient polynomial is evaluated on.
pub(crate) const N_COSETS: usize = 4;

/// The challenges of a Plonk proof.
pub(crate) struct PlonkChallenges<F> {
    pub(crate) gamma: F,
    pub(crate) alpha: F,
    pub(crate) zeta: F,
}

/// The values opened at \zeta, and the accumulator opened at \zeta * \omega.
pub(crate) struct OpenedValues<F> {
    pub(crate) l: F,
    pub(crate) r: F,
    pub(crate) o: F,
    pub(crate) s1: F,
    pub(crate) s2: F,
    pub(crate) zu: F,
}

/// Return `u`, a primitive root of unity of order `2 * N_COSETS * n`.
/// The cosets `u^{2k+1} * H` for `k < N_COSETS` are disjoint from `H` and from each other.
pub(crate) fn coset_generator<F: Domain>(n: usize) -> Result<F> {
    let order = 2 * N_COSETS * n;
    F::Field::get_root_of_unity(order as u64)
        .map(F::from_field)
        .ok_or(PlonkError::GroupNotFound(order))
}

/// Lay out the witness over the wires: `lro[k][j]` is the value on wire `k` of row `j`.
pub(crate) fn compute_lro<F: Scalar>(wiring: &[Vec<VarIndex>], witness: &[F]) -> Vec<Vec<F>> {
    wiring
        .iter()
        .map(|wire| wire.iter().map(|index| witness[*index]).collect())
        .collect()
}

/// Build the values of the accumulator, by setting z(1) = 1 and
/// z(\omega^{i+1}) = z(\omega^i) \prod_j (fj(\omega^i) + kj * \omega^i + \gamma)
///     / (fj(\omega^i) + perm_j(\omega^i) + \gamma).
/// The denominators are inverted with a single batch inversion.
pub(crate) fn compute_z<F: Domain>(
    lro: &[Vec<F>],
    s_lagrange: &[Vec<F>],
    k: &[F],
    root: &F,
    gamma: &F,
) -> Vec<F> {
    let n = lro[0].len();
    let mut numerators = Vec::with_capacity(n - 1);
    let mut denominators = Vec::with_capacity(n - 1);
    let mut x = F::one();
    for i in 0..n - 1 {
        let mut numerator = F::one();
        let mut denominator = F::one();
        for ((wire, perm), ki) in lro.iter().zip(s_lagrange.iter()).zip(k.iter()) {
            let f_plus_gamma = wire[i].add(gamma);
            numerator.mul_assign(&f_plus_gamma.add(&ki.mul(&x)));
            denominator.mul_assign(&f_plus_gamma.add(&perm[i]));
        }
        numerators.push(numerator);
        denominators.push(denominator);
        x.mul_assign(root);
    }

    let denominators_inv = batch_inverse(&denominators);
    let mut z = Vec::with_capacity(n);
    let mut prev = F::one();
    z.push(prev);
    for (numerator, denominator_inv) in numerators.iter().zip(denominators_inv.iter()) {
        prev.mul_assign(&numerator.mul(denominator_inv));
        z.push(prev);
    }
    z
}

/// Return the values of z(\omega X): the accumulator rotated left by one row.
pub(crate) fn shift_z<F: Scalar>(z: &[F]) -> Vec<F> {
    let mut zu = z.to_vec();
    zu.rotate_left(1);
    zu
}

/// Evaluate a polynomial of degree smaller than `n` on the cosets `u^{2k+1} H`.
/// The result is interleaved: index `4j + k` holds the value at `u^{2k+1} \omega^j`,
/// which is `u * (u^2)^{4j+k}`, so the output is the natural-order evaluation over
/// the coset `u * <u^2>` of size `4n`.
pub(crate) fn evaluate_cosets<F: Domain>(
    poly: &FpPolynomial<F>,
    domain: &FpDomain<F>,
    u: &F,
) -> Vec<F> {
    let n = domain.size();
    let u_sq = u.square();
    let mut offsets = Vec::with_capacity(N_COSETS);
    let mut offset = *u;
    for _ in 0..N_COSETS {
        offsets.push(offset);
        offset.mul_assign(&u_sq);
    }

    let ((e0, e1), (e2, e3)) = join(
        || {
            join(
                || poly.coset_fft_with_domain(domain, &offsets[0]),
                || poly.coset_fft_with_domain(domain, &offsets[1]),
            )
        },
        || {
            join(
                || poly.coset_fft_with_domain(domain, &offsets[2]),
                || poly.coset_fft_with_domain(domain, &offsets[3]),
            )
        },
    );

    let mut res = Vec::with_capacity(N_COSETS * n);
    for j in 0..n {
        res.push(e0[j]);
        res.push(e1[j]);
        res.push(e2[j]);
        res.push(e3[j]);
    }
    res
}

/// Return the evaluations of the identity polynomial X on the cosets,
/// in the interleaved order of `evaluate_cosets`.
pub(crate) fn eval_id_cosets<F: Scalar>(u: &F, n: usize) -> Vec<F> {
    let u_sq = u.square();
    let mut res = Vec::with_capacity(N_COSETS * n);
    let mut x = *u;
    for _ in 0..N_COSETS * n {
        res.push(x);
        x.mul_assign(&u_sq);
    }
    res
}

/// Evaluate ql * l + qr * r + qm * l * r + qo * o + qk pointwise, in two halves.
pub(crate) fn eval_constraints<F: Scalar>(
    lro_cosets: &[Vec<F>],
    q_coset_evals: &[Vec<F>],
    qk_coset_evals: &[F],
) -> Vec<F> {
    let m = qk_coset_evals.len();
    let gate = |range: Range<usize>| -> Vec<F> {
        range
            .map(|i| {
                let (l, r, o) = (&lro_cosets[0][i], &lro_cosets[1][i], &lro_cosets[2][i]);
                q_coset_evals[QL][i]
                    .mul(l)
                    .add(&q_coset_evals[QR][i].mul(r))
                    .add(&q_coset_evals[QM][i].mul(&l.mul(r)))
                    .add(&q_coset_evals[QO][i].mul(o))
                    .add(&qk_coset_evals[i])
            })
            .collect()
    };

    let (mut res, second_half) = join(|| gate(0..m / 2), || gate(m / 2..m));
    res.extend(second_half);
    res
}

/// Evaluate the ordering term pointwise:
/// zu * \prod_j (fj + perm_j + \gamma) - z * \prod_j (fj + kj * X + \gamma).
pub(crate) fn eval_constraint_ordering<F: Scalar>(
    lro_cosets: &[Vec<F>],
    s_coset_evals: &[Vec<F>],
    z_cosets: &[F],
    zu_cosets: &[F],
    id_cosets: &[F],
    k: &[F],
    gamma: &F,
) -> Vec<F> {
    (0..z_cosets.len())
        .map(|i| {
            let mut permuted = zu_cosets[i];
            let mut identity = z_cosets[i];
            for ((wire, perm), ki) in lro_cosets.iter().zip(s_coset_evals.iter()).zip(k.iter()) {
                let f_plus_gamma = wire[i].add(gamma);
                permuted.mul_assign(&f_plus_gamma.add(&perm[i]));
                identity.mul_assign(&f_plus_gamma.add(&ki.mul(&id_cosets[i])));
            }
            permuted.sub(&identity)
        })
        .collect()
}

/// Evaluate L1 * (z - 1) pointwise.
pub(crate) fn eval_starts_at_one<F: Scalar>(l1_coset_evals: &[F], z_cosets: &[F]) -> Vec<F> {
    l1_coset_evals
        .iter()
        .zip(z_cosets.iter())
        .map(|(l1, z)| l1.mul(&z.sub(&F::one())))
        .collect()
}

/// Compute the quotient polynomial
/// h = (constraints + \alpha * ordering + \alpha^2 * starts_at_one) / (X^n - 1)
/// from the coset evaluations of its numerator, and split it into three
/// pieces of `n` coefficients. `domain_m` is the domain of size 4n.
pub(crate) fn compute_h<F: Domain>(
    domain_m: &FpDomain<F>,
    constraints: &[F],
    ordering: &[F],
    starts_at_one: &[F],
    alpha: &F,
    u: &F,
    n: usize,
) -> Result<Vec<FpPolynomial<F>>> {
    let m = N_COSETS * n;
    if domain_m.size() != m || constraints.len() != m {
        return Err(PlonkError::FuncParamsError);
    }

    // (u^{2k+1} \omega^j)^n - 1 = u^{(2k+1)n} - 1 only depends on the coset.
    let u_to_n = u.pow(&[n as u64]);
    let u_to_2n = u_to_n.square();
    let mut z_h_coset_evals = Vec::with_capacity(N_COSETS);
    let mut x = u_to_n;
    for _ in 0..N_COSETS {
        z_h_coset_evals.push(x.sub(&F::one()));
        x.mul_assign(&u_to_2n);
    }
    let z_h_inv_coset_evals = batch_inverse(&z_h_coset_evals);

    let alpha_sq = alpha.square();
    let h_coset_evals: Vec<F> = (0..m)
        .map(|i| {
            constraints[i]
                .add(&alpha.mul(&ordering[i]))
                .add(&alpha_sq.mul(&starts_at_one[i]))
                .mul(&z_h_inv_coset_evals[i % N_COSETS])
        })
        .collect();

    let u_inv = u.inv()?;
    let h = FpPolynomial::coset_ifft_with_domain(domain_m, &h_coset_evals, &u_inv);
    Ok(split_h(&h, n))
}

/// Split `h` into h1 + X^n h2 + X^{2n} h3.
/// Coefficients of degree 3n and above only exist for an unsatisfied witness,
/// and are dropped.
pub(crate) fn split_h<F: Scalar>(h: &FpPolynomial<F>, n: usize) -> Vec<FpPolynomial<F>> {
    let coefs = h.get_coefs_ref();
    (0..3)
        .map(|i| {
            let start = (i * n).min(coefs.len());
            let end = ((i + 1) * n).min(coefs.len());
            if start == end {
                FpPolynomial::zero()
            } else {
                FpPolynomial::from_coefs(coefs[start..end].to_vec())
            }
        })
        .collect()
}

/// Evaluate L1(X) = (X^n - 1) / (n (X - 1)) at `zeta`.
pub(crate) fn first_lagrange_eval<F: Scalar>(zeta: &F, n: usize) -> Result<F> {
    let numerator = zeta.pow(&[n as u64]).sub(&F::one());
    let denominator = F::from(n as u64).mul(&zeta.sub(&F::one()));
    Ok(numerator.mul(&denominator.inv()?))
}

/// Compute \sum_i w_i L_{j_i}(\zeta), where j_i is the row of the i-th public input and
/// L_j(X) = \omega^j (X^n - 1) / (n (X - \omega^j)).
pub(crate) fn eval_public_var_poly<PCS: PolyComScheme>(
    verifier_params: &PlonkVK<PCS>,
    public_inputs: &[PCS::Field],
    zeta: &PCS::Field,
) -> Result<PCS::Field> {
    let n = verifier_params.cs_size;
    let roots: Vec<PCS::Field> = verifier_params
        .public_vars_constraint_indices
        .iter()
        .map(|index| verifier_params.root.pow(&[*index as u64]))
        .collect();
    let denominators: Vec<PCS::Field> = roots.iter().map(|root| zeta.sub(root)).collect();
    if denominators.iter().any(|x| x.is_zero()) {
        return Err(PlonkError::VerificationError);
    }
    let denominators_inv = batch_inverse(&denominators);

    let mut eval = PCS::Field::zero();
    for ((public_value, root), denominator_inv) in public_inputs
        .iter()
        .zip(roots.iter())
        .zip(denominators_inv.iter())
    {
        eval.add_assign(&public_value.mul(root).mul(denominator_inv));
    }

    let n_inv = PCS::Field::from(n as u64).inv()?;
    let z_h_eval = zeta.pow(&[n as u64]).sub(&PCS::Field::one());
    Ok(eval.mul(&z_h_eval).mul(&n_inv))
}

/// Compute the linearized polynomial, or its commitment:
/// qm * l * r + ql * l + qr * r + qo * o + qk
///     + \alpha * zu * (l + s1 + \gamma)(r + s2 + \gamma) * perm3
///     + (\alpha^2 * L1(\zeta) - \alpha * \prod_j (fj + kj * \zeta + \gamma)) * z.
/// Both the prover and the verifier go through here, with polynomials and commitments.
pub(crate) fn compute_linearized_polynomial<F: Scalar, P: HomomorphicPolyComElem<Scalar = F>>(
    q_polys_or_comms: &[P],
    s3_poly_or_comm: &P,
    z_poly_or_comm: &P,
    k: &[F],
    evals: &OpenedValues<F>,
    challenges: &PlonkChallenges<F>,
    l1_eval_zeta: &F,
) -> P {
    let PlonkChallenges { gamma, alpha, zeta } = challenges;

    // 1. selectors
    let mut lin = q_polys_or_comms[QM].mul(&evals.l.mul(&evals.r));
    lin.add_assign(&q_polys_or_comms[QL].mul(&evals.l));
    lin.add_assign(&q_polys_or_comms[QR].mul(&evals.r));
    lin.add_assign(&q_polys_or_comms[QO].mul(&evals.o));
    lin.add_assign(&q_polys_or_comms[QK]);

    // 2. perm3(X) * \alpha * zu * (l + s1 + \gamma)(r + s2 + \gamma)
    let s3_scalar = alpha
        .mul(&evals.zu)
        .mul(&evals.l.add(&evals.s1).add(gamma))
        .mul(&evals.r.add(&evals.s2).add(gamma));
    lin.add_assign(&s3_poly_or_comm.mul(&s3_scalar));

    // 3. z(X) * (\alpha^2 * L1(\zeta) - \alpha * \prod_j (fj + kj * \zeta + \gamma))
    let mut identity = *alpha;
    for (f, ki) in [&evals.l, &evals.r, &evals.o].iter().zip(k.iter()) {
        identity.mul_assign(&f.add(&ki.mul(zeta)).add(gamma));
    }
    let z_scalar = alpha.square().mul(l1_eval_zeta).sub(&identity);
    lin.add_assign(&z_poly_or_comm.mul(&z_scalar));
    lin
}

/// Fold the pieces of h, or their commitments, as ((h3 \zeta^n + h2) \zeta^n + h1).
pub(crate) fn fold_h<F: Scalar, P: HomomorphicPolyComElem<Scalar = F>>(
    h_polys_or_comms: &[P],
    zeta_to_n: &F,
) -> P {
    let mut folded = P::get_identity();
    for piece in h_polys_or_comms.iter().rev() {
        folded.mul_assign(zeta_to_n);
        folded.add_assign(piece);
    }
    folded
}

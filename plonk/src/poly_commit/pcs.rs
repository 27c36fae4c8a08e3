use crate::errors::{PlonkError, Result};
use crate::poly_commit::{field_polynomial::FpPolynomial, transcript::PolyComTranscript};
use ark_std::fmt::Debug;
use merlin::Transcript;
use plonk_algebra::prelude::*;
use serde::{Deserialize, Serialize};

/// The trait for help serialize to bytes,
/// implement by polynomial commitment.
pub trait ToBytes {
    /// Convert to bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// The trait for homomorphic polynomial commitment or polynomial.
pub trait HomomorphicPolyComElem: ToBytes {
    /// This is the scalar field of the polynomial.
    type Scalar;

    /// Get base (generator) of the group.
    fn get_base() -> Self;

    /// Get identity of the group.
    fn get_identity() -> Self;

    /// Add the underlying polynomials.
    fn add(&self, other: &Self) -> Self;

    /// Add assign the underlying polynomials.
    fn add_assign(&mut self, other: &Self);

    /// Subtract the underlying polynomials.
    fn sub(&self, other: &Self) -> Self;

    /// Subtract assign the underlying polynomials.
    fn sub_assign(&mut self, other: &Self);

    /// Multiply underlying polynomial by scalar `exp`.
    fn mul(&self, exp: &Self::Scalar) -> Self;

    /// Multiply assign underlying polynomial by scalar `exp`.
    fn mul_assign(&mut self, exp: &Self::Scalar);
}

/// The opening of one polynomial at one point.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct OpeningProof<C, F> {
    /// The commitment to the quotient `(f(X) - f(x)) / (X - x)`.
    pub quotient: C,
    /// The claimed value `f(x)`.
    pub claimed_value: F,
}

/// The opening of several polynomials at the same point.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct BatchOpeningProof<C, F> {
    /// The commitment to the quotient of the folded polynomial.
    pub quotient: C,
    /// The claimed values, one per polynomial, in opening order.
    pub claimed_values: Vec<F>,
}

/// Trait for polynomial commitment scheme.
pub trait PolyComScheme: Sized {
    /// Type of prime field.
    type Field: Domain;

    /// Type of commitment produces, need to implement `HomomorphicPolyComElem`.
    type Commitment: HomomorphicPolyComElem<Scalar = Self::Field>
        + Debug
        + PartialEq
        + Eq
        + Clone
        + Serialize
        + for<'de> Deserialize<'de>
        + Send
        + Sync;

    /// Return the maximal degree supported by the public parameters.
    fn max_degree(&self) -> usize;

    /// Commits to the polynomial, commitment is binding.
    fn commit(&self, polynomial: &FpPolynomial<Self::Field>) -> Result<Self::Commitment>;

    /// Open the polynomial at `point`.
    fn open(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
        point: &Self::Field,
    ) -> Result<OpeningProof<Self::Commitment, Self::Field>>;

    /// Verify that the polynomial inside `cm` evaluates to the claimed value at `point`.
    fn verify(
        &self,
        cm: &Self::Commitment,
        point: &Self::Field,
        proof: &OpeningProof<Self::Commitment, Self::Field>,
    ) -> Result<()>;

    /// Shrink this to only for verifier use.
    fn shrink_to_verifier_only(&self) -> Self;

    /// Open several polynomials at the same point with a single quotient commitment.
    /// The polynomials are folded with powers of a challenge derived from the point,
    /// the digests and the claimed values.
    fn batch_open_single_point(
        &self,
        polys: &[&FpPolynomial<Self::Field>],
        digests: &[&Self::Commitment],
        point: &Self::Field,
    ) -> Result<BatchOpeningProof<Self::Commitment, Self::Field>> {
        assert_eq!(polys.len(), digests.len());

        let claimed_values: Vec<Self::Field> = polys.iter().map(|p| p.eval(point)).collect();
        let gamma = Self::batch_folding_challenge(point, digests, &claimed_values);

        let mut folded = FpPolynomial::zero();
        let mut factor = Self::Field::one();
        for poly in polys.iter() {
            folded.add_assign(&poly.mul_scalar(&factor));
            factor.mul_assign(&gamma);
        }

        let proof = self.open(&folded, point)?;
        Ok(BatchOpeningProof {
            quotient: proof.quotient,
            claimed_values,
        })
    }

    /// Verify a proof produced by `batch_open_single_point`.
    fn batch_verify_single_point(
        &self,
        digests: &[&Self::Commitment],
        point: &Self::Field,
        proof: &BatchOpeningProof<Self::Commitment, Self::Field>,
    ) -> Result<()> {
        if digests.len() != proof.claimed_values.len() {
            return Err(PlonkError::VerificationError);
        }
        let gamma = Self::batch_folding_challenge(point, digests, &proof.claimed_values);

        let mut folded_cm = Self::Commitment::get_identity();
        let mut folded_value = Self::Field::zero();
        let mut factor = Self::Field::one();
        for (digest, value) in digests.iter().zip(proof.claimed_values.iter()) {
            folded_cm.add_assign(&digest.mul(&factor));
            folded_value.add_assign(&value.mul(&factor));
            factor.mul_assign(&gamma);
        }

        self.verify(
            &folded_cm,
            point,
            &OpeningProof {
                quotient: proof.quotient.clone(),
                claimed_value: folded_value,
            },
        )
    }

    /// Derive the folding challenge of a batched opening.
    fn batch_folding_challenge(
        point: &Self::Field,
        digests: &[&Self::Commitment],
        values: &[Self::Field],
    ) -> Self::Field {
        let mut transcript = Transcript::new(b"PCS Batch Opening");
        transcript.append_message(b"field size", &Self::Field::get_field_size_le_bytes());
        transcript.append_field_elem(point);
        for digest in digests.iter() {
            transcript.append_commitment(*digest);
        }
        for value in values.iter() {
            transcript.append_field_elem(value);
        }
        transcript.get_challenge_field_elem(b"batch folding")
    }
}

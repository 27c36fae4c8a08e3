use crate::errors::{PlonkError, Result};
use crate::poly_commit::{
    field_polynomial::FpPolynomial,
    pcs::{HomomorphicPolyComElem, OpeningProof, PolyComScheme, ToBytes},
};
use plonk_algebra::bls12_381::BLSPairingEngine;
use plonk_algebra::prelude::*;
use serde::{Deserialize, Serialize};

/// KZG commitment scheme over the `Group`.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct KZGCommitment<G>(pub G);

impl<G: Group> ToBytes for KZGCommitment<G> {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_compressed_bytes()
    }
}

impl<G: Group> HomomorphicPolyComElem for KZGCommitment<G> {
    type Scalar = G::ScalarType;

    fn get_base() -> Self {
        KZGCommitment(G::get_base())
    }

    fn get_identity() -> Self {
        KZGCommitment(G::get_identity())
    }

    fn add(&self, other: &Self) -> Self {
        KZGCommitment(self.0.add(&other.0))
    }

    fn add_assign(&mut self, other: &Self) {
        self.0.add_assign(&other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        KZGCommitment(self.0.sub(&other.0))
    }

    fn sub_assign(&mut self, other: &Self) {
        self.0.sub_assign(&other.0)
    }

    fn mul(&self, exp: &G::ScalarType) -> Self {
        KZGCommitment(self.0.mul(exp))
    }

    fn mul_assign(&mut self, exp: &G::ScalarType) {
        self.0 = self.0.mul(exp)
    }
}

impl<F: Scalar> ToBytes for FpPolynomial<F> {
    fn to_bytes(&self) -> Vec<u8> {
        self.coefs.iter().flat_map(|coef| coef.to_bytes()).collect()
    }
}

impl<F: Scalar> HomomorphicPolyComElem for FpPolynomial<F> {
    type Scalar = F;

    fn get_base() -> Self {
        FpPolynomial::one()
    }

    fn get_identity() -> Self {
        FpPolynomial::zero()
    }

    fn add(&self, other: &Self) -> Self {
        self.add(other)
    }

    fn add_assign(&mut self, other: &Self) {
        self.add_assign(other)
    }

    fn sub(&self, other: &Self) -> Self {
        self.sub(other)
    }

    fn sub_assign(&mut self, other: &Self) {
        self.sub_assign(other)
    }

    fn mul(&self, exp: &F) -> Self {
        self.mul_scalar(exp)
    }

    fn mul_assign(&mut self, exp: &F) {
        self.mul_scalar_assign(exp)
    }
}

/// KZG commitment scheme about `Pairing`.
#[derive(Serialize, Deserialize)]
pub struct KZGCommitmentScheme<P: Pairing> {
    /// public parameter about G1.
    pub public_parameter_group_1: Vec<P::G1>,
    /// public parameter about G2.
    pub public_parameter_group_2: Vec<P::G2>,
}

impl<P: Pairing> KZGCommitmentScheme<P> {
    /// Create a new instance of a KZG polynomial commitment scheme.
    /// `max_degree` - max degree of the polynomial,
    /// `prng` - pseudo-random generator.
    ///
    /// The trapdoor is sampled from `prng`, so this is only suitable for tests.
    pub fn new<R: CryptoRng + RngCore>(max_degree: usize, prng: &mut R) -> KZGCommitmentScheme<P> {
        let s = P::ScalarField::random(prng);

        let mut public_parameter_group_1: Vec<P::G1> = Vec::with_capacity(max_degree + 1);

        let mut elem_g1 = P::G1::get_base();

        for _ in 0..=max_degree {
            public_parameter_group_1.push(elem_g1);
            elem_g1 = elem_g1.mul(&s);
        }

        let elem_g2 = P::G2::get_base();
        let public_parameter_group_2 = vec![elem_g2, elem_g2.mul(&s)];

        KZGCommitmentScheme {
            public_parameter_group_1,
            public_parameter_group_2,
        }
    }

    /// Serialize the parameters to unchecked bytes.
    pub fn to_unchecked_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![];
        let len_1 = self.public_parameter_group_1.len() as u32;
        let len_2 = self.public_parameter_group_2.len() as u32;
        bytes.extend(len_1.to_le_bytes());
        bytes.extend(len_2.to_le_bytes());

        for i in &self.public_parameter_group_1 {
            bytes.extend(i.to_unchecked_bytes());
        }
        for i in &self.public_parameter_group_2 {
            bytes.extend(i.to_unchecked_bytes());
        }
        bytes
    }

    /// Deserialize the parameters from unchecked bytes.
    pub fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 8 {
            return Err(AlgebraError::DeserializationError.into());
        }
        let mut len_1_bytes = [0u8; 4];
        let mut len_2_bytes = [0u8; 4];
        len_1_bytes.copy_from_slice(&bytes[0..4]);
        len_2_bytes.copy_from_slice(&bytes[4..8]);
        let len_1 = u32::from_le_bytes(len_1_bytes) as usize;
        let len_2 = u32::from_le_bytes(len_2_bytes) as usize;
        let n_1 = P::G1::unchecked_size();
        let n_2 = P::G2::unchecked_size();

        if bytes.len() != 8 + n_1 * len_1 + n_2 * len_2 {
            return Err(AlgebraError::DeserializationError.into());
        }

        let bytes_1 = &bytes[8..8 + n_1 * len_1];
        let bytes_2 = &bytes[8 + n_1 * len_1..];

        let p1 = bytes_1
            .chunks_exact(n_1)
            .map(P::G1::from_unchecked_bytes)
            .collect::<core::result::Result<Vec<_>, _>>()?;
        let p2 = bytes_2
            .chunks_exact(n_2)
            .map(P::G2::from_unchecked_bytes)
            .collect::<core::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            public_parameter_group_1: p1,
            public_parameter_group_2: p2,
        })
    }
}

/// KZG commitment scheme over the BLS12-381 curve
pub type KZGCommitmentSchemeBLS = KZGCommitmentScheme<BLSPairingEngine>;

impl<P: Pairing> PolyComScheme for KZGCommitmentScheme<P>
where
    P::ScalarField: Domain,
{
    type Field = P::ScalarField;
    type Commitment = KZGCommitment<P::G1>;

    fn max_degree(&self) -> usize {
        self.public_parameter_group_1.len().saturating_sub(1)
    }

    fn commit(&self, polynomial: &FpPolynomial<Self::Field>) -> Result<Self::Commitment> {
        let coefs = polynomial.get_coefs_ref();

        let degree = polynomial.degree();

        if degree + 1 > self.public_parameter_group_1.len() {
            return Err(PlonkError::DegreeError);
        }

        let coefs_ref: Vec<&P::ScalarField> = coefs.iter().collect();
        let pub_param_group_1_as_ref: Vec<&P::G1> = self.public_parameter_group_1[0..degree + 1]
            .iter()
            .collect();

        let commitment_value = P::G1::multi_exp(&coefs_ref[..], &pub_param_group_1_as_ref[..]);

        Ok(KZGCommitment(commitment_value))
    }

    fn open(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
        point: &Self::Field,
    ) -> Result<OpeningProof<Self::Commitment, Self::Field>> {
        if polynomial.degree() > self.max_degree() {
            return Err(PlonkError::DegreeError);
        }

        // f(X) = q(X) * (X - x) + f(x)
        let (q_poly, claimed_value) = polynomial.divide_by_linear(point);
        let quotient = self
            .commit(&q_poly)
            .map_err(|_| PlonkError::PCSProveEvalError)?;

        Ok(OpeningProof {
            quotient,
            claimed_value,
        })
    }

    fn verify(
        &self,
        cm: &Self::Commitment,
        point: &Self::Field,
        proof: &OpeningProof<Self::Commitment, Self::Field>,
    ) -> Result<()> {
        let g1_0 = self
            .public_parameter_group_1
            .first()
            .ok_or(PlonkError::CommitmentError)?;
        let g2_0 = self
            .public_parameter_group_2
            .first()
            .ok_or(PlonkError::CommitmentError)?;
        let g2_1 = self
            .public_parameter_group_2
            .get(1)
            .ok_or(PlonkError::CommitmentError)?;

        // e(C - v * G + x * pi, G2) = e(pi, s * G2)
        let lhs = cm
            .0
            .sub(&g1_0.mul(&proof.claimed_value))
            .add(&proof.quotient.0.mul(point));
        let pairing_eval = P::product_of_pairings(&[lhs, proof.quotient.0.neg()], &[*g2_0, *g2_1]);

        if pairing_eval == P::Gt::get_identity() {
            Ok(())
        } else {
            Err(PlonkError::VerificationError)
        }
    }

    fn shrink_to_verifier_only(&self) -> Self {
        Self {
            public_parameter_group_1: self.public_parameter_group_1.iter().take(1).copied().collect(),
            public_parameter_group_2: self.public_parameter_group_2.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::errors::PlonkError;
    use crate::poly_commit::{
        field_polynomial::FpPolynomial,
        kzg_poly_com::{KZGCommitmentScheme, KZGCommitmentSchemeBLS},
        pcs::{HomomorphicPolyComElem, PolyComScheme},
    };
    use plonk_algebra::{
        bls12_381::{BLSPairingEngine, BLSScalar},
        prelude::*,
    };
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_commit_open_verify() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBLS::new(20, &mut prng);
        assert_eq!(pcs.max_degree(), 20);

        let poly = FpPolynomial::<BLSScalar>::random(&mut prng, 20);
        let cm = pcs.commit(&poly).unwrap();
        let point = BLSScalar::random(&mut prng);

        let mut proof = pcs.open(&poly, &point).unwrap();
        assert_eq!(proof.claimed_value, poly.eval(&point));
        assert!(pcs.verify(&cm, &point, &proof).is_ok());

        let other_point = BLSScalar::random(&mut prng);
        assert!(pcs.verify(&cm, &other_point, &proof).is_err());

        proof.claimed_value.add_assign(&BLSScalar::one());
        assert_eq!(
            pcs.verify(&cm, &point, &proof),
            Err(PlonkError::VerificationError)
        );
    }

    #[test]
    fn test_commit_degree_too_high() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBLS::new(8, &mut prng);
        let poly = FpPolynomial::<BLSScalar>::random(&mut prng, 9);
        assert_eq!(pcs.commit(&poly), Err(PlonkError::DegreeError));
        let point = BLSScalar::random(&mut prng);
        assert!(pcs.open(&poly, &point).is_err());
    }

    #[test]
    fn test_homomorphic_commitment() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBLS::new(10, &mut prng);
        let p1 = FpPolynomial::<BLSScalar>::random(&mut prng, 10);
        let p2 = FpPolynomial::<BLSScalar>::random(&mut prng, 6);
        let k = BLSScalar::random(&mut prng);

        let cm1 = pcs.commit(&p1).unwrap();
        let cm2 = pcs.commit(&p2).unwrap();

        let sum = pcs.commit(&p1.add(&p2.mul_scalar(&k))).unwrap();
        assert_eq!(sum, cm1.add(&cm2.mul(&k)));

        let diff = pcs.commit(&p1.sub(&p2)).unwrap();
        assert_eq!(diff, cm1.sub(&cm2));
    }

    #[test]
    fn test_batch_open_single_point() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBLS::new(16, &mut prng);

        let polys: Vec<FpPolynomial<BLSScalar>> = (0..5)
            .map(|i| FpPolynomial::random(&mut prng, 10 + i))
            .collect();
        let cms: Vec<_> = polys.iter().map(|p| pcs.commit(p).unwrap()).collect();
        let point = BLSScalar::random(&mut prng);

        let polys_ref: Vec<&FpPolynomial<BLSScalar>> = polys.iter().collect();
        let cms_ref: Vec<_> = cms.iter().collect();
        let mut proof = pcs
            .batch_open_single_point(&polys_ref, &cms_ref, &point)
            .unwrap();
        for (value, poly) in proof.claimed_values.iter().zip(polys.iter()) {
            assert_eq!(*value, poly.eval(&point));
        }
        assert!(pcs
            .batch_verify_single_point(&cms_ref, &point, &proof)
            .is_ok());

        let verifier_pcs = pcs.shrink_to_verifier_only();
        assert!(verifier_pcs
            .batch_verify_single_point(&cms_ref, &point, &proof)
            .is_ok());

        assert!(pcs
            .batch_verify_single_point(&cms_ref[1..], &point, &proof)
            .is_err());

        proof.claimed_values[2].add_assign(&BLSScalar::one());
        assert!(pcs
            .batch_verify_single_point(&cms_ref, &point, &proof)
            .is_err());
    }

    #[test]
    fn test_unchecked_bytes() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBLS::new(4, &mut prng);
        let bytes = pcs.to_unchecked_bytes();
        let recovered = KZGCommitmentScheme::<BLSPairingEngine>::from_unchecked_bytes(&bytes).unwrap();
        assert_eq!(
            pcs.public_parameter_group_1,
            recovered.public_parameter_group_1
        );
        assert_eq!(
            pcs.public_parameter_group_2,
            recovered.public_parameter_group_2
        );

        assert!(KZGCommitmentSchemeBLS::from_unchecked_bytes(&bytes[..bytes.len() - 1]).is_err());
        assert!(KZGCommitmentSchemeBLS::from_unchecked_bytes(&[0u8; 3]).is_err());
    }
}

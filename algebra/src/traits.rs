use crate::prelude::*;
use ark_ff::FftField;
use ark_std::fmt::Debug;
use serde::{Deserialize, Serialize};

/// A prime field element with the arithmetic the prover needs.
pub trait Scalar:
    Copy
    + Default
    + Debug
    + Eq
    + Serialize
    + for<'de> Deserialize<'de>
    + One
    + Zero
    + Add<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Sum<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Sum<&'a Self>
    + From<u32>
    + From<u64>
    + Neg<Output = Self>
    + Sync
    + Send
{
    /// Sample a uniformly random element.
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// A generator of the multiplicative group. It is a quadratic nonresidue,
    /// so its powers give coset shifts outside any subgroup of order 2^k.
    fn multiplicative_generator() -> Self;

    /// The modulus, little-endian.
    fn get_field_size_le_bytes() -> Vec<u8>;

    /// The length of [Scalar::to_bytes].
    fn bytes_len() -> usize;

    /// Little-endian canonical encoding.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode at most [Scalar::bytes_len] little-endian bytes, reducing mod p.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// The inverse, or [AlgebraError::GroupInversionError] for zero.
    fn inv(&self) -> Result<Self>;

    /// self * self
    fn square(&self) -> Self;

    /// Exponentiation by an unsigned integer given as u64 limbs, least significant first.
    fn pow(&self, exponent: &[u64]) -> Self;
}

/// A scalar backed by an arkworks FFT-friendly field, so that it can be fed
/// to `ark_poly` evaluation domains.
pub trait Domain: Scalar {
    /// The arkworks field.
    type Field: FftField;

    /// Unwrap into the arkworks field.
    fn get_field(&self) -> Self::Field;

    /// Wrap an arkworks field element.
    fn from_field(field: Self::Field) -> Self;
}

/// An elliptic curve group (or pairing target group) of prime order.
pub trait Group:
    Debug
    + Default
    + Copy
    + Eq
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self::ScalarType, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Neg<Output = Self>
    + Serialize
    + for<'de> Deserialize<'de>
    + Sync
    + Send
{
    /// The scalar field of the group.
    type ScalarType: Scalar;

    /// Length of [Group::to_compressed_bytes].
    const COMPRESSED_LEN: usize;

    /// Length of [Group::to_unchecked_bytes].
    const UNCOMPRESSED_LEN: usize;

    /// 0 * G
    fn get_identity() -> Self;

    /// 1 * G
    fn get_base() -> Self;

    /// Sample a uniformly random element.
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Compressed encoding, used in transcripts and serde.
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Decode and validate a compressed encoding.
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self>;

    /// Uncompressed encoding, without subgroup checks on the way back.
    fn to_unchecked_bytes(&self) -> Vec<u8>;

    /// Decode an uncompressed encoding without validation.
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self>;

    /// Length of [Group::to_unchecked_bytes].
    fn unchecked_size() -> usize;

    /// Σ scalars\[i\] * points\[i\]. Curves override this with an MSM.
    #[inline]
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        scalars
            .iter()
            .zip(points.iter())
            .fold(Self::get_identity(), |acc, (s, p)| acc + &(**p * *s))
    }
}

/// A bilinear pairing e: G1 x G2 -> Gt.
pub trait Pairing {
    /// The common scalar field.
    type ScalarField: Scalar;

    /// The first source group.
    type G1: Group<ScalarType = Self::ScalarField>;

    /// The second source group.
    type G2: Group<ScalarType = Self::ScalarField>;

    /// The target group.
    type Gt: Group<ScalarType = Self::ScalarField>;

    /// e(a, b)
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt;

    /// Π e(a\[i\], b\[i\]), sharing one final exponentiation.
    fn product_of_pairings(a: &[Self::G1], b: &[Self::G2]) -> Self::Gt;
}

/// Invert every element of `values` with a single field inversion.
/// Zero entries are mapped to zero.
pub fn batch_inverse<D: Domain>(values: &[D]) -> Vec<D> {
    let mut raw: Vec<D::Field> = values.iter().map(|v| v.get_field()).collect();
    ark_ff::batch_inversion(&mut raw);
    raw.into_iter().map(D::from_field).collect()
}

#[cfg(test)]
pub(crate) mod group_tests {
    use crate::prelude::*;

    pub(crate) fn test_scalar_operations<S: Scalar>() {
        let (a, b) = (S::from(40u32), S::from(60u32));
        assert_eq!(a.add(&b), S::from(100u32));
        assert_eq!(b.sub(&a), S::from(20u32));
        assert_eq!(a.mul(&b), S::from(2400u32));
        assert_eq!(a.neg().add(&a), S::zero());
        assert_eq!(a.square(), S::from(1600u32));

        let mut acc = S::from(120u32);
        acc.sub_assign(&b);
        acc.add_assign(&a);
        acc.mul_assign(&a);
        assert_eq!(acc, S::from(4000u32));

        // 2^32 - 1 + 1 carries into the next limb
        assert_eq!(
            S::from(0xFFFF_FFFFu32).add(&S::one()),
            S::from(0x1_0000_0000u64)
        );

        assert_eq!(a.inv().unwrap().mul(&a), S::one());
        assert!(S::zero().inv().is_err());

        assert_eq!(S::from(3u32).pow(&[20]), S::from(3486784401u64));
        // x^(2^64), through the second limb
        let x = S::from(3u32);
        let mut expected = x;
        for _ in 0..64 {
            expected = expected.square();
        }
        assert_eq!(x.pow(&[0, 1]), expected);

        let modulus = S::get_field_size_le_bytes();
        assert!(modulus.len() <= S::bytes_len());
        assert_eq!(S::from_bytes(&modulus).unwrap(), S::zero());
    }

    pub(crate) fn test_scalar_serialization<S: Scalar>() {
        let a = S::from(100u32);
        let bytes = a.to_bytes();
        assert_eq!(bytes.len(), S::bytes_len());
        assert_eq!(S::from_bytes(&bytes).unwrap(), a);

        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(serde_json::from_str::<S>(&json).unwrap(), a);

        let raw = bincode::serialize(&a).unwrap();
        assert_eq!(bincode::deserialize::<S>(&raw).unwrap(), a);
    }

    pub(crate) fn run_multiexp_test<G: Group>() {
        assert_eq!(G::multi_exp(&[], &[]), G::get_identity());

        let g = G::get_base();
        let zero = G::ScalarType::zero();
        let one = G::ScalarType::one();
        assert_eq!(G::multi_exp(&[&zero], &[&g]), G::get_identity());
        assert_eq!(G::multi_exp(&[&one], &[&g]), g);

        let g2 = g.add(&g);
        let g500 = g.mul(&G::ScalarType::from(500u32));
        let scalars = [
            G::ScalarType::from(1000u32),
            G::ScalarType::from(2u32),
            G::ScalarType::from(3u32),
        ];
        let got = G::multi_exp(
            &[&scalars[0], &scalars[1], &scalars[2]],
            &[&g, &g2, &g500],
        );
        assert_eq!(got, g.mul(&G::ScalarType::from(2504u32)));
    }
}

use crate::bls12_381::BLSScalar;
use crate::prelude::*;
use ark_bls12_381::{Bls12_381, Fr};
use ark_ec::{pairing::PairingOutput, Group as ArkGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};

/// The wrapped struct for the BLS12-381 pairing output,
/// written additively
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BLSGt(pub(crate) PairingOutput<Bls12_381>);

impl Default for BLSGt {
    fn default() -> Self {
        Self::get_identity()
    }
}

impl Neg for BLSGt {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<'a> Add<&'a BLSGt> for BLSGt {
    type Output = BLSGt;

    #[inline]
    fn add(self, rhs: &'a BLSGt) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Sub<&'a BLSGt> for BLSGt {
    type Output = BLSGt;

    #[inline]
    fn sub(self, rhs: &'a BLSGt) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> Mul<&'a BLSScalar> for BLSGt {
    type Output = BLSGt;

    #[inline]
    fn mul(self, rhs: &'a BLSScalar) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> AddAssign<&'a BLSGt> for BLSGt {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BLSGt) {
        self.0 += rhs.0
    }
}

impl<'a> SubAssign<&'a BLSGt> for BLSGt {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BLSGt) {
        self.0 -= rhs.0
    }
}

impl<'a> MulAssign<&'a BLSScalar> for BLSGt {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a BLSScalar) {
        self.0 *= rhs.0
    }
}

impl Group for BLSGt {
    type ScalarType = BLSScalar;

    const COMPRESSED_LEN: usize = 576;
    const UNCOMPRESSED_LEN: usize = 576;

    #[inline]
    fn get_identity() -> Self {
        Self(PairingOutput::<Bls12_381>::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(PairingOutput::<Bls12_381>::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(PairingOutput::<Bls12_381>::generator() * Fr::rand(prng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::COMPRESSED_LEN);
        self.0
            .serialize_with_mode(&mut buf, Compress::Yes)
            .map(|_| buf)
            .unwrap_or_default()
    }

    #[inline]
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::UNCOMPRESSED_LEN);
        self.0
            .serialize_with_mode(&mut buf, Compress::No)
            .map(|_| buf)
            .unwrap_or_default()
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let res = PairingOutput::<Bls12_381>::deserialize_with_mode(
            bytes,
            Compress::Yes,
            Validate::Yes,
        )
        .map_err(|_| AlgebraError::DeserializationError)?;

        Ok(Self(res))
    }

    #[inline]
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        let res =
            PairingOutput::<Bls12_381>::deserialize_with_mode(bytes, Compress::No, Validate::No)
                .map_err(|_| AlgebraError::DeserializationError)?;

        Ok(Self(res))
    }

    #[inline]
    fn unchecked_size() -> usize {
        Self::get_base().0.serialized_size(Compress::No)
    }
}

impl FromToBytes for BLSGt {
    fn encode_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    fn decode_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_compressed_bytes(bytes)
    }
}

serialize_deserialize!(BLSGt);

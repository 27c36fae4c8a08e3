/// The number of bytes for a scalar value over BLS12-381
pub const BLS12_381_SCALAR_LEN: usize = 32;

mod fr;
pub use fr::*;

mod g1;
pub use g1::*;

mod g2;
pub use g2::*;

mod gt;
pub use gt::*;

mod pairing;
pub use pairing::*;

#[cfg(test)]
mod bls12_381_groups_test {
    use crate::{
        bls12_381::{BLSGt, BLSPairingEngine, BLSScalar, BLSG1, BLSG2},
        prelude::*,
        traits::group_tests::{run_multiexp_test, test_scalar_operations, test_scalar_serialization},
    };
    use ark_bls12_381::G1Affine;
    use ark_ec::CurveGroup;
    use ark_serialize::{CanonicalSerialize, Compress};

    #[test]
    fn test_scalar_ops() {
        test_scalar_operations::<BLSScalar>();
    }

    #[test]
    fn scalar_deser() {
        test_scalar_serialization::<BLSScalar>();
    }

    #[test]
    fn scalar_from_bytes_rejects_long_input() {
        assert!(BLSScalar::from_bytes(&[1u8; 33]).is_err());
        assert_eq!(BLSScalar::from_bytes(&[]).unwrap(), BLSScalar::zero());
    }

    #[test]
    fn multiplicative_generator_is_not_a_square_root_of_unity() {
        let g = BLSScalar::multiplicative_generator();
        assert_ne!(g, BLSScalar::one());
        assert_ne!(g.square(), BLSScalar::one());
    }

    #[test]
    fn hard_coded_group_elements() {
        let base_bls_gt = BLSGt::get_base();
        let expected_base = BLSPairingEngine::pairing(&BLSG1::get_base(), &BLSG2::get_base());
        assert_eq!(base_bls_gt, expected_base);
    }

    #[test]
    fn bilinear_properties() {
        let identity_g1 = BLSG1::get_identity();
        let identity_g2 = BLSG2::get_identity();
        let identity_gt_computed = BLSPairingEngine::pairing(&identity_g1, &identity_g2);
        let identity_gt = BLSGt::get_identity();
        assert_eq!(identity_gt, identity_gt_computed);

        let mut prng = test_rng();

        let s1 = BLSScalar::from(50 + prng.next_u32() % 50);
        let s2 = BLSScalar::from(50 + prng.next_u32() % 50);

        let base_g1 = BLSG1::get_base();
        let base_g2 = BLSG2::get_base();

        let s1_base_g1 = base_g1.mul(&s1);
        let s2_base_g2 = base_g2.mul(&s2);

        let gt_mapped_element = BLSPairingEngine::pairing(&s1_base_g1, &s2_base_g2);

        let gt_base_computed = BLSPairingEngine::pairing(&base_g1, &base_g2);
        let base_gt = BLSGt::get_base();
        assert_eq!(base_gt, gt_base_computed);

        assert_eq!(
            gt_mapped_element,
            BLSPairingEngine::pairing(&base_g1, &s2_base_g2).mul(&s1)
        );
        assert_eq!(gt_mapped_element, gt_base_computed.mul(&(s1.mul(&s2))));
    }

    #[test]
    fn product_of_pairings_matches_sum() {
        let mut prng = test_rng();
        let a = [BLSG1::random(&mut prng), BLSG1::random(&mut prng)];
        let b = [BLSG2::random(&mut prng), BLSG2::random(&mut prng)];

        let expected = BLSPairingEngine::pairing(&a[0], &b[0])
            .add(&BLSPairingEngine::pairing(&a[1], &b[1]));
        assert_eq!(BLSPairingEngine::product_of_pairings(&a, &b), expected);

        let cancel = BLSPairingEngine::product_of_pairings(
            &[a[0], a[0].neg()],
            &[b[0], b[0]],
        );
        assert_eq!(cancel, BLSGt::get_identity());
    }

    #[test]
    fn test_multiexp() {
        run_multiexp_test::<BLSG1>();
        run_multiexp_test::<BLSG2>();
        run_multiexp_test::<BLSGt>();
    }

    #[test]
    fn test_serialization_of_points() {
        let mut prng = test_rng();

        let g1 = BLSG1::random(&mut prng);
        let g1_bytes = g1.to_compressed_bytes();
        assert_eq!(g1_bytes.len(), BLSG1::COMPRESSED_LEN);
        let g1_recovered = BLSG1::from_compressed_bytes(&g1_bytes).unwrap();
        assert_eq!(g1, g1_recovered);

        let g1_bytes = g1.to_unchecked_bytes();
        assert_eq!(g1_bytes.len(), BLSG1::unchecked_size());
        let g1_recovered = BLSG1::from_unchecked_bytes(&g1_bytes).unwrap();
        assert_eq!(g1, g1_recovered);

        let g2 = BLSG2::random(&mut prng);
        let g2_bytes = g2.to_compressed_bytes();
        assert_eq!(g2_bytes.len(), BLSG2::COMPRESSED_LEN);
        let g2_recovered = BLSG2::from_compressed_bytes(&g2_bytes).unwrap();
        assert_eq!(g2, g2_recovered);

        let gt = BLSGt::random(&mut prng);
        let gt_bytes = gt.to_compressed_bytes();
        let gt_recovered = BLSGt::from_compressed_bytes(&gt_bytes).unwrap();
        assert_eq!(gt, gt_recovered);

        assert!(BLSG1::from_compressed_bytes(&[0xffu8; 7]).is_err());
    }

    #[test]
    fn test_serde_of_points() {
        let mut prng = test_rng();
        let g1 = BLSG1::random(&mut prng);

        let json = serde_json::to_string(&g1).unwrap();
        let from_json: BLSG1 = serde_json::from_str(&json).unwrap();
        assert_eq!(g1, from_json);

        let raw = bincode::serialize(&g1).unwrap();
        let from_bincode: BLSG1 = bincode::deserialize(&raw).unwrap();
        assert_eq!(g1, from_bincode);
    }

    #[test]
    fn compressed_bytes_match_arkworks() {
        let mut prng = test_rng();
        let g1 = BLSG1::random(&mut prng);

        let affine: G1Affine = g1.0.into_affine();
        let mut expected = Vec::new();
        affine
            .serialize_with_mode(&mut expected, Compress::Yes)
            .unwrap();
        assert_eq!(g1.to_compressed_bytes(), expected);
    }

    #[test]
    fn batch_inverse_matches_single_inverse() {
        let mut prng = test_rng();
        let mut values: Vec<BLSScalar> = (0..6).map(|_| BLSScalar::random(&mut prng)).collect();
        values.push(BLSScalar::zero());

        let inverted = batch_inverse(&values);
        for (v, inv) in values.iter().zip(inverted.iter()) {
            if v.is_zero() {
                assert!(inv.is_zero());
            } else {
                assert_eq!(v.inv().unwrap(), *inv);
            }
        }
    }
}

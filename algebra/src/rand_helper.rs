use rand_chacha::{
    rand_core::{CryptoRng, RngCore, SeedableRng},
    ChaChaRng,
};

fn test_rng_helper() -> ChaChaRng {
    // arbitrary seed
    let seed = [
        7, 0, 0, 0, 41, 0, 0, 0, 113, 2, 0, 0, 90, 17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    ChaChaRng::from_seed(seed)
}

/// Should be used only for tests, not for any real world usage.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    test_rng_helper()
}

/// Should be used only for tests, not for any real world usage.
/// Setting `DETERMINISTIC_TEST_RNG=1` makes every call return the same stream.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    let is_deterministic =
        std::env::vars().any(|(key, val)| key == "DETERMINISTIC_TEST_RNG" && val == "1");
    if is_deterministic {
        test_rng_helper()
    } else {
        ChaChaRng::from_entropy()
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use ark_std::UniformRand;

    #[test]
    fn test_deterministic_rng() {
        let mut rng = super::test_rng_helper();
        let a = u128::rand(&mut rng);

        let mut rng = super::test_rng_helper();
        let b = u128::rand(&mut rng);
        assert_eq!(a, b);

        let mut rng = super::test_rng();
        let c = u128::rand(&mut rng);
        let d = u128::rand(&mut rng);
        assert_ne!(c, d);
    }
}

//! Field, group and pairing abstractions used by the PLONK prover.
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_import_braces, non_shorthand_field_patterns)]
#![deny(unused_attributes, unused_imports, unused_mut, missing_docs)]
#![deny(stable_features, unused_allocation)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]
#![allow(clippy::upper_case_acronyms)]

/// Module for the BLS12-381 curve
pub mod bls12_381;

/// Module for error handling
pub mod errors;

/// Module for serialization of scalars and group elements
pub mod serialization;

/// Module for traits
pub mod traits;

/// Module for utils
pub mod utils;

/// Module for test rng
pub mod rand_helper;

/// Module for the prelude
pub mod prelude;

#[doc(hidden)]
pub use ark_std::{
    borrow, fmt, iter, marker, ops, rand, One, UniformRand, Zero,
};

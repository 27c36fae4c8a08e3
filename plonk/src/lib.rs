//! PLONK proof construction over KZG polynomial commitments.
#![deny(warnings)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate serde_derive;

/// Module for error handling
pub mod errors;

/// Module for the PLONK constraint system, indexer, prover and verifier
pub mod plonk;

/// Module for polynomials and polynomial commitment schemes
pub mod poly_commit;

/// Module for the fan-out helpers
pub mod utils;

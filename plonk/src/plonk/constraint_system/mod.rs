use crate::errors::{PlonkError, Result};
use plonk_algebra::prelude::*;

/// Module for the sparse rank-1 constraint system.
pub mod sparse_r1cs;

pub use sparse_r1cs::{SparseR1C, SparseR1CS, Variable};

/// Variable index
pub type VarIndex = usize;
/// Constraint index
pub type CsIndex = usize;

/// The number of wires in a gate.
pub const N_WIRES_PER_GATE: usize = 3;

/// The number of selectors: ql, qr, qm, qo, qk.
pub const N_SELECTORS: usize = 5;

/// Trait for PLONK constraint systems.
pub trait ConstraintSystem: Sized {
    /// The field of the circuit.
    type Field: Scalar;

    /// Return the number of rows, padded to a power of two.
    /// `size` should divide q-1 where q is the size of the prime field.
    /// This enables finding a multiplicative subgroup with order `size`.
    fn size(&self) -> usize;

    /// Return number of variables in the constrain system
    fn num_vars(&self) -> usize;

    /// Return the wiring of the constrain system: one vector of variable
    /// indices per wire, each of length `size`.
    fn wiring(&self) -> Vec<Vec<VarIndex>>;

    /// Return the number of wires in a single gate.
    fn n_wires_per_gate() -> usize {
        N_WIRES_PER_GATE
    }

    /// Return the number of selectors.
    fn num_selectors(&self) -> usize {
        N_SELECTORS
    }

    /// Check that the wiring has one vector of `size` entries per wire,
    /// and only refers to variables below `num_vars`.
    fn check_wiring(&self) -> Result<()> {
        let n = self.size();
        let num_vars = self.num_vars();
        let wiring = self.wiring();
        if wiring.len() != Self::n_wires_per_gate()
            || wiring
                .iter()
                .any(|wire| wire.len() != n || wire.iter().any(|v| *v >= num_vars))
        {
            return Err(PlonkError::FuncParamsError);
        }
        Ok(())
    }

    /// Compute the permutation implied by the copy constraints.
    /// Position `k * size + j` is the k-th wire of row j, and every variable
    /// forms one cycle over the positions where it occurs.
    fn compute_permutation(&self) -> Result<Vec<usize>> {
        self.check_wiring()?;
        let n = self.size();
        let n_wires_per_gate = Self::n_wires_per_gate();
        let mut perm = vec![0usize; n_wires_per_gate * n];
        let mut v = Vec::with_capacity(n_wires_per_gate * n);
        for wire_slice in self.wiring().iter() {
            v.extend_from_slice(wire_slice);
        }

        let mut first = vec![usize::MAX; self.num_vars()];
        let mut last = vec![usize::MAX; self.num_vars()];
        for (i, value) in v.iter().enumerate() {
            if first[*value] == usize::MAX {
                first[*value] = i;
            } else {
                perm[last[*value]] = i;
            }
            last[*value] = i;
        }
        // close every cycle
        for (head, tail) in first.iter().zip(last.iter()) {
            if *head != usize::MAX {
                perm[*tail] = *head;
            }
        }
        Ok(perm)
    }

    /// Return the indices of the rows holding public inputs.
    fn public_vars_constraint_indices(&self) -> Vec<CsIndex>;

    /// Return the indices of the witnesses holding public inputs.
    fn public_vars_witness_indices(&self) -> Vec<VarIndex>;

    /// Return the Lagrange values of the (index)-th selector, one per row.
    fn selector(&self, index: usize) -> Result<Vec<Self::Field>>;

    /// Compute the full assignment from the public and secret inputs.
    fn solve(&self, public: &[Self::Field], secret: &[Self::Field]) -> Result<Vec<Self::Field>>;

    /// Check that the assignment satisfies every row.
    fn verify_witness(&self, witness: &[Self::Field]) -> Result<()>;
}

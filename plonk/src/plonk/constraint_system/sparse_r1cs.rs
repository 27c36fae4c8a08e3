//! A sparse rank-1 constraint system with one gate shape,
//! `ql * l + qr * r + qm * l * r + qo * o + qk = 0`.
//!
//! The rows of the circuit are laid out as: one row per public input,
//! one row per constraint, one row per assertion, then padding rows.
use super::{ConstraintSystem, CsIndex, VarIndex};
use crate::errors::{PlonkError, Result};
use plonk_algebra::prelude::*;

/// A variable of the circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// The i-th public input.
    Public(usize),
    /// The i-th secret input.
    Secret(usize),
    /// The output of the i-th constraint.
    Internal(usize),
}

/// A single gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseR1C<F> {
    /// left operand
    pub l: Variable,
    /// right operand
    pub r: Variable,
    /// output operand
    pub o: Variable,
    /// left selector
    pub ql: F,
    /// right selector
    pub qr: F,
    /// multiplication selector
    pub qm: F,
    /// output selector
    pub qo: F,
    /// constant selector
    pub qk: F,
}

impl<F: Scalar> SparseR1C<F> {
    /// Evaluate `ql * l + qr * r + qm * l * r + qo * o + qk`.
    pub fn eval(&self, l: &F, r: &F, o: &F) -> F {
        let mut res = self.ql.mul(l);
        res.add_assign(&self.qr.mul(r));
        res.add_assign(&self.qm.mul(l).mul(r));
        res.add_assign(&self.qo.mul(o));
        res.add_assign(&self.qk);
        res
    }
}

/// Sparse R1CS: every constraint defines one internal variable,
/// every assertion only checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseR1CS<F> {
    /// the number of public inputs.
    pub num_public: usize,
    /// the number of secret inputs.
    pub num_secret: usize,
    /// the constraints, the i-th one defines `Variable::Internal(i)`.
    pub constraints: Vec<SparseR1C<F>>,
    /// the assertions.
    pub assertions: Vec<SparseR1C<F>>,
}

impl<F: Scalar> Default for SparseR1CS<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> SparseR1CS<F> {
    /// Create an empty constraint system.
    pub fn new() -> SparseR1CS<F> {
        SparseR1CS {
            num_public: 0,
            num_secret: 0,
            constraints: vec![],
            assertions: vec![],
        }
    }

    /// Return the number of public inputs.
    pub fn num_public(&self) -> usize {
        self.num_public
    }

    /// Return the number of secret inputs.
    pub fn num_secret(&self) -> usize {
        self.num_secret
    }

    /// Return the number of internal variables.
    pub fn num_internal(&self) -> usize {
        self.constraints.len()
    }

    /// Return the number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Return the number of assertions.
    pub fn num_assertions(&self) -> usize {
        self.assertions.len()
    }

    /// Return the number of rows before padding.
    pub fn num_rows(&self) -> usize {
        self.num_public + self.constraints.len() + self.assertions.len()
    }

    /// Resolve a variable to its position in the solution vector:
    /// public inputs, then secret inputs, then internal variables.
    pub fn wire_index(&self, v: Variable) -> VarIndex {
        match v {
            Variable::Public(i) => i,
            Variable::Secret(i) => self.num_public + i,
            Variable::Internal(i) => self.num_public + self.num_secret + i,
        }
    }

    /// Whether `v` was created by this constraint system.
    pub fn contains(&self, v: Variable) -> bool {
        match v {
            Variable::Public(i) => i < self.num_public,
            Variable::Secret(i) => i < self.num_secret,
            Variable::Internal(i) => i < self.constraints.len(),
        }
    }

    /// Add a public input.
    pub fn new_public_input(&mut self) -> Variable {
        self.num_public += 1;
        Variable::Public(self.num_public - 1)
    }

    /// Add a secret input.
    pub fn new_secret_input(&mut self) -> Variable {
        self.num_secret += 1;
        Variable::Secret(self.num_secret - 1)
    }

    /// Add the constraint `ql * l + qr * r + qm * l * r + qk = o` for a new variable `o`.
    fn push_constraint(
        &mut self,
        l: Variable,
        r: Variable,
        ql: F,
        qr: F,
        qm: F,
        qk: F,
    ) -> Variable {
        let o = Variable::Internal(self.constraints.len());
        self.constraints.push(SparseR1C {
            l,
            r,
            o,
            ql,
            qr,
            qm,
            qo: F::one().neg(),
            qk,
        });
        o
    }

    /// Return `ca * a + cb * b`.
    pub fn linear_combine(&mut self, a: Variable, ca: F, b: Variable, cb: F) -> Variable {
        self.push_constraint(a, b, ca, cb, F::zero(), F::zero())
    }

    /// Return `a + b`.
    pub fn add(&mut self, a: Variable, b: Variable) -> Variable {
        self.linear_combine(a, F::one(), b, F::one())
    }

    /// Return `a - b`.
    pub fn sub(&mut self, a: Variable, b: Variable) -> Variable {
        self.linear_combine(a, F::one(), b, F::one().neg())
    }

    /// Return `a * b`.
    pub fn mul(&mut self, a: Variable, b: Variable) -> Variable {
        self.push_constraint(a, b, F::zero(), F::zero(), F::one(), F::zero())
    }

    /// Return `a + c`.
    pub fn add_constant(&mut self, a: Variable, c: F) -> Variable {
        self.push_constraint(a, a, F::one(), F::zero(), F::zero(), c)
    }

    /// Return `c * a`.
    pub fn mul_constant(&mut self, a: Variable, c: F) -> Variable {
        self.push_constraint(a, a, c, F::zero(), F::zero(), F::zero())
    }

    /// Assert `a == b`.
    pub fn assert_equal(&mut self, a: Variable, b: Variable) {
        self.assertions.push(SparseR1C {
            l: a,
            r: b,
            o: a,
            ql: F::one(),
            qr: F::one().neg(),
            qm: F::zero(),
            qo: F::zero(),
            qk: F::zero(),
        });
    }

    /// Assert `a * a == a`.
    pub fn assert_boolean(&mut self, a: Variable) {
        self.assertions.push(SparseR1C {
            l: a,
            r: a,
            o: a,
            ql: F::one().neg(),
            qr: F::zero(),
            qm: F::one(),
            qo: F::zero(),
            qk: F::zero(),
        });
    }

    fn value_of(&self, witness: &[F], v: Variable) -> Result<F> {
        witness
            .get(self.wire_index(v))
            .copied()
            .ok_or(PlonkError::FuncParamsError)
    }

    fn check_row(&self, witness: &[F], row: CsIndex, c: &SparseR1C<F>) -> Result<()> {
        let l = self.value_of(witness, c.l)?;
        let r = self.value_of(witness, c.r)?;
        let o = self.value_of(witness, c.o)?;
        if c.eval(&l, &r, &o).is_zero() {
            Ok(())
        } else {
            Err(PlonkError::UnsatisfiedConstraint(row))
        }
    }
}

impl<F: Scalar> ConstraintSystem for SparseR1CS<F> {
    type Field = F;

    fn size(&self) -> usize {
        min_greater_equal_power_of_two(self.num_rows())
    }

    fn num_vars(&self) -> usize {
        self.num_public + self.num_secret + self.constraints.len()
    }

    /// Public rows read their input on the left wire and var 0 elsewhere,
    /// padding rows read var 0 on every wire.
    fn wiring(&self) -> Vec<Vec<VarIndex>> {
        let n = self.size();
        let mut wiring = vec![Vec::with_capacity(n); Self::n_wires_per_gate()];
        for i in 0..self.num_public {
            wiring[0].push(i);
            wiring[1].push(0);
            wiring[2].push(0);
        }
        for c in self.constraints.iter().chain(self.assertions.iter()) {
            wiring[0].push(self.wire_index(c.l));
            wiring[1].push(self.wire_index(c.r));
            wiring[2].push(self.wire_index(c.o));
        }
        for wire in wiring.iter_mut() {
            wire.resize(n, 0);
        }
        wiring
    }

    /// Variables are checked per kind: `Secret(i)` out of range could
    /// otherwise alias an internal variable.
    fn check_wiring(&self) -> Result<()> {
        let in_range = self
            .constraints
            .iter()
            .chain(self.assertions.iter())
            .all(|c| self.contains(c.l) && self.contains(c.r) && self.contains(c.o));
        if in_range {
            Ok(())
        } else {
            Err(PlonkError::FuncParamsError)
        }
    }

    fn public_vars_constraint_indices(&self) -> Vec<CsIndex> {
        (0..self.num_public).collect()
    }

    fn public_vars_witness_indices(&self) -> Vec<VarIndex> {
        (0..self.num_public)
            .map(|i| self.wire_index(Variable::Public(i)))
            .collect()
    }

    /// The selectors are ordered as ql, qr, qm, qo, qk.
    /// Public rows carry `ql = -1` so that the public input closes the gate.
    fn selector(&self, index: usize) -> Result<Vec<F>> {
        if index >= self.num_selectors() {
            return Err(PlonkError::FuncParamsError);
        }
        let pick = |c: &SparseR1C<F>| match index {
            0 => c.ql,
            1 => c.qr,
            2 => c.qm,
            3 => c.qo,
            _ => c.qk,
        };

        let public_value = if index == 0 {
            F::one().neg()
        } else {
            F::zero()
        };
        let mut res = vec![public_value; self.num_public];
        res.extend(
            self.constraints
                .iter()
                .chain(self.assertions.iter())
                .map(pick),
        );
        res.resize(self.size(), F::zero());
        Ok(res)
    }

    fn solve(&self, public: &[F], secret: &[F]) -> Result<Vec<F>> {
        if public.len() != self.num_public || secret.len() != self.num_secret {
            return Err(PlonkError::FuncParamsError);
        }
        self.check_wiring()?;

        let mut witness = Vec::with_capacity(self.num_vars());
        witness.extend_from_slice(public);
        witness.extend_from_slice(secret);

        // o = -(ql * l + qr * r + qm * l * r + qk) / qo
        for c in self.constraints.iter() {
            let l = self.value_of(&witness, c.l)?;
            let r = self.value_of(&witness, c.r)?;
            let qo_inv = c.qo.inv().map_err(|_| PlonkError::FuncParamsError)?;
            let partial = c.eval(&l, &r, &F::zero());
            witness.push(partial.mul(&qo_inv).neg());
        }

        self.verify_witness(&witness)?;
        Ok(witness)
    }

    /// Rows are reported with their index in the padded layout.
    fn verify_witness(&self, witness: &[F]) -> Result<()> {
        if witness.len() != self.num_vars() {
            return Err(PlonkError::FuncParamsError);
        }
        let offset = self.num_public;
        for (i, c) in self
            .constraints
            .iter()
            .chain(self.assertions.iter())
            .enumerate()
        {
            self.check_row(witness, offset + i, c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::errors::PlonkError;
    use crate::plonk::constraint_system::{ConstraintSystem, SparseR1C, SparseR1CS, Variable};
    use plonk_algebra::{bls12_381::BLSScalar, prelude::*};

    type F = BLSScalar;

    #[test]
    fn test_solve_arithmetic() {
        let mut cs = SparseR1CS::<F>::new();
        let x = cs.new_public_input();
        let y = cs.new_secret_input();
        let sum = cs.add(x, y);
        let prod = cs.mul(sum, y);
        let shifted = cs.add_constant(prod, F::from(7u32));
        let scaled = cs.mul_constant(shifted, F::from(3u32));
        let diff = cs.sub(scaled, x);
        let lc = cs.linear_combine(diff, F::from(2u32), y, F::from(5u32));
        assert_eq!(lc, Variable::Internal(5));

        let witness = cs.solve(&[F::from(2u32)], &[F::from(3u32)]).unwrap();
        assert_eq!(witness.len(), cs.num_vars());
        // sum = 5, prod = 15, shifted = 22, scaled = 66, diff = 64, lc = 143
        assert_eq!(witness[cs.wire_index(sum)], F::from(5u32));
        assert_eq!(witness[cs.wire_index(prod)], F::from(15u32));
        assert_eq!(witness[cs.wire_index(shifted)], F::from(22u32));
        assert_eq!(witness[cs.wire_index(scaled)], F::from(66u32));
        assert_eq!(witness[cs.wire_index(diff)], F::from(64u32));
        assert_eq!(witness[cs.wire_index(lc)], F::from(143u32));
        assert!(cs.verify_witness(&witness).is_ok());
    }

    #[test]
    fn test_assertions() {
        let mut cs = SparseR1CS::<F>::new();
        let a = cs.new_secret_input();
        let b = cs.new_secret_input();
        cs.assert_boolean(a);
        cs.assert_equal(a, b);
        assert_eq!(cs.num_assertions(), 2);
        assert_eq!(cs.num_internal(), 0);

        assert!(cs.solve(&[], &[F::one(), F::one()]).is_ok());
        assert!(cs.solve(&[], &[F::zero(), F::zero()]).is_ok());
        assert_eq!(
            cs.solve(&[], &[F::from(2u32), F::from(2u32)]),
            Err(PlonkError::UnsatisfiedConstraint(0))
        );
        assert_eq!(
            cs.solve(&[], &[F::one(), F::zero()]),
            Err(PlonkError::UnsatisfiedConstraint(1))
        );
    }

    #[test]
    fn test_wrong_input_counts() {
        let mut cs = SparseR1CS::<F>::new();
        let x = cs.new_public_input();
        let _ = cs.add(x, x);
        assert_eq!(cs.solve(&[], &[]), Err(PlonkError::FuncParamsError));
        assert_eq!(
            cs.solve(&[F::one()], &[F::one()]),
            Err(PlonkError::FuncParamsError)
        );
        assert_eq!(
            cs.verify_witness(&[F::one()]),
            Err(PlonkError::FuncParamsError)
        );
    }

    #[test]
    fn test_out_of_range_variables() {
        let mut cs = SparseR1CS::<F>::new();
        let x = cs.new_public_input();
        let y = cs.new_secret_input();
        let _ = cs.mul(x, y);
        assert!(cs.check_wiring().is_ok());

        // Secret(1) would resolve to the index of Internal(0)
        let mut aliased = cs.clone();
        aliased.constraints.push(SparseR1C {
            l: Variable::Secret(1),
            r: x,
            o: Variable::Internal(1),
            ql: F::one(),
            qr: F::zero(),
            qm: F::zero(),
            qo: F::one().neg(),
            qk: F::zero(),
        });
        assert_eq!(aliased.check_wiring(), Err(PlonkError::FuncParamsError));

        let mut dangling = cs.clone();
        dangling.assertions.push(SparseR1C {
            l: Variable::Secret(5),
            r: x,
            o: x,
            ql: F::one(),
            qr: F::zero(),
            qm: F::zero(),
            qo: F::one().neg(),
            qk: F::zero(),
        });
        assert_eq!(dangling.check_wiring(), Err(PlonkError::FuncParamsError));
        assert_eq!(
            dangling.compute_permutation(),
            Err(PlonkError::FuncParamsError)
        );
        assert_eq!(
            dangling.solve(&[F::one()], &[F::one()]),
            Err(PlonkError::FuncParamsError)
        );
    }

    #[test]
    fn test_layout() {
        let mut cs = SparseR1CS::<F>::new();
        let x = cs.new_public_input();
        let y = cs.new_public_input();
        let z = cs.new_secret_input();
        let s = cs.add(x, z);
        let p = cs.mul(s, y);
        cs.assert_equal(p, p);
        assert_eq!(cs.num_rows(), 5);
        assert_eq!(cs.size(), 8);

        let wiring = cs.wiring();
        assert_eq!(wiring.len(), 3);
        assert_eq!(wiring[0], vec![0, 1, 0, 3, 4, 0, 0, 0]);
        assert_eq!(wiring[1], vec![0, 0, 2, 1, 4, 0, 0, 0]);
        assert_eq!(wiring[2], vec![0, 0, 3, 4, 4, 0, 0, 0]);

        let ql = cs.selector(0).unwrap();
        assert_eq!(ql[0], F::one().neg());
        assert_eq!(ql[1], F::one().neg());
        assert_eq!(ql[2], F::one());
        assert!(ql[5..].iter().all(|v| v.is_zero()));
        let qm = cs.selector(2).unwrap();
        assert_eq!(qm[3], F::one());
        assert!(cs.selector(5).is_err());
        assert_eq!(cs.public_vars_witness_indices(), vec![0, 1]);
        assert_eq!(cs.public_vars_constraint_indices(), vec![0, 1]);
    }

    #[test]
    fn test_compute_permutation() {
        let mut cs = SparseR1CS::<F>::new();
        let x = cs.new_public_input();
        let y = cs.new_secret_input();
        let s = cs.add(x, y);
        let p = cs.mul(s, s);
        cs.assert_equal(p, y);

        let n = cs.size();
        let perm = cs.compute_permutation().unwrap();
        assert_eq!(perm.len(), 3 * n);

        let mut flat = vec![];
        for wire in cs.wiring() {
            flat.extend(wire);
        }

        // a permutation which maps each position to one holding the same variable
        let mut seen = vec![false; 3 * n];
        for (i, j) in perm.iter().enumerate() {
            assert!(!seen[*j]);
            seen[*j] = true;
            assert_eq!(flat[i], flat[*j]);
        }

        // every variable forms a single cycle
        for start in 0..3 * n {
            let mut count = 1;
            let mut pos = perm[start];
            while pos != start {
                count += 1;
                pos = perm[pos];
            }
            let occurrences = flat.iter().filter(|v| **v == flat[start]).count();
            assert_eq!(count, occurrences);
        }
    }
}

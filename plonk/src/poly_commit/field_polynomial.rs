use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use plonk_algebra::prelude::*;

/// Field polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpPolynomial<F> {
    /// Coefficients (or evaluations) of the polynomial
    pub coefs: Vec<F>,
}

impl<F: Scalar> FpPolynomial<F> {
    /// Return the polynomial coefs reference.
    pub fn get_coefs_ref(&self) -> &[F] {
        self.coefs.as_slice()
    }

    /// Return the constant zero polynomial
    /// # Example
    /// ```
    /// use plonk_prover::poly_commit::field_polynomial::FpPolynomial;
    /// use plonk_algebra::bls12_381::BLSScalar;
    /// use plonk_algebra::{Zero, One};
    /// let poly = FpPolynomial::<BLSScalar>::zero();
    /// let zero = BLSScalar::zero();
    /// assert_eq!(poly.degree(), 0);
    /// assert_eq!(poly.eval(&zero), zero);
    /// assert_eq!(poly.eval(&BLSScalar::one()), zero);
    /// ```
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Return the constant one polynomial
    pub fn one() -> Self {
        Self::from_coefs(vec![F::one()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient first.
    /// High-order zero coefficient are trimmed.
    /// # Example
    /// ```
    /// use plonk_prover::poly_commit::field_polynomial::FpPolynomial;
    /// use plonk_algebra::bls12_381::BLSScalar;
    /// use plonk_algebra::{Zero, One, ops::*};
    /// let zero = BLSScalar::zero();
    /// let one = BLSScalar::one();
    /// let two = one.add(&one);
    /// let five = two.add(&two).add(&one);
    /// let coefs = vec![one, zero, one];
    /// let poly = FpPolynomial::from_coefs(coefs);
    /// assert_eq!(poly.degree(), 2);
    /// assert_eq!(poly.eval(&zero), one);
    /// assert_eq!(poly.eval(&one), two);
    /// assert_eq!(poly.eval(&two), five);
    /// let coefs2 = vec![one, zero, one, zero, zero, zero];
    /// let poly2 = FpPolynomial::from_coefs(coefs2);
    /// assert_eq!(poly2.degree(), 2);
    /// assert_eq!(poly, poly2);
    /// ```
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Build a polynomial from its zeroes/roots.
    pub fn from_zeroes(zeroes: &[F]) -> Self {
        let mut r = Self::one();
        for root in zeroes.iter() {
            let mut p = r.clone();
            r.coefs.insert(0, F::zero()); // multiply by X
            p.mul_scalar_assign(root);
            r.sub_assign(&p);
        }
        r.trim_coefs();
        r
    }

    /// Return a polynomial of `degree` + 1 uniformly random coefficients.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R, degree: usize) -> FpPolynomial<F> {
        let mut coefs = Vec::with_capacity(degree + 1);
        for _ in 0..degree + 1 {
            coefs.push(F::random(prng));
        }
        Self::from_coefs(coefs)
    }

    /// Remove high degree zero-coefficients
    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().map_or(false, |c| c.is_zero()) {
            self.coefs.pop();
        }
        if self.coefs.is_empty() {
            self.coefs.push(F::zero());
        }
    }

    /// Return degree of the polynomial
    pub fn degree(&self) -> usize {
        if self.coefs.is_empty() {
            0
        } else {
            self.coefs.len() - 1
        }
    }

    /// Test if polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coefs[0].is_zero()
    }

    /// Evaluate a polynomial on a point with Horner's rule.
    pub fn eval(&self, point: &F) -> F {
        let mut result = F::zero();
        for coef in self.coefs.iter().rev() {
            result.mul_assign(point);
            result.add_assign(coef);
        }
        result
    }

    /// Add another polynomial to self.
    pub fn add_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.add_assign(other_coef);
        }
        let n = self.coefs.len();
        if n < other.coefs.len() {
            self.coefs.extend_from_slice(&other.coefs[n..]);
        }
        self.trim_coefs();
    }

    /// Add with another polynomial, producing a new polynomial.
    /// # Example:
    /// ```
    /// use plonk_prover::poly_commit::field_polynomial::FpPolynomial;
    /// use plonk_algebra::bls12_381::BLSScalar;
    /// use plonk_algebra::{Zero, One, ops::*};
    /// let zero = BLSScalar::zero();
    /// let one = BLSScalar::one();
    /// let two = one.add(&one);
    /// let three = two.add(&one);
    /// let poly1 = FpPolynomial::from_coefs(vec![zero, one, two, three]);
    /// let poly2 = FpPolynomial::from_coefs(vec![three, two, one, zero, one]);
    /// let poly_add = poly1.add(&poly2);
    /// let poly_add2 = poly2.add(&poly1);
    /// assert_eq!(poly_add, poly_add2);
    /// let poly_expected = FpPolynomial::from_coefs(vec![three, three, three, three, one]);
    /// assert_eq!(poly_add, poly_expected);
    /// ```
    pub fn add(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.add_assign(other);
        new
    }

    /// Subtracts another polynomial from self.
    pub fn sub_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.sub_assign(other_coef);
        }
        let n = self.coefs.len();
        if other.coefs.len() > n {
            for other_coef in other.coefs[n..].iter() {
                self.coefs.push(other_coef.neg());
            }
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial from self, producing a new polynomial.
    pub fn sub(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.sub_assign(other);
        new
    }

    /// Add `coef` to the coefficient of order `order`.
    pub fn add_coef_assign(&mut self, coef: &F, order: usize) {
        while self.coefs.len() <= order {
            self.coefs.push(F::zero());
        }
        self.coefs[order].add_assign(coef);
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar.
    pub fn mul_scalar_assign(&mut self, scalar: &F) {
        for coef in self.coefs.iter_mut() {
            coef.mul_assign(scalar)
        }
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar into a new polynomial.
    /// # Example:
    /// ```
    /// use plonk_prover::poly_commit::field_polynomial::FpPolynomial;
    /// use plonk_algebra::bls12_381::BLSScalar;
    /// use plonk_algebra::{Zero, One, ops::*};
    /// let zero = BLSScalar::zero();
    /// let one = BLSScalar::one();
    /// let two = one.add(&one);
    /// let poly = FpPolynomial::from_coefs(vec![zero, one, one]);
    /// let new = poly.mul_scalar(&two);
    /// let poly_expected = FpPolynomial::from_coefs(vec![zero, two, two]);
    /// assert_eq!(new, poly_expected);
    /// ```
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        new.mul_scalar_assign(scalar);
        new
    }

    /// Multiply the polynomial variable by a scalar.
    /// mul_var(\sum a_i X^i, b) = \sum a_i b^i X^i
    pub fn mul_var_assign(&mut self, scalar: &F) {
        let mut r = F::one();
        for coefs in self.coefs.iter_mut() {
            coefs.mul_assign(&r);
            r.mul_assign(scalar);
        }
        self.trim_coefs();
    }

    /// Multiply polynomial variable by a scalar into a new polynomial.
    pub fn mul_var(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        new.mul_var_assign(scalar);
        new
    }

    /// Divide by `X - point`, returning the quotient and the remainder,
    /// the latter being the evaluation at `point`.
    /// # Example:
    /// ```
    /// use plonk_prover::poly_commit::field_polynomial::FpPolynomial;
    /// use plonk_algebra::bls12_381::BLSScalar;
    /// use plonk_algebra::{Zero, One, ops::*};
    /// let one = BLSScalar::one();
    /// let two = one.add(&one);
    /// let three = two.add(&one);
    /// // X^2 + 1 = (X - 1)(X + 1) + 2
    /// let poly = FpPolynomial::from_coefs(vec![one, BLSScalar::zero(), one]);
    /// let (q, r) = poly.divide_by_linear(&one);
    /// assert_eq!(q, FpPolynomial::from_coefs(vec![one, one]));
    /// assert_eq!(r, two);
    /// let (_, r) = poly.divide_by_linear(&two);
    /// assert_eq!(r, three.add(&two));
    /// ```
    pub fn divide_by_linear(&self, point: &F) -> (Self, F) {
        let n = self.coefs.len();
        if n < 2 {
            return (Self::zero(), self.coefs.first().copied().unwrap_or_else(F::zero));
        }
        let mut quo = vec![F::zero(); n - 1];
        let mut carry = F::zero();
        for i in (1..n).rev() {
            carry = self.coefs[i].add(&carry.mul(point));
            quo[i - 1] = carry;
        }
        let rem = self.coefs[0].add(&carry.mul(point));
        (Self::from_coefs(quo), rem)
    }
}

/// The radix-2 evaluation domain over the FFT field behind `F`.
pub type FpDomain<F> = Radix2EvaluationDomain<<F as Domain>::Field>;

/// Return the multiplicative subgroup of exactly `n` elements, if the field has one.
pub fn evaluation_domain<F: Domain>(n: usize) -> Option<FpDomain<F>> {
    if !n.is_power_of_two() {
        return None;
    }
    Radix2EvaluationDomain::<F::Field>::new(n).filter(|domain| domain.size() == n)
}

/// Return the generator of the domain.
pub fn domain_generator<F: Domain>(domain: &FpDomain<F>) -> F {
    F::from_field(domain.group_gen)
}

impl<F: Domain> FpPolynomial<F> {
    /// Evaluate the polynomial over the domain, in natural order.
    /// The degree must be smaller than the domain size.
    pub fn fft_with_domain(&self, domain: &FpDomain<F>) -> Vec<F> {
        assert!(self.coefs.len() <= domain.size());
        let coefs: Vec<F::Field> = self.coefs.iter().map(|x| x.get_field()).collect();
        domain
            .fft(&coefs)
            .into_iter()
            .map(F::from_field)
            .collect()
    }

    /// Evaluate the polynomial over the coset `offset * domain`.
    pub fn coset_fft_with_domain(&self, domain: &FpDomain<F>, offset: &F) -> Vec<F> {
        self.mul_var(offset).fft_with_domain(domain)
    }

    /// Interpolate the polynomial from its values over the domain, in natural order.
    pub fn ifft_with_domain(domain: &FpDomain<F>, values: &[F]) -> Self {
        assert!(values.len() <= domain.size());
        let values: Vec<F::Field> = values.iter().map(|x| x.get_field()).collect();
        let coefs = domain.ifft(&values).into_iter().map(F::from_field).collect();
        Self::from_coefs(coefs)
    }

    /// Interpolate the polynomial from its values over the coset `k * domain`,
    /// given `k_inv`, the inverse of the coset offset.
    pub fn coset_ifft_with_domain(domain: &FpDomain<F>, values: &[F], k_inv: &F) -> Self {
        Self::ifft_with_domain(domain, values).mul_var(k_inv)
    }
}

#[cfg(test)]
mod test {
    use crate::poly_commit::field_polynomial::{
        domain_generator, evaluation_domain, FpPolynomial,
    };
    use plonk_algebra::{bls12_381::BLSScalar, prelude::*};
    use rand_chacha::ChaChaRng;

    #[test]
    fn from_zeroes() {
        let n = 10;
        let mut zeroes = vec![];
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        for _ in 0..n {
            zeroes.push(BLSScalar::random(&mut prng));
        }
        let poly = FpPolynomial::from_zeroes(&zeroes[..]);
        assert_eq!(poly.degree(), n);
        for root in zeroes.iter() {
            assert_eq!(BLSScalar::zero(), poly.eval(root));
        }
    }

    #[test]
    fn divide_by_linear_matches_evaluation() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let poly = FpPolynomial::<BLSScalar>::random(&mut prng, 20);
        let point = BLSScalar::random(&mut prng);
        let (q, r) = poly.divide_by_linear(&point);
        assert_eq!(r, poly.eval(&point));

        // q(X) * (X - point) + r == poly(X), checked at a random point
        let x = BLSScalar::random(&mut prng);
        assert_eq!(q.eval(&x).mul(&x.sub(&point)).add(&r), poly.eval(&x));

        let constant = FpPolynomial::from_coefs(vec![point]);
        let (q, r) = constant.divide_by_linear(&x);
        assert!(q.is_zero());
        assert_eq!(r, point);
    }

    #[test]
    fn arithmetic_keeps_trimmed_form() {
        let one = BLSScalar::one();
        let two = one.add(&one);
        let mut p = FpPolynomial::from_coefs(vec![one, two, one]);
        let q = FpPolynomial::from_coefs(vec![one, one, one]);
        p.sub_assign(&q);
        assert_eq!(p, FpPolynomial::from_coefs(vec![BLSScalar::zero(), one]));
        assert_eq!(p.degree(), 1);

        p.add_coef_assign(&one, 4);
        assert_eq!(p.degree(), 4);
        p.add_coef_assign(&one.neg(), 4);
        assert_eq!(p.degree(), 1);

        p.mul_scalar_assign(&BLSScalar::zero());
        assert!(p.is_zero());
        assert!(FpPolynomial::<BLSScalar>::zero().is_zero());
    }

    #[test]
    fn test_fft() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        for n in [1usize, 2, 4, 16, 32] {
            let domain = evaluation_domain::<BLSScalar>(n).unwrap();
            let root: BLSScalar = domain_generator(&domain);
            let polynomial = FpPolynomial::<BLSScalar>::random(&mut prng, n - 1);
            let fft = polynomial.fft_with_domain(&domain);
            assert_eq!(fft.len(), n);

            let mut omega = BLSScalar::one();
            for value in fft.iter() {
                assert_eq!(*value, polynomial.eval(&omega));
                omega.mul_assign(&root);
            }
            assert_eq!(omega, BLSScalar::one());

            let ffti_polynomial = FpPolynomial::ifft_with_domain(&domain, &fft);
            assert_eq!(ffti_polynomial, polynomial);
        }
        assert!(evaluation_domain::<BLSScalar>(12).is_none());
    }

    #[test]
    fn test_coset_fft() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let domain = evaluation_domain::<BLSScalar>(16).unwrap();
        let root: BLSScalar = domain_generator(&domain);
        let k = BLSScalar::multiplicative_generator();

        let polynomial = FpPolynomial::<BLSScalar>::random(&mut prng, 15);
        let values = polynomial.coset_fft_with_domain(&domain, &k);

        let mut point = k;
        for value in values.iter() {
            assert_eq!(*value, polynomial.eval(&point));
            point.mul_assign(&root);
        }

        let k_inv = k.inv().unwrap();
        let recovered = FpPolynomial::coset_ifft_with_domain(&domain, &values, &k_inv);
        assert_eq!(recovered, polynomial);
    }
}

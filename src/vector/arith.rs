//! Elementwise arithmetic.
//!
//! Every operation writes into a caller-supplied `result` whose size must
//! already match the operands; nothing here allocates or resizes. On
//! error `result` is left untouched.

use super::Vector;
use crate::error::{VectorError, VectorResult};

impl Vector {
    /// `result = self + other`.
    ///
    /// # Errors
    /// - [`VectorError::Uninitialized`] if any operand is invalid.
    /// - [`VectorError::SizeMismatch`] if the sizes differ.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let a = Vector::vec2(1.0, 2.0);
    /// let b = Vector::vec2(10.0, 20.0);
    /// let mut r = Vector::create(2).unwrap();
    /// a.add(&b, &mut r).unwrap();
    /// assert_eq!(r.data().unwrap(), &[11.0, 22.0]);
    /// ```
    pub fn add(&self, other: &Vector, result: &mut Vector) -> VectorResult<()> {
        self.zip_into(other, result, |a, b| a + b)
    }

    /// `result = self − other`.
    pub fn sub(&self, other: &Vector, result: &mut Vector) -> VectorResult<()> {
        self.zip_into(other, result, |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn mult(&self, other: &Vector, result: &mut Vector) -> VectorResult<()> {
        self.zip_into(other, result, |a, b| a * b)
    }

    /// Elementwise quotient `self / other`.
    ///
    /// All divisors are checked before anything is written.
    ///
    /// # Errors
    /// [`VectorError::DivisionByZero`] with the index of the first zero
    /// divisor, in addition to the errors of [`Vector::add`].
    pub fn div(&self, other: &Vector, result: &mut Vector) -> VectorResult<()> {
        if let Some(index) = other.data()?.iter().position(|&d| d == 0.0) {
            // operand validity and sizes still take precedence
            check_binary(self, other, result)?;
            return Err(VectorError::DivisionByZero { index });
        }
        self.zip_into(other, result, |a, b| a / b)
    }

    /// `result = self · scalar`.
    pub fn scale(&self, scalar: f64, result: &mut Vector) -> VectorResult<()> {
        self.map_into(result, |a| a * scalar)
    }

    /// `result = −self`.
    pub fn negate(&self, result: &mut Vector) -> VectorResult<()> {
        self.map_into(result, |a| -a)
    }

    pub(crate) fn zip_into(
        &self,
        other: &Vector,
        result: &mut Vector,
        op: impl Fn(f64, f64) -> f64,
    ) -> VectorResult<()> {
        check_binary(self, other, result)?;
        let (a, b) = (self.data()?, other.data()?);
        for ((r, &x), &y) in result.data_mut()?.iter_mut().zip(a).zip(b) {
            *r = op(x, y);
        }
        Ok(())
    }

    pub(crate) fn map_into(&self, result: &mut Vector, op: impl Fn(f64) -> f64) -> VectorResult<()> {
        let a = self.data()?;
        let out = result.data_mut()?;
        check_size(a.len(), out.len())?;
        for (r, &x) in out.iter_mut().zip(a) {
            *r = op(x);
        }
        Ok(())
    }
}

/// Validity first, then sizes: `other` and `result` must match `a`.
pub(crate) fn check_binary(a: &Vector, other: &Vector, result: &Vector) -> VectorResult<()> {
    let (a, b, r) = (a.data()?, other.data()?, result.data()?);
    check_size(a.len(), b.len())?;
    check_size(a.len(), r.len())
}

pub(crate) fn check_size(expected: usize, got: usize) -> VectorResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(VectorError::SizeMismatch { expected, got })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn pair(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (0..=max_len).prop_flat_map(|n| {
            (
                proptest::collection::vec(-1e6_f64..1e6, n),
                proptest::collection::vec(-1e6_f64..1e6, n),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn add_equals_sub_of_negation((a, b) in pair(32)) {
            let (a, b) = (Vector::from(a), Vector::from(b));
            let n = a.size();
            let mut sum = Vector::create(n).unwrap();
            let mut neg = Vector::create(n).unwrap();
            let mut diff = Vector::create(n).unwrap();
            a.add(&b, &mut sum).unwrap();
            b.negate(&mut neg).unwrap();
            a.sub(&neg, &mut diff).unwrap();
            prop_assert!(sum.equals(&diff, 1e-9));
        }

        #[test]
        fn scale_identities(data in proptest::collection::vec(-1e6_f64..1e6, 0..32)) {
            let a = Vector::from(data);
            let mut r = Vector::create(a.size()).unwrap();
            a.scale(1.0, &mut r).unwrap();
            prop_assert_eq!(&r, &a);
            a.scale(0.0, &mut r).unwrap();
            prop_assert!(r.is_zero(0.0));
        }
    }
}

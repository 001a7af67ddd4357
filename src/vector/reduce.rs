//! Reductions, in-place elementwise transforms, and tolerance predicates.

use super::Vector;
use crate::error::{VectorError, VectorResult};
use crate::summation::kahan_sum;

impl Vector {
    /// Smallest element. NaN elements are skipped unless every element
    /// is NaN.
    ///
    /// # Errors
    /// [`VectorError::Empty`] for a vector of size 0.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let v = Vector::from([3.0, 1.0, 4.0, 1.0, 5.0]);
    /// assert_eq!(v.min().unwrap(), 1.0);
    /// assert_eq!(v.max().unwrap(), 5.0);
    /// ```
    pub fn min(&self) -> VectorResult<f64> {
        self.fold_nonempty(f64::min)
    }

    /// Largest element. NaN handling matches [`Vector::min`].
    pub fn max(&self) -> VectorResult<f64> {
        self.fold_nonempty(f64::max)
    }

    /// Compensated sum of all elements; `0.0` for an empty vector.
    pub fn sum(&self) -> VectorResult<f64> {
        Ok(kahan_sum(self.data()?))
    }

    /// Arithmetic mean.
    ///
    /// # Errors
    /// [`VectorError::Empty`] for a vector of size 0.
    pub fn mean(&self) -> VectorResult<f64> {
        let data = self.data()?;
        if data.is_empty() {
            return Err(VectorError::Empty);
        }
        Ok(kahan_sum(data) / data.len() as f64)
    }

    /// Replaces every element with its absolute value.
    pub fn abs(&mut self) -> VectorResult<()> {
        self.apply(f64::abs)
    }

    /// Rounds every element toward −∞.
    pub fn floor(&mut self) -> VectorResult<()> {
        self.apply(f64::floor)
    }

    /// Rounds every element toward +∞.
    pub fn ceil(&mut self) -> VectorResult<()> {
        self.apply(f64::ceil)
    }

    /// Rounds every element to the nearest integer, halves away from zero.
    pub fn round(&mut self) -> VectorResult<()> {
        self.apply(f64::round)
    }

    /// `true` iff sizes match and every `|aᵢ − bᵢ| ≤ tolerance`.
    ///
    /// Invalid operands never compare equal.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let a = Vector::vec2(1.0, 2.0);
    /// let b = Vector::vec2(1.0, 2.0 + 1e-9);
    /// assert!(a.equals(&b, 1e-6));
    /// assert!(!a.equals(&b, 0.0));
    /// ```
    pub fn equals(&self, other: &Vector, tolerance: f64) -> bool {
        match (self.data(), other.data()) {
            (Ok(a), Ok(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tolerance)
            }
            _ => false,
        }
    }

    /// `true` iff every `|vᵢ| ≤ tolerance`. An empty vector is zero.
    pub fn is_zero(&self, tolerance: f64) -> bool {
        self.data()
            .map(|d| d.iter().all(|x| x.abs() <= tolerance))
            .unwrap_or(false)
    }

    /// `true` iff `|v·v − 1| ≤ tolerance`.
    pub fn is_unit(&self, tolerance: f64) -> bool {
        self.dot(self)
            .map(|sq| (sq - 1.0).abs() <= tolerance)
            .unwrap_or(false)
    }

    fn fold_nonempty(&self, f: fn(f64, f64) -> f64) -> VectorResult<f64> {
        let (&first, rest) = self.data()?.split_first().ok_or(VectorError::Empty)?;
        Ok(rest.iter().fold(first, |acc, &x| f(acc, x)))
    }

    fn apply(&mut self, f: fn(f64) -> f64) -> VectorResult<()> {
        for x in self.data_mut()? {
            *x = f(*x);
        }
        Ok(())
    }
}

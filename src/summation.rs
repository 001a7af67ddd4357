//! Compensated floating-point accumulation.
//!
//! Plain left-to-right summation loses low-order bits whenever a small
//! addend meets a large running total. The routines here carry a separate
//! compensation term so that the total error stays O(ε) independent of
//! the number of terms.
//!
//! # Algorithm
//!
//! Kahan–Babuška (Neumaier) variant of compensated summation. Unlike the
//! classic Kahan loop it also handles an addend that is larger in
//! magnitude than the running sum.
//!
//! Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
//! zur Summation endlicher Summen", *Zeitschrift für Angewandte
//! Mathematik und Mechanik* 54(1), pp. 39–51.
//!
//! # Non-finite input
//!
//! Once the running sum leaves the finite range the compensation term is
//! frozen and [`KahanAccumulator::total`] reports the raw sum, so overflow
//! yields `±inf` like plain summation instead of `inf − inf = NaN`.

/// Running compensated sum.
///
/// # Examples
/// ```
/// use u_vecmath::summation::KahanAccumulator;
/// let mut acc = KahanAccumulator::new();
/// acc.add(1.0);
/// acc.add(1e100);
/// acc.add(1.0);
/// acc.add(-1e100);
/// assert_eq!(acc.total(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanAccumulator {
    sum: f64,
    compensation: f64,
}

impl KahanAccumulator {
    /// Creates an accumulator holding zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `x` to the running total.
    #[inline]
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if !t.is_finite() {
            self.sum = t;
            return;
        }
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Returns the compensated total.
    #[inline]
    pub fn total(&self) -> f64 {
        if !self.sum.is_finite() {
            return self.sum;
        }
        self.sum + self.compensation
    }
}

/// Compensated sum of a slice.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use u_vecmath::summation::kahan_sum;
/// let data = vec![0.1; 10];
/// assert_eq!(kahan_sum(&data), 1.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut acc = KahanAccumulator::new();
    for &x in data {
        acc.add(x);
    }
    acc.total()
}

/// Compensated sum of elementwise products `Σ aᵢ·bᵢ`.
///
/// Processes four products per iteration so the multiplications can be
/// scheduled together; accumulation order is still strictly sequential.
/// Only the common prefix `min(a.len(), b.len())` is used.
///
/// # Examples
/// ```
/// use u_vecmath::summation::kahan_dot;
/// assert_eq!(kahan_dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
pub fn kahan_dot(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);
    let mut acc = KahanAccumulator::new();

    let mut a_chunks = a.chunks_exact(4);
    let mut b_chunks = b.chunks_exact(4);
    for (ca, cb) in a_chunks.by_ref().zip(b_chunks.by_ref()) {
        let p0 = ca[0] * cb[0];
        let p1 = ca[1] * cb[1];
        let p2 = ca[2] * cb[2];
        let p3 = ca[3] * cb[3];
        acc.add(p0);
        acc.add(p1);
        acc.add(p2);
        acc.add(p3);
    }
    for (&x, &y) in a_chunks.remainder().iter().zip(b_chunks.remainder()) {
        acc.add(x * y);
    }
    acc.total()
}

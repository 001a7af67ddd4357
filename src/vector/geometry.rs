//! Geometric operations: products, norms, angles, interpolation and
//! decomposition relative to another vector.

use std::f64::consts::PI;

use super::arith::{check_binary, check_size};
use super::Vector;
use crate::error::{VectorError, VectorResult};
use crate::summation::{kahan_dot, KahanAccumulator};

/// Below this angle (radians) [`Vector::slerp`] degrades to [`Vector::lerp`].
pub const SLERP_EPSILON: f64 = 1e-10;

impl Vector {
    /// Dot product computed with compensated summation.
    ///
    /// # Errors
    /// - [`VectorError::Uninitialized`] if either operand is invalid.
    /// - [`VectorError::SizeMismatch`] if the sizes differ.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let a = Vector::vec3(1.0, 2.0, 3.0);
    /// let b = Vector::vec3(4.0, -5.0, 6.0);
    /// assert_eq!(a.dot(&b).unwrap(), 12.0);
    /// ```
    pub fn dot(&self, other: &Vector) -> VectorResult<f64> {
        let (a, b) = (self.data()?, other.data()?);
        check_size(a.len(), b.len())?;
        Ok(kahan_dot(a, b))
    }

    /// Right-handed cross product of two 3-vectors.
    ///
    /// # Errors
    /// [`VectorError::SizeMismatch`] unless all three vectors have size 3.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let x = Vector::vec3(1.0, 0.0, 0.0);
    /// let y = Vector::vec3(0.0, 1.0, 0.0);
    /// let mut z = Vector::create(3).unwrap();
    /// x.cross(&y, &mut z).unwrap();
    /// assert_eq!(z, Vector::vec3(0.0, 0.0, 1.0));
    /// ```
    pub fn cross(&self, other: &Vector, result: &mut Vector) -> VectorResult<()> {
        let (a, b) = (self.data()?, other.data()?);
        let r = result.data_mut()?;
        for len in [a.len(), b.len(), r.len()] {
            check_size(3, len)?;
        }
        r[0] = a[1] * b[2] - a[2] * b[1];
        r[1] = a[2] * b[0] - a[0] * b[2];
        r[2] = a[0] * b[1] - a[1] * b[0];
        Ok(())
    }

    /// Euclidean norm `√(v·v)`.
    ///
    /// When the sum of squares overflows or underflows, the norm is
    /// recomputed from elements scaled by the largest absolute value, so
    /// `[1e200, 1e200]` and `[1e-200, 0]` get their true magnitudes. An
    /// infinite element gives `inf` and a NaN element gives NaN.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let v = Vector::vec2(3e200, 4e200);
    /// assert!((v.magnitude().unwrap() / 5e200 - 1.0).abs() < 1e-15);
    /// ```
    pub fn magnitude(&self) -> VectorResult<f64> {
        let squares = self.dot(self)?;
        if squares.is_normal() || squares.is_nan() {
            return Ok(squares.sqrt());
        }
        match split_norm(self.data()?) {
            Ok((scale, rest)) => Ok(scale * rest),
            // zero vector or an infinite element
            Err(_) => Ok(squares.sqrt()),
        }
    }

    /// Scales `self` to unit length in place.
    ///
    /// Elements are divided by the largest absolute element before the
    /// norm is taken, so any finite nonzero vector normalizes, including
    /// ones whose magnitude is not representable.
    ///
    /// # Errors
    /// - [`VectorError::ZeroMagnitude`] if every element is zero.
    /// - [`VectorError::NonFinite`] if any element is infinite or NaN.
    ///
    /// The vector is left unchanged on error.
    pub fn normalize(&mut self) -> VectorResult<()> {
        let (scale, rest) = split_norm(self.data()?)?;
        for x in self.data_mut()? {
            *x = *x / scale / rest;
        }
        Ok(())
    }

    /// Euclidean distance `‖self − other‖`.
    pub fn distance(&self, other: &Vector) -> VectorResult<f64> {
        let (a, b) = (self.data()?, other.data()?);
        check_size(a.len(), b.len())?;
        let mut acc = KahanAccumulator::new();
        for (&x, &y) in a.iter().zip(b) {
            let d = x - y;
            acc.add(d * d);
        }
        Ok(acc.total().sqrt())
    }

    /// Angle between `self` and `other` in radians, in `[0, π]`.
    ///
    /// The cosine is computed from scaled operands and clamped to
    /// `[−1, 1]` before `acos` so rounding cannot produce NaN for
    /// (anti)parallel vectors.
    ///
    /// # Errors
    /// - [`VectorError::ZeroMagnitude`] if either operand has zero length.
    /// - [`VectorError::NonFinite`] if either operand has an infinite or
    ///   NaN element.
    pub fn angle(&self, other: &Vector) -> VectorResult<f64> {
        let (a, b) = (self.data()?, other.data()?);
        check_size(a.len(), b.len())?;
        let (sa, ra) = split_norm(a)?;
        let (sb, rb) = split_norm(b)?;
        let mut acc = KahanAccumulator::new();
        for (&x, &y) in a.iter().zip(b) {
            acc.add((x / sa) * (y / sb));
        }
        Ok((acc.total() / (ra * rb)).clamp(-1.0, 1.0).acos())
    }

    /// Linear interpolation `(1 − t)·self + t·other`.
    ///
    /// `t` is not restricted to `[0, 1]`; values outside extrapolate.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let a = Vector::vec2(0.0, 0.0);
    /// let b = Vector::vec2(10.0, 10.0);
    /// let mut r = Vector::create(2).unwrap();
    /// a.lerp(&b, 0.5, &mut r).unwrap();
    /// assert_eq!(r, Vector::vec2(5.0, 5.0));
    /// ```
    pub fn lerp(&self, other: &Vector, t: f64, result: &mut Vector) -> VectorResult<()> {
        let omt = 1.0 - t;
        self.zip_into(other, result, |a, b| omt * a + t * b)
    }

    /// Spherical linear interpolation.
    ///
    /// Interpolates along the great arc spanned by the two directions,
    /// with `omega` the angle between them:
    /// `sin((1 − t)ω)/sin ω · self + sin(tω)/sin ω · other`.
    /// Falls back to [`Vector::lerp`] when `omega` is below
    /// [`SLERP_EPSILON`] or either operand has zero length. Antipodal
    /// operands (`π − omega` below [`SLERP_EPSILON`]) span no unique arc
    /// and also fall back to lerp, whose path passes through the origin.
    ///
    /// # Errors
    /// [`VectorError::NonFinite`] if either operand has an infinite or NaN
    /// element.
    pub fn slerp(&self, other: &Vector, t: f64, result: &mut Vector) -> VectorResult<()> {
        check_binary(self, other, result)?;
        let omega = match self.angle(other) {
            Ok(omega) => omega,
            Err(VectorError::ZeroMagnitude) => return self.lerp(other, t, result),
            Err(e) => return Err(e),
        };
        if omega < SLERP_EPSILON || PI - omega < SLERP_EPSILON {
            return self.lerp(other, t, result);
        }
        let sin_omega = omega.sin();
        let wa = ((1.0 - t) * omega).sin() / sin_omega;
        let wb = (t * omega).sin() / sin_omega;
        self.zip_into(other, result, |a, b| wa * a + wb * b)
    }

    /// Projection of `self` onto `onto`: `(self·onto / onto·onto)·onto`.
    ///
    /// # Errors
    /// [`VectorError::ZeroMagnitude`] if `onto` has zero length.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let a = Vector::vec2(3.0, 4.0);
    /// let x_axis = Vector::vec2(2.0, 0.0);
    /// let mut r = Vector::create(2).unwrap();
    /// a.project(&x_axis, &mut r).unwrap();
    /// assert_eq!(r, Vector::vec2(3.0, 0.0));
    /// ```
    pub fn project(&self, onto: &Vector, result: &mut Vector) -> VectorResult<()> {
        let k = self.projection_coefficient(onto, result)?;
        self.zip_into(onto, result, |_, b| k * b)
    }

    /// Rejection of `self` from `onto`: `self − project(self, onto)`.
    pub fn reject(&self, onto: &Vector, result: &mut Vector) -> VectorResult<()> {
        let k = self.projection_coefficient(onto, result)?;
        self.zip_into(onto, result, |a, b| a - k * b)
    }

    /// Reflection of `self` in the hyperplane orthogonal to `onto`:
    /// `self − 2·project(self, onto)`.
    pub fn reflect(&self, onto: &Vector, result: &mut Vector) -> VectorResult<()> {
        let k = self.projection_coefficient(onto, result)?;
        self.zip_into(onto, result, |a, b| a - 2.0 * k * b)
    }

    fn projection_coefficient(&self, onto: &Vector, result: &Vector) -> VectorResult<f64> {
        check_binary(self, onto, result)?;
        let bb = onto.dot(onto)?;
        if bb == 0.0 {
            return Err(VectorError::ZeroMagnitude);
        }
        Ok(self.dot(onto)? / bb)
    }
}

/// Splits the Euclidean norm into `scale · rest`, where `scale` is the
/// largest absolute element and `rest` lies in `[1, √n]`.
fn split_norm(data: &[f64]) -> VectorResult<(f64, f64)> {
    if data.iter().any(|x| !x.is_finite()) {
        return Err(VectorError::NonFinite);
    }
    let scale = data.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
    if scale == 0.0 {
        return Err(VectorError::ZeroMagnitude);
    }
    let mut acc = KahanAccumulator::new();
    for &x in data {
        let y = x / scale;
        acc.add(y * y);
    }
    Ok((scale, acc.total().sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    fn approx(a: &Vector, b: &Vector) -> bool {
        a.equals(b, 1e-12)
    }

    // --- dot / cross ---

    #[test]
    fn test_dot_long_vector_is_compensated() {
        let mut data = vec![1.0];
        data.extend(std::iter::repeat(1e-16).take(1000));
        let a = Vector::from(data);
        let ones = Vector::from(vec![1.0; 1001]);
        let d = a.dot(&ones).unwrap();
        assert!((d - (1.0 + 1e-13)).abs() < 1e-15, "got {d}");
    }

    #[test]
    fn test_dot_size_mismatch() {
        let a = Vector::vec2(1.0, 2.0);
        let b = Vector::vec3(1.0, 2.0, 3.0);
        assert_eq!(
            a.dot(&b),
            Err(VectorError::SizeMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn test_cross_basis() {
        let (x, y, z) = (
            Vector::vec3(1.0, 0.0, 0.0),
            Vector::vec3(0.0, 1.0, 0.0),
            Vector::vec3(0.0, 0.0, 1.0),
        );
        let mut r = Vector::create(3).unwrap();
        y.cross(&z, &mut r).unwrap();
        assert_eq!(r, x);
        z.cross(&x, &mut r).unwrap();
        assert_eq!(r, y);
        y.cross(&x, &mut r).unwrap();
        assert_eq!(r, Vector::vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_cross_requires_three_dimensions() {
        let a = Vector::vec2(1.0, 0.0);
        let b = Vector::vec3(0.0, 1.0, 0.0);
        let mut r = Vector::create(3).unwrap();
        assert_eq!(
            a.cross(&b, &mut r),
            Err(VectorError::SizeMismatch {
                expected: 3,
                got: 2
            })
        );
        let mut r4 = Vector::create(4).unwrap();
        assert!(b.cross(&b, &mut r4).is_err());
    }

    // --- magnitude / normalize / distance ---

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector::vec2(3.0, 4.0).magnitude().unwrap(), 5.0);
        assert_eq!(Vector::new().magnitude().unwrap(), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = Vector::vec3(0.0, 3.0, 4.0);
        v.normalize().unwrap();
        assert!(approx(&v, &Vector::vec3(0.0, 0.6, 0.8)));
        assert!(v.is_unit(1e-12));
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut v = Vector::create(4).unwrap();
        assert_eq!(v.normalize(), Err(VectorError::ZeroMagnitude));
        assert!(v.is_zero(0.0));
        assert_eq!(Vector::detached(2).normalize(), Err(VectorError::Uninitialized));
    }

    #[test]
    fn test_magnitude_extreme_scales() {
        let big = Vector::vec2(1e200, 1e200);
        let m = big.magnitude().unwrap();
        assert!((m / (1e200 * 2.0_f64.sqrt()) - 1.0).abs() < 1e-15, "got {m}");

        let tiny = Vector::vec2(1e-200, 0.0);
        assert_eq!(tiny.magnitude().unwrap(), 1e-200);

        assert_eq!(
            Vector::vec2(f64::MAX, f64::MAX).magnitude().unwrap(),
            f64::INFINITY
        );
        assert_eq!(
            Vector::vec2(f64::INFINITY, 1.0).magnitude().unwrap(),
            f64::INFINITY
        );
        assert!(Vector::vec2(f64::NAN, 1.0).magnitude().unwrap().is_nan());
    }

    #[test]
    fn test_normalize_extreme_scales() {
        let mut big = Vector::vec2(1e200, 1e200);
        big.normalize().unwrap();
        assert!(approx(&big, &Vector::vec2(FRAC_1_SQRT_2, FRAC_1_SQRT_2)));

        let mut huge = Vector::vec2(f64::MAX, -f64::MAX);
        huge.normalize().unwrap();
        assert!(approx(&huge, &Vector::vec2(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)));

        let mut tiny = Vector::vec2(1e-200, 0.0);
        tiny.normalize().unwrap();
        assert_eq!(tiny, Vector::vec2(1.0, 0.0));

        let mut subnormal = Vector::vec2(0.0, -5e-324);
        subnormal.normalize().unwrap();
        assert_eq!(subnormal, Vector::vec2(0.0, -1.0));
    }

    #[test]
    fn test_normalize_non_finite() {
        for data in [[f64::INFINITY, 1.0], [f64::NAN, 1.0], [1.0, f64::NEG_INFINITY]] {
            let mut v = Vector::from(data);
            assert_eq!(v.normalize(), Err(VectorError::NonFinite));
            assert_eq!(v.get(1).unwrap(), data[1]);
        }
    }

    #[test]
    fn test_distance() {
        let a = Vector::vec2(1.0, 1.0);
        let b = Vector::vec2(4.0, 5.0);
        assert_eq!(a.distance(&b).unwrap(), 5.0);
        assert_eq!(a.distance(&a).unwrap(), 0.0);
        assert!(a.distance(&Vector::vec3(0.0, 0.0, 0.0)).is_err());
    }

    // --- angle ---

    #[test]
    fn test_angle() {
        let x = Vector::vec2(1.0, 0.0);
        let y = Vector::vec2(0.0, 2.0);
        assert!((x.angle(&y).unwrap() - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(x.angle(&x).unwrap(), 0.0);
        let minus_x = Vector::vec2(-3.0, 0.0);
        assert!((x.angle(&minus_x).unwrap() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_angle_parallel_does_not_nan() {
        let a = Vector::vec3(0.1, 0.2, 0.3);
        let mut b = Vector::create(3).unwrap();
        a.scale(7.0, &mut b).unwrap();
        let angle = a.angle(&b).unwrap();
        assert!(!angle.is_nan());
        assert!(angle < 1e-7);
    }

    #[test]
    fn test_angle_zero_operand() {
        let a = Vector::vec2(1.0, 0.0);
        let zero = Vector::create(2).unwrap();
        assert_eq!(a.angle(&zero), Err(VectorError::ZeroMagnitude));
        assert_eq!(zero.angle(&a), Err(VectorError::ZeroMagnitude));
    }

    #[test]
    fn test_angle_extreme_scales() {
        let a = Vector::vec2(1e200, 0.0);
        let b = Vector::vec2(1e200, 1e200);
        let theta = a.angle(&b).unwrap();
        assert!((theta - PI / 4.0).abs() < 1e-12, "got {theta}");

        let tiny = Vector::vec2(0.0, 1e-200);
        assert!((a.angle(&tiny).unwrap() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_angle_non_finite() {
        let a = Vector::vec2(1.0, 0.0);
        let inf = Vector::vec2(f64::INFINITY, 0.0);
        assert_eq!(a.angle(&inf), Err(VectorError::NonFinite));
        assert_eq!(inf.angle(&a), Err(VectorError::NonFinite));
    }

    // --- interpolation ---

    #[test]
    fn test_lerp_extrapolates() {
        let a = Vector::vec2(0.0, 0.0);
        let b = Vector::vec2(10.0, 10.0);
        let mut r = Vector::create(2).unwrap();
        a.lerp(&b, 2.0, &mut r).unwrap();
        assert_eq!(r, Vector::vec2(20.0, 20.0));
        a.lerp(&b, -0.5, &mut r).unwrap();
        assert_eq!(r, Vector::vec2(-5.0, -5.0));
    }

    #[test]
    fn test_slerp_quarter_circle() {
        let x = Vector::vec2(1.0, 0.0);
        let y = Vector::vec2(0.0, 1.0);
        let mut r = Vector::create(2).unwrap();
        x.slerp(&y, 0.5, &mut r).unwrap();
        assert!(approx(&r, &Vector::vec2(FRAC_1_SQRT_2, FRAC_1_SQRT_2)));
        assert!(r.is_unit(1e-12));

        x.slerp(&y, 0.0, &mut r).unwrap();
        assert!(approx(&r, &x));
        x.slerp(&y, 1.0, &mut r).unwrap();
        assert!(approx(&r, &y));
    }

    #[test]
    fn test_slerp_parallel_falls_back_to_lerp() {
        let a = Vector::vec2(1.0, 0.0);
        let mut r = Vector::create(2).unwrap();
        a.slerp(&a, 0.3, &mut r).unwrap();
        assert!(approx(&r, &a));
    }

    #[test]
    fn test_slerp_zero_operand_falls_back_to_lerp() {
        let a = Vector::vec2(2.0, 0.0);
        let zero = Vector::create(2).unwrap();
        let mut r = Vector::create(2).unwrap();
        a.slerp(&zero, 0.5, &mut r).unwrap();
        assert_eq!(r, Vector::vec2(1.0, 0.0));
    }

    #[test]
    fn test_slerp_antipodal_falls_back_to_lerp() {
        let a = Vector::vec2(1.0, 0.0);
        let b = Vector::vec2(-1.0, 0.0);
        let mut r = Vector::create(2).unwrap();
        a.slerp(&b, 0.25, &mut r).unwrap();
        assert_eq!(r, Vector::vec2(0.5, 0.0));
        a.slerp(&b, 1.0, &mut r).unwrap();
        assert_eq!(r, b);
    }

    #[test]
    fn test_slerp_non_finite() {
        let a = Vector::vec2(1.0, 0.0);
        let nan = Vector::vec2(f64::NAN, 1.0);
        let mut r = Vector::from_array(&[7.0, 7.0]).unwrap();
        assert_eq!(a.slerp(&nan, 0.5, &mut r), Err(VectorError::NonFinite));
        assert_eq!(r.data().unwrap(), &[7.0, 7.0]);
    }

    #[test]
    fn test_slerp_size_mismatch() {
        let a = Vector::vec2(1.0, 0.0);
        let mut r = Vector::create(3).unwrap();
        assert!(matches!(
            a.slerp(&a, 0.5, &mut r),
            Err(VectorError::SizeMismatch { .. })
        ));
    }

    // --- project / reject / reflect ---

    #[test]
    fn test_project_reject_decomposition() {
        let a = Vector::vec3(2.0, 3.0, 4.0);
        let b = Vector::vec3(0.0, 0.0, 2.0);
        let mut p = Vector::create(3).unwrap();
        let mut q = Vector::create(3).unwrap();
        a.project(&b, &mut p).unwrap();
        a.reject(&b, &mut q).unwrap();
        assert_eq!(p, Vector::vec3(0.0, 0.0, 4.0));
        assert_eq!(q, Vector::vec3(2.0, 3.0, 0.0));
        assert!(q.dot(&b).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_reflect() {
        let a = Vector::vec2(1.0, 1.0);
        let b = Vector::vec2(0.0, 1.0);
        let mut r = Vector::create(2).unwrap();
        a.reflect(&b, &mut r).unwrap();
        assert_eq!(r, Vector::vec2(1.0, -1.0));
    }

    #[test]
    fn test_zero_length_onto() {
        let a = Vector::vec2(1.0, 2.0);
        let zero = Vector::create(2).unwrap();
        let mut r = Vector::from_array(&[5.0, 5.0]).unwrap();
        assert_eq!(a.project(&zero, &mut r), Err(VectorError::ZeroMagnitude));
        assert_eq!(a.reject(&zero, &mut r), Err(VectorError::ZeroMagnitude));
        assert_eq!(a.reflect(&zero, &mut r), Err(VectorError::ZeroMagnitude));
        assert_eq!(r.data().unwrap(), &[5.0, 5.0]);
    }
}

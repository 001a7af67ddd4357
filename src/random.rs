//! Seeded random number generation and random vector construction.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use std::f64::consts::TAU;

use rand::Rng;

use crate::error::{VectorError, VectorResult};
use crate::vector::Vector;

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use u_vecmath::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// One standard normal sample via the Box–Muller transform.
///
/// Reference: Box & Muller (1958), "A Note on the Generation of Random
/// Normal Deviates", *Annals of Mathematical Statistics* 29(2).
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 − U keeps the logarithm argument in (0, 1]
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

impl Vector {
    /// Vector of `size` elements drawn uniformly from `[low, high)`.
    ///
    /// # Errors
    /// - [`VectorError::InvalidRange`] if `low >= high`, either bound is
    ///   not finite, or the width `high - low` overflows.
    /// - [`VectorError::OutOfMemory`] if the buffer cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::random::create_rng;
    /// use u_vecmath::vector::Vector;
    /// let mut rng = create_rng(7);
    /// let v = Vector::random_uniform(100, -1.0, 1.0, &mut rng).unwrap();
    /// assert!(v.iter().all(|x| (-1.0..1.0).contains(x)));
    /// ```
    pub fn random_uniform<R: Rng + ?Sized>(
        size: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> VectorResult<Self> {
        if !(low.is_finite() && high.is_finite() && low < high && (high - low).is_finite()) {
            return Err(VectorError::InvalidRange { low, high });
        }
        let mut v = Self::create(size)?;
        for x in v.data_mut()? {
            *x = rng.random_range(low..high);
        }
        Ok(v)
    }

    /// Unit vector of dimension `dim` with direction uniform on the
    /// sphere, from normalized independent normal samples.
    ///
    /// Reference: Muller (1959), "A Note on a Method for Generating Points
    /// Uniformly on N-Dimensional Spheres", *Communications of the ACM*
    /// 2(4).
    ///
    /// # Errors
    /// [`VectorError::Empty`] if `dim == 0`.
    pub fn random_unit<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> VectorResult<Self> {
        if dim == 0 {
            return Err(VectorError::Empty);
        }
        let mut v = Self::create(dim)?;
        loop {
            for x in v.data_mut()? {
                *x = standard_normal(rng);
            }
            match v.normalize() {
                Ok(()) => return Ok(v),
                // all samples exactly zero; draw again
                Err(VectorError::ZeroMagnitude) => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let a = Vector::random_uniform(10, 0.0, 1.0, &mut rng1).unwrap();
        let b = Vector::random_uniform(10, 0.0, 1.0, &mut rng2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_uniform_bounds() {
        let mut rng = create_rng(1);
        let v = Vector::random_uniform(1000, 5.0, 6.0, &mut rng).unwrap();
        assert_eq!(v.size(), 1000);
        assert!(v.iter().all(|&x| (5.0..6.0).contains(&x)));
        let m = v.mean().unwrap();
        assert!((m - 5.5).abs() < 0.05, "mean {m}");
    }

    #[test]
    fn test_random_uniform_invalid_range() {
        let mut rng = create_rng(1);
        assert_eq!(
            Vector::random_uniform(3, 1.0, 1.0, &mut rng),
            Err(VectorError::InvalidRange {
                low: 1.0,
                high: 1.0
            })
        );
        assert!(Vector::random_uniform(3, 0.0, f64::INFINITY, &mut rng).is_err());
        assert!(Vector::random_uniform(3, f64::NAN, 1.0, &mut rng).is_err());
    }

    #[test]
    fn test_random_uniform_overflowing_width() {
        let mut rng = create_rng(1);
        assert_eq!(
            Vector::random_uniform(3, -1e308, 1e308, &mut rng),
            Err(VectorError::InvalidRange {
                low: -1e308,
                high: 1e308
            })
        );
        assert!(Vector::random_uniform(3, -f64::MAX, f64::MAX, &mut rng).is_err());

        let v = Vector::random_uniform(100, -1e307, 1e307, &mut rng).unwrap();
        assert!(v.iter().all(|&x| (-1e307..1e307).contains(&x)));
    }

    #[test]
    fn test_random_uniform_empty() {
        let mut rng = create_rng(1);
        let v = Vector::random_uniform(0, 0.0, 1.0, &mut rng).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_random_unit() {
        let mut rng = create_rng(99);
        for dim in 1..10 {
            let v = Vector::random_unit(dim, &mut rng).unwrap();
            assert_eq!(v.size(), dim);
            assert!(v.is_unit(1e-12), "dim {dim}: {v}");
        }
        assert_eq!(Vector::random_unit(0, &mut rng), Err(VectorError::Empty));
    }

    #[test]
    fn test_random_unit_mean_direction_near_zero() {
        let mut rng = create_rng(2024);
        let n = 2000;
        let mut acc = Vector::create(3).unwrap();
        let mut next = Vector::create(3).unwrap();
        for _ in 0..n {
            let u = Vector::random_unit(3, &mut rng).unwrap();
            acc.add(&u, &mut next).unwrap();
            std::mem::swap(&mut acc, &mut next);
        }
        let centroid = acc.magnitude().unwrap() / n as f64;
        assert!(centroid < 0.1, "centroid length {centroid}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn random_uniform_stays_in_range(
            seed in any::<u64>(),
            low in -1e3_f64..1e3,
            width in 1e-3_f64..1e3,
            size in 0_usize..64,
        ) {
            let mut rng = create_rng(seed);
            let high = low + width;
            let v = Vector::random_uniform(size, low, high, &mut rng).unwrap();
            prop_assert!(v.iter().all(|&x| x >= low && x < high));
        }

        #[test]
        fn random_unit_is_unit(seed in any::<u64>(), dim in 1_usize..32) {
            let mut rng = create_rng(seed);
            let v = Vector::random_unit(dim, &mut rng).unwrap();
            prop_assert!(v.is_unit(1e-12));
        }
    }
}

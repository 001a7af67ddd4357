//! Factorial computation strategies.
//!
//! | Strategy | Domain | Result |
//! |---|---|---|
//! | [`lookup_factorial`] | integers 0..=20 | exact `u64` |
//! | [`gamma_factorial`] | reals 0..=170 | Γ(n + 1) |
//! | [`stirling_factorial`] | reals ≥ 0 | Stirling approximation |
//!
//! [`factorial`] dispatches among them according to a
//! [`FactorialStrategy`].

use std::f64::consts::PI;

use tracing::debug;

use crate::error::{FactorialError, FactorialResult};
use crate::special;

/// Largest n whose factorial fits in a `u64` (21! overflows).
pub const MAX_EXACT_FACTORIAL: u32 = 20;

/// Largest n for which n! is finite in `f64`.
pub const MAX_GAMMA_FACTORIAL: f64 = 170.0;

/// 0! through 20!.
pub const FACTORIAL_TABLE: [u64; 21] = [
    1,
    1,
    2,
    6,
    24,
    120,
    720,
    5_040,
    40_320,
    362_880,
    3_628_800,
    39_916_800,
    479_001_600,
    6_227_020_800,
    87_178_291_200,
    1_307_674_368_000,
    20_922_789_888_000,
    355_687_428_096_000,
    6_402_373_705_728_000,
    121_645_100_408_832_000,
    2_432_902_008_176_640_000,
];

/// Legacy flag bit: always use the exact table.
pub const FLAG_FORCE_LOOKUP: u8 = 1 << 0;
/// Legacy flag bit: always use the gamma function.
pub const FLAG_FORCE_GAMMA: u8 = 1 << 1;
/// Legacy flag bit: always use Stirling's approximation.
pub const FLAG_FORCE_STIRLING: u8 = 1 << 2;
/// Legacy flag bit: fail rather than approximate.
pub const FLAG_PREFER_EXACT: u8 = 1 << 3;

/// How [`factorial`] selects an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FactorialStrategy {
    /// Exact table for integers ≤ 20, gamma for integers ≤ 170,
    /// Stirling for everything else.
    #[default]
    Auto,
    /// Exact table only; any other input is an error.
    PreferExact,
    /// Exact table; the input must be an integer in 0..=20.
    ForceLookup,
    /// Gamma function regardless of input.
    ForceGamma,
    /// Stirling's approximation regardless of input.
    ForceStirling,
}

impl FactorialStrategy {
    /// Resolves a legacy flag bitset.
    ///
    /// Forcing flags win in the order lookup, gamma, Stirling; then
    /// `FLAG_PREFER_EXACT`; an empty set means [`Auto`](Self::Auto).
    /// Unknown bits are ignored.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::factorial::{FactorialStrategy, FLAG_FORCE_GAMMA, FLAG_PREFER_EXACT};
    /// assert_eq!(
    ///     FactorialStrategy::from_flags(FLAG_PREFER_EXACT | FLAG_FORCE_GAMMA),
    ///     FactorialStrategy::ForceGamma,
    /// );
    /// assert_eq!(FactorialStrategy::from_flags(0), FactorialStrategy::Auto);
    /// ```
    pub fn from_flags(flags: u8) -> Self {
        if flags & FLAG_FORCE_LOOKUP != 0 {
            Self::ForceLookup
        } else if flags & FLAG_FORCE_GAMMA != 0 {
            Self::ForceGamma
        } else if flags & FLAG_FORCE_STIRLING != 0 {
            Self::ForceStirling
        } else if flags & FLAG_PREFER_EXACT != 0 {
            Self::PreferExact
        } else {
            Self::Auto
        }
    }
}

/// Exact factorial from the lookup table.
///
/// # Errors
/// [`FactorialError::OutOfRange`] for `n > 20`.
///
/// # Examples
/// ```
/// use u_vecmath::factorial::lookup_factorial;
/// assert_eq!(lookup_factorial(5), Ok(120));
/// assert!(lookup_factorial(21).is_err());
/// ```
pub fn lookup_factorial(n: u32) -> FactorialResult<u64> {
    FACTORIAL_TABLE
        .get(n as usize)
        .copied()
        .ok_or(FactorialError::OutOfRange {
            n: u64::from(n),
            max: MAX_EXACT_FACTORIAL,
        })
}

/// Factorial via the gamma function, n! = Γ(n + 1).
///
/// Accepts non-integer arguments.
///
/// # Errors
/// - [`FactorialError::InvalidInput`] for negative or NaN `n`.
/// - [`FactorialError::Overflow`] for `n > 170`.
///
/// # Examples
/// ```
/// use u_vecmath::factorial::gamma_factorial;
/// assert_eq!(gamma_factorial(4.0), Ok(24.0));
/// // 0.5! = √π / 2
/// let half = gamma_factorial(0.5).unwrap();
/// assert!((half - std::f64::consts::PI.sqrt() / 2.0).abs() < 1e-10);
/// ```
pub fn gamma_factorial(n: f64) -> FactorialResult<f64> {
    check_domain(n)?;
    if n == 0.0 {
        return Ok(1.0);
    }
    if n > MAX_GAMMA_FACTORIAL {
        return Err(FactorialError::Overflow(n));
    }
    let g = special::gamma(n + 1.0);
    if g.is_finite() {
        Ok(g)
    } else {
        Err(FactorialError::Overflow(n))
    }
}

/// Stirling's approximation with first-order correction:
/// `n! ≈ √(2πn)·(n/e)ⁿ·(1 + 1/(12n))`.
///
/// Evaluated in log space so that the intermediate `(n/e)ⁿ` does not
/// overflow before the final result does. Relative error is about
/// 1/(288n²).
///
/// # Errors
/// - [`FactorialError::InvalidInput`] for negative or NaN `n`.
/// - [`FactorialError::Overflow`] if the result exceeds `f64::MAX`.
///
/// # Examples
/// ```
/// use u_vecmath::factorial::stirling_factorial;
/// let approx = stirling_factorial(10.0).unwrap();
/// assert!((approx - 3_628_800.0).abs() / 3_628_800.0 < 1e-4);
/// ```
pub fn stirling_factorial(n: f64) -> FactorialResult<f64> {
    check_domain(n)?;
    if n == 0.0 || n == 1.0 {
        return Ok(1.0);
    }
    let ln = 0.5 * (2.0 * PI * n).ln() + n * (n.ln() - 1.0) + (1.0 / (12.0 * n)).ln_1p();
    let value = ln.exp();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FactorialError::Overflow(n))
    }
}

/// Computes `n!` with the algorithm selected by `strategy`.
///
/// # Errors
/// - [`FactorialError::InvalidInput`] for negative or NaN `n`.
/// - [`FactorialError::NotInteger`] / [`FactorialError::OutOfRange`] under
///   [`FactorialStrategy::ForceLookup`].
/// - [`FactorialError::NotExact`] under [`FactorialStrategy::PreferExact`]
///   when `n` is not an integer in 0..=20.
/// - [`FactorialError::Overflow`] when the chosen method overflows.
///
/// # Examples
/// ```
/// use u_vecmath::factorial::{factorial, FactorialStrategy};
/// assert_eq!(factorial(5.0, FactorialStrategy::PreferExact), Ok(120.0));
/// assert!(factorial(25.0, FactorialStrategy::PreferExact).is_err());
/// assert!(factorial(25.0, FactorialStrategy::Auto).is_ok());
/// ```
pub fn factorial(n: f64, strategy: FactorialStrategy) -> FactorialResult<f64> {
    check_domain(n)?;

    let exact_index = as_table_index(n);
    match strategy {
        FactorialStrategy::ForceLookup => {
            if n.fract() != 0.0 {
                return Err(FactorialError::NotInteger(n));
            }
            let index = exact_index.ok_or(FactorialError::OutOfRange {
                n: n as u64,
                max: MAX_EXACT_FACTORIAL,
            })?;
            lookup_factorial(index).map(|v| v as f64)
        }
        FactorialStrategy::ForceGamma => gamma_factorial(n),
        FactorialStrategy::ForceStirling => stirling_factorial(n),
        FactorialStrategy::PreferExact => match exact_index {
            Some(index) => lookup_factorial(index).map(|v| v as f64),
            None => Err(FactorialError::NotExact(n)),
        },
        FactorialStrategy::Auto => {
            if let Some(index) = exact_index {
                return lookup_factorial(index).map(|v| v as f64);
            }
            if n.fract() == 0.0 && n <= MAX_GAMMA_FACTORIAL {
                debug!(n, "factorial beyond exact table, using gamma");
                return gamma_factorial(n);
            }
            debug!(n, "factorial falling back to Stirling approximation");
            stirling_factorial(n)
        }
    }
}

fn check_domain(n: f64) -> FactorialResult<()> {
    if n.is_nan() || n < 0.0 {
        Err(FactorialError::InvalidInput(n))
    } else {
        Ok(())
    }
}

/// `Some(n)` when `n` is an integer covered by [`FACTORIAL_TABLE`].
fn as_table_index(n: f64) -> Option<u32> {
    (n.fract() == 0.0 && n <= f64::from(MAX_EXACT_FACTORIAL)).then_some(n as u32)
}

//! # u-vecmath
//!
//! Dynamically sized numeric vectors and factorial strategies.
//!
//! ## Modules
//!
//! - [`vector`] — Growable `f64` vector with arithmetic, geometry and reductions
//! - [`summation`] — Compensated (Kahan–Babuška) accumulation
//! - [`factorial`] — Exact lookup, gamma, and Stirling factorials with a dispatcher
//! - [`special`] — Gamma and log-gamma functions
//! - [`random`] — Seeded RNG and random vector construction
//! - [`error`] — Error types shared by all modules
//!
//! ## Design Philosophy
//!
//! - **Numerical stability first**: compensated summation for dot products
//!   and sums, clamped cosines before `acos`
//! - **No hidden allocation**: arithmetic writes into caller-supplied
//!   results; only construction and resizing allocate
//! - **Errors, not panics**: every fallible operation returns a `Result`
//!   and leaves its output untouched on failure
//! - **Property-based testing**: Mathematical invariants verified via proptest

pub mod error;
pub mod factorial;
pub mod random;
pub mod special;
pub mod summation;
pub mod vector;

pub use error::{ErrorKind, FactorialError, VectorError};
pub use factorial::{factorial, FactorialStrategy};
pub use vector::{GrowthPolicy, Vector};

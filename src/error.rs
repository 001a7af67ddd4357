//! Error types for vector and factorial operations.
//!
//! Every fallible operation in this crate returns a [`Result`] instead of
//! panicking on bad input. [`VectorError::kind`] collapses the detailed
//! variants into the coarse [`ErrorKind`] taxonomy shared by all vector
//! operations.

/// Result alias for vector operations.
pub type VectorResult<T> = Result<T, VectorError>;

/// Result alias for factorial computations.
pub type FactorialResult<T> = Result<T, FactorialError>;

/// Coarse classification of a [`VectorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required handle was absent.
    ///
    /// Never produced at runtime: references cannot be null and a released
    /// vector is moved out of the caller's hands.
    Null,
    /// The allocator refused a request.
    Memory,
    /// The vector's buffer does not back its logical size.
    Initialization,
    /// Operand dimensions are incompatible with the operation.
    Size,
    /// Element access outside `0..size`.
    Index,
    /// The operation is undefined for the given numeric input.
    Math,
}

/// Errors returned by [`Vector`](crate::vector::Vector) operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VectorError {
    /// Allocation of the backing buffer failed.
    #[error("failed to allocate storage for {requested} elements")]
    OutOfMemory {
        /// Number of slots that was requested.
        requested: usize,
    },

    /// The vector's buffer is smaller than its logical size.
    #[error("vector storage is not initialized")]
    Uninitialized,

    /// Operand sizes differ from what the operation requires.
    #[error("size mismatch: expected {expected}, got {got}")]
    SizeMismatch {
        /// Size required by the operation.
        expected: usize,
        /// Size actually supplied.
        got: usize,
    },

    /// The operation needs at least one element.
    #[error("operation requires a non-empty vector")]
    Empty,

    /// Element index out of bounds.
    #[error("index {index} out of bounds for vector of size {size}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Logical size of the vector.
        size: usize,
    },

    /// The operand has zero length where a direction is required.
    #[error("operation undefined for a zero-length vector")]
    ZeroMagnitude,

    /// An element is infinite or NaN where a direction is required.
    #[error("operation undefined for a vector with non-finite elements")]
    NonFinite,

    /// A divisor element is exactly zero.
    #[error("division by zero at index {index}")]
    DivisionByZero {
        /// Index of the first zero divisor.
        index: usize,
    },

    /// A sampling range is empty or not finite.
    #[error("invalid range [{low}, {high})")]
    InvalidRange {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
}

impl VectorError {
    /// Returns the taxonomy kind of this error.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::error::{ErrorKind, VectorError};
    /// assert_eq!(VectorError::Empty.kind(), ErrorKind::Size);
    /// assert_eq!(VectorError::ZeroMagnitude.kind(), ErrorKind::Math);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfMemory { .. } => ErrorKind::Memory,
            Self::Uninitialized => ErrorKind::Initialization,
            Self::SizeMismatch { .. } | Self::Empty => ErrorKind::Size,
            Self::IndexOutOfBounds { .. } => ErrorKind::Index,
            Self::ZeroMagnitude
            | Self::NonFinite
            | Self::DivisionByZero { .. }
            | Self::InvalidRange { .. } => ErrorKind::Math,
        }
    }
}

/// Errors returned by the factorial strategies.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactorialError {
    /// Input is negative or NaN.
    #[error("factorial undefined for {0}")]
    InvalidInput(f64),

    /// Exact lookup requested outside the table.
    #[error("{n}! is outside the exact table (0..={max})")]
    OutOfRange {
        /// Requested argument.
        n: u64,
        /// Largest tabulated argument.
        max: u32,
    },

    /// Exact lookup requested for a non-integer argument.
    #[error("exact factorial requires an integer, got {0}")]
    NotInteger(f64),

    /// Result exceeds the range of `f64`.
    #[error("{0}! overflows f64")]
    Overflow(f64),

    /// An exact result was demanded but only an approximation exists.
    #[error("no exact representation of {0}!")]
    NotExact(f64),
}

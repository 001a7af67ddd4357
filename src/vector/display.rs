//! Text rendering of vectors: plain [`Display`](fmt::Display) and a
//! fixed-precision [`Rounded`] wrapper.

use std::fmt;

use super::Vector;

/// Prints the logical elements as `[x0, x1, …]`.
impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self, None)
    }
}

/// A tiny wrapper for printing a `Vector` rounded to a fixed number of
/// decimal places.
///
/// # Examples
/// ```
/// use u_vecmath::vector::{Rounded, Vector};
/// let v = Vector::vec3(1.0, 2.5, -1.0 / 3.0);
/// assert_eq!(Rounded::new(&v, 2).to_string(), "[1.00, 2.50, -0.33]");
/// ```
pub struct Rounded<'a>(pub &'a Vector, pub usize);

impl<'a> Rounded<'a> {
    /// Wrap a `&Vector` for pretty-printing with `decimals` digits.
    pub fn new(v: &'a Vector, decimals: usize) -> Self {
        Rounded(v, decimals)
    }
}

impl fmt::Display for Rounded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rounded(v, decimals) = *self;
        write_elements(f, v, Some(decimals))
    }
}

fn write_elements(f: &mut fmt::Formatter<'_>, v: &Vector, decimals: Option<usize>) -> fmt::Result {
    f.write_str("[")?;
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match decimals {
            Some(dec) => write!(f, "{x:.dec$}")?,
            None => write!(f, "{x}")?,
        }
    }
    f.write_str("]")
}

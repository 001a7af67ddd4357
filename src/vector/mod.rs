//! Growable, heap-backed numeric vector.
//!
//! A [`Vector`] owns a contiguous buffer of `capacity` slots of which the
//! first `size` are logically valid. Arithmetic, geometric and reduction
//! operations live in the submodules and all build on the accessors
//! defined here.
//!
//! # Storage model
//!
//! - `size ≤ capacity` always holds for a valid vector.
//! - Every freshly allocated slot is zero. Growing the logical size also
//!   zeroes the newly exposed slots, even when no reallocation happens.
//! - Shrinking the logical size never reallocates. Only
//!   [`Vector::shrink_to_fit`] gives memory back.
//! - Borrowed views from [`Vector::data`] / [`Vector::data_mut`] cannot
//!   outlive the next resizing call; the borrow checker enforces this.
//!
//! # Growth policy
//!
//! When a resize exceeds the current capacity the new capacity is
//! `max(min_capacity, capacity · growth_factor)`, raised to the requested
//! size if that is still short. With the defaults (16, 2) pushing `n`
//! elements performs O(log n) reallocations.

mod arith;
mod display;
mod geometry;
mod reduce;

pub use display::Rounded;

use tracing::{debug, trace};

use crate::error::{VectorError, VectorResult};

/// Smallest capacity allocated by a growing resize.
pub const MIN_CAPACITY: usize = 16;

/// Capacity multiplier applied by a growing resize.
pub const GROWTH_FACTOR: usize = 2;

/// Capacity growth configuration.
///
/// # Examples
/// ```
/// use u_vecmath::vector::GrowthPolicy;
/// let policy = GrowthPolicy::default();
/// assert_eq!(policy.next_capacity(0, 1), 16);
/// assert_eq!(policy.next_capacity(16, 17), 32);
/// assert_eq!(policy.next_capacity(16, 100), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Floor for the capacity chosen by a growing resize.
    pub min_capacity: usize,
    /// Multiplier applied to the current capacity. Values below 2 are
    /// treated as 2.
    pub growth_factor: usize,
}

impl GrowthPolicy {
    /// Capacity to allocate when `requested` slots are needed and
    /// `current` are available.
    pub fn next_capacity(&self, current: usize, requested: usize) -> usize {
        let factor = self.growth_factor.max(2);
        self.min_capacity
            .max(current.saturating_mul(factor))
            .max(requested)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            min_capacity: MIN_CAPACITY,
            growth_factor: GROWTH_FACTOR,
        }
    }
}

/// Owned, resizable vector of `f64` values.
///
/// # Examples
/// ```
/// use u_vecmath::vector::Vector;
/// let mut v = Vector::from_array(&[3.0, 4.0]).unwrap();
/// assert_eq!(v.magnitude().unwrap(), 5.0);
///
/// v.push(12.0).unwrap();
/// assert_eq!(v.size(), 3);
/// assert_eq!(v.get(2).unwrap(), 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct Vector {
    /// Backing storage; `elements.len()` is the capacity.
    elements: Vec<f64>,
    size: usize,
    policy: GrowthPolicy,
}

impl Vector {
    /// Creates an empty vector with no allocated storage.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            size: 0,
            policy: GrowthPolicy::default(),
        }
    }

    /// Allocates a vector of `size` zeroed elements with `capacity == size`.
    ///
    /// `size == 0` yields a valid vector without storage.
    ///
    /// # Errors
    /// [`VectorError::OutOfMemory`] if the buffer cannot be allocated.
    pub fn create(size: usize) -> VectorResult<Self> {
        Self::with_policy(size, GrowthPolicy::default())
    }

    /// Same as [`Vector::create`]; every slot is explicitly zero.
    pub fn zeroed(size: usize) -> VectorResult<Self> {
        Self::create(size)
    }

    /// Allocates `size` zeroed elements using a custom growth policy.
    pub fn with_policy(size: usize, policy: GrowthPolicy) -> VectorResult<Self> {
        Ok(Self {
            elements: alloc_zeroed(size)?,
            size,
            policy,
        })
    }

    /// Copies `values` into a new vector with `capacity == values.len()`.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let v = Vector::from_array(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(v.data().unwrap(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_array(values: &[f64]) -> VectorResult<Self> {
        let mut elements = Vec::new();
        elements
            .try_reserve_exact(values.len())
            .map_err(|_| VectorError::OutOfMemory {
                requested: values.len(),
            })?;
        elements.extend_from_slice(values);
        Ok(Self {
            size: values.len(),
            elements,
            policy: GrowthPolicy::default(),
        })
    }

    /// Two-element vector `(x, y)`.
    pub fn vec2(x: f64, y: f64) -> Self {
        Self::from(vec![x, y])
    }

    /// Three-element vector `(x, y, z)`.
    pub fn vec3(x: f64, y: f64, z: f64) -> Self {
        Self::from(vec![x, y, z])
    }

    /// Four-element vector `(x, y, z, w)`.
    pub fn vec4(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::from(vec![x, y, z, w])
    }

    /// Discards the current buffer and reinitializes with `size` zeroed
    /// elements and `capacity == size`.
    ///
    /// The new buffer is allocated before the old one is dropped, so a
    /// failure leaves the vector untouched.
    pub fn reinit(&mut self, size: usize) -> VectorResult<()> {
        self.elements = alloc_zeroed(size)?;
        self.size = size;
        Ok(())
    }

    /// Makes `self` an element-for-element copy of `src`.
    ///
    /// `self` is resized to `src.size()` under its own growth policy, so
    /// existing capacity is reused when it suffices.
    ///
    /// # Errors
    /// - [`VectorError::Uninitialized`] if `src` is not valid.
    /// - [`VectorError::OutOfMemory`] if `self` cannot grow.
    pub fn copy_from(&mut self, src: &Vector) -> VectorResult<()> {
        let values = src.data()?;
        self.resize(values.len())?;
        self.elements[..values.len()].copy_from_slice(values);
        Ok(())
    }

    /// Releases the vector and its buffer.
    ///
    /// Equivalent to dropping it; the vector is consumed so it cannot be
    /// used afterwards.
    pub fn release(self) {
        trace!(
            size = self.size,
            capacity = self.elements.len(),
            "vector released"
        );
    }

    // --- capacity management ---

    /// Sets the logical size to `size`.
    ///
    /// Growing past the capacity reallocates according to the growth
    /// policy. Newly exposed elements are zero. Shrinking keeps the
    /// capacity.
    ///
    /// # Errors
    /// [`VectorError::OutOfMemory`] if reallocation fails; the vector is
    /// left unchanged.
    ///
    /// # Examples
    /// ```
    /// use u_vecmath::vector::Vector;
    /// let mut v = Vector::create(4).unwrap();
    /// v.resize(20).unwrap();
    /// assert_eq!(v.size(), 20);
    /// assert_eq!(v.capacity(), 20);
    /// v.resize(2).unwrap();
    /// assert_eq!((v.size(), v.capacity()), (2, 20));
    /// ```
    pub fn resize(&mut self, size: usize) -> VectorResult<()> {
        if size > self.capacity() {
            let target = self.policy.next_capacity(self.capacity(), size);
            self.reallocate(target)?;
        }
        let old = self.size;
        if size > old {
            self.elements[old..size].fill(0.0);
        }
        self.size = size;
        Ok(())
    }

    /// Resizes to `size` and zeroes every logical element.
    pub fn resize_zeroed(&mut self, size: usize) -> VectorResult<()> {
        self.resize(size)?;
        self.elements[..size].fill(0.0);
        Ok(())
    }

    /// Ensures the capacity is at least `capacity` without changing the
    /// logical size. No-op when the capacity already suffices.
    pub fn reserve(&mut self, capacity: usize) -> VectorResult<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.reallocate(capacity)
    }

    /// Reduces the capacity to exactly the logical size, releasing the
    /// buffer entirely when the vector is empty.
    pub fn shrink_to_fit(&mut self) -> VectorResult<()> {
        self.ensure_valid()?;
        if self.size == self.capacity() {
            return Ok(());
        }
        if self.size == 0 {
            debug!(capacity = self.capacity(), "vector storage released");
            self.elements = Vec::new();
            return Ok(());
        }
        self.elements.truncate(self.size);
        self.elements.shrink_to_fit();
        Ok(())
    }

    /// Appends `value`, growing the buffer through the growth policy when
    /// it is full.
    pub fn push(&mut self, value: f64) -> VectorResult<()> {
        self.ensure_valid()?;
        if self.size == self.capacity() {
            let target = self.policy.next_capacity(self.capacity(), self.size + 1);
            self.reallocate(target)?;
        }
        self.elements[self.size] = value;
        self.size += 1;
        Ok(())
    }

    /// Removes and returns the last element, or `None` when empty.
    pub fn pop(&mut self) -> Option<f64> {
        let last = self.size.checked_sub(1)?;
        let value = self.elements.get(last).copied()?;
        self.size = last;
        Some(value)
    }

    /// Sets the logical size to zero. The capacity is kept.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Sets every logical element to zero.
    pub fn zero(&mut self) -> VectorResult<()> {
        self.data_mut()?.fill(0.0);
        Ok(())
    }

    /// Returns the growth policy.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Replaces the growth policy used by subsequent growing calls.
    pub fn set_policy(&mut self, policy: GrowthPolicy) {
        self.policy = policy;
    }

    // --- element access ---

    /// Returns the element at `index`.
    ///
    /// # Errors
    /// - [`VectorError::Uninitialized`] if the vector is not valid.
    /// - [`VectorError::IndexOutOfBounds`] if `index >= size`.
    pub fn get(&self, index: usize) -> VectorResult<f64> {
        let size = self.size;
        self.data()?
            .get(index)
            .copied()
            .ok_or(VectorError::IndexOutOfBounds { index, size })
    }

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    /// Same as [`Vector::get`].
    pub fn set(&mut self, index: usize, value: f64) -> VectorResult<()> {
        let size = self.size;
        let slot = self
            .data_mut()?
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfBounds { index, size })?;
        *slot = value;
        Ok(())
    }

    /// Read-only view of the logical elements.
    ///
    /// # Errors
    /// [`VectorError::Uninitialized`] if the vector is not valid.
    pub fn data(&self) -> VectorResult<&[f64]> {
        self.ensure_valid()?;
        Ok(&self.elements[..self.size])
    }

    /// Mutable view of the logical elements.
    ///
    /// # Errors
    /// [`VectorError::Uninitialized`] if the vector is not valid.
    pub fn data_mut(&mut self) -> VectorResult<&mut [f64]> {
        self.ensure_valid()?;
        Ok(&mut self.elements[..self.size])
    }

    /// Number of logically valid elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alias of [`Vector::size`].
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the logical size is zero.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the buffer backs every logical element.
    pub fn is_valid(&self) -> bool {
        self.size <= self.elements.len()
    }

    /// Iterates over the logical elements. Yields nothing for an invalid
    /// vector.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.as_slice_or_empty().iter()
    }

    fn ensure_valid(&self) -> VectorResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(VectorError::Uninitialized)
        }
    }

    fn as_slice_or_empty(&self) -> &[f64] {
        self.elements.get(..self.size).unwrap_or(&[])
    }

    /// Grows the buffer to exactly `new_capacity` zeroed-tail slots.
    fn reallocate(&mut self, new_capacity: usize) -> VectorResult<()> {
        let old_capacity = self.elements.len();
        self.elements
            .try_reserve_exact(new_capacity - old_capacity)
            .map_err(|_| VectorError::OutOfMemory {
                requested: new_capacity,
            })?;
        self.elements.resize(new_capacity, 0.0);
        debug!(old_capacity, new_capacity, "vector storage reallocated");
        Ok(())
    }

    /// Vector whose logical size exceeds its storage.
    #[cfg(test)]
    pub(crate) fn detached(size: usize) -> Self {
        Self {
            elements: Vec::new(),
            size,
            policy: GrowthPolicy::default(),
        }
    }
}

fn alloc_zeroed(len: usize) -> VectorResult<Vec<f64>> {
    let mut elements = Vec::new();
    elements
        .try_reserve_exact(len)
        .map_err(|_| VectorError::OutOfMemory { requested: len })?;
    elements.resize(len, 0.0);
    Ok(elements)
}

impl Default for Vector {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Vector {
    /// Exact comparison of the logical elements; capacity is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.is_valid() == other.is_valid() && self.as_slice_or_empty() == other.as_slice_or_empty()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(elements: Vec<f64>) -> Self {
        Self {
            size: elements.len(),
            elements,
            policy: GrowthPolicy::default(),
        }
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(values: [f64; N]) -> Self {
        Self::from(values.to_vec())
    }
}

impl AsRef<[f64]> for Vector {
    fn as_ref(&self) -> &[f64] {
        self.as_slice_or_empty()
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

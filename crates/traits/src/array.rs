//! Element-wise `u32` array capability.
//!
//! [`WordArray`] is the seam between the batch hash kernels and the memory that
//! holds the numbers. Any array type that can do unsigned 32-bit wraparound
//! arithmetic element-wise can back the kernel: a host `Vec<u32>`, a
//! thread-parallel host array, or a device-resident buffer.
//!
//! Every binary operation takes `&Self`, so both operands always live in the
//! same memory space. Moving data between spaces is the caller's job.
//!
//! # Semantics
//!
//! - Arithmetic wraps modulo 2^32. It never widens, saturates or panics.
//! - Shifts by 32 or more produce zero.
//! - Binary operations require identical shapes. The kernels validate shapes
//!   once at the boundary, so implementations may treat a mismatch as a bug.

/// An n-dimensional, row-major array of `u32` with element-wise operations.
///
/// # Examples
///
/// A minimal 1-D implementation:
///
/// ```
/// use traits::WordArray;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Flat(Vec<u32>, [usize; 1]);
///
/// impl WordArray for Flat {
///   fn shape(&self) -> &[usize] { &self.1 }
///   fn duplicate(&self) -> Self { self.clone() }
///   fn take_last(&self, index: usize) -> Self { Flat(vec![self.0[index]], [1]) }
///   fn xor_rows_assign(&mut self, rows: &Self) { for (x, r) in self.0.iter_mut().zip(&rows.0) { *x ^= r } }
///   fn wrapping_add_scalar_assign(&mut self, v: u32) { self.0.iter_mut().for_each(|x| *x = x.wrapping_add(v)) }
///   fn wrapping_mul_scalar_assign(&mut self, v: u32) { self.0.iter_mut().for_each(|x| *x = x.wrapping_mul(v)) }
///   fn xor_scalar_assign(&mut self, v: u32) { self.0.iter_mut().for_each(|x| *x ^= v) }
///   fn xor_assign(&mut self, rhs: &Self) { for (x, r) in self.0.iter_mut().zip(&rhs.0) { *x ^= r } }
///   fn or_assign(&mut self, rhs: &Self) { for (x, r) in self.0.iter_mut().zip(&rhs.0) { *x |= r } }
///   fn shl(&self, r: u32) -> Self { Flat(self.0.iter().map(|x| x.checked_shl(r).unwrap_or(0)).collect(), self.1) }
///   fn shr(&self, r: u32) -> Self { Flat(self.0.iter().map(|x| x.checked_shr(r).unwrap_or(0)).collect(), self.1) }
/// }
///
/// let mut a = Flat(vec![u32::MAX, 2], [2]);
/// a.wrapping_mul_scalar_assign(2);
/// assert_eq!(a.0, vec![u32::MAX - 1, 4]);
/// assert_eq!(a.size(), 2);
/// ```
pub trait WordArray: Sized {
  /// Dimensions, outermost first.
  fn shape(&self) -> &[usize];

  /// Number of dimensions.
  #[inline]
  fn ndim(&self) -> usize {
    self.shape().len()
  }

  /// Number of elements.
  #[inline]
  fn size(&self) -> usize {
    self.shape().iter().product()
  }

  /// Owned deep copy. Mutating the copy never touches `self`.
  #[must_use]
  fn duplicate(&self) -> Self;

  /// The slice `self[..., index]`: element `index` of the last axis, with that
  /// axis removed. Shape `(a, b, n)` becomes `(a, b)`.
  #[must_use]
  fn take_last(&self, index: usize) -> Self;

  /// `self ^= rows[:, None]`: XOR `rows[i]` into every element of leading-axis
  /// slice `i`. `rows` is 1-D with `shape()[0]` elements.
  fn xor_rows_assign(&mut self, rows: &Self);

  /// `self += v` (mod 2^32).
  fn wrapping_add_scalar_assign(&mut self, v: u32);

  /// `self *= v` (mod 2^32).
  fn wrapping_mul_scalar_assign(&mut self, v: u32);

  /// `self ^= v`.
  fn xor_scalar_assign(&mut self, v: u32);

  /// `self ^= rhs`, element-wise.
  fn xor_assign(&mut self, rhs: &Self);

  /// `self |= rhs`, element-wise.
  fn or_assign(&mut self, rhs: &Self);

  /// `self << r`, element-wise, as a new array.
  #[must_use]
  fn shl(&self, r: u32) -> Self;

  /// `self >> r` (logical), element-wise, as a new array.
  #[must_use]
  fn shr(&self, r: u32) -> Self;
}

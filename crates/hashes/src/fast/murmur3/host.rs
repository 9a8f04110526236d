//! Sequential host array backend.

use alloc::{vec, vec::Vec};

use traits::{ShapeError, WordArray};

use super::pack::pack_le_words;

/// Owned, row-major `u32` array in host memory.
///
/// The shape is dynamic so one type covers keys `(S, K, L)`, seeds `(S,)` and
/// hashes `(S, K)`. The element count always equals the product of the shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HostArray {
  pub(crate) shape: Vec<usize>,
  pub(crate) data: Vec<u32>,
}

impl HostArray {
  /// Wrap `data` with `shape`.
  ///
  /// Fails if the shape product overflows or differs from `data.len()`.
  pub fn from_shape_vec(shape: &[usize], data: Vec<u32>) -> Result<Self, ShapeError> {
    let expected = element_count(shape)?;
    if data.len() != expected {
      return Err(ShapeError::DataLength {
        expected,
        found: data.len(),
      });
    }
    Ok(Self {
      shape: shape.to_vec(),
      data,
    })
  }

  /// A key batch of shape `(seeds, keys, words)`.
  pub fn keys(seeds: usize, keys: usize, words: usize, data: Vec<u32>) -> Result<Self, ShapeError> {
    Self::from_shape_vec(&[seeds, keys, words], data)
  }

  /// A key batch from raw bytes, every key `key_bytes` long, packed as
  /// little-endian words.
  ///
  /// ```
  /// use hashes::fast::murmur3::HostArray;
  /// use hashes::WordArray as _;
  ///
  /// let keys = HostArray::keys_from_le_bytes(1, 2, 4, b"abcdwxyz").unwrap();
  /// assert_eq!(keys.shape(), &[1, 2, 1]);
  /// assert_eq!(keys.as_slice(), &[u32::from_le_bytes(*b"abcd"), u32::from_le_bytes(*b"wxyz")]);
  /// ```
  pub fn keys_from_le_bytes(seeds: usize, keys: usize, key_bytes: usize, bytes: &[u8]) -> Result<Self, ShapeError> {
    if key_bytes % 4 != 0 {
      return Err(ShapeError::ByteLength { found: key_bytes });
    }
    Self::keys(seeds, keys, key_bytes / 4, pack_le_words(bytes)?)
  }

  /// Elements in row-major order.
  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u32] {
    &self.data
  }

  /// Consume the array, returning its elements in row-major order.
  #[inline]
  #[must_use]
  pub fn into_vec(self) -> Vec<u32> {
    self.data
  }

  /// Element at a full multi-dimensional index, or `None` if out of bounds.
  #[must_use]
  pub fn get(&self, index: &[usize]) -> Option<u32> {
    if index.len() != self.shape.len() {
      return None;
    }
    let mut offset = 0usize;
    for (&i, &dim) in index.iter().zip(&self.shape) {
      if i >= dim {
        return None;
      }
      offset = offset * dim + i;
    }
    self.data.get(offset).copied()
  }

  /// Internal constructor for shapes the caller already validated.
  #[inline]
  pub(crate) fn from_parts(shape: Vec<usize>, data: Vec<u32>) -> Self {
    debug_assert_eq!(shape.iter().product::<usize>(), data.len());
    Self { shape, data }
  }

  /// Length of one leading-axis slice.
  #[inline]
  pub(crate) fn row_len(&self) -> usize {
    self.shape.split_first().map_or(1, |(_, rest)| rest.iter().product())
  }
}

impl From<Vec<u32>> for HostArray {
  /// A 1-D array, e.g. a seed batch.
  fn from(data: Vec<u32>) -> Self {
    Self {
      shape: vec![data.len()],
      data,
    }
  }
}

fn element_count(shape: &[usize]) -> Result<usize, ShapeError> {
  shape
    .iter()
    .try_fold(1usize, |acc, &d| acc.checked_mul(d))
    .ok_or(ShapeError::Overflow)
}

/// `data[..., index]` for row-major `data` whose last axis is `last` long.
fn gather_last(data: &[u32], last: usize, index: usize) -> Vec<u32> {
  if last == 0 {
    return Vec::new();
  }
  data
    .chunks_exact(last)
    .map(|row| row.get(index).copied().unwrap_or(0))
    .collect()
}

impl WordArray for HostArray {
  #[inline]
  fn shape(&self) -> &[usize] {
    &self.shape
  }

  #[inline]
  fn size(&self) -> usize {
    self.data.len()
  }

  fn duplicate(&self) -> Self {
    self.clone()
  }

  fn take_last(&self, index: usize) -> Self {
    let (last, lead) = match self.shape.split_last() {
      Some((&last, lead)) => (last, lead),
      None => (0, &[][..]),
    };
    Self::from_parts(lead.to_vec(), gather_last(&self.data, last, index))
  }

  fn xor_rows_assign(&mut self, rows: &Self) {
    let row_len = self.row_len();
    if row_len == 0 {
      return;
    }
    debug_assert_eq!(self.data.len() / row_len, rows.data.len());
    for (row, &r) in self.data.chunks_exact_mut(row_len).zip(&rows.data) {
      row.iter_mut().for_each(|x| *x ^= r);
    }
  }

  fn wrapping_add_scalar_assign(&mut self, v: u32) {
    self.data.iter_mut().for_each(|x| *x = x.wrapping_add(v));
  }

  fn wrapping_mul_scalar_assign(&mut self, v: u32) {
    self.data.iter_mut().for_each(|x| *x = x.wrapping_mul(v));
  }

  fn xor_scalar_assign(&mut self, v: u32) {
    self.data.iter_mut().for_each(|x| *x ^= v);
  }

  fn xor_assign(&mut self, rhs: &Self) {
    debug_assert_eq!(self.shape, rhs.shape);
    self.data.iter_mut().zip(&rhs.data).for_each(|(x, &r)| *x ^= r);
  }

  fn or_assign(&mut self, rhs: &Self) {
    debug_assert_eq!(self.shape, rhs.shape);
    self.data.iter_mut().zip(&rhs.data).for_each(|(x, &r)| *x |= r);
  }

  fn shl(&self, r: u32) -> Self {
    let data = self.data.iter().map(|x| x.checked_shl(r).unwrap_or(0)).collect();
    Self::from_parts(self.shape.clone(), data)
  }

  fn shr(&self, r: u32) -> Self {
    let data = self.data.iter().map(|x| x.checked_shr(r).unwrap_or(0)).collect();
    Self::from_parts(self.shape.clone(), data)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn grid() -> HostArray {
    // shape (2, 2, 3), values 0..12
    HostArray::keys(2, 2, 3, (0..12).collect()).unwrap()
  }

  #[test]
  fn from_shape_vec_checks_length() {
    assert_eq!(
      HostArray::from_shape_vec(&[2, 3], vec![0; 5]),
      Err(ShapeError::DataLength { expected: 6, found: 5 })
    );
    assert!(HostArray::from_shape_vec(&[2, 3], vec![0; 6]).is_ok());
  }

  #[test]
  fn from_shape_vec_checks_overflow() {
    assert_eq!(
      HostArray::from_shape_vec(&[usize::MAX, 2], Vec::new()),
      Err(ShapeError::Overflow)
    );
  }

  #[test]
  fn keys_from_le_bytes_rejects_partial_words() {
    assert_eq!(
      HostArray::keys_from_le_bytes(1, 1, 3, b"abc"),
      Err(ShapeError::ByteLength { found: 3 })
    );
  }

  #[test]
  fn get_uses_row_major_order() {
    let a = grid();
    assert_eq!(a.get(&[0, 0, 0]), Some(0));
    assert_eq!(a.get(&[0, 1, 2]), Some(5));
    assert_eq!(a.get(&[1, 1, 2]), Some(11));
    assert_eq!(a.get(&[2, 0, 0]), None);
    assert_eq!(a.get(&[0, 0]), None);
  }

  #[test]
  fn take_last_drops_last_axis() {
    let a = grid();
    let w1 = a.take_last(1);
    assert_eq!(w1.shape(), &[2, 2]);
    assert_eq!(w1.as_slice(), &[1, 4, 7, 10]);
  }

  #[test]
  fn xor_rows_broadcasts_over_keys_not_words() {
    let mut h = HostArray::from_shape_vec(&[2, 3], vec![0; 6]).unwrap();
    h.xor_rows_assign(&HostArray::from(vec![0xA, 0xB]));
    assert_eq!(h.as_slice(), &[0xA, 0xA, 0xA, 0xB, 0xB, 0xB]);
  }

  #[test]
  fn arithmetic_wraps() {
    let mut a = HostArray::from(vec![u32::MAX, 0x8000_0000]);
    a.wrapping_add_scalar_assign(1);
    assert_eq!(a.as_slice(), &[0, 0x8000_0001]);
    a.wrapping_mul_scalar_assign(2);
    assert_eq!(a.as_slice(), &[0, 2]);
  }

  #[test]
  fn shifts_are_logical_and_saturate_to_zero() {
    let a = HostArray::from(vec![0x8000_0001]);
    assert_eq!(a.shr(31).as_slice(), &[1]);
    assert_eq!(a.shl(1).as_slice(), &[2]);
    assert_eq!(a.shl(32).as_slice(), &[0]);
    assert_eq!(a.shr(32).as_slice(), &[0]);
  }

  #[test]
  fn duplicate_is_independent() {
    let a = grid();
    let mut b = a.duplicate();
    b.xor_scalar_assign(u32::MAX);
    assert_eq!(a, grid());
    assert_ne!(a, b);
  }

  #[test]
  fn or_and_xor_are_elementwise() {
    let mut a = HostArray::from(vec![0b1100, 0b1010]);
    let b = HostArray::from(vec![0b1010, 0b1010]);
    a.or_assign(&b);
    assert_eq!(a.as_slice(), &[0b1110, 0b1010]);
    a.xor_assign(&b);
    assert_eq!(a.as_slice(), &[0b0100, 0]);
  }
}

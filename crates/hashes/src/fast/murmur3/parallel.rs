//! Thread-parallel host array backend (rayon).

use alloc::vec::Vec;

use rayon::prelude::*;
use traits::{ShapeError, WordArray};

use super::host::HostArray;

/// A [`HostArray`] whose element-wise operations run on the rayon pool.
///
/// Results are bit-identical to [`HostArray`]; only the scheduling differs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParallelArray(HostArray);

impl ParallelArray {
  /// See [`HostArray::from_shape_vec`].
  pub fn from_shape_vec(shape: &[usize], data: Vec<u32>) -> Result<Self, ShapeError> {
    HostArray::from_shape_vec(shape, data).map(Self)
  }

  /// Elements in row-major order.
  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u32] {
    self.0.as_slice()
  }

  /// Unwrap into the sequential [`HostArray`] holding the same elements.
  #[inline]
  #[must_use]
  pub fn into_host(self) -> HostArray {
    self.0
  }

  fn map(&self, f: impl Fn(u32) -> u32 + Sync + Send) -> Self {
    let data = self.0.data.par_iter().map(|&x| f(x)).collect();
    Self(HostArray::from_parts(self.0.shape.clone(), data))
  }

  fn for_each(&mut self, f: impl Fn(&mut u32) + Sync + Send) {
    self.0.data.par_iter_mut().for_each(f);
  }

  fn zip_with(&mut self, rhs: &Self, f: impl Fn(&mut u32, u32) + Sync + Send) {
    debug_assert_eq!(self.0.shape, rhs.0.shape);
    self
      .0
      .data
      .par_iter_mut()
      .zip(rhs.0.data.par_iter())
      .for_each(|(x, &r)| f(x, r));
  }
}

impl From<HostArray> for ParallelArray {
  fn from(host: HostArray) -> Self {
    Self(host)
  }
}

impl From<ParallelArray> for HostArray {
  fn from(array: ParallelArray) -> Self {
    array.0
  }
}

impl From<Vec<u32>> for ParallelArray {
  fn from(data: Vec<u32>) -> Self {
    Self(HostArray::from(data))
  }
}

impl WordArray for ParallelArray {
  #[inline]
  fn shape(&self) -> &[usize] {
    self.0.shape()
  }

  fn duplicate(&self) -> Self {
    self.clone()
  }

  fn take_last(&self, index: usize) -> Self {
    let (last, lead) = match self.0.shape.split_last() {
      Some((&last, lead)) => (last, lead),
      None => (0, &[][..]),
    };
    let data = if last == 0 {
      Vec::new()
    } else {
      self
        .0
        .data
        .par_chunks_exact(last)
        .map(|row| row.get(index).copied().unwrap_or(0))
        .collect()
    };
    Self(HostArray::from_parts(lead.to_vec(), data))
  }

  fn xor_rows_assign(&mut self, rows: &Self) {
    let row_len = self.0.row_len();
    if row_len == 0 {
      return;
    }
    self
      .0
      .data
      .par_chunks_exact_mut(row_len)
      .zip(rows.0.data.par_iter())
      .for_each(|(row, &r)| row.iter_mut().for_each(|x| *x ^= r));
  }

  fn wrapping_add_scalar_assign(&mut self, v: u32) {
    self.for_each(|x| *x = x.wrapping_add(v));
  }

  fn wrapping_mul_scalar_assign(&mut self, v: u32) {
    self.for_each(|x| *x = x.wrapping_mul(v));
  }

  fn xor_scalar_assign(&mut self, v: u32) {
    self.for_each(|x| *x ^= v);
  }

  fn xor_assign(&mut self, rhs: &Self) {
    self.zip_with(rhs, |x, r| *x ^= r);
  }

  fn or_assign(&mut self, rhs: &Self) {
    self.zip_with(rhs, |x, r| *x |= r);
  }

  fn shl(&self, r: u32) -> Self {
    self.map(|x| x.checked_shl(r).unwrap_or(0))
  }

  fn shr(&self, r: u32) -> Self {
    self.map(|x| x.checked_shr(r).unwrap_or(0))
  }
}

#[cfg(test)]
mod tests {
  use alloc::vec;

  use super::*;
  use crate::fast::murmur3::hash;

  #[test]
  fn matches_host_backend() {
    let data: Vec<u32> = (0u32..3 * 5 * 4).map(|i| i.wrapping_mul(0x9e37_79b9)).collect();
    let seeds = vec![0, 1, u32::MAX];

    let host = hash(
      &HostArray::keys(3, 5, 4, data.clone()).unwrap(),
      &HostArray::from(seeds.clone()),
    )
    .unwrap();
    let par = hash(
      &ParallelArray::from_shape_vec(&[3, 5, 4], data).unwrap(),
      &ParallelArray::from(seeds),
    )
    .unwrap();

    assert_eq!(par.into_host(), host);
  }

  #[test]
  fn elementwise_ops_match_host() {
    let host = HostArray::from(vec![0x8000_0001, 7, u32::MAX]);
    let par = ParallelArray::from(host.clone());
    assert_eq!(par.shl(3).as_slice(), host.shl(3).as_slice());
    assert_eq!(par.shr(33).as_slice(), host.shr(33).as_slice());
  }
}

//! Element-wise batch kernel, generic over the array backend.
//!
//! Every step is a whole-array operation, so the same code runs against any
//! [`WordArray`]. Word position `i` of every key in the batch is processed by
//! one array operation; there is no per-key loop.

use traits::{ShapeError, WordArray};

use super::{BatchShape, C1, C2, F1, F2, N1};

/// Hash every key in `keys` with the seed of its group.
///
/// `keys` has shape `(S, K, L)`, `seeds` has shape `(S,)`; the result has shape
/// `(S, K)` and lives in the same backend. `out[s, k]` equals
/// `Murmur3_32::hash_with_seed(seeds[s], le_bytes(keys[s, k, ..]))`.
///
/// Inputs are never modified. Shape errors are reported before any work.
///
/// ```
/// use hashes::fast::murmur3::{self, HostArray};
///
/// // One seed group, three one-word keys.
/// let keys = HostArray::keys(1, 3, 1, vec![0, 0, 0]).unwrap();
/// let out = murmur3::hash(&keys, &HostArray::from(vec![0])).unwrap();
/// assert_eq!(out.as_slice(), &[0x2362_F9DE; 3]);
/// ```
pub fn hash<A: WordArray>(keys: &A, seeds: &A) -> Result<A, ShapeError> {
  let shape = BatchShape::validate(keys.shape(), seeds.shape())?;
  tracing::trace!(
    seeds = shape.seeds,
    keys = shape.keys,
    words = shape.words,
    "murmur3 element-wise batch"
  );

  // k = rotl(keys * C1, 15) * C2, for all words at once.
  let mut k = keys.duplicate();
  k.wrapping_mul_scalar_assign(C1);
  let mut k = rotl(&k, 15);
  k.wrapping_mul_scalar_assign(C2);

  // h starts at the seed of each group; every word is XORed in and folded.
  let mut h = k.take_last(0);
  h.xor_rows_assign(seeds);
  h = fold(&h);

  for i in 1..shape.words {
    h.xor_assign(&k.take_last(i));
    h = fold(&h);
  }

  h.xor_scalar_assign(shape.byte_len());
  Ok(fmix(h))
}

#[inline]
fn rotl<A: WordArray>(x: &A, r: u32) -> A {
  let mut out = x.shl(r);
  out.or_assign(&x.shr(32 - r));
  out
}

#[inline]
fn fold<A: WordArray>(h: &A) -> A {
  let mut h = rotl(h, 13);
  h.wrapping_mul_scalar_assign(5);
  h.wrapping_add_scalar_assign(N1);
  h
}

fn fmix<A: WordArray>(mut h: A) -> A {
  let s = h.shr(16);
  h.xor_assign(&s);
  h.wrapping_mul_scalar_assign(F1);
  let s = h.shr(13);
  h.xor_assign(&s);
  h.wrapping_mul_scalar_assign(F2);
  let s = h.shr(16);
  h.xor_assign(&s);
  h
}

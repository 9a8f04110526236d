//! One-shot non-cryptographic hash trait (**NOT CRYPTO**).

use core::fmt::Debug;

/// A fast non-cryptographic hash over a byte slice.
///
/// Suitable for hash tables, sharding, sketches and bloom filters. Not
/// suitable for signatures, MACs or adversarial inputs.
///
/// The trait is one-shot on purpose: batch and streaming shapes are exposed as
/// concrete functions by the implementing module.
pub trait FastHash {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Hash output type.
  type Output: Copy + Eq + Debug + Default;

  /// Seed type.
  type Seed: Copy + Debug + Default;

  /// Hash `data` with the default (zero) seed.
  #[inline]
  #[must_use]
  fn hash(data: &[u8]) -> Self::Output {
    Self::hash_with_seed(Self::Seed::default(), data)
  }

  /// Hash `data` with `seed`.
  #[must_use]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output;
}

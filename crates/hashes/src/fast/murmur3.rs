//! MurmurHash3, 32-bit x86 variant (**NOT CRYPTO**).
//!
//! Three entry points share one definition of the mixing steps:
//!
//! - [`Murmur3_32`]: scalar, one byte slice at a time. This is the reference.
//! - [`hash`]: element-wise batch kernel, generic over any [`WordArray`]
//!   backend. Keys are `(seeds, keys, words)`, seeds are `(seeds,)`, output is
//!   `(seeds, keys)`.
//! - [`hash_batch`]: the same contract over [`HostArray`], fused per key and
//!   dispatched to the best SIMD kernel for the running CPU.
//!
//! All three agree bit-for-bit on every `(seed, key)` pair.
//!
//! [`WordArray`]: traits::WordArray

use traits::FastHash;

pub mod config;
#[doc(hidden)]
pub mod dispatch;
#[cfg(feature = "alloc")]
mod host;
pub(crate) mod kernels;
#[cfg(feature = "alloc")]
pub mod pack;
#[cfg(feature = "parallel")]
mod parallel;
mod shape;
#[cfg(feature = "alloc")]
mod vectorized;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use config::{Murmur3Config, Murmur3Force};
#[cfg(feature = "alloc")]
pub use dispatch::hash_batch;
pub use dispatch::kernel_name;
#[cfg(feature = "alloc")]
pub use host::HostArray;
#[cfg(feature = "alloc")]
pub use pack::pack_le_words;
#[cfg(feature = "parallel")]
pub use parallel::ParallelArray;
pub use shape::BatchShape;
#[cfg(feature = "alloc")]
pub use vectorized::hash;

pub(crate) const C1: u32 = 0xcc9e_2d51;
pub(crate) const C2: u32 = 0x1b87_3593;
pub(crate) const N1: u32 = 0xe654_6b64;
pub(crate) const F1: u32 = 0x85eb_ca6b;
pub(crate) const F2: u32 = 0xc2b2_ae35;

/// MurmurHash3_x86_32.
#[derive(Clone, Default)]
#[allow(non_camel_case_types)]
pub struct Murmur3_32;

impl FastHash for Murmur3_32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output {
    murmur3_32(seed, data)
  }
}

#[inline(always)]
pub(crate) const fn mix_k1(k1: u32) -> u32 {
  k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline(always)]
pub(crate) const fn fold(h1: u32) -> u32 {
  h1.rotate_left(13).wrapping_mul(5).wrapping_add(N1)
}

#[inline(always)]
pub(crate) const fn fmix(mut h: u32) -> u32 {
  h ^= h >> 16;
  h = h.wrapping_mul(F1);
  h ^= h >> 13;
  h = h.wrapping_mul(F2);
  h ^= h >> 16;
  h
}

/// Hash one key that is already packed into words.
///
/// Equal to `Murmur3_32::hash_with_seed(seed, bytes)` where `bytes` is the
/// little-endian encoding of `key`.
#[inline]
#[must_use]
pub fn hash_words(seed: u32, key: &[u32]) -> u32 {
  let mut h1 = seed;
  for &k1 in key {
    h1 = fold(h1 ^ mix_k1(k1));
  }
  h1 ^= (key.len() as u32).wrapping_mul(4);
  fmix(h1)
}

fn murmur3_32(seed: u32, data: &[u8]) -> u32 {
  let (blocks, tail) = data.as_chunks::<4>();

  let mut h1 = seed;
  for block in blocks {
    h1 = fold(h1 ^ mix_k1(u32::from_le_bytes(*block)));
  }

  if !tail.is_empty() {
    let k1 = tail.iter().rev().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
    h1 ^= mix_k1(k1);
  }

  // Length is mixed in modulo 2^32.
  h1 ^= data.len() as u32;
  fmix(h1)
}

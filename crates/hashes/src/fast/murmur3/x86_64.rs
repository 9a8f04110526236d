//! MurmurHash3 x86_64 group kernels (SSE4.1 4-way, AVX2 8-way).
//!
//! One key per 32-bit lane. Word `i` of every lane is gathered with a
//! `setr`, so keys of any length work without transposing the input. Keys that
//! do not fill a whole vector go through the portable kernel.
//!
//! # Safety
//!
//! The `unsafe` kernels require their CPU features. The `*_safe` wrappers are
//! only handed out by the dispatcher after it has checked them.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::inline_always)]
#![allow(clippy::cast_possible_wrap)]

use core::arch::x86_64::*;

use super::{C1, C2, F1, F2, N1, kernels::hash_group_portable};

// ─────────────────────────────────────────────────────────────────────────────
// SSE4.1 (4 lanes)
// ─────────────────────────────────────────────────────────────────────────────

mod sse41 {
  use super::*;

  pub(super) const LANES: usize = 4;

  #[inline(always)]
  unsafe fn set1(x: u32) -> __m128i {
    _mm_set1_epi32(x as i32)
  }

  #[inline(always)]
  unsafe fn mul(a: __m128i, c: u32) -> __m128i {
    _mm_mullo_epi32(a, set1(c))
  }

  #[inline(always)]
  unsafe fn rotl15(a: __m128i) -> __m128i {
    _mm_or_si128(_mm_slli_epi32(a, 15), _mm_srli_epi32(a, 17))
  }

  #[inline(always)]
  unsafe fn rotl13(a: __m128i) -> __m128i {
    _mm_or_si128(_mm_slli_epi32(a, 13), _mm_srli_epi32(a, 19))
  }

  #[inline(always)]
  unsafe fn xorshr<const R: i32>(a: __m128i) -> __m128i {
    _mm_xor_si128(a, _mm_srli_epi32::<R>(a))
  }

  /// Load word `i` of the 4 keys starting at `p`.
  #[inline(always)]
  unsafe fn gather(p: *const u32, words: usize, i: usize) -> __m128i {
    _mm_setr_epi32(
      *p.add(i) as i32,
      *p.add(words + i) as i32,
      *p.add(2 * words + i) as i32,
      *p.add(3 * words + i) as i32,
    )
  }

  /// Hash 4 keys of `words` words each, laid out back to back at `block`.
  #[target_feature(enable = "sse4.1")]
  pub(super) unsafe fn hash4(block: &[u32], words: usize, seed: u32, out: &mut [u32]) {
    debug_assert_eq!(block.len(), LANES * words);
    debug_assert_eq!(out.len(), LANES);

    let p = block.as_ptr();
    let mut h = set1(seed);
    for i in 0..words {
      let k = mul(rotl15(mul(gather(p, words, i), C1)), C2);
      h = _mm_xor_si128(h, k);
      h = _mm_add_epi32(mul(rotl13(h), 5), set1(N1));
    }

    h = _mm_xor_si128(h, set1((words as u32).wrapping_mul(4)));
    h = mul(xorshr::<16>(h), F1);
    h = mul(xorshr::<13>(h), F2);
    h = xorshr::<16>(h);

    _mm_storeu_si128(out.as_mut_ptr().cast(), h);
  }
}

/// SSE4.1 group kernel.
///
/// # Safety
///
/// Caller must ensure SSE4.1 is available.
#[target_feature(enable = "sse4.1")]
pub unsafe fn hash_group_sse41(keys: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  debug_assert!(words > 0);
  let blocks = keys.chunks_exact(sse41::LANES * words);
  let key_tail = blocks.remainder();
  let mut outs = out.chunks_exact_mut(sse41::LANES);
  for (block, dst) in blocks.zip(&mut outs) {
    sse41::hash4(block, words, seed, dst);
  }
  hash_group_portable(key_tail, words, seed, outs.into_remainder());
}

/// Safe wrapper for the SSE4.1 group kernel.
#[inline]
pub fn hash_group_sse41_safe(keys: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  // SAFETY: Dispatcher verifies SSE4.1 before selecting this kernel.
  unsafe { hash_group_sse41(keys, words, seed, out) }
}

// ─────────────────────────────────────────────────────────────────────────────
// AVX2 (8 lanes)
// ─────────────────────────────────────────────────────────────────────────────

mod avx2 {
  use super::*;

  pub(super) const LANES: usize = 8;

  #[inline(always)]
  unsafe fn set1(x: u32) -> __m256i {
    _mm256_set1_epi32(x as i32)
  }

  #[inline(always)]
  unsafe fn mul(a: __m256i, c: u32) -> __m256i {
    _mm256_mullo_epi32(a, set1(c))
  }

  #[inline(always)]
  unsafe fn rotl15(a: __m256i) -> __m256i {
    _mm256_or_si256(_mm256_slli_epi32(a, 15), _mm256_srli_epi32(a, 17))
  }

  #[inline(always)]
  unsafe fn rotl13(a: __m256i) -> __m256i {
    _mm256_or_si256(_mm256_slli_epi32(a, 13), _mm256_srli_epi32(a, 19))
  }

  #[inline(always)]
  unsafe fn xorshr<const R: i32>(a: __m256i) -> __m256i {
    _mm256_xor_si256(a, _mm256_srli_epi32::<R>(a))
  }

  /// Load word `i` of the 8 keys starting at `p`.
  #[inline(always)]
  unsafe fn gather(p: *const u32, words: usize, i: usize) -> __m256i {
    _mm256_setr_epi32(
      *p.add(i) as i32,
      *p.add(words + i) as i32,
      *p.add(2 * words + i) as i32,
      *p.add(3 * words + i) as i32,
      *p.add(4 * words + i) as i32,
      *p.add(5 * words + i) as i32,
      *p.add(6 * words + i) as i32,
      *p.add(7 * words + i) as i32,
    )
  }

  /// Hash 8 keys of `words` words each, laid out back to back at `block`.
  #[target_feature(enable = "avx2")]
  pub(super) unsafe fn hash8(block: &[u32], words: usize, seed: u32, out: &mut [u32]) {
    debug_assert_eq!(block.len(), LANES * words);
    debug_assert_eq!(out.len(), LANES);

    let p = block.as_ptr();
    let mut h = set1(seed);
    for i in 0..words {
      let k = mul(rotl15(mul(gather(p, words, i), C1)), C2);
      h = _mm256_xor_si256(h, k);
      h = _mm256_add_epi32(mul(rotl13(h), 5), set1(N1));
    }

    h = _mm256_xor_si256(h, set1((words as u32).wrapping_mul(4)));
    h = mul(xorshr::<16>(h), F1);
    h = mul(xorshr::<13>(h), F2);
    h = xorshr::<16>(h);

    _mm256_storeu_si256(out.as_mut_ptr().cast(), h);
  }
}

/// AVX2 group kernel.
///
/// # Safety
///
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub unsafe fn hash_group_avx2(keys: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  debug_assert!(words > 0);
  let blocks = keys.chunks_exact(avx2::LANES * words);
  let key_tail = blocks.remainder();
  let mut outs = out.chunks_exact_mut(avx2::LANES);
  for (block, dst) in blocks.zip(&mut outs) {
    avx2::hash8(block, words, seed, dst);
  }
  // Up to 7 leftover keys: one more 4-lane step, then portable.
  let tail_out = outs.into_remainder();
  if tail_out.len() >= sse41::LANES {
    let (head_out, rest_out) = tail_out.split_at_mut(sse41::LANES);
    let (head_keys, rest_keys) = key_tail.split_at(sse41::LANES * words);
    sse41::hash4(head_keys, words, seed, head_out);
    hash_group_portable(rest_keys, words, seed, rest_out);
  } else {
    hash_group_portable(key_tail, words, seed, tail_out);
  }
}

/// Safe wrapper for the AVX2 group kernel.
#[inline]
pub fn hash_group_avx2_safe(keys: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  // SAFETY: Dispatcher verifies AVX2 (which implies SSE4.1) before selecting this kernel.
  unsafe { hash_group_avx2(keys, words, seed, out) }
}

#[cfg(all(test, feature = "std"))]
mod tests {
  use alloc::{vec, vec::Vec};

  use super::*;
  use crate::fast::murmur3::hash_words;

  fn expected(keys: &[u32], words: usize, seed: u32) -> Vec<u32> {
    keys.chunks_exact(words).map(|k| hash_words(seed, k)).collect()
  }

  fn keys(n: usize, words: usize) -> Vec<u32> {
    (0..n * words).map(|i| (i as u32).wrapping_mul(0x9e37_79b9) ^ 0x5bd1_e995).collect()
  }

  #[test]
  fn sse41_matches_scalar_for_all_remainders() {
    if !std::is_x86_feature_detected!("sse4.1") {
      return;
    }
    for n in 0..=9 {
      for words in [1usize, 2, 5] {
        let k = keys(n, words);
        let mut out = vec![0u32; n];
        hash_group_sse41_safe(&k, words, 0x9747_b28c, &mut out);
        assert_eq!(out, expected(&k, words, 0x9747_b28c), "n={n} words={words}");
      }
    }
  }

  #[test]
  fn avx2_matches_scalar_for_all_remainders() {
    if !std::is_x86_feature_detected!("avx2") {
      return;
    }
    for n in 0..=17 {
      for words in [1usize, 3, 8] {
        let k = keys(n, words);
        let mut out = vec![0u32; n];
        hash_group_avx2_safe(&k, words, u32::MAX, &mut out);
        assert_eq!(out, expected(&k, words, u32::MAX), "n={n} words={words}");
      }
    }
  }
}

//! MurmurHash3 aarch64 NEON group kernel (4-way).
//!
//! One key per 32-bit lane; word `i` of every lane is loaded through a small
//! stack array. Rotations use `vsriq_n_u32` (shift-right-insert).
//!
//! # Safety
//!
//! `hash_group_neon` requires NEON. The `_safe` wrapper is only handed out by
//! the dispatcher after it has checked.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::inline_always)]

use core::arch::aarch64::*;

use super::{C1, C2, F1, F2, N1, kernels::hash_group_portable};

const LANES: usize = 4;

#[inline(always)]
unsafe fn rotl15(a: uint32x4_t) -> uint32x4_t {
  vsriq_n_u32::<17>(vshlq_n_u32::<15>(a), a)
}

#[inline(always)]
unsafe fn rotl13(a: uint32x4_t) -> uint32x4_t {
  vsriq_n_u32::<19>(vshlq_n_u32::<13>(a), a)
}

#[inline(always)]
unsafe fn mul(a: uint32x4_t, c: u32) -> uint32x4_t {
  vmulq_n_u32(a, c)
}

#[inline(always)]
unsafe fn xorshr<const R: i32>(a: uint32x4_t) -> uint32x4_t {
  veorq_u32(a, vshrq_n_u32::<R>(a))
}

#[inline(always)]
unsafe fn gather(p: *const u32, words: usize, i: usize) -> uint32x4_t {
  let lanes = [*p.add(i), *p.add(words + i), *p.add(2 * words + i), *p.add(3 * words + i)];
  vld1q_u32(lanes.as_ptr())
}

#[target_feature(enable = "neon")]
unsafe fn hash4(block: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  debug_assert_eq!(block.len(), LANES * words);
  debug_assert_eq!(out.len(), LANES);

  let p = block.as_ptr();
  let mut h = vdupq_n_u32(seed);
  for i in 0..words {
    let k = mul(rotl15(mul(gather(p, words, i), C1)), C2);
    h = veorq_u32(h, k);
    h = vaddq_u32(mul(rotl13(h), 5), vdupq_n_u32(N1));
  }

  h = veorq_u32(h, vdupq_n_u32((words as u32).wrapping_mul(4)));
  h = mul(xorshr::<16>(h), F1);
  h = mul(xorshr::<13>(h), F2);
  h = xorshr::<16>(h);

  vst1q_u32(out.as_mut_ptr(), h);
}

/// NEON group kernel.
///
/// # Safety
///
/// Caller must ensure NEON is available.
#[target_feature(enable = "neon")]
pub unsafe fn hash_group_neon(keys: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  debug_assert!(words > 0);
  let blocks = keys.chunks_exact(LANES * words);
  let key_tail = blocks.remainder();
  let mut outs = out.chunks_exact_mut(LANES);
  for (block, dst) in blocks.zip(&mut outs) {
    hash4(block, words, seed, dst);
  }
  hash_group_portable(key_tail, words, seed, outs.into_remainder());
}

/// Safe wrapper for the NEON group kernel.
#[inline]
pub fn hash_group_neon_safe(keys: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  // SAFETY: Dispatcher verifies NEON before selecting this kernel.
  unsafe { hash_group_neon(keys, words, seed, out) }
}

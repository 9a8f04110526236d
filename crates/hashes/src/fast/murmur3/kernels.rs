//! Fused group kernels for the batch path.
//!
//! A group kernel hashes every key of one seed group: `keys` is the group's
//! `K * L` words in row-major order, `out` receives `K` hashes. Keys are
//! independent, so SIMD kernels run one key per lane and walk the words of
//! all lanes in lockstep.
//!
//! # Kernels
//!
//! - `portable`: one key at a time
//! - `x86_64/sse4.1`: 4 lanes (`pmulld`)
//! - `x86_64/avx2`: 8 lanes
//! - `aarch64/neon`: 4 lanes

use backend::Candidate;
use platform::Caps;

use super::{config::Murmur3Force, hash_words};

/// `(group keys, words per key, seed, out)`.
pub(crate) type GroupFn = fn(&[u32], usize, u32, &mut [u32]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Murmur3KernelId {
  Portable = 0,
  #[cfg(target_arch = "x86_64")]
  Sse41 = 1,
  #[cfg(target_arch = "x86_64")]
  Avx2 = 2,
  #[cfg(target_arch = "aarch64")]
  Neon = 3,
}

impl Murmur3KernelId {
  /// Every kernel compiled for this target, portable first.
  #[cfg_attr(not(feature = "alloc"), allow(dead_code))]
  pub const ALL: &'static [Self] = &[
    Self::Portable,
    #[cfg(target_arch = "x86_64")]
    Self::Sse41,
    #[cfg(target_arch = "x86_64")]
    Self::Avx2,
    #[cfg(target_arch = "aarch64")]
    Self::Neon,
  ];

  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(target_arch = "x86_64")]
      Self::Sse41 => "x86_64/sse4.1",
      #[cfg(target_arch = "x86_64")]
      Self::Avx2 => "x86_64/avx2",
      #[cfg(target_arch = "aarch64")]
      Self::Neon => "aarch64/neon",
    }
  }

  #[inline]
  #[must_use]
  pub const fn required_caps(self) -> Caps {
    match self {
      Self::Portable => Caps::NONE,
      #[cfg(target_arch = "x86_64")]
      Self::Sse41 => platform::caps::x86::SSE41,
      #[cfg(target_arch = "x86_64")]
      Self::Avx2 => platform::caps::x86::AVX2_READY,
      #[cfg(target_arch = "aarch64")]
      Self::Neon => platform::caps::aarch64::NEON,
    }
  }

  #[inline]
  #[must_use]
  pub const fn group_fn(self) -> GroupFn {
    match self {
      Self::Portable => hash_group_portable,
      #[cfg(target_arch = "x86_64")]
      Self::Sse41 => super::x86_64::hash_group_sse41_safe,
      #[cfg(target_arch = "x86_64")]
      Self::Avx2 => super::x86_64::hash_group_avx2_safe,
      #[cfg(target_arch = "aarch64")]
      Self::Neon => super::aarch64::hash_group_neon_safe,
    }
  }

  /// The kernel a (clamped) force mode pins, or `None` for auto selection.
  #[must_use]
  pub fn from_force(force: Murmur3Force) -> Option<Self> {
    match force {
      Murmur3Force::Auto => None,
      Murmur3Force::Portable => Some(Self::Portable),
      #[cfg(target_arch = "x86_64")]
      Murmur3Force::Sse41 => Some(Self::Sse41),
      #[cfg(target_arch = "x86_64")]
      Murmur3Force::Avx2 => Some(Self::Avx2),
      #[cfg(target_arch = "aarch64")]
      Murmur3Force::Neon => Some(Self::Neon),
      // Clamping already mapped foreign-arch modes to `Auto`.
      _ => None,
    }
  }

  #[inline]
  const fn candidate(self) -> Candidate<GroupFn> {
    Candidate::new(self.as_str(), self.required_caps(), self.group_fn())
  }
}

/// Auto-selection candidates, best first, portable last.
pub(crate) const CANDIDATES: &[Candidate<GroupFn>] = &[
  #[cfg(target_arch = "x86_64")]
  Murmur3KernelId::Avx2.candidate(),
  #[cfg(target_arch = "x86_64")]
  Murmur3KernelId::Sse41.candidate(),
  #[cfg(target_arch = "aarch64")]
  Murmur3KernelId::Neon.candidate(),
  Murmur3KernelId::Portable.candidate(),
];

/// Hash each `words`-long key of `keys` into `out`.
pub(crate) fn hash_group_portable(keys: &[u32], words: usize, seed: u32, out: &mut [u32]) {
  debug_assert!(words > 0);
  debug_assert_eq!(keys.len(), out.len() * words);
  for (key, h) in keys.chunks_exact(words).zip(out.iter_mut()) {
    *h = hash_words(seed, key);
  }
}

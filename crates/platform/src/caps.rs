//! CPU capability representation.
//!
//! [`Caps`] is a 64-bit feature bitset. Bits 0-31 are x86_64 features, bits
//! 32-63 are aarch64 features. Only the features a kernel in this workspace
//! actually requires are named.

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities as a feature bitset.
///
/// `Caps` is `Copy`, `Send` and `Sync`; use [`has()`](Caps::has) to check that
/// every feature a kernel requires is present.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set. Only portable kernels qualify.
  pub const NONE: Self = Self(0);

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }

  /// Raw bits, for caching in atomics.
  #[inline]
  #[must_use]
  pub const fn to_bits(self) -> u64 {
    self.0
  }

  /// Rebuild from [`to_bits`](Self::to_bits).
  #[inline]
  #[must_use]
  pub const fn from_bits(bits: u64) -> Self {
    Self(bits)
  }

  /// True if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// True if no feature is present.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Names of the features present, in bit order.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    NAMES
      .iter()
      .filter(move |(caps, _)| self.has(*caps))
      .map(|&(_, name)| name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  Wasm32,
  #[default]
  Other,
}

impl Arch {
  /// Architecture of the compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(target_arch = "wasm32")]
    {
      Self::Wasm32
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "wasm32")))]
    {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Wasm32 => "wasm32",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature bits
// ─────────────────────────────────────────────────────────────────────────────

/// x86_64 features (bits 0-31).
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  pub const SSE41: Caps = Caps::bit(1);
  pub const AVX: Caps = Caps::bit(2);
  pub const AVX2: Caps = Caps::bit(3);

  /// Everything the 8-lane kernel touches.
  pub const AVX2_READY: Caps = Caps(SSE2.0 | SSE41.0 | AVX.0 | AVX2.0);
}

/// aarch64 features (bits 32-63).
pub mod aarch64 {
  use super::Caps;

  /// Baseline on AArch64.
  pub const NEON: Caps = Caps::bit(32);
}

const NAMES: &[(Caps, &str)] = &[
  (x86::SSE2, "sse2"),
  (x86::SSE41, "sse4.1"),
  (x86::AVX, "avx"),
  (x86::AVX2, "avx2"),
  (aarch64::NEON, "neon"),
];

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, vec::Vec};

  use super::*;

  #[test]
  fn none_has_only_none() {
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(!Caps::NONE.has(x86::SSE2));
    assert!(Caps::NONE.is_empty());
  }

  #[test]
  fn union_and_has() {
    let caps = x86::SSE2 | x86::SSE41;
    assert!(caps.has(x86::SSE2));
    assert!(caps.has(x86::SSE41));
    assert!(!caps.has(x86::AVX2));
    assert!(!caps.has(x86::AVX2_READY));
  }

  #[test]
  fn avx2_ready_implies_sse41() {
    assert!(x86::AVX2_READY.has(x86::SSE41));
    assert!(x86::AVX2_READY.has(x86::AVX2));
  }

  #[test]
  fn bits_roundtrip_preserves_features() {
    let caps = x86::AVX2_READY | aarch64::NEON;
    assert_eq!(Caps::from_bits(caps.to_bits()), caps);
  }

  #[test]
  fn feature_names() {
    let names: Vec<_> = (x86::SSE41 | aarch64::NEON).names().collect();
    assert_eq!(names, ["sse4.1", "neon"]);
    assert_eq!(format!("{:?}", x86::SSE2), "[\"sse2\"]");
  }

  #[test]
  fn arch_name_matches_display() {
    let arch = Arch::current();
    assert_eq!(format!("{arch}"), arch.name());
  }
}

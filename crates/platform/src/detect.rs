//! Runtime CPU detection.
//!
//! Order of precedence:
//!
//! 1. Miri: always [`Caps::NONE`].
//! 2. A user-supplied override ([`set_caps_override`]).
//! 3. Detection, cached for the process lifetime under `std`.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;
#[allow(unused_imports)]
use crate::caps::{aarch64, x86};

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.to_bits(), Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

#[inline]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

#[inline]
fn get_override() -> Option<Caps> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  Some(Caps::from_bits(OVERRIDE_BITS.load(Ordering::Acquire)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
pub fn caps() -> Caps {
  // Miri cannot interpret SIMD intrinsics.
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    if let Some(caps) = get_override() {
      return caps;
    }

    #[cfg(feature = "std")]
    {
      use std::sync::OnceLock;
      static CACHED: OnceLock<Caps> = OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      detect_uncached()
    }
  }
}

/// Detect capabilities without consulting the cache or the override.
#[must_use]
pub fn detect_uncached() -> Caps {
  #[cfg(target_arch = "x86_64")]
  {
    detect_x86_64()
  }

  #[cfg(target_arch = "aarch64")]
  {
    detect_aarch64()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    Caps::NONE
  }
}

#[cfg(target_arch = "x86_64")]
fn detect_x86_64() -> Caps {
  // SSE2 is part of the x86_64 baseline.
  let mut caps = x86::SSE2;

  #[cfg(feature = "std")]
  {
    if std::is_x86_feature_detected!("sse4.1") {
      caps |= x86::SSE41;
    }
    if std::is_x86_feature_detected!("avx") {
      caps |= x86::AVX;
    }
    if std::is_x86_feature_detected!("avx2") {
      caps |= x86::AVX2;
    }
  }

  #[cfg(not(feature = "std"))]
  {
    if cfg!(target_feature = "sse4.1") {
      caps |= x86::SSE41;
    }
    if cfg!(target_feature = "avx") {
      caps |= x86::AVX;
    }
    if cfg!(target_feature = "avx2") {
      caps |= x86::AVX2;
    }
  }

  caps
}

#[cfg(target_arch = "aarch64")]
fn detect_aarch64() -> Caps {
  // NEON (ASIMD) is mandatory on AArch64.
  aarch64::NEON
}

#[cfg(test)]
mod tests {
  use super::*;

  // Tests share the global override; keep every override-touching assertion in
  // one test so they cannot interleave.
  #[test]
  fn override_replaces_and_restores_detection() {
    let detected = detect_uncached();

    set_caps_override(Some(Caps::NONE));
    assert!(has_override());
    assert_eq!(caps(), Caps::NONE);

    set_caps_override(None);
    assert!(!has_override());
    #[cfg(not(miri))]
    assert_eq!(caps(), detected);
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn x86_64_always_has_sse2() {
    assert!(detect_uncached().has(x86::SSE2));
  }

  #[test]
  #[cfg(target_arch = "aarch64")]
  fn aarch64_always_has_neon() {
    assert!(detect_uncached().has(aarch64::NEON));
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", feature = "std"))]
  fn avx2_detection_agrees_with_std() {
    assert_eq!(detect_uncached().has(x86::AVX2), std::is_x86_feature_detected!("avx2"));
  }
}

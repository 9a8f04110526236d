//! CPU capability detection for batchmurmur.
//!
//! This crate is the single source of truth for "which SIMD kernels may run on
//! this machine". Algorithm crates query [`caps()`] instead of doing ad-hoc
//! detection.
//!
//! ```ignore
//! let caps = platform::caps();
//! if caps.has(platform::caps::x86::AVX2) {
//!     // 8-lane kernel
//! }
//! ```
//!
//! - With `std`: runtime detection, cached in a `OnceLock`.
//! - Without `std`: compile-time `cfg!(target_feature = ...)` only.
//! - Under Miri: always portable.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::detect_uncached;

/// Detected (or overridden) CPU capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Force the capabilities returned by [`caps()`]; `None` resumes detection.
///
/// Intended for tests and for bare-metal targets where the CPU is known. The
/// override is global and does not re-run dispatch that was already cached by
/// an algorithm crate.
///
/// ```ignore
/// platform::set_caps_override(Some(platform::Caps::NONE));
/// // ... portable paths only ...
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Whether an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// One-line description of the platform, e.g. `x86_64 [sse2 sse4.1 avx2]`.
#[cfg(feature = "std")]
#[must_use]
pub fn describe() -> std::string::String {
  use core::fmt::Write as _;

  let caps = caps();
  let mut out = std::string::String::new();
  let _ = write!(out, "{} [", Arch::current());
  let mut first = true;
  for name in caps.names() {
    if !first {
      out.push(' ');
    }
    out.push_str(name);
    first = false;
  }
  out.push(']');
  out
}

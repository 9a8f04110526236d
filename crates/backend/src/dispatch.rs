//! Kernel dispatch: selection from an ordered candidate list.
//!
//! - [`Candidate`]: a kernel with capability requirements
//! - [`Selected`]: the result of kernel selection
//! - [`select`]: choose the best kernel for a capability set
//!
//! Candidates are ordered from best to worst. The last candidate must require
//! [`Caps::NONE`] so that selection always succeeds.

use platform::Caps;

/// A candidate kernel with capability requirements.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Name for diagnostics, e.g. `"x86_64/avx2"`.
  pub name: &'static str,
  /// Required CPU capabilities.
  pub requires: Caps,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The selected kernel and its name.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  pub name: &'static str,
  pub func: F,
}

impl<F> Selected<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Return the first candidate whose `requires` is satisfied by `caps`.
///
/// # Panics
///
/// Panics if no candidate matches, which only happens when the list lacks a
/// portable (`Caps::NONE`) fallback.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if caps.has(candidate.requires) {
      return Selected::new(candidate.name, candidate.func);
    }
  }

  panic!("no matching kernel: candidate list must end with a portable fallback");
}

//! MurmurHash3 batch runtime configuration (overrides + thresholds).
//!
//! Knobs for the fused batch path:
//! - optional forced kernel selection
//! - the word count above which seed groups are hashed on the rayon pool
//!
//! Environment overrides (read once, `std` only):
//! - `BATCHMURMUR_MURMUR3_FORCE`: `auto`, `portable`, `sse4.1`, `avx2`, `neon`
//! - `BATCHMURMUR_MURMUR3_PARALLEL_MIN_WORDS`: integer
//!
//! Forced modes are always clamped to detected CPU capabilities.

use platform::Caps;

/// Forced kernel selection for the fused batch path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Murmur3Force {
  /// Pick the widest kernel the CPU supports.
  #[default]
  Auto,
  /// One key at a time, no SIMD.
  Portable,
  /// x86_64 SSE4.1, 4 keys per step.
  Sse41,
  /// x86_64 AVX2, 8 keys per step.
  Avx2,
  /// aarch64 NEON, 4 keys per step.
  Neon,
}

impl Murmur3Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Sse41 => "sse4.1",
      Self::Avx2 => "avx2",
      Self::Neon => "neon",
    }
  }

  /// Parse a force name, case-insensitively. Unknown names yield `None`.
  ///
  /// ```
  /// use hashes::fast::murmur3::Murmur3Force;
  ///
  /// assert_eq!(Murmur3Force::parse(" AVX2 "), Some(Murmur3Force::Avx2));
  /// assert_eq!(Murmur3Force::parse("scalar"), Some(Murmur3Force::Portable));
  /// assert_eq!(Murmur3Force::parse("avx512"), None);
  /// ```
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("sse4.1") || value.eq_ignore_ascii_case("sse41") {
      return Some(Self::Sse41);
    }
    if value.eq_ignore_ascii_case("avx2") {
      return Some(Self::Avx2);
    }
    if value.eq_ignore_ascii_case("neon") {
      return Some(Self::Neon);
    }
    None
  }
}

/// Batch selection tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Murmur3Tunables {
  /// Total key words (`S * K * L`) at which seed groups go to the rayon pool.
  /// Has no effect without the `parallel` feature.
  pub parallel_min_words: usize,
}

impl Default for Murmur3Tunables {
  fn default() -> Self {
    Self {
      parallel_min_words: DEFAULT_PARALLEL_MIN_WORDS,
    }
  }
}

const DEFAULT_PARALLEL_MIN_WORDS: usize = 1 << 16;

/// Full batch runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Murmur3Config {
  /// Requested force mode (env).
  pub requested_force: Murmur3Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Murmur3Force,
  /// Thresholds used by the batch driver.
  pub tunables: Murmur3Tunables,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Murmur3Force,
  parallel_min_words: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  const FORCE: &str = "BATCHMURMUR_MURMUR3_FORCE";
  const PARALLEL_MIN_WORDS: &str = "BATCHMURMUR_MURMUR3_PARALLEL_MIN_WORDS";

  let force = var(FORCE).and_then(|v| {
    let parsed = Murmur3Force::parse(&v);
    if parsed.is_none() {
      tracing::warn!(var = FORCE, value = %v, "unrecognized murmur3 force mode, using auto");
    }
    parsed
  });

  let parallel_min_words = var(PARALLEL_MIN_WORDS).and_then(|v| {
    let parsed = v.trim().parse::<usize>().ok();
    if parsed.is_none() {
      tracing::warn!(var = PARALLEL_MIN_WORDS, value = %v, "invalid word threshold, using default");
    }
    parsed
  });

  Overrides {
    force: force.unwrap_or_default(),
    parallel_min_words,
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64/aarch64
pub(crate) fn clamp_force_to_caps(requested: Murmur3Force, caps: Caps) -> Murmur3Force {
  match requested {
    Murmur3Force::Auto | Murmur3Force::Portable => requested,
    Murmur3Force::Sse41 => {
      #[cfg(target_arch = "x86_64")]
      {
        if caps.has(platform::caps::x86::SSE41) {
          return Murmur3Force::Sse41;
        }
      }
      Murmur3Force::Auto
    }
    Murmur3Force::Avx2 => {
      #[cfg(target_arch = "x86_64")]
      {
        if caps.has(platform::caps::x86::AVX2_READY) {
          return Murmur3Force::Avx2;
        }
      }
      Murmur3Force::Auto
    }
    Murmur3Force::Neon => {
      #[cfg(target_arch = "aarch64")]
      {
        if caps.has(platform::caps::aarch64::NEON) {
          return Murmur3Force::Neon;
        }
      }
      Murmur3Force::Auto
    }
  }
}

/// Get the effective batch configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Murmur3Config {
  let caps = platform::caps();
  let ov = overrides();

  let requested_force = ov.force;
  let effective_force = clamp_force_to_caps(requested_force, caps);
  if effective_force != requested_force {
    tracing::debug!(
      requested = requested_force.as_str(),
      effective = effective_force.as_str(),
      "murmur3 force mode not supported by this CPU"
    );
  }

  let mut tunables = Murmur3Tunables::default();
  if let Some(v) = ov.parallel_min_words {
    tunables.parallel_min_words = v;
  }

  Murmur3Config {
    requested_force,
    effective_force,
    tunables,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_aliases() {
    assert_eq!(Murmur3Force::parse("Auto"), Some(Murmur3Force::Auto));
    assert_eq!(Murmur3Force::parse("PORTABLE"), Some(Murmur3Force::Portable));
    assert_eq!(Murmur3Force::parse("sse41"), Some(Murmur3Force::Sse41));
    assert_eq!(Murmur3Force::parse("sse4.1"), Some(Murmur3Force::Sse41));
    assert_eq!(Murmur3Force::parse("neon"), Some(Murmur3Force::Neon));
    assert_eq!(Murmur3Force::parse(""), None);
  }

  #[test]
  fn as_str_round_trips_through_parse() {
    for force in [
      Murmur3Force::Auto,
      Murmur3Force::Portable,
      Murmur3Force::Sse41,
      Murmur3Force::Avx2,
      Murmur3Force::Neon,
    ] {
      assert_eq!(Murmur3Force::parse(force.as_str()), Some(force));
    }
  }

  #[test]
  fn clamp_without_caps_falls_back_to_auto() {
    for force in [Murmur3Force::Sse41, Murmur3Force::Avx2, Murmur3Force::Neon] {
      assert_eq!(clamp_force_to_caps(force, Caps::NONE), Murmur3Force::Auto);
    }
    assert_eq!(
      clamp_force_to_caps(Murmur3Force::Portable, Caps::NONE),
      Murmur3Force::Portable
    );
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn clamp_keeps_supported_x86_modes() {
    use platform::caps::x86;
    assert_eq!(
      clamp_force_to_caps(Murmur3Force::Avx2, x86::AVX2_READY),
      Murmur3Force::Avx2
    );
    assert_eq!(
      clamp_force_to_caps(Murmur3Force::Sse41, x86::SSE41),
      Murmur3Force::Sse41
    );
    assert_eq!(clamp_force_to_caps(Murmur3Force::Avx2, x86::SSE41), Murmur3Force::Auto);
    assert_eq!(clamp_force_to_caps(Murmur3Force::Neon, x86::AVX2_READY), Murmur3Force::Auto);
  }

  #[test]
  fn default_threshold() {
    assert_eq!(Murmur3Tunables::default().parallel_min_words, 1 << 16);
  }
}

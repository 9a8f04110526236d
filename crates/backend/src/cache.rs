//! Lazy caching for dispatch decisions.
//!
//! [`OnceCache`] has `OnceLock` semantics under `std`. Without `std` it
//! recomputes on every call; detection there is compile-time only and cheap.

/// A lazily initialized, process-lifetime value.
///
/// The value is `Copy` so `get_or_init` hands out copies and never a
/// reference into the cache.
pub struct OnceCache<T: Copy> {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<T>,

  #[cfg(not(feature = "std"))]
  _marker: core::marker::PhantomData<T>,
}

impl<T: Copy> OnceCache<T> {
  /// Create a new empty cache.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(not(feature = "std"))]
      _marker: core::marker::PhantomData,
    }
  }

  /// Get the cached value, initializing it with `f` on first use.
  ///
  /// Under `std`, `f` runs at most once even when several threads race.
  #[inline]
  pub fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(f)
    }

    #[cfg(not(feature = "std"))]
    {
      f()
    }
  }
}

impl<T: Copy> Default for OnceCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn value_is_returned() {
    let cache: OnceCache<u32> = OnceCache::new();
    assert_eq!(cache.get_or_init(|| 42), 42);
  }

  #[test]
  #[cfg(feature = "std")]
  fn initializer_runs_once() {
    static CACHE: OnceCache<(u32, &'static str)> = OnceCache::new();

    let mut calls = 0;
    let first = CACHE.get_or_init(|| {
      calls += 1;
      (7, "portable")
    });
    let second = CACHE.get_or_init(|| {
      calls += 1;
      (9, "avx2")
    });

    assert_eq!(first, (7, "portable"));
    assert_eq!(second, first);
    assert_eq!(calls, 1);
  }

  #[test]
  #[cfg(feature = "std")]
  fn concurrent_readers_agree() {
    static CACHE: OnceCache<u64> = OnceCache::new();

    let handles: std::vec::Vec<_> = (0..8u64)
      .map(|i| std::thread::spawn(move || CACHE.get_or_init(|| i + 100)))
      .collect();
    let seen: std::vec::Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(seen.windows(2).all(|w| w[0] == w[1]));
  }
}

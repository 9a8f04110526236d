//! Batch MurmurHash3-32 with hardware acceleration.
//!
//! `batchmurmur` hashes batches of fixed-length keys, one seed per group of
//! keys, and returns exactly what the scalar `MurmurHash3_x86_32` returns for
//! each key. The batch kernel is written against the [`WordArray`] trait, so
//! any array type with element-wise wraparound `u32` arithmetic can run it.
//! Host arrays additionally get a fused SIMD path picked at runtime.
//!
//! **Not cryptographic.**
//!
//! # Quick Start
//!
//! ```
//! use batchmurmur::{HostArray, hash, hash_batch};
//!
//! // 2 seed groups x 3 keys x 1 word.
//! let keys = HostArray::keys(2, 3, 1, vec![0; 6]).unwrap();
//! let seeds = HostArray::from(vec![0, 0x5082_EDEE]);
//!
//! let out = hash(&keys, &seeds).unwrap();
//! assert_eq!(out.get(&[0, 2]), Some(0x2362_F9DE));
//! assert_eq!(hash_batch(&keys, &seeds).unwrap(), out);
//! ```
//!
//! Scalar, one byte slice at a time:
//!
//! ```
//! use batchmurmur::{FastHash, Murmur3_32};
//!
//! assert_eq!(Murmur3_32::hash_with_seed(0x9747_b28c, b"abcd"), 0xF047_8627);
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection and environment configuration |
//! | `alloc` | Yes | Batch API and host arrays (implied by `std`) |
//! | `parallel` | No | `ParallelArray` and rayon-split fused batches |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! batchmurmur = { version = "0.1", default-features = false, features = ["alloc"] }
//! ```
//!
//! Without `std`, kernel selection uses compile-time target features only.
#![cfg_attr(not(feature = "std"), no_std)]

pub use hashes::fast::{
  Murmur3_32,
  murmur3::{BatchShape, Murmur3Config, Murmur3Force, hash_words, kernel_name},
};
#[cfg(feature = "alloc")]
pub use hashes::fast::murmur3::{HostArray, hash, hash_batch, pack_le_words};
#[cfg(feature = "parallel")]
pub use hashes::fast::murmur3::ParallelArray;
pub use traits::{FastHash, ShapeError, WordArray};

/// Effective batch configuration (force mode and thresholds).
#[inline]
#[must_use]
pub fn config() -> Murmur3Config {
  hashes::fast::murmur3::config::get()
}

/// One-line description of the running platform and the active batch kernel.
///
/// ```
/// let line = batchmurmur::platform_describe();
/// assert!(line.contains(batchmurmur::kernel_name()));
/// ```
#[cfg(feature = "std")]
#[must_use]
pub fn platform_describe() -> String {
  format!("{} kernel={}", platform::describe(), kernel_name())
}

//! Batch MurmurHash3-32 over element-wise `u32` arrays (**NOT CRYPTO**).
//!
//! This crate is `no_std` compatible. The batch API needs `alloc`; runtime CPU
//! detection and environment configuration need `std`; the thread-parallel
//! array backend needs `parallel`.
//!
//! # Modules
//!
//! - [`fast`] - Non-cryptographic hashes.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! use hashes::fast::murmur3::{self, HostArray};
//!
//! let keys = HostArray::keys(1, 1, 1, vec![0]).unwrap();
//! let seeds = HostArray::from(vec![0]);
//! let out = murmur3::hash(&keys, &seeds).unwrap();
//! assert_eq!(out.as_slice(), &[0x2362_F9DE]);
//! # }
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod fast;

pub use traits::{FastHash, ShapeError, WordArray};

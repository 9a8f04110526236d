//! Core traits for batchmurmur.
//!
//! This crate provides the foundational traits that the hash kernels and their
//! array backends conform to. It is `no_std` compatible and has zero
//! dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Implementors |
//! |-------|---------|--------------|
//! | [`WordArray`] | Element-wise `u32` array with wraparound arithmetic | `HostArray`, `ParallelArray` |
//! | [`FastHash`] | One-shot non-cryptographic hash of a byte slice | `Murmur3_32` |
//!
//! # Error Types
//!
//! - [`ShapeError`] - Batch shape / contract violation detected before hashing
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap` and `expect` in non-test code to ensure all
//! error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod array;
pub mod error;
mod fast_hash;

pub use array::WordArray;
pub use error::ShapeError;
pub use fast_hash::FastHash;

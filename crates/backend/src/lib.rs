//! Backend crate: kernel selection and dispatch caching for batchmurmur.
//!
//! - **Dispatch**: pick the best kernel from an ordered candidate list
//!   according to detected CPU capabilities.
//! - **Caching**: remember the choice so each call is one indirect call.
//!
//! # Usage
//!
//! Algorithm crates register kernels as an ordered list of `Candidate`s, best
//! first, with a portable fallback last:
//!
//! ```ignore
//! use backend::dispatch::{Candidate, Selected, select};
//! use platform::caps::x86;
//!
//! fn select_group_kernel() -> Selected<GroupFn> {
//!     select(platform::caps(), &[
//!         Candidate::new("x86_64/avx2", x86::AVX2_READY, avx2_kernel),
//!         Candidate::new("portable", platform::Caps::NONE, portable_kernel),
//!     ])
//! }
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Selected, select};
// Re-export platform types for convenience.
pub use platform;

//! Fast non-cryptographic hashes (**NOT CRYPTO**).
//!
//! Do not use these hashes for signatures, MACs, key derivation, or anything
//! requiring cryptographic security.

pub mod murmur3;

pub use murmur3::Murmur3_32;

//! Error types for batch hashing.
//!
//! Every contract violation is detected before any mixing work starts, so an
//! error always means "nothing was computed".

use core::fmt;

/// A batch shape or contract violation.
///
/// # Examples
///
/// ```
/// use traits::ShapeError;
///
/// let err = ShapeError::SeedCount { expected: 2, found: 3 };
/// assert_eq!(err.to_string(), "seed count mismatch: keys have 2 seed groups, got 3 seeds");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ShapeError {
  /// The key batch is not 3-dimensional.
  KeysRank {
    /// Number of dimensions found.
    found: usize,
  },
  /// The seed batch is not 1-dimensional.
  SeedsRank {
    /// Number of dimensions found.
    found: usize,
  },
  /// Words per key is zero or larger than `u32::MAX`.
  WordLength {
    /// Word length found.
    found: usize,
  },
  /// Seed count differs from the leading dimension of the key batch.
  SeedCount {
    /// Leading dimension of the key batch.
    expected: usize,
    /// Number of seeds supplied.
    found: usize,
  },
  /// Element count does not match the product of the shape.
  DataLength {
    /// Product of the shape.
    expected: usize,
    /// Number of elements supplied.
    found: usize,
  },
  /// Byte buffer length is not a multiple of 4.
  ByteLength {
    /// Length found.
    found: usize,
  },
  /// The product of the shape overflows `usize`.
  Overflow,
}

impl fmt::Display for ShapeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::KeysRank { found } => write!(f, "keys must be 3-dimensional, got {found} dimensions"),
      Self::SeedsRank { found } => write!(f, "seeds must be 1-dimensional, got {found} dimensions"),
      Self::WordLength { found } => write!(f, "key length must be in 1..=4294967295 words, got {found}"),
      Self::SeedCount { expected, found } => {
        write!(f, "seed count mismatch: keys have {expected} seed groups, got {found} seeds")
      }
      Self::DataLength { expected, found } => {
        write!(f, "data length mismatch: shape holds {expected} elements, got {found}")
      }
      Self::ByteLength { found } => write!(f, "byte length must be a multiple of 4, got {found}"),
      Self::Overflow => f.write_str("shape element count overflows usize"),
    }
  }
}

impl core::error::Error for ShapeError {}

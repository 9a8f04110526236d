//! Byte-to-word packing for key batches.
//!
//! The batch kernels only see `u32` words. Callers holding raw byte keys pack
//! them here first; the byte length must be a multiple of 4.

use alloc::vec::Vec;

use traits::ShapeError;

/// Pack `bytes` into little-endian `u32` words.
///
/// ```
/// use hashes::fast::murmur3::pack_le_words;
///
/// assert_eq!(pack_le_words(&[1, 0, 0, 0, 0, 0, 0, 0x80]).unwrap(), vec![1, 0x8000_0000]);
/// assert!(pack_le_words(&[1, 2, 3]).is_err());
/// ```
pub fn pack_le_words(bytes: &[u8]) -> Result<Vec<u32>, ShapeError> {
  let (words, tail) = bytes.as_chunks::<4>();
  if !tail.is_empty() {
    return Err(ShapeError::ByteLength { found: bytes.len() });
  }
  Ok(words.iter().map(|w| u32::from_le_bytes(*w)).collect())
}

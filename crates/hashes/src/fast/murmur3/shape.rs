use traits::ShapeError;

/// The validated `(seeds, keys, words)` shape of a key batch.
///
/// Every batch entry point builds one of these before touching any data, so a
/// shape problem is always reported before work starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BatchShape {
  /// Seed groups (`S`).
  pub seeds: usize,
  /// Keys per seed group (`K`).
  pub keys: usize,
  /// 32-bit words per key (`L`).
  pub words: usize,
}

impl BatchShape {
  /// Check a key-batch shape against a seed-batch shape.
  ///
  /// Checks run in order: key rank, word length, seed rank, seed count.
  ///
  /// ```
  /// use hashes::fast::murmur3::BatchShape;
  /// use hashes::ShapeError;
  ///
  /// let shape = BatchShape::validate(&[2, 3, 4], &[2]).unwrap();
  /// assert_eq!(shape.output_shape(), [2, 3]);
  /// assert_eq!(shape.byte_len(), 16);
  ///
  /// assert_eq!(
  ///   BatchShape::validate(&[2, 3, 4], &[3]),
  ///   Err(ShapeError::SeedCount { expected: 2, found: 3 })
  /// );
  /// ```
  pub fn validate(keys: &[usize], seeds: &[usize]) -> Result<Self, ShapeError> {
    let &[s, k, l] = keys else {
      return Err(ShapeError::KeysRank { found: keys.len() });
    };
    if l == 0 || u32::try_from(l).is_err() {
      return Err(ShapeError::WordLength { found: l });
    }
    let &[n] = seeds else {
      return Err(ShapeError::SeedsRank { found: seeds.len() });
    };
    if n != s {
      return Err(ShapeError::SeedCount { expected: s, found: n });
    }
    Ok(Self {
      seeds: s,
      keys: k,
      words: l,
    })
  }

  /// Key length in bytes, modulo 2^32; this is what finalization mixes in.
  #[inline]
  #[must_use]
  pub const fn byte_len(&self) -> u32 {
    (self.words as u32).wrapping_mul(4)
  }

  /// Words held by one seed group (`K * L`).
  #[inline]
  #[must_use]
  pub const fn group_words(&self) -> usize {
    self.keys * self.words
  }

  /// Shape of the hash output, `[S, K]`.
  #[inline]
  #[must_use]
  pub const fn output_shape(&self) -> [usize; 2] {
    [self.seeds, self.keys]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_well_formed_shapes() {
    let shape = BatchShape::validate(&[3, 5, 1], &[3]).unwrap();
    assert_eq!(
      shape,
      BatchShape {
        seeds: 3,
        keys: 5,
        words: 1
      }
    );
    assert_eq!(shape.group_words(), 5);
  }

  #[test]
  fn empty_groups_are_valid() {
    assert!(BatchShape::validate(&[0, 4, 2], &[0]).is_ok());
    assert!(BatchShape::validate(&[2, 0, 2], &[2]).is_ok());
  }

  #[test]
  fn rejects_wrong_key_rank() {
    assert_eq!(
      BatchShape::validate(&[2, 3], &[2]),
      Err(ShapeError::KeysRank { found: 2 })
    );
    assert_eq!(
      BatchShape::validate(&[1, 1, 1, 1], &[1]),
      Err(ShapeError::KeysRank { found: 4 })
    );
  }

  #[test]
  fn rejects_zero_words() {
    assert_eq!(
      BatchShape::validate(&[1, 1, 0], &[1]),
      Err(ShapeError::WordLength { found: 0 })
    );
  }

  #[test]
  #[cfg(target_pointer_width = "64")]
  fn rejects_words_beyond_u32() {
    let l = u32::MAX as usize + 1;
    assert_eq!(
      BatchShape::validate(&[1, 1, l], &[1]),
      Err(ShapeError::WordLength { found: l })
    );
    assert!(BatchShape::validate(&[1, 1, u32::MAX as usize], &[1]).is_ok());
  }

  #[test]
  fn rejects_wrong_seed_rank() {
    assert_eq!(
      BatchShape::validate(&[1, 1, 1], &[1, 1]),
      Err(ShapeError::SeedsRank { found: 2 })
    );
  }

  #[test]
  fn rejects_seed_count_mismatch() {
    assert_eq!(
      BatchShape::validate(&[2, 1, 1], &[1]),
      Err(ShapeError::SeedCount { expected: 2, found: 1 })
    );
  }

  #[test]
  fn byte_len_wraps() {
    let shape = BatchShape {
      seeds: 1,
      keys: 1,
      words: 0x4000_0001,
    };
    assert_eq!(shape.byte_len(), 4);
  }
}

use std::io::Cursor;

use hashes::fast::{
  Murmur3_32,
  murmur3::{self, HostArray, hash_batch, hash_words},
};
use proptest::prelude::*;
use traits::{FastHash as _, WordArray as _};

fn murmur3_ref(seed: u32, data: &[u8]) -> u32 {
  ::murmur3::murmur3_32(&mut Cursor::new(data), seed).unwrap()
}

fn le_bytes(words: &[u32]) -> Vec<u8> {
  words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// `(S, K, L, keys, seeds)` with every dimension small but non-trivial.
fn batch() -> impl Strategy<Value = (usize, usize, usize, Vec<u32>, Vec<u32>)> {
  (0usize..4, 0usize..20, 1usize..9).prop_flat_map(|(s, k, l)| {
    (
      Just(s),
      Just(k),
      Just(l),
      proptest::collection::vec(any::<u32>(), s * k * l),
      proptest::collection::vec(any::<u32>(), s),
    )
  })
}

fn expected(s: usize, k: usize, l: usize, keys: &[u32], seeds: &[u32]) -> Vec<u32> {
  let mut out = Vec::with_capacity(s * k);
  if k == 0 {
    return out;
  }
  for (group, &seed) in keys.chunks_exact(k * l).zip(seeds) {
    for key in group.chunks_exact(l) {
      out.push(murmur3_ref(seed, &le_bytes(key)));
    }
  }
  out
}

proptest! {
  #[test]
  fn scalar_matches_murmur3_crate(seed in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..1024)) {
    prop_assert_eq!(Murmur3_32::hash_with_seed(seed, &data), murmur3_ref(seed, &data));
  }

  #[test]
  fn words_match_murmur3_crate(seed in any::<u32>(), key in proptest::collection::vec(any::<u32>(), 0..64)) {
    prop_assert_eq!(hash_words(seed, &key), murmur3_ref(seed, &le_bytes(&key)));
  }

  #[test]
  fn elementwise_matches_murmur3_crate((s, k, l, keys, seeds) in batch()) {
    let out = murmur3::hash(&HostArray::keys(s, k, l, keys.clone()).unwrap(), &HostArray::from(seeds.clone())).unwrap();
    prop_assert_eq!(out.shape(), &[s, k]);
    let want = expected(s, k, l, &keys, &seeds);
    prop_assert_eq!(out.as_slice(), want.as_slice());
  }

  #[test]
  fn fused_matches_elementwise((s, k, l, keys, seeds) in batch()) {
    let keys = HostArray::keys(s, k, l, keys).unwrap();
    let seeds = HostArray::from(seeds);
    prop_assert_eq!(hash_batch(&keys, &seeds).unwrap(), murmur3::hash(&keys, &seeds).unwrap());
  }
}

#[cfg(feature = "parallel")]
proptest! {
  #[test]
  fn parallel_backend_matches_host((s, k, l, keys, seeds) in batch()) {
    use hashes::fast::murmur3::ParallelArray;

    let host = murmur3::hash(&HostArray::keys(s, k, l, keys.clone()).unwrap(), &HostArray::from(seeds.clone())).unwrap();
    let par = murmur3::hash(
      &ParallelArray::from_shape_vec(&[s, k, l], keys).unwrap(),
      &ParallelArray::from(seeds),
    )
    .unwrap();
    prop_assert_eq!(par.into_host(), host);
  }
}

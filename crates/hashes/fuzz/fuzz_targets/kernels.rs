#![no_main]

use hashes::fast::murmur3::kernel_test::verify_murmur3_kernels;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
  // [words: 1 byte][seed: 4 bytes][keys...]
  let Some((&words, rest)) = input.split_first() else {
    return;
  };
  let words = usize::from(words % 16) + 1;
  let (seed_bytes, data) = rest.split_at(core::cmp::min(4, rest.len()));
  let mut seed = 0u32;
  for (i, &b) in seed_bytes.iter().enumerate() {
    seed |= (b as u32) << (i * 8);
  }

  let (words_data, _) = data.as_chunks::<4>();
  let keys: Vec<u32> = words_data.iter().map(|w| u32::from_le_bytes(*w)).collect();
  verify_murmur3_kernels(&keys, words, seed).unwrap();
});

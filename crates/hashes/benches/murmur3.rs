use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hashes::fast::murmur3::{self, HostArray, hash_batch, hash_words, kernel_name};

const WORDS: usize = 4;

fn batch(seeds: usize, keys: usize) -> (HostArray, HostArray) {
  let data = (0..seeds * keys * WORDS)
    .map(|i| (i as u32).wrapping_mul(0x9e37_79b9))
    .collect();
  let seed_data: Vec<u32> = (0..seeds as u32).collect();
  (
    HostArray::keys(seeds, keys, WORDS, data).unwrap(),
    HostArray::from(seed_data),
  )
}

fn grid() -> Vec<(usize, usize)> {
  let mut out = Vec::new();
  for keys in [1usize, 64, 4096, 65_536] {
    for seeds in [1usize, 8] {
      out.push((seeds, keys));
    }
  }
  out
}

fn batch_paths(c: &mut Criterion) {
  let mut group = c.benchmark_group("murmur3/batch");
  eprintln!("murmur3 fused kernel: {}", kernel_name());

  for (seeds, keys) in grid() {
    let (k, s) = batch(seeds, keys);
    let id = format!("{seeds}x{keys}x{WORDS}");
    group.throughput(Throughput::Bytes((seeds * keys * WORDS * 4) as u64));

    group.bench_with_input(BenchmarkId::new("scalar-loop", &id), &(&k, &s), |b, (k, s)| {
      b.iter(|| {
        let out: Vec<u32> = k
          .as_slice()
          .chunks_exact(keys * WORDS)
          .zip(s.as_slice())
          .flat_map(|(g, &seed)| g.chunks_exact(WORDS).map(move |key| hash_words(seed, key)))
          .collect();
        black_box(out)
      })
    });
    group.bench_with_input(BenchmarkId::new("elementwise", &id), &(&k, &s), |b, (k, s)| {
      b.iter(|| black_box(murmur3::hash(black_box(*k), black_box(*s)).unwrap()))
    });
    group.bench_with_input(BenchmarkId::new("fused", &id), &(&k, &s), |b, (k, s)| {
      b.iter(|| black_box(hash_batch(black_box(*k), black_box(*s)).unwrap()))
    });

    #[cfg(feature = "parallel")]
    {
      use hashes::fast::murmur3::ParallelArray;

      let pk = ParallelArray::from(k.clone());
      let ps = ParallelArray::from(s.clone());
      group.bench_with_input(BenchmarkId::new("elementwise-parallel", &id), &(&pk, &ps), |b, (k, s)| {
        b.iter(|| black_box(murmur3::hash(black_box(*k), black_box(*s)).unwrap()))
      });
    }
  }

  group.finish();
}

criterion_group!(benches, batch_paths);
criterion_main!(benches);

//! Fused batch dispatch.
//!
//! The group kernel is selected once per process: a clamped force mode pins
//! it, otherwise the widest kernel the CPU supports wins. Each call is then a
//! loop of indirect calls, one per seed group.

#[cfg(feature = "alloc")]
use alloc::vec;

use backend::{OnceCache, Selected};
use platform::Caps;
#[cfg(feature = "alloc")]
use traits::{ShapeError, WordArray};

#[cfg(feature = "alloc")]
use super::{BatchShape, HostArray};
use super::{
  config::{self, Murmur3Config},
  kernels::{CANDIDATES, GroupFn, Murmur3KernelId},
};

#[derive(Clone, Copy)]
struct ActiveDispatch {
  #[cfg_attr(not(feature = "alloc"), allow(dead_code))]
  group: GroupFn,
  name: &'static str,
  #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
  parallel_min_words: usize,
}

static ACTIVE: OnceCache<ActiveDispatch> = OnceCache::new();

#[must_use]
fn select_kernel(cfg: Murmur3Config, caps: Caps) -> Selected<GroupFn> {
  match Murmur3KernelId::from_force(cfg.effective_force) {
    Some(id) => Selected::new(id.as_str(), id.group_fn()),
    None => backend::select(caps, CANDIDATES),
  }
}

#[inline]
#[must_use]
fn active() -> ActiveDispatch {
  ACTIVE.get_or_init(|| {
    let cfg = config::get();
    let selected = select_kernel(cfg, platform::caps());
    tracing::debug!(
      kernel = selected.name,
      force = cfg.effective_force.as_str(),
      parallel_min_words = cfg.tunables.parallel_min_words,
      "murmur3 batch kernel selected"
    );
    ActiveDispatch {
      group: selected.func,
      name: selected.name,
      parallel_min_words: cfg.tunables.parallel_min_words,
    }
  })
}

/// Name of the group kernel [`hash_batch`] uses on this machine, e.g.
/// `"x86_64/avx2"`.
#[inline]
#[must_use]
pub fn kernel_name() -> &'static str {
  active().name
}

/// Hash a key batch held in host memory with the fused SIMD kernel.
///
/// Same contract and output as [`hash`](super::hash) over [`HostArray`]; the
/// difference is that each key is hashed start to finish in registers instead
/// of one whole-array pass per step.
///
/// ```
/// use hashes::fast::murmur3::{HostArray, hash_batch};
///
/// let keys = HostArray::keys(2, 1, 1, vec![0, 0]).unwrap();
/// let out = hash_batch(&keys, &HostArray::from(vec![0, 0x5082_EDEE])).unwrap();
/// assert_eq!(out.as_slice()[0], 0x2362_F9DE);
/// ```
#[cfg(feature = "alloc")]
pub fn hash_batch(keys: &HostArray, seeds: &HostArray) -> Result<HostArray, ShapeError> {
  let shape = BatchShape::validate(keys.shape(), seeds.shape())?;
  tracing::trace!(
    seeds = shape.seeds,
    keys = shape.keys,
    words = shape.words,
    "murmur3 fused batch"
  );

  let [s, k] = shape.output_shape();
  let mut out = vec![0u32; s * k];
  if !out.is_empty() {
    run(active(), shape, keys.as_slice(), seeds.as_slice(), &mut out);
  }
  Ok(HostArray::from_parts(vec![s, k], out))
}

#[cfg(feature = "alloc")]
fn run(d: ActiveDispatch, shape: BatchShape, keys: &[u32], seeds: &[u32], out: &mut [u32]) {
  #[cfg(feature = "parallel")]
  if keys.len() >= d.parallel_min_words {
    run_parallel(d, shape, keys, seeds, out);
    return;
  }

  let groups = keys.chunks_exact(shape.group_words()).zip(seeds);
  for ((group, &seed), dst) in groups.zip(out.chunks_exact_mut(shape.keys)) {
    (d.group)(group, shape.words, seed, dst);
  }
}

/// Keys per rayon task inside one seed group; a multiple of every lane count.
#[cfg(feature = "parallel")]
const PAR_CHUNK_KEYS: usize = 1024;

#[cfg(feature = "parallel")]
fn run_parallel(d: ActiveDispatch, shape: BatchShape, keys: &[u32], seeds: &[u32], out: &mut [u32]) {
  use rayon::prelude::*;

  let words = shape.words;
  keys
    .par_chunks_exact(shape.group_words())
    .zip(seeds.par_iter())
    .zip(out.par_chunks_exact_mut(shape.keys))
    .for_each(|((group, &seed), dst)| {
      group
        .par_chunks(PAR_CHUNK_KEYS * words)
        .zip(dst.par_chunks_mut(PAR_CHUNK_KEYS))
        .for_each(|(chunk, dst)| (d.group)(chunk, words, seed, dst));
    });
}

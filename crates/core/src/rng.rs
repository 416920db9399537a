//! Random number sources for generation.
//! Generation only ever needs inclusive integer ranges, so that is the whole seam.

use std::fmt;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform integer in `[lo, hi]`, both ends inclusive. Returns `lo` when `hi < lo`.
    fn between(&mut self, lo: i32, hi: i32) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        (**self).between(lo, hi)
    }
}

/// Seeded ChaCha8 stream; the same seed always yields the same layout.
#[derive(Clone, Debug)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for ChaChaSource {
    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        let offset = (self.rng.next_u64() % span) as i64;
        (i64::from(lo) + offset) as i32
    }
}

/// Removes and returns a uniformly chosen element, keeping the order of the rest.
pub(crate) fn take_random<T>(rng: &mut impl RandomSource, items: &mut Vec<T>) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let last = i32::try_from(items.len() - 1).unwrap_or(i32::MAX);
    let index = rng.between(0, last) as usize;
    Some(items.remove(index))
}

/// Where a generator's seed came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    /// Fixed by `GeneratorConfig::seed`; the run is reproducible as configured.
    Configured(u64),
    /// Drawn at startup because no seed was configured.
    Generated(u64),
}

impl SeedChoice {
    /// Takes the configured seed when there is one, otherwise draws a runtime seed.
    pub fn resolve(configured: Option<u64>) -> Self {
        configured.map_or_else(|| Self::Generated(runtime_seed()), Self::Configured)
    }

    pub fn value(self) -> u64 {
        match self {
            Self::Configured(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn is_generated(self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

impl fmt::Display for SeedChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured(seed) => write!(f, "{seed}"),
            Self::Generated(seed) => write!(f, "{seed} (generated)"),
        }
    }
}

static RUNTIME_SEED_CALLS: AtomicU64 = AtomicU64::new(0);

/// A fresh seed per call, for runs that did not ask for a fixed one.
pub fn runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |elapsed| elapsed.as_nanos());
    let clock = (nanos as u64) ^ ((nanos >> 64) as u64);
    let pid = u64::from(process::id()).rotate_left(17);
    let calls = RUNTIME_SEED_CALLS.fetch_add(1, Ordering::Relaxed);

    splitmix(clock ^ pid ^ splitmix(calls.wrapping_add(1)))
}

/// SplitMix64 finalizer.
fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

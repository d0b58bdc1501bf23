//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulator may call any platform RNG.
//! All randomness flows through `RandomStream` handles derived
//! from the single master seed stored on the run record.
//!
//! Every (stage, merchant) pair gets its own stream, seeded from
//! (master_seed, stage slot, merchant index). This means:
//!   - A merchant's records never depend on any other merchant's draws.
//!   - Merchants can be simulated in any order, or in parallel, and
//!     still produce identical output.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Stream index used by `RngBank::for_stage`.
pub const RUN_WIDE_STREAM: u64 = 0;

/// A source of uniform random draws.
///
/// Generators take `&mut impl RandomStream` so tests can inject a
/// stream that returns fixed values.
pub trait RandomStream {
    /// Draw a raw u64 (full range).
    fn next_u64(&mut self) -> u64;

    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        let bits = self.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.next_u64() % n
    }

    /// Roll an integer in [low, high). Callers validate low < high.
    fn uniform_i64(&mut self, low: i64, high: i64) -> i64 {
        assert!(low < high, "empty range [{low}, {high})");
        let span = high.abs_diff(low);
        low.wrapping_add(self.next_u64_below(span) as i64)
    }

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element uniformly. Panics on an empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = self.next_u64_below(items.len() as u64) as usize;
        &items[idx]
    }

    /// 16 random bytes, used to mint reproducible identifiers.
    fn next_bytes_16(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.next_u64().to_le_bytes());
        bytes[8..].copy_from_slice(&self.next_u64().to_le_bytes());
        bytes
    }
}

/// A named, deterministic RNG for one stage of one merchant.
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Create a stream from the master seed, a stable stage slot and
    /// a stream index. Neither index may change once assigned.
    ///
    /// Stream index 0 is reserved for run-wide stages; merchant `i`
    /// uses index `i + 1` (see `RngBank`).
    pub fn new(master_seed: u64, slot_index: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed
            ^ slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ stream_index.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomStream for SimRng {
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// Stream factory for a single run.
///
/// Stream index 0 of each slot belongs to the run-wide stage stream;
/// merchant `i` gets index `i + 1`.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Stream for a stage that runs once per run (merchant roster).
    pub fn for_stage(&self, slot: StageSlot) -> SimRng {
        SimRng::new(self.master_seed, slot as u64, RUN_WIDE_STREAM).with_name(slot.name())
    }

    /// Stream for one merchant within a per-merchant stage.
    pub fn for_merchant(&self, slot: StageSlot, merchant_index: usize) -> SimRng {
        SimRng::new(self.master_seed, slot as u64, merchant_index as u64 + 1)
            .with_name(slot.name())
    }
}

/// Stable stage slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every stage's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StageSlot {
    Merchant = 0,
    Credential = 1,
    Activity = 2,
    // Add new stages here — append only.
}

impl StageSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Merchant   => "merchant",
            Self::Credential => "credential",
            Self::Activity   => "activity",
        }
    }
}

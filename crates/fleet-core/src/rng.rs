//! Deterministic, replayable pseudo-random stream.
//!
//! # Determinism strategy
//!
//! Every random draw inside the simulation core (speed jitter, hazard
//! injection) comes from a `SeededRandom` owned by the caller.  The generator
//! is a small linear-congruential generator:
//!
//!   state = (state * 9301 + 49297) mod 233280
//!   value = state / 233280
//!
//! The same seed always yields the same stream, so a recorded seed is enough
//! to replay a run tick-for-tick.  The period is at most 233,280 draws, which
//! is plenty for demo and forensic replays; it is not a statistical-quality or
//! cryptographic generator.
//!
//! `SeededRandom` implements [`rand::RngCore`], so the `rand::Rng` extension
//! methods (`gen_bool`, `gen_range`, `SliceRandom::choose`) work on it
//! directly.

use rand::RngCore;

use crate::VehicleId;

const MODULUS: u64 = 233_280;
const MULTIPLIER: u64 = 9_301;
const INCREMENT: u64 = 49_297;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded linear-congruential generator producing floats in `[0, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    /// Create a stream from `seed`.  Seeds congruent modulo 233,280 produce
    /// identical streams.
    pub fn new(seed: u64) -> Self {
        Self { state: seed % MODULUS }
    }

    /// Derive an independent stream for one vehicle from the run's global
    /// seed, so adding vehicles never disturbs the streams of existing ones.
    pub fn for_vehicle(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        Self::new(seed)
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Current internal state (for logging a replay point).
    #[inline]
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl RngCore for SeededRandom {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

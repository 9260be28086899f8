//! Platform capabilities the engine depends on: a monotonic clock and a
//! seedable random source.
//!
//! Front ends hand a [`Platform`] to [`Game`](crate::Game). The engine never
//! sleeps; it only reads the clock when asked to tick without an explicit time.

use std::time::Instant;

use crate::rng::SimpleRng;

/// Host services consumed by the simulation.
pub trait Platform {
    /// Monotonic wall-clock time in milliseconds.
    fn current_time_ms(&self) -> u64;

    /// Restart the random sequence.
    fn seed_random(&mut self, seed: u64);

    /// Next non-negative random integer. Only `value % 7` is consumed.
    fn random(&mut self) -> u32;
}

/// Real-time platform backed by [`Instant`] and [`SimpleRng`].
#[derive(Debug, Clone)]
pub struct SystemPlatform {
    epoch: Instant,
    rng: SimpleRng,
    fixed_seed: Option<u64>,
}

impl SystemPlatform {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            rng: SimpleRng::default(),
            fixed_seed: None,
        }
    }

    /// Ignore the seeds requested by the engine and always use `seed`.
    ///
    /// Every game started on this platform then deals the same pieces.
    pub fn with_fixed_seed(mut self, seed: u64) -> Self {
        self.fixed_seed = Some(seed);
        self
    }
}

impl Default for SystemPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SystemPlatform {
    fn current_time_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn seed_random(&mut self, seed: u64) {
        self.rng.reseed(self.fixed_seed.unwrap_or(seed));
    }

    fn random(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

/// Deterministic platform for tests and replays.
///
/// Time only moves when told to. Random values come from a script first and
/// from a seeded [`SimpleRng`] once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ManualPlatform {
    now_ms: u64,
    script: Vec<u32>,
    cursor: usize,
    rng: SimpleRng,
}

impl ManualPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue random values to hand out before falling back to the RNG.
    pub fn with_script(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.script.extend(values);
        self
    }

    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl Platform for ManualPlatform {
    fn current_time_ms(&self) -> u64 {
        self.now_ms
    }

    fn seed_random(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    fn random(&mut self) -> u32 {
        match self.script.get(self.cursor) {
            Some(&value) => {
                self.cursor += 1;
                value
            }
            None => self.rng.next_u32(),
        }
    }
}

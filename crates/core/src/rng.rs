//! RNG module - seedable uniform source for piece selection
//!
//! A small LCG is enough here: the engine only ever consumes `value % 7`.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 1 };
        rng.reseed(seed);
        rng
    }

    /// Restart the sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        // Fold the high half in so millisecond timestamps still spread.
        let folded = (seed ^ (seed >> 32)) as u32;
        // Avoid 0 seed which would produce a short cycle at the start
        self.state = if folded == 0 { 1 } else { folded };
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of a power-of-two LCG have tiny periods; `% 7` would
        // expose them, so hand out the high half.
        self.state >> 16
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = SimpleRng::new(99);
        let first: Vec<u32> = (0..5).map(|_| rng.next_u32()).collect();
        rng.reseed(99);
        let again: Vec<u32> = (0..5).map(|_| rng.next_u32()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_all_kinds_come_up() {
        let mut rng = SimpleRng::new(2024);
        let mut seen = [false; 7];
        for _ in 0..200 {
            seen[(rng.next_u32() % 7) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "{:?}", seen);
    }
}

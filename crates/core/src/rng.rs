//! RNG module - seedable piece randomization
//!
//! Pieces are drawn uniformly and independently: there is no bag and no
//! repetition avoidance, so long runs of the same piece are possible.
//!
//! The generator is a small LCG so a game can be replayed from its seed.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let seed = if seed == 0 { 1 } else { seed };
        Self { seed, state: seed }
    }

    /// Seed this generator was created with (after the zero remap)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Maps through the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

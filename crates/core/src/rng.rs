//! RNG module - seeded marble generation
//!
//! Every random decision of a board (preview positions, marble colors) goes
//! through one [`SimpleRng`] owned by that board, so a seed fully determines a
//! game as long as the caller drives the same sequence of operations.
//!
//! Random colors follow a nested draw:
//!
//! 1. a base hue is drawn uniformly
//! 2. with chance 1/4 the marble becomes a joker, half of those a bomb-joker
//! 3. otherwise with chance 1/4 a second hue is drawn and unioned in
//! 4. otherwise the base hue stands
//!
//! The draws happen in exactly this order, so changing it changes every game
//! played from a fixed seed.

use crate::types::{Hue, MarbleColor};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of this LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Random value in `0..=max`
    ///
    /// Does not advance the generator when `max == 0`.
    pub fn pick(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_range(max + 1)
    }

    /// Uniformly drawn base hue
    pub fn hue(&mut self) -> Hue {
        Hue::ALL[self.pick(Hue::ALL.len() as u32 - 1) as usize]
    }

    /// Color of a freshly generated marble
    pub fn marble_color(&mut self) -> MarbleColor {
        let base = self.hue();
        if self.pick(3) == 0 {
            if self.pick(1) == 0 {
                MarbleColor::BOMB_JOKER
            } else {
                MarbleColor::JOKER
            }
        } else if self.pick(3) == 0 {
            let second = self.hue();
            MarbleColor::dual(base, second)
        } else {
            MarbleColor::single(base)
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.pick(i as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_SEED)
    }
}

//! RNG module - seeded tile value generation
//!
//! The board draws every tile value (initial layout and refills) from a single
//! owned generator. The default is a small linear-congruential sequence that
//! reproduces the same boards for the same seed on every platform.
//!
//! Tests and tools can substitute their own [`TileRng`] to script exact values.

use crate::types::{TileValue, LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};

/// Source of random tile values owned by a board
pub trait TileRng: Send {
    /// Next uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Next tile value in `0..palette_size`
    fn next_value(&mut self, palette_size: u8) -> TileValue {
        let value = (self.next_unit() * palette_size as f64).floor() as TileValue;
        value.min(palette_size.saturating_sub(1))
    }
}

/// Linear congruential generator
///
/// `state' = (state * 9301 + 49297) mod 233280`, unit value `state' / 233280`.
#[derive(Debug, Clone)]
pub struct LcgRng {
    state: u32,
}

impl LcgRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the sequence and return the new state
    pub fn next_state(&mut self) -> u32 {
        let next = (self.state as u64 * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state = next as u32;
        self.state
    }
}

impl TileRng for LcgRng {
    fn next_unit(&mut self) -> f64 {
        self.next_state() as f64 / LCG_MODULUS as f64
    }
}

/// Replays a fixed list of tile values, wrapping around at the end.
///
/// Values larger than the palette are reduced modulo the palette size.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<TileValue>,
    index: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<TileValue>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl TileRng for SequenceRng {
    fn next_unit(&mut self) -> f64 {
        // Unit draws are not meaningful for a scripted sequence; spread evenly.
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        (v as f64 + 0.5) / 256.0
    }

    fn next_value(&mut self, palette_size: u8) -> TileValue {
        if self.values.is_empty() || palette_size == 0 {
            return 0;
        }
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v % palette_size
    }
}

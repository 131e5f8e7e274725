//! Seeded random source owned by a single dungeon.

use std::f64::consts::TAU;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::DungeonConfig;

/// Width of an `f64` mantissa; the top bits of a draw map onto `[0, 1)` exactly.
const MANTISSA_BITS: u32 = 53;

pub struct RoomRng {
    rng: ChaCha8Rng,
}

impl RoomRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform in `1..=faces`. A zero-faced die always shows 1.
    pub fn roll_die(&mut self, faces: u32) -> u32 {
        let faces = u64::from(faces.max(1));
        (self.rng.next_u64() % faces) as u32 + 1
    }

    /// Sum of `dice_count` rolls, so the result lies in `dice_count..=dice_count * die_faces`.
    pub fn room_dimension(&mut self, config: &DungeonConfig) -> u32 {
        (0..config.dice_count).map(|_| self.roll_die(config.die_faces)).sum()
    }

    /// Uniform in `[0, 2π)`.
    pub fn angle(&mut self) -> f64 {
        let unit = (self.rng.next_u64() >> (64 - MANTISSA_BITS)) as f64
            / (1_u64 << MANTISSA_BITS) as f64;
        unit * TAU
    }
}

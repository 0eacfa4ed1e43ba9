//! Deterministic seed mixing and the per-room random stream used by generators.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::types::RoomType;

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Seed for one authored room, stable across sessions for the same world seed.
pub(crate) fn derive_room_seed(world_seed: u64, ordinal: u32, room_type: RoomType) -> u64 {
    let mut mixed = world_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(ordinal).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= u64::from(room_type.code()).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Attempt 0 uses the room seed itself so a clean first roll is reproducible by hand.
pub(crate) fn derive_attempt_seed(room_seed: u64, attempt: u32) -> u64 {
    if attempt == 0 { room_seed } else { mix_seed_stream(room_seed, u64::from(attempt)) }
}

/// Seeded random source handed to every generator.
pub struct RoomRng {
    inner: ChaCha8Rng,
}

impl RoomRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform in `[0, 1)` with 24 bits of precision, identical on every platform.
    pub fn unit(&mut self) -> f32 {
        (self.inner.next_u32() >> 8) as f32 / (1_u32 << 24) as f32
    }

    pub fn range_f32(&mut self, min_value: f32, max_value: f32) -> f32 {
        if max_value <= min_value {
            return min_value;
        }
        min_value + (max_value - min_value) * self.unit()
    }

    pub fn range_usize(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let range_size = (max_value - min_value + 1) as u64;
        min_value + (self.inner.next_u64() % range_size) as usize
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.unit() < probability
    }

    pub fn pick<T: Copy>(&mut self, options: &[T]) -> T {
        options[self.range_usize(0, options.len() - 1)]
    }
}

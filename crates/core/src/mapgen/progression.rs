//! Difficulty curve and per-difficulty tuning used by the room generators.

use crate::types::{Difficulty, RoomType};

pub const MAIN_PATH_CYCLE: [RoomType; 4] = [
    RoomType::PrecisionChallenge,
    RoomType::VerticalShaft,
    RoomType::BranchingPaths,
    RoomType::TransitionHub,
];

/// Upper bound on any fraction of the movement envelope a generator may demand.
pub(super) const MAX_ENVELOPE_FRACTION: f32 = 0.92;

const MAX_FLYERS: usize = 3;
const MAX_SPECIAL_PLATFORM_CHANCE: f32 = 0.5;

pub fn main_path_room_type(path_index: usize) -> RoomType {
    MAIN_PATH_CYCLE[path_index % MAIN_PATH_CYCLE.len()]
}

pub fn main_path_difficulty(start: f32, step: f32, path_index: usize) -> Difficulty {
    Difficulty(start + step * path_index as f32)
}

/// Fraction range of the horizontal reach used for precision gaps.
pub(super) fn precision_gap_fraction(difficulty: Difficulty) -> (f32, f32) {
    let level = difficulty.value();
    let low = (0.55 + 0.06 * level).min(0.8);
    let high = (0.7 + 0.06 * level).min(MAX_ENVELOPE_FRACTION);
    (low, high.max(low))
}

/// Fraction range of the reachable height used for shaft ledge spacing.
pub(super) fn shaft_spacing_fraction(difficulty: Difficulty) -> (f32, f32) {
    let level = difficulty.value();
    let low = (0.5 + 0.05 * level).min(0.8);
    let high = (0.65 + 0.05 * level).min(0.88);
    (low, high.max(low))
}

pub(super) fn special_platform_chance(difficulty: Difficulty) -> f32 {
    (0.12 * (difficulty.value() - 1.0)).clamp(0.0, MAX_SPECIAL_PLATFORM_CHANCE)
}

pub(super) fn flyer_count(difficulty: Difficulty) -> usize {
    ((difficulty.value() - 1.0).max(0.0).floor() as usize).min(MAX_FLYERS)
}

pub(super) fn walker_count(difficulty: Difficulty) -> usize {
    1 + (difficulty.value() / 2.0).floor() as usize
}

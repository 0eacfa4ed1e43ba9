//! Room generation orchestration: strategy dispatch, validation, repair and re-rolls.

use serde::{Deserialize, Serialize};

use crate::movement::ReachLimits;
use crate::reachability::{repair_until_connected, sort_platforms, validate};
use crate::types::{Difficulty, Direction, RoomType};

use super::layout::{GenerationContext, RoomDraft};
use super::model::{LayoutProvenance, RoomContent, first_overlap};
use super::seed::{RoomRng, derive_attempt_seed};
use super::{branching, fixed, hub, precision, shaft};

/// Bounds on self-correction before a room falls back to the minimal layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairPolicy {
    pub max_rerolls: u32,
    pub max_repair_passes: u32,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self { max_rerolls: 3, max_repair_passes: 2 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomRequest {
    pub room_type: RoomType,
    pub seed: u64,
    pub difficulty: Difficulty,
    pub exits: Vec<Direction>,
}

pub struct RoomGenerator {
    limits: ReachLimits,
    policy: RepairPolicy,
}

impl RoomGenerator {
    pub fn new(limits: ReachLimits, policy: RepairPolicy) -> Self {
        Self { limits, policy }
    }

    pub fn limits(&self) -> &ReachLimits {
        &self.limits
    }

    pub fn generate(&self, request: &RoomRequest) -> RoomContent {
        let (width, height) = request.room_type.dimensions();
        let context = GenerationContext {
            room_type: request.room_type,
            width,
            height,
            difficulty: request.difficulty,
            limits: self.limits,
            exits: &request.exits,
        };
        self.settle(width, height, |attempt| {
            let mut rng = RoomRng::seed_from_u64(derive_attempt_seed(request.seed, attempt));
            draft_layout(&context, &mut rng)
        })
    }

    fn settle(
        &self,
        width: f32,
        height: f32,
        mut draft: impl FnMut(u32) -> RoomDraft,
    ) -> RoomContent {
        for attempt in 0..=self.policy.max_rerolls {
            let mut layout = draft(attempt);
            sort_platforms(&mut layout.platforms);
            if let Some((first, second)) = first_overlap(&layout.platforms) {
                log::debug!(
                    "attempt {attempt}: discarding draft, platforms {first} and {second} overlap"
                );
                continue;
            }

            let report = validate(&layout.platforms, &self.limits);
            if report.fully_connected {
                return layout.finish(width, height, LayoutProvenance::Clean { attempt });
            }

            let passes = self.policy.max_repair_passes;
            let outcome = repair_until_connected(&layout.platforms, &self.limits, passes);
            if outcome.fully_connected {
                log::debug!(
                    "attempt {attempt}: repaired {} unreachable platforms with {} insertions",
                    report.unreachable.len(),
                    outcome.inserted
                );
                layout.platforms = outcome.platforms;
                return layout.finish(
                    width,
                    height,
                    LayoutProvenance::Repaired { attempt, inserted: outcome.inserted },
                );
            }
            log::debug!(
                "attempt {attempt}: {} platforms still unreachable after {} repair passes",
                report.unreachable.len(),
                outcome.passes
            );
        }

        log::warn!(
            "no traversable layout within {} re-rolls; using fallback floor",
            self.policy.max_rerolls
        );
        fallback_layout(width, height)
    }
}

fn draft_layout(context: &GenerationContext<'_>, rng: &mut RoomRng) -> RoomDraft {
    match context.room_type {
        RoomType::PrecisionChallenge => precision::build(context, rng),
        RoomType::VerticalShaft => shaft::build(context, rng),
        RoomType::BranchingPaths => branching::build(context, rng),
        RoomType::TransitionHub => hub::build(context),
        RoomType::SecretArea => fixed::secret_area(context),
        RoomType::BossChamber => fixed::boss_chamber(context),
        RoomType::RestArea => fixed::rest_area(context),
    }
}

/// A single ground platform spanning the room: dull, but always traversable.
pub fn fallback_layout(width: f32, height: f32) -> RoomContent {
    let context = GenerationContext {
        room_type: RoomType::RestArea,
        width,
        height,
        difficulty: Difficulty::BASELINE,
        limits: ReachLimits::default(),
        exits: &[],
    };
    let mut draft = RoomDraft::default();
    draft.place(context.ground());
    draft.finish(width, height, LayoutProvenance::Fallback)
}

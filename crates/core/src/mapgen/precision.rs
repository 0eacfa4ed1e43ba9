//! Precision challenge: a chain of narrow platforms across gaps close to the jump limit.

use crate::types::{Difficulty, Vec2};

use super::layout::{
    GROUND_HEIGHT, GenerationContext, PLATFORM_HEIGHT, RoomDraft, RouteSpec, chain_route,
};
use super::model::{CollectibleKind, EnemyKind, PlatformPlacement, PlatformType};
use super::progression::{flyer_count, precision_gap_fraction, special_platform_chance};
use super::seed::RoomRng;

const PAD_WIDTH: f32 = 160.0;
const MIN_WIDTH: f32 = 40.0;
const MAX_WIDTH: f32 = 60.0;
const MOVING_PERIOD_TICKS: u32 = 150;

pub(super) fn build(context: &GenerationContext<'_>, rng: &mut RoomRng) -> RoomDraft {
    let mut draft = RoomDraft::default();
    let ground_top = context.ground_top();
    let limits = context.limits;

    draft.place(PlatformPlacement::new(
        0.0,
        ground_top,
        PAD_WIDTH,
        GROUND_HEIGHT,
        PlatformType::Ground,
    ));
    let exit = draft.place(PlatformPlacement::new(
        context.width - PAD_WIDTH,
        ground_top,
        PAD_WIDTH,
        GROUND_HEIGHT,
        PlatformType::Ground,
    ));

    let (low_fraction, high_fraction) = precision_gap_fraction(context.difficulty);
    let spans = chain_route(
        RouteSpec {
            start_right: PAD_WIDTH,
            end_left: context.width - PAD_WIDTH,
            gap_min: limits.max_gap * low_fraction,
            gap_max: limits.max_gap * high_fraction,
            width_min: MIN_WIDTH,
            width_max: MAX_WIDTH,
        },
        rng,
    );

    // Alternating offsets around a base line: the worst climb is lift + swing.
    let lift = (context.design_rise() * 0.4).min(100.0);
    let swing = (context.design_rise() * 0.2).min(40.0);
    let base_y = ground_top - lift;

    let mut chain = Vec::with_capacity(spans.len());
    for (index, span) in spans.iter().enumerate() {
        let offset = rng.range_f32(swing * 0.5, swing);
        let y = if index % 2 == 0 { base_y - offset } else { base_y + offset };
        let kind = pick_platform_type(context.difficulty, swing, rng);
        let placement = PlatformPlacement::new(span.x, y, span.width, PLATFORM_HEIGHT, kind);
        let platform = draft.place(placement);
        if index % 2 == 0 {
            draft.collectible_above(CollectibleKind::Coin, &platform);
        }
        chain.push(platform);
    }

    // Flyers hover over every third gap, above the highest point of the chain.
    let flyers = flyer_count(context.difficulty).min(chain.len() / 3);
    for flyer in 0..flyers {
        let left = chain[flyer * 3];
        let right = chain[flyer * 3 + 1];
        let x = (left.right() + right.position.x) / 2.0;
        draft.enemy_at(EnemyKind::Flyer, Vec2::new(x, base_y - swing - 60.0));
    }
    if context.difficulty.value() >= 2.0 {
        draft.enemy_on(EnemyKind::Walker, &exit);
    }

    draft
}

fn pick_platform_type(difficulty: Difficulty, swing: f32, rng: &mut RoomRng) -> PlatformType {
    if rng.chance(special_platform_chance(difficulty)) {
        if difficulty.value() >= 3.0 && rng.chance(0.5) {
            return PlatformType::Breakable;
        }
        return PlatformType::Moving {
            travel: Vec2::new(0.0, -swing),
            period_ticks: MOVING_PERIOD_TICKS,
        };
    }
    rng.pick(&[PlatformType::Brick, PlatformType::Cloud, PlatformType::Ice, PlatformType::OneWay])
}

//! Branching paths: an easy lower route and a demanding upper route between shared pads.

use crate::types::Vec2;

use super::layout::{
    GROUND_HEIGHT, GenerationContext, PLATFORM_HEIGHT, RoomDraft, RouteSpec, Span, chain_route,
};
use super::model::{CollectibleKind, EnemyKind, PlatformPlacement, PlatformType};
use super::progression::{MAX_ENVELOPE_FRACTION, special_platform_chance, walker_count};
use super::seed::RoomRng;

const PAD_WIDTH: f32 = 200.0;
/// Smallest vertical distance between the two route base lines.
const MIN_ROUTE_SEPARATION: f32 = 2.0 * PLATFORM_HEIGHT + 4.0;
const MOVING_PERIOD_TICKS: u32 = 180;

pub(super) fn build(context: &GenerationContext<'_>, rng: &mut RoomRng) -> RoomDraft {
    let mut draft = RoomDraft::default();
    let ground_top = context.ground_top();
    let limits = context.limits;
    let rise = context.design_rise();

    for x in [0.0, context.width - PAD_WIDTH] {
        draft.place(PlatformPlacement::new(
            x,
            ground_top,
            PAD_WIDTH,
            GROUND_HEIGHT,
            PlatformType::Ground,
        ));
    }

    let lower_base = ground_top - (rise * 0.15).min(40.0);
    let separation = (rise * 0.55).max(MIN_ROUTE_SEPARATION);
    let upper_base = lower_base - separation;
    // Jitter budgets are capped so the two routes can never touch vertically.
    let jitter_budget = ((separation - 2.0 * PLATFORM_HEIGHT) / 4.0).max(0.0);
    let lower_jitter = jitter_budget.min(20.0);
    let upper_jitter = jitter_budget.min(15.0);

    let lower_spans = chain_route(
        RouteSpec {
            start_right: PAD_WIDTH,
            end_left: context.width - PAD_WIDTH,
            gap_min: limits.max_gap * 0.3,
            gap_max: limits.max_gap * 0.5,
            width_min: 80.0,
            width_max: 120.0,
        },
        rng,
    );
    let upper_spans = chain_route(
        RouteSpec {
            start_right: PAD_WIDTH,
            end_left: context.width - PAD_WIDTH,
            gap_min: limits.max_gap * 0.6,
            gap_max: limits.max_gap * 0.85_f32.min(MAX_ENVELOPE_FRACTION),
            width_min: 60.0,
            width_max: 90.0,
        },
        rng,
    );

    let walkers = walker_count(context.difficulty);
    for (index, span) in lower_spans.iter().enumerate() {
        let platform = place_on_route(&mut draft, span, lower_base, lower_jitter, rng, |rng| {
            rng.pick(&[PlatformType::Ground, PlatformType::Brick])
        });
        if index % 3 == 1 {
            draft.collectible_above(CollectibleKind::Coin, &platform);
        }
        if index % 2 == 0 && index / 2 < walkers {
            draft.enemy_on(EnemyKind::Walker, &platform);
        }
    }

    let special_chance = special_platform_chance(context.difficulty).max(0.2);
    let power_up_index = upper_spans.len() / 2;
    for (index, span) in upper_spans.iter().enumerate() {
        let platform = place_on_route(&mut draft, span, upper_base, upper_jitter, rng, |rng| {
            if rng.chance(special_chance) {
                PlatformType::Moving {
                    travel: Vec2::new(0.0, -upper_jitter.max(8.0)),
                    period_ticks: MOVING_PERIOD_TICKS,
                }
            } else {
                rng.pick(&[PlatformType::Cloud, PlatformType::Ice, PlatformType::Bouncy])
            }
        });
        if index == power_up_index {
            draft.collectible_above(CollectibleKind::PowerUp, &platform);
        } else if index % 2 == 0 {
            draft.collectible_above(CollectibleKind::Gem, &platform);
        }
    }

    draft
}

fn place_on_route(
    draft: &mut RoomDraft,
    span: &Span,
    base_y: f32,
    jitter: f32,
    rng: &mut RoomRng,
    pick_kind: impl FnOnce(&mut RoomRng) -> PlatformType,
) -> PlatformPlacement {
    let y = base_y + rng.range_f32(-jitter, jitter);
    let kind = pick_kind(rng);
    draft.place(PlatformPlacement::new(span.x, y, span.width, PLATFORM_HEIGHT, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::ReachLimits;
    use crate::mapgen::model::first_overlap;
    use crate::reachability::{sort_platforms, validate};
    use crate::types::{Difficulty, RoomType};

    fn context(difficulty: f32) -> GenerationContext<'static> {
        let (width, height) = RoomType::BranchingPaths.dimensions();
        GenerationContext {
            room_type: RoomType::BranchingPaths,
            width,
            height,
            difficulty: Difficulty(difficulty),
            limits: ReachLimits::default(),
            exits: &[],
        }
    }

    #[test]
    fn upper_route_carries_the_better_rewards() {
        let draft = build(&context(2.0), &mut RoomRng::seed_from_u64(17));
        let power_ups =
            draft.collectibles.iter().filter(|c| c.kind == CollectibleKind::PowerUp).count();
        assert_eq!(power_ups, 1);
        assert!(draft.collectibles.iter().any(|c| c.kind == CollectibleKind::Gem));

        let gem_height = draft
            .collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Gem)
            .map(|c| c.position.y)
            .fold(f32::MIN, f32::max);
        let coin_height = draft
            .collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Coin)
            .map(|c| c.position.y)
            .fold(f32::MAX, f32::min);
        assert!(gem_height < coin_height, "gems should float above the lower route");
    }

    #[test]
    fn both_routes_connect_entry_to_exit() {
        for seed in 0..20 {
            let context = context(1.0 + seed as f32 * 0.2);
            let mut platforms = build(&context, &mut RoomRng::seed_from_u64(seed)).platforms;
            sort_platforms(&mut platforms);
            assert!(validate(&platforms, &context.limits).fully_connected, "seed {seed}");
        }
    }

    #[test]
    fn upper_route_uses_only_rare_types() {
        let draft = build(&context(1.0), &mut RoomRng::seed_from_u64(3));
        let ground_top = context(1.0).ground_top();
        for platform in draft.platforms.iter().filter(|p| p.position.y < ground_top - 100.0) {
            assert!(matches!(
                platform.kind,
                PlatformType::Cloud
                    | PlatformType::Ice
                    | PlatformType::Bouncy
                    | PlatformType::Moving { .. }
            ));
        }
    }

    #[test]
    fn routes_never_crowd_the_pads_under_a_short_reach() {
        let limits = ReachLimits::new(32.0, 44.0);
        for seed in 0..64 {
            let context = GenerationContext { limits, ..context(2.0) };
            let mut platforms = build(&context, &mut RoomRng::seed_from_u64(seed)).platforms;
            sort_platforms(&mut platforms);
            assert_eq!(first_overlap(&platforms), None, "seed {seed}");
        }
    }
}

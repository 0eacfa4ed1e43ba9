//! Vertical shaft: walled column climbed by a zig-zag ladder of ledges.

use super::layout::{GenerationContext, PLATFORM_HEIGHT, RoomDraft};
use super::model::{CollectibleKind, EnemyKind, PlatformPlacement, PlatformType};
use super::progression::{shaft_spacing_fraction, special_platform_chance};
use super::seed::RoomRng;

const WALL_WIDTH: f32 = 24.0;
const MIN_LEDGE_WIDTH: f32 = 60.0;
const TOP_CLEARANCE: f32 = 100.0;
/// Keeps same-side ledges clear of each other whatever the envelope.
const MIN_SPACING: f32 = PLATFORM_HEIGHT * 1.5;
const MAX_LEDGES: usize = 24;

pub(super) fn build(context: &GenerationContext<'_>, rng: &mut RoomRng) -> RoomDraft {
    let mut draft = RoomDraft::default();
    let ground_top = context.ground_top();
    let limits = context.limits;
    let rise = context.design_rise();

    draft.place(context.ground());
    draft.place(PlatformPlacement::new(0.0, 0.0, WALL_WIDTH, ground_top, PlatformType::Brick));
    draft.place(PlatformPlacement::new(
        context.width - WALL_WIDTH,
        0.0,
        WALL_WIDTH,
        ground_top,
        PlatformType::Brick,
    ));

    // Ledges widen until the crossing between sides fits comfortably in one jump.
    let inner = context.width - 2.0 * WALL_WIDTH;
    // Whole pixels keep right-hand ledges flush with the wall after rounding.
    let ledge_width = ((inner - limits.max_gap * 0.8) / 2.0)
        .max(MIN_LEDGE_WIDTH)
        .min(inner / 2.0 - 8.0)
        .floor();
    let (low_fraction, high_fraction) = shaft_spacing_fraction(context.difficulty);
    let slippery_chance = special_platform_chance(context.difficulty);

    let mut ledges = Vec::new();
    let mut y = ground_top;
    while ledges.len() < MAX_LEDGES {
        let spacing = (rise * rng.range_f32(low_fraction, high_fraction)).max(MIN_SPACING);
        let next_y = y - spacing;
        if next_y < TOP_CLEARANCE {
            break;
        }
        let x = if ledges.len() % 2 == 0 {
            WALL_WIDTH
        } else {
            context.width - WALL_WIDTH - ledge_width
        };
        let kind = if rng.chance(slippery_chance) {
            PlatformType::Ice
        } else {
            rng.pick(&[PlatformType::Brick, PlatformType::OneWay])
        };
        let placement = PlatformPlacement::new(x, next_y, ledge_width, PLATFORM_HEIGHT, kind);
        let ledge = draft.place(placement);
        if ledges.len() % 3 == 2 {
            let enemy = if context.difficulty.value() >= 3.0 && ledges.len() % 2 == 0 {
                EnemyKind::Turret
            } else {
                EnemyKind::Walker
            };
            draft.enemy_on(enemy, &ledge);
        }
        ledges.push(ledge);
        y = next_y;
    }

    if let Some(top) = ledges.last() {
        draft.collectible_above(CollectibleKind::Gem, top);
    }
    for ledge in ledges.iter().skip(1).step_by(4) {
        draft.collectible_above(CollectibleKind::Coin, ledge);
    }

    draft
}

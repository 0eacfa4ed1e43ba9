//! Fixed layouts that ignore difficulty: secret caches, boss arenas and rest stops.

use crate::types::Vec2;

use super::layout::{GenerationContext, PICKUP_LIFT, RoomDraft};
use super::model::{CollectibleKind, EnemyKind, PlatformPlacement, PlatformType};

const SECRET_SHELF_WIDTH: f32 = 100.0;
const SECRET_SHELF_ANCHORS: [f32; 3] = [0.2, 0.4375, 0.675];
const SECRET_COIN_COUNT: usize = 5;
const ARENA_FLANK_WIDTH: f32 = 200.0;
const ARENA_FLANK_INSET: f32 = 120.0;
/// Shelf and flank surfaces above the floor, as fractions of the design rise.
const SHELF_LIFT: f32 = 0.55;
const FLANK_LIFT: f32 = 0.6;

pub(super) fn secret_area(context: &GenerationContext<'_>) -> RoomDraft {
    let mut draft = RoomDraft::default();
    let ground = draft.place(context.ground());
    let shelf_y = ground.position.y - context.design_rise() * SHELF_LIFT;
    let thickness = context.ledge_thickness();

    for (index, anchor) in SECRET_SHELF_ANCHORS.iter().enumerate() {
        let shelf = draft.place(PlatformPlacement::new(
            context.width * anchor,
            shelf_y,
            SECRET_SHELF_WIDTH,
            thickness,
            PlatformType::Cloud,
        ));
        let reward = if index == 1 { CollectibleKind::PowerUp } else { CollectibleKind::Gem };
        draft.collectible_above(reward, &shelf);
    }

    let spacing = context.width / (SECRET_COIN_COUNT + 1) as f32;
    for slot in 1..=SECRET_COIN_COUNT {
        draft.collectible_at(
            CollectibleKind::Coin,
            Vec2::new(spacing * slot as f32, ground.position.y - PICKUP_LIFT),
        );
    }
    draft
}

pub(super) fn boss_chamber(context: &GenerationContext<'_>) -> RoomDraft {
    let mut draft = RoomDraft::default();
    let ground = draft.place(context.ground());
    let flank_y = ground.position.y - context.design_rise() * FLANK_LIFT;
    let thickness = context.ledge_thickness();

    for x in [ARENA_FLANK_INSET, context.width - ARENA_FLANK_INSET - ARENA_FLANK_WIDTH] {
        let flank = draft.place(PlatformPlacement::new(
            x,
            flank_y,
            ARENA_FLANK_WIDTH,
            thickness,
            PlatformType::Brick,
        ));
        draft.collectible_above(CollectibleKind::Gem, &flank);
    }

    draft.enemy_at(EnemyKind::Guardian, Vec2::new(context.width / 2.0, ground.position.y));
    draft
}

pub(super) fn rest_area(context: &GenerationContext<'_>) -> RoomDraft {
    let mut draft = RoomDraft::default();
    let ground = draft.place(context.ground());
    draft.collectible_above(CollectibleKind::FullRestore, &ground);
    draft
}

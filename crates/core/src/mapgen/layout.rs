//! Draft assembly shared by the room strategies: the placement builder and route chaining.

use crate::movement::ReachLimits;
use crate::types::{Difficulty, Direction, RoomType, Vec2};

use super::model::{
    CollectibleKind, CollectiblePlacement, EnemyKind, EnemyPlacement, LayoutProvenance,
    PlatformPlacement, PlatformType, RoomContent,
};
use super::seed::RoomRng;

pub(super) const GROUND_HEIGHT: f32 = 40.0;
pub(super) const PLATFORM_HEIGHT: f32 = 16.0;
/// Height above a platform's surface at which collectibles float.
pub(super) const PICKUP_LIFT: f32 = 24.0;
/// Headroom kept free above anything a strategy lifts off the ground.
const CEILING_MARGIN: f32 = 80.0;
const MAX_ROUTE_PLATFORMS: usize = 64;

pub(super) struct GenerationContext<'a> {
    pub(super) room_type: RoomType,
    pub(super) width: f32,
    pub(super) height: f32,
    pub(super) difficulty: Difficulty,
    pub(super) limits: ReachLimits,
    pub(super) exits: &'a [Direction],
}

impl GenerationContext<'_> {
    pub(super) fn ground_top(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// Climb height strategies lay out against: the envelope's rise, capped to the room.
    pub(super) fn design_rise(&self) -> f32 {
        self.limits.max_rise.min(self.ground_top() - CEILING_MARGIN)
    }

    /// Thickness for ledges lifted off the ground; thins out under very small rises.
    pub(super) fn ledge_thickness(&self) -> f32 {
        PLATFORM_HEIGHT.min(self.design_rise() * 0.25)
    }

    /// A full-width ground slab along the bottom of the room.
    pub(super) fn ground(&self) -> PlatformPlacement {
        let top = self.ground_top();
        PlatformPlacement::new(0.0, top, self.width, GROUND_HEIGHT, PlatformType::Ground)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct RoomDraft {
    pub(super) platforms: Vec<PlatformPlacement>,
    pub(super) enemies: Vec<EnemyPlacement>,
    pub(super) collectibles: Vec<CollectiblePlacement>,
}

impl RoomDraft {
    /// Adds a platform. Overlapping drafts are rejected later by the generator.
    pub(super) fn place(&mut self, platform: PlatformPlacement) -> PlatformPlacement {
        self.platforms.push(platform);
        platform
    }

    pub(super) fn enemy_on(&mut self, kind: EnemyKind, platform: &PlatformPlacement) {
        let position = Vec2::new(platform.rect().center_x(), platform.position.y);
        self.enemies.push(EnemyPlacement { kind, position });
    }

    pub(super) fn enemy_at(&mut self, kind: EnemyKind, position: Vec2) {
        self.enemies.push(EnemyPlacement { kind, position });
    }

    pub(super) fn collectible_above(
        &mut self,
        kind: CollectibleKind,
        platform: &PlatformPlacement,
    ) {
        let position = Vec2::new(platform.rect().center_x(), platform.position.y - PICKUP_LIFT);
        self.collectibles.push(CollectiblePlacement { kind, position });
    }

    pub(super) fn collectible_at(&mut self, kind: CollectibleKind, position: Vec2) {
        self.collectibles.push(CollectiblePlacement { kind, position });
    }

    pub(super) fn finish(
        self,
        width: f32,
        height: f32,
        provenance: LayoutProvenance,
    ) -> RoomContent {
        RoomContent {
            width,
            height,
            platforms: self.platforms,
            enemies: self.enemies,
            collectibles: self.collectibles,
            provenance,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct RouteSpec {
    pub(super) start_right: f32,
    pub(super) end_left: f32,
    pub(super) gap_min: f32,
    pub(super) gap_max: f32,
    pub(super) width_min: f32,
    pub(super) width_max: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Span {
    pub(super) x: f32,
    pub(super) width: f32,
}

/// Horizontal spans for a chain of platforms between two anchors.
///
/// Every gap, the closing gap to `end_left` included, is positive and at most `gap_max`
/// unless the chain hits its platform cap. Gaps other than the last two are at least
/// `gap_min`.
pub(super) fn chain_route(spec: RouteSpec, rng: &mut RoomRng) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = spec.start_right;
    while spans.len() < MAX_ROUTE_PLATFORMS {
        let remaining = spec.end_left - cursor;
        if remaining <= spec.gap_max {
            break;
        }
        if remaining < spec.gap_max + spec.width_min + spec.gap_min {
            // Centre a closing platform; narrow it before letting it crowd either neighbour.
            let clearance = spec.gap_min.min(remaining / 4.0);
            let width = spec.width_min.min(remaining - 2.0 * clearance);
            let gap = (remaining - width) / 2.0;
            spans.push(Span { x: cursor + gap, width });
            break;
        }
        let gap = rng.range_f32(spec.gap_min, spec.gap_max);
        let width =
            rng.range_f32(spec.width_min, spec.width_max).min(remaining - gap - spec.gap_min);
        spans.push(Span { x: cursor + gap, width });
        cursor += gap + width;
    }
    spans
}

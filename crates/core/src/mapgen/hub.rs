//! Transition hub: a wide floor with one stub platform toward each connected exit.

use crate::types::{Direction, Vec2};

use super::layout::{GenerationContext, PICKUP_LIFT, RoomDraft};
use super::model::{CollectibleKind, PlatformPlacement, PlatformType};

const STUB_HEIGHT: f32 = 20.0;
const STUB_WIDTH_FRACTION: f32 = 0.1;
/// Stub surfaces per tier, as fractions of the design rise above the floor.
const LOW_SURFACE: f32 = 0.15;
const MID_SURFACE: f32 = 0.35;
const HIGH_SURFACE: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tier {
    Low,
    Mid,
    High,
}

/// Horizontal anchor (fraction of room width) and height tier for each exit stub.
fn stub_anchor(direction: Direction) -> (f32, Tier) {
    match direction {
        Direction::West => (0.04, Tier::Mid),
        Direction::East => (0.86, Tier::Mid),
        Direction::NorthWest => (0.12, Tier::High),
        Direction::North => (0.45, Tier::High),
        Direction::NorthEast => (0.78, Tier::High),
        Direction::SouthWest => (0.2, Tier::Low),
        Direction::South => (0.45, Tier::Low),
        Direction::SouthEast => (0.7, Tier::Low),
    }
}

pub(super) fn build(context: &GenerationContext<'_>) -> RoomDraft {
    let mut draft = RoomDraft::default();
    let ground = draft.place(context.ground());
    let rise = context.design_rise();
    // Thin enough that low stubs clear the floor and high stubs clear whatever shares a column.
    let thickness = STUB_HEIGHT.min(rise * 0.1);

    let mut exits = context.exits.to_vec();
    exits.sort();
    exits.dedup();
    let stub_width = context.width * STUB_WIDTH_FRACTION;
    for direction in exits {
        let (anchor, tier) = stub_anchor(direction);
        let surface = match tier {
            Tier::Low => LOW_SURFACE,
            Tier::Mid => MID_SURFACE,
            Tier::High => HIGH_SURFACE,
        };
        draft.place(PlatformPlacement::new(
            context.width * anchor,
            ground.position.y - rise * surface,
            stub_width,
            thickness,
            PlatformType::OneWay,
        ));
    }

    draft.collectible_at(
        CollectibleKind::FullRestore,
        Vec2::new(context.width / 2.0, ground.position.y - PICKUP_LIFT),
    );
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::ReachLimits;
    use crate::mapgen::model::first_overlap;
    use crate::reachability::{sort_platforms, validate};
    use crate::types::{Difficulty, RoomType};

    fn build_for(limits: ReachLimits, exits: &[Direction]) -> RoomDraft {
        let (width, height) = RoomType::TransitionHub.dimensions();
        build(&GenerationContext {
            room_type: RoomType::TransitionHub,
            width,
            height,
            difficulty: Difficulty::BASELINE,
            limits,
            exits,
        })
    }

    fn build_with_exits(exits: &[Direction]) -> RoomDraft {
        build_for(ReachLimits::default(), exits)
    }

    #[test]
    fn one_stub_per_exit_plus_the_floor() {
        let draft = build_with_exits(&[Direction::East, Direction::West, Direction::North]);
        assert_eq!(draft.platforms.len(), 4);
        assert_eq!(draft.platforms[0].kind, PlatformType::Ground);
        assert_eq!(draft.platforms[0].width, RoomType::TransitionHub.dimensions().0);
    }

    #[test]
    fn always_carries_a_single_full_restore() {
        for exits in [&[][..], &[Direction::South][..], &Direction::ALL[..]] {
            let draft = build_with_exits(exits);
            let restores = draft
                .collectibles
                .iter()
                .filter(|c| c.kind == CollectibleKind::FullRestore)
                .count();
            assert_eq!(restores, 1);
        }
    }

    #[test]
    fn every_stub_is_reachable_from_the_floor_with_all_exits() {
        let mut platforms = build_with_exits(&Direction::ALL).platforms;
        assert_eq!(platforms.len(), 9);
        sort_platforms(&mut platforms);
        assert!(validate(&platforms, &ReachLimits::default()).fully_connected);
    }

    #[test]
    fn stubs_stay_reachable_and_inside_the_room_at_any_rise() {
        let (width, height) = RoomType::TransitionHub.dimensions();
        for limits in [
            ReachLimits::new(32.0, 44.0),
            ReachLimits::new(16.0, 20.0),
            ReachLimits::default(),
            ReachLimits::new(660.0, 960.0),
        ] {
            let mut platforms = build_for(limits, &Direction::ALL).platforms;
            assert!(platforms.iter().all(|p| p.position.y >= 0.0 && p.right() <= width));
            assert!(platforms.iter().all(|p| p.bottom() <= height));
            sort_platforms(&mut platforms);
            assert_eq!(first_overlap(&platforms), None, "{limits:?}");
            assert!(validate(&platforms, &limits).fully_connected, "{limits:?}");
        }
    }

    #[test]
    fn east_stub_sits_on_the_east_side() {
        let draft = build_with_exits(&[Direction::East]);
        let stub = draft.platforms[1];
        assert!(stub.position.x > RoomType::TransitionHub.dimensions().0 / 2.0);
    }
}

//! Platform reachability analysis and auto-repair.
//!
//! The reachability graph is implicit: an edge `A -> B` exists when the player can
//! cross from the top of `A` to `B` in a single jump/dash under [`ReachLimits`].
//! Climbing is bounded by `max_rise`; dropping only by the generous `max_fall`.
//!
//! All functions expect platforms in canonical order (see [`sort_platforms`]); the
//! first platform is the room's guaranteed entry point.

use std::cmp::Ordering;
use std::collections::{BTreeSet, VecDeque};

use crate::mapgen::{PlatformPlacement, PlatformType, Rect};
use crate::movement::ReachLimits;

pub const REPAIR_PLATFORM_WIDTH: f32 = 60.0;
pub const REPAIR_PLATFORM_HEIGHT: f32 = 20.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachabilityReport {
    pub fully_connected: bool,
    pub unreachable: BTreeSet<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RepairOutcome {
    pub platforms: Vec<PlatformPlacement>,
    pub passes: u32,
    pub inserted: usize,
    pub fully_connected: bool,
}

/// Ascending `x`; on ties the lower surface (larger `y`) comes first.
pub fn canonical_order(a: &PlatformPlacement, b: &PlatformPlacement) -> Ordering {
    a.position.x.total_cmp(&b.position.x).then_with(|| b.position.y.total_cmp(&a.position.y))
}

pub fn sort_platforms(platforms: &mut [PlatformPlacement]) {
    platforms.sort_by(canonical_order);
}

/// Whether a single jump/dash carries the player from `from` onto `to`.
///
/// Walls (see [`PlatformPlacement::is_vertical_surface`]) count as reached when touched
/// anywhere along their height but have no outgoing edges.
pub fn can_reach(from: &PlatformPlacement, to: &PlatformPlacement, limits: &ReachLimits) -> bool {
    if from.is_vertical_surface() {
        return false;
    }
    let target_is_wall = to.is_vertical_surface();
    let to_extremes = to.extremes();
    from.extremes().iter().any(|source| {
        to_extremes.iter().any(|target| step_allowed(source, target, target_is_wall, limits))
    })
}

fn step_allowed(from: &Rect, to: &Rect, target_is_wall: bool, limits: &ReachLimits) -> bool {
    let gap = horizontal_gap(from, to);
    let rise = from.top() - contact_height(from, to, target_is_wall);
    gap <= limits.max_gap && rise <= limits.max_rise && -rise <= limits.max_fall
}

fn horizontal_gap(a: &Rect, b: &Rect) -> f32 {
    if b.left() > a.right() {
        b.left() - a.right()
    } else if a.left() > b.right() {
        a.left() - b.right()
    } else {
        0.0
    }
}

fn contact_height(from: &Rect, to: &Rect, target_is_wall: bool) -> f32 {
    if target_is_wall { from.top().max(to.top()).min(to.bottom()) } else { to.top() }
}

/// Breadth-first search from the first platform; reports every placement never reached.
pub fn validate(platforms: &[PlatformPlacement], limits: &ReachLimits) -> ReachabilityReport {
    if platforms.is_empty() {
        return ReachabilityReport { fully_connected: true, unreachable: BTreeSet::new() };
    }

    let mut reached = vec![false; platforms.len()];
    reached[0] = true;
    let mut open = VecDeque::from([0_usize]);
    while let Some(current) = open.pop_front() {
        for (next, platform) in platforms.iter().enumerate() {
            if reached[next] || !can_reach(&platforms[current], platform, limits) {
                continue;
            }
            reached[next] = true;
            open.push_back(next);
        }
    }

    let unreachable: BTreeSet<usize> =
        reached.iter().enumerate().filter(|(_, seen)| !**seen).map(|(index, _)| index).collect();
    ReachabilityReport { fully_connected: unreachable.is_empty(), unreachable }
}

/// One corrective pass over consecutive pairs.
///
/// For every unreachable platform that its nearest standable predecessor cannot reach,
/// a single bridge platform is synthesized at the midpoint between the two. Bridges that
/// would overlap an existing placement are skipped. A fully connected input is returned
/// unchanged. The result is in canonical order.
pub fn repair(platforms: &[PlatformPlacement], limits: &ReachLimits) -> Vec<PlatformPlacement> {
    let report = validate(platforms, limits);
    if report.fully_connected {
        return platforms.to_vec();
    }

    let mut repaired: Vec<PlatformPlacement> = Vec::with_capacity(platforms.len() + 4);
    repaired.push(platforms[0]);
    for (index, next) in platforms.iter().enumerate().skip(1) {
        let predecessor =
            platforms[..index].iter().rev().find(|platform| !platform.is_vertical_surface());
        if let Some(previous) = predecessor
            && report.unreachable.contains(&index)
            && !can_reach(previous, next, limits)
        {
            let bridge = bridge_between(previous, next);
            let blocked = platforms
                .iter()
                .chain(repaired.iter())
                .any(|existing| existing.rect().intersects(&bridge.rect()));
            if blocked {
                log::debug!(
                    "skipping bridge at ({:.1}, {:.1}): overlaps an existing platform",
                    bridge.position.x,
                    bridge.position.y
                );
            } else {
                if !can_reach(previous, &bridge, limits) || !can_reach(&bridge, next, limits) {
                    log::debug!(
                        "bridge at ({:.1}, {:.1}) leaves a gap; another pass is needed",
                        bridge.position.x,
                        bridge.position.y
                    );
                }
                repaired.push(bridge);
            }
        }
        repaired.push(*next);
    }

    sort_platforms(&mut repaired);
    repaired
}

/// Runs [`repair`] until the sequence validates or `max_passes` is spent.
pub fn repair_until_connected(
    platforms: &[PlatformPlacement],
    limits: &ReachLimits,
    max_passes: u32,
) -> RepairOutcome {
    let original_len = platforms.len();
    let mut current = platforms.to_vec();
    let mut passes = 0_u32;

    while passes < max_passes && !validate(&current, limits).fully_connected {
        let next = repair(&current, limits);
        passes += 1;
        if next.len() == current.len() {
            break;
        }
        current = next;
    }

    let fully_connected = validate(&current, limits).fully_connected;
    let inserted = current.len() - original_len;
    RepairOutcome { inserted, platforms: current, passes, fully_connected }
}

fn bridge_between(from: &PlatformPlacement, to: &PlatformPlacement) -> PlatformPlacement {
    let from_rect = from.rect();
    let to_rect = to.rect();
    let center_x = if to_rect.left() > from_rect.right() {
        (from_rect.right() + to_rect.left()) / 2.0
    } else if from_rect.left() > to_rect.right() {
        (to_rect.right() + from_rect.left()) / 2.0
    } else {
        (from_rect.center_x() + to_rect.center_x()) / 2.0
    };
    let target_y = contact_height(&from_rect, &to_rect, to.is_vertical_surface());
    let y = (from_rect.top() + target_y) / 2.0;
    PlatformPlacement::new(
        center_x - REPAIR_PLATFORM_WIDTH / 2.0,
        y,
        REPAIR_PLATFORM_WIDTH,
        REPAIR_PLATFORM_HEIGHT,
        PlatformType::Brick,
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::Vec2;

    fn block(x: f32, y: f32, width: f32, height: f32) -> PlatformPlacement {
        PlatformPlacement::new(x, y, width, height, PlatformType::Brick)
    }

    fn limits_with_reach(max_gap: f32) -> ReachLimits {
        ReachLimits::new(max_gap, 150.0)
    }

    #[test]
    fn wide_gap_is_flagged_then_bridged_with_one_platform() {
        let limits = limits_with_reach(120.0);
        let platforms = vec![block(0.0, 500.0, 100.0, 50.0), block(300.0, 500.0, 100.0, 50.0)];

        let report = validate(&platforms, &limits);
        assert!(!report.fully_connected);
        assert_eq!(report.unreachable, BTreeSet::from([1]));

        let repaired = repair(&platforms, &limits);
        assert_eq!(repaired.len(), 3);
        let bridge = repaired[1];
        assert!((150.0..=200.0).contains(&bridge.position.x), "bridge at {bridge:?}");
        assert_eq!(bridge.width, REPAIR_PLATFORM_WIDTH);
        assert!(validate(&repaired, &limits).fully_connected);
    }

    #[test]
    fn repair_leaves_connected_sequences_untouched() {
        let limits = limits_with_reach(120.0);
        let platforms = vec![
            block(0.0, 500.0, 100.0, 50.0),
            block(180.0, 420.0, 60.0, 20.0),
            block(300.0, 500.0, 100.0, 50.0),
        ];
        assert!(validate(&platforms, &limits).fully_connected);
        assert_eq!(repair(&platforms, &limits), platforms);
    }

    #[test]
    fn climbing_is_bounded_but_dropping_is_free() {
        let limits = ReachLimits::new(120.0, 100.0);
        let low = block(0.0, 500.0, 100.0, 20.0);
        let high = block(50.0, 300.0, 100.0, 20.0);
        assert!(!can_reach(&low, &high, &limits));
        assert!(can_reach(&high, &low, &limits));

        let entry_high = validate(&[high, low], &limits);
        assert!(entry_high.fully_connected);
        let entry_low = validate(&[low, high], &limits);
        assert_eq!(entry_low.unreachable, BTreeSet::from([1]));
    }

    #[test]
    fn fall_bound_still_applies() {
        let limits = ReachLimits { max_gap: 120.0, max_rise: 100.0, max_fall: 300.0 };
        let top = block(0.0, 0.0, 100.0, 20.0);
        let bottom = block(0.0, 400.0, 100.0, 20.0);
        assert!(!can_reach(&top, &bottom, &limits));
    }

    #[test]
    fn walls_are_reached_by_touch_but_do_not_propagate() {
        let limits = ReachLimits::new(100.0, 120.0);
        let floor = block(0.0, 960.0, 400.0, 40.0);
        let wall = block(0.0, 0.0, 24.0, 960.0);
        let perch = block(24.0, 100.0, 100.0, 20.0);
        assert!(wall.is_vertical_surface());
        assert!(can_reach(&floor, &wall, &limits));
        assert!(!can_reach(&wall, &perch, &limits));

        let report = validate(&[floor, wall, perch], &limits);
        assert_eq!(report.unreachable, BTreeSet::from([2]));
    }

    #[test]
    fn moving_platform_is_reachable_from_either_extreme() {
        let limits = limits_with_reach(100.0);
        let start = block(0.0, 500.0, 100.0, 20.0);
        let shuttle = PlatformPlacement::new(
            300.0,
            500.0,
            60.0,
            20.0,
            PlatformType::Moving { travel: Vec2::new(-150.0, 0.0), period_ticks: 120 },
        );
        let beyond = block(300.0, 500.0 - 20.0 - 140.0, 60.0, 20.0);
        assert!(can_reach(&start, &shuttle, &limits));
        assert!(!can_reach(&start, &beyond, &limits));
        assert!(can_reach(&shuttle, &start, &limits));
    }

    #[test]
    fn two_insertion_chain_needs_a_second_pass() {
        let limits = limits_with_reach(120.0);
        let platforms = vec![block(0.0, 500.0, 100.0, 50.0), block(460.0, 500.0, 100.0, 50.0)];

        let single = repair_until_connected(&platforms, &limits, 1);
        assert_eq!(single.passes, 1);
        assert_eq!(single.inserted, 1);
        assert!(!single.fully_connected);

        let bounded = repair_until_connected(&platforms, &limits, 2);
        assert_eq!(bounded.passes, 2);
        assert_eq!(bounded.inserted, 3);
        assert!(bounded.fully_connected);
        assert!(validate(&bounded.platforms, &limits).fully_connected);
    }

    #[test]
    fn zero_passes_reports_without_touching_input() {
        let limits = limits_with_reach(120.0);
        let platforms = vec![block(0.0, 500.0, 100.0, 50.0), block(300.0, 500.0, 100.0, 50.0)];
        let outcome = repair_until_connected(&platforms, &limits, 0);
        assert_eq!(outcome.passes, 0);
        assert_eq!(outcome.platforms, platforms);
        assert!(!outcome.fully_connected);
    }

    #[test]
    fn blocked_bridge_is_skipped() {
        let limits = limits_with_reach(120.0);
        let platforms = vec![
            block(0.0, 500.0, 100.0, 50.0),
            block(190.0, 400.0, 10.0, 160.0),
            block(300.0, 500.0, 100.0, 50.0),
        ];
        let report = validate(&platforms, &limits);
        assert_eq!(report.unreachable, BTreeSet::from([2]));

        let repaired = repair(&platforms, &limits);
        assert_eq!(repaired, platforms);
        assert!(!validate(&repaired, &limits).fully_connected);
    }

    #[test]
    fn empty_and_single_sequences_are_connected() {
        let limits = ReachLimits::default();
        assert!(validate(&[], &limits).fully_connected);
        assert!(validate(&[block(0.0, 0.0, 10.0, 10.0)], &limits).fully_connected);
    }

    #[test]
    fn canonical_order_puts_ground_first_on_ties() {
        let mut platforms = vec![block(0.0, 0.0, 24.0, 900.0), block(0.0, 900.0, 400.0, 40.0)];
        sort_platforms(&mut platforms);
        assert_eq!(platforms[0].position.y, 900.0);
    }

    proptest! {
        #[test]
        fn repair_is_identity_on_connected_chains(
            steps in prop::collection::vec(
                (0.0_f32..110.0, -60.0_f32..60.0, 40.0_f32..120.0),
                1..12,
            )
        ) {
            let limits = limits_with_reach(120.0);
            let mut platforms = vec![block(0.0, 500.0, 100.0, 20.0)];
            for (gap, lift, width) in steps {
                let last = *platforms.last().expect("chain starts non-empty");
                platforms.push(block(last.right() + gap, last.position.y + lift, width, 20.0));
            }
            prop_assert!(validate(&platforms, &limits).fully_connected);
            prop_assert_eq!(repair(&platforms, &limits), platforms);
        }

        #[test]
        fn validation_is_deterministic(
            xs in prop::collection::vec((0.0_f32..2000.0, 0.0_f32..800.0), 1..16)
        ) {
            let limits = ReachLimits::default();
            let mut platforms: Vec<_> =
                xs.into_iter().map(|(x, y)| block(x, y, 50.0, 20.0)).collect();
            sort_platforms(&mut platforms);
            prop_assert_eq!(validate(&platforms, &limits), validate(&platforms, &limits));
            prop_assert_eq!(repair(&platforms, &limits), repair(&platforms, &limits));
        }
    }
}

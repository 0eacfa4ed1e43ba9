//! Public data models for generated room content: platforms, enemies and collectibles.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::Vec2;

/// Platforms taller than this multiple of their width are treated as walls.
const VERTICAL_SURFACE_RATIO: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformType {
    Ground,
    Brick,
    Cloud,
    /// Travels by `travel` from its placed position and back over `period_ticks`.
    Moving { travel: Vec2, period_ticks: u32 },
    Breakable,
    Ice,
    Bouncy,
    OneWay,
    Pipe,
}

impl PlatformType {
    fn code(self) -> u8 {
        match self {
            Self::Ground => 0,
            Self::Brick => 1,
            Self::Cloud => 2,
            Self::Moving { .. } => 3,
            Self::Breakable => 4,
            Self::Ice => 5,
            Self::Bouncy => 6,
            Self::OneWay => 7,
            Self::Pipe => 8,
        }
    }
}

/// Axis-aligned rectangle in room pixels, `position` being the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.position.x + self.width / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformPlacement {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformType,
}

impl PlatformPlacement {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformType) -> Self {
        Self { position: Vec2::new(x, y), width, height, kind }
    }

    pub fn rect(&self) -> Rect {
        Rect { position: self.position, width: self.width, height: self.height }
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    pub fn is_vertical_surface(&self) -> bool {
        self.height > self.width * VERTICAL_SURFACE_RATIO
    }

    /// Start and end rectangles of the platform's path; one rectangle for static platforms.
    pub fn extremes(&self) -> Vec<Rect> {
        let start = self.rect();
        match self.kind {
            PlatformType::Moving { travel, .. } => {
                let end = Rect {
                    position: Vec2::new(start.position.x + travel.x, start.position.y + travel.y),
                    ..start
                };
                vec![start, end]
            }
            _ => vec![start],
        }
    }

    /// Live top-left position at `tick`. Static platforms never move.
    pub fn position_at_tick(&self, tick: u64) -> Vec2 {
        let PlatformType::Moving { travel, period_ticks } = self.kind else {
            return self.position;
        };
        if period_ticks == 0 {
            return self.position;
        }
        let period = u64::from(period_ticks);
        let phase = (tick % period) as f32 / period as f32;
        let along = if phase < 0.5 { phase * 2.0 } else { (1.0 - phase) * 2.0 };
        Vec2::new(self.position.x + travel.x * along, self.position.y + travel.y * along)
    }
}

/// Indices of the first pair of platforms whose placed rectangles overlap.
pub fn first_overlap(platforms: &[PlatformPlacement]) -> Option<(usize, usize)> {
    platforms.iter().enumerate().find_map(|(index, platform)| {
        platforms[index + 1..]
            .iter()
            .position(|other| platform.rect().intersects(&other.rect()))
            .map(|offset| (index, index + 1 + offset))
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyKind {
    Walker,
    Flyer,
    Turret,
    Guardian,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPlacement {
    pub kind: EnemyKind,
    pub position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectibleKind {
    Coin,
    Gem,
    PowerUp,
    FullRestore,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectiblePlacement {
    pub kind: CollectibleKind,
    pub position: Vec2,
}

/// How a room's final layout came about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutProvenance {
    Clean { attempt: u32 },
    Repaired { attempt: u32, inserted: usize },
    Fallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomContent {
    pub width: f32,
    pub height: f32,
    pub platforms: Vec<PlatformPlacement>,
    pub enemies: Vec<EnemyPlacement>,
    pub collectibles: Vec<CollectiblePlacement>,
    pub provenance: LayoutProvenance,
}

impl RoomContent {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.width.to_bits().to_le_bytes());
        bytes.extend(self.height.to_bits().to_le_bytes());

        bytes.extend((self.platforms.len() as u32).to_le_bytes());
        for platform in &self.platforms {
            bytes.push(platform.kind.code());
            push_vec2(&mut bytes, platform.position);
            bytes.extend(platform.width.to_bits().to_le_bytes());
            bytes.extend(platform.height.to_bits().to_le_bytes());
            if let PlatformType::Moving { travel, period_ticks } = platform.kind {
                push_vec2(&mut bytes, travel);
                bytes.extend(period_ticks.to_le_bytes());
            }
        }

        bytes.extend((self.enemies.len() as u32).to_le_bytes());
        for enemy in &self.enemies {
            bytes.push(match enemy.kind {
                EnemyKind::Walker => 0,
                EnemyKind::Flyer => 1,
                EnemyKind::Turret => 2,
                EnemyKind::Guardian => 3,
            });
            push_vec2(&mut bytes, enemy.position);
        }

        bytes.extend((self.collectibles.len() as u32).to_le_bytes());
        for collectible in &self.collectibles {
            bytes.push(match collectible.kind {
                CollectibleKind::Coin => 0,
                CollectibleKind::Gem => 1,
                CollectibleKind::PowerUp => 2,
                CollectibleKind::FullRestore => 3,
            });
            push_vec2(&mut bytes, collectible.position);
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_vec2(bytes: &mut Vec<u8>, value: Vec2) {
    bytes.extend(value.x.to_bits().to_le_bytes());
    bytes.extend(value.y.to_bits().to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_platform_returns_to_start_each_period() {
        let platform = PlatformPlacement::new(
            100.0,
            300.0,
            60.0,
            20.0,
            PlatformType::Moving { travel: Vec2::new(0.0, -40.0), period_ticks: 120 },
        );
        assert_eq!(platform.position_at_tick(0), platform.position);
        assert_eq!(platform.position_at_tick(60), Vec2::new(100.0, 260.0));
        assert_eq!(platform.position_at_tick(120), platform.position);
        assert_eq!(platform.position_at_tick(30), Vec2::new(100.0, 280.0));
    }

    #[test]
    fn moving_platform_exposes_both_extremes() {
        let platform = PlatformPlacement::new(
            0.0,
            0.0,
            50.0,
            20.0,
            PlatformType::Moving { travel: Vec2::new(80.0, 0.0), period_ticks: 90 },
        );
        let extremes = platform.extremes();
        assert_eq!(extremes.len(), 2);
        assert_eq!(extremes[1].left(), 80.0);

        let fixed = PlatformPlacement::new(0.0, 0.0, 50.0, 20.0, PlatformType::Ice);
        assert_eq!(fixed.extremes(), vec![fixed.rect()]);
        assert_eq!(fixed.position_at_tick(999), fixed.position);
    }

    #[test]
    fn touching_rectangles_do_not_intersect() {
        let left = PlatformPlacement::new(0.0, 0.0, 100.0, 20.0, PlatformType::Brick).rect();
        let right = PlatformPlacement::new(100.0, 0.0, 100.0, 20.0, PlatformType::Brick).rect();
        let overlapping =
            PlatformPlacement::new(99.0, 10.0, 10.0, 20.0, PlatformType::Brick).rect();
        assert!(!left.intersects(&right));
        assert!(left.intersects(&overlapping));
    }

    #[test]
    fn first_overlap_names_the_offending_pair() {
        let floor = PlatformPlacement::new(0.0, 460.0, 800.0, 40.0, PlatformType::Ground);
        let ledge = PlatformPlacement::new(100.0, 300.0, 80.0, 16.0, PlatformType::Brick);
        let sunk = PlatformPlacement::new(400.0, 450.0, 80.0, 16.0, PlatformType::Brick);
        assert_eq!(first_overlap(&[floor, ledge]), None);
        assert_eq!(first_overlap(&[floor, ledge, sunk]), Some((0, 2)));
        assert_eq!(first_overlap(&[]), None);
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let content = RoomContent {
            width: 600.0,
            height: 400.0,
            platforms: vec![PlatformPlacement::new(0.0, 360.0, 600.0, 40.0, PlatformType::Ground)],
            enemies: Vec::new(),
            collectibles: vec![CollectiblePlacement {
                kind: CollectibleKind::FullRestore,
                position: Vec2::new(300.0, 340.0),
            }],
            provenance: LayoutProvenance::Clean { attempt: 0 },
        };
        let mut moved = content.clone();
        moved.collectibles[0].position.x += 1.0;
        assert_eq!(content.fingerprint(), content.clone().fingerprint());
        assert_ne!(content.fingerprint(), moved.fingerprint());
    }
}

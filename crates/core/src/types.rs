use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct RoomId;
}

/// Room-local pixel coordinate. `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer room coordinate on the world map. Layout bookkeeping only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCoord {
    pub y: i32,
    pub x: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::NorthEast => Self::SouthWest,
            Self::NorthWest => Self::SouthEast,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
        }
    }

    /// Grid offset as `(dx, dy)`; north is negative `y`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (-1, -1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (-1, 1),
        }
    }

    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| direction.offset() == (dx.signum(), dy.signum()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomType {
    TransitionHub,
    PrecisionChallenge,
    VerticalShaft,
    BranchingPaths,
    BossChamber,
    SecretArea,
    RestArea,
}

impl RoomType {
    /// Pixel `(width, height)` of a room of this type.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Self::TransitionHub => (1000.0, 600.0),
            Self::PrecisionChallenge => (1400.0, 600.0),
            Self::VerticalShaft => (480.0, 1400.0),
            Self::BranchingPaths => (1600.0, 700.0),
            Self::BossChamber => (1200.0, 700.0),
            Self::SecretArea => (800.0, 500.0),
            Self::RestArea => (600.0, 400.0),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::TransitionHub => 0,
            Self::PrecisionChallenge => 1,
            Self::VerticalShaft => 2,
            Self::BranchingPaths => 3,
            Self::BossChamber => 4,
            Self::SecretArea => 5,
            Self::RestArea => 6,
        }
    }
}

/// Generation difficulty threaded explicitly through every generator call.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Difficulty(pub f32);

impl Difficulty {
    pub const BASELINE: Difficulty = Difficulty(1.0);

    pub fn value(self) -> f32 {
        self.0.max(0.0)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BASELINE
    }
}

//! The room graph: construction, lazy per-room generation and the transition protocol.
//!
//! Exactly one room is active at a time. Rooms are generated the first time they are
//! entered and kept for the rest of the session, so a revisit never reruns a generator.

mod builder;
mod integrity;

use std::collections::BTreeMap;
use std::mem;

use slotmap::SlotMap;
use thiserror::Error;

use crate::config::{ConfigError, WorldConfig};
use crate::mapgen::{
    CollectiblePlacement, EnemyPlacement, PlatformPlacement, RoomContent, RoomGenerator,
    RoomRequest,
};
use crate::types::{Difficulty, Direction, GridCoord, RoomId, RoomType, Vec2};

pub use builder::{BOSS_ROOM, START_ROOM, main_path_name};
pub use integrity::GraphIntegrityError;

/// Height above a platform surface at which an arriving player is placed.
pub const SPAWN_CLEARANCE: f32 = 32.0;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Integrity(#[from] GraphIntegrityError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomStatus {
    Undiscovered,
    Discovered,
    Completed,
}

#[derive(Clone, Debug)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub room_type: RoomType,
    pub grid: GridCoord,
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    pub difficulty: Difficulty,
    pub connections: BTreeMap<Direction, RoomId>,
    content: Option<RoomContent>,
    status: RoomStatus,
}

impl Room {
    fn new(
        id: RoomId,
        name: String,
        room_type: RoomType,
        grid: GridCoord,
        seed: u64,
        difficulty: Difficulty,
    ) -> Self {
        let (width, height) = room_type.dimensions();
        Self {
            id,
            name,
            room_type,
            grid,
            width,
            height,
            seed,
            difficulty,
            connections: BTreeMap::new(),
            content: None,
            status: RoomStatus::Undiscovered,
        }
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn is_discovered(&self) -> bool {
        self.status != RoomStatus::Undiscovered
    }

    pub fn is_completed(&self) -> bool {
        self.status == RoomStatus::Completed
    }

    pub fn is_generated(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&RoomContent> {
        self.content.as_ref()
    }

    pub fn platforms(&self) -> &[PlatformPlacement] {
        match &self.content {
            Some(content) => &content.platforms,
            None => &[],
        }
    }

    pub fn enemies(&self) -> &[EnemyPlacement] {
        match &self.content {
            Some(content) => &content.enemies,
            None => &[],
        }
    }

    pub fn collectibles(&self) -> &[CollectiblePlacement] {
        match &self.content {
            Some(content) => &content.collectibles,
            None => &[],
        }
    }

    pub fn neighbor(&self, direction: Direction) -> Option<RoomId> {
        self.connections.get(&direction).copied()
    }

    fn request(&self) -> RoomRequest {
        RoomRequest {
            room_type: self.room_type,
            seed: self.seed,
            difficulty: self.difficulty,
            exits: self.connections.keys().copied().collect(),
        }
    }

    /// Where a player arriving through `entry_side` lands: just above the standable
    /// platform closest to that side. Without a side, above the room's entry platform.
    pub fn spawn_point(&self, entry_side: Option<Direction>) -> Vec2 {
        let mut standable =
            self.platforms().iter().filter(|platform| !platform.is_vertical_surface());
        let Some(side) = entry_side else {
            return match standable.next() {
                Some(platform) => {
                    Vec2::new(platform.rect().center_x(), platform.position.y - SPAWN_CLEARANCE)
                }
                None => Vec2::new(self.width / 2.0, self.height / 2.0),
            };
        };

        let (dx, dy) = side.offset();
        let target = Vec2::new(
            (dx + 1) as f32 * self.width / 2.0,
            (dy + 1) as f32 * self.height / 2.0,
        );
        let landing = standable.min_by(|a, b| {
            distance_to_surface(a, target).total_cmp(&distance_to_surface(b, target))
        });
        match landing {
            Some(platform) => Vec2::new(
                target.x.clamp(platform.position.x, platform.right()),
                platform.position.y - SPAWN_CLEARANCE,
            ),
            None => Vec2::new(self.width / 2.0, self.height / 2.0),
        }
    }
}

fn distance_to_surface(platform: &PlatformPlacement, point: Vec2) -> f32 {
    let dx = point.x - point.x.clamp(platform.position.x, platform.right());
    let dy = point.y - platform.position.y;
    dx * dx + dy * dy
}

/// Result of a completed room change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEvent {
    pub from: RoomId,
    pub to: RoomId,
    /// Exit taken, or `None` for a direct [`WorldGraph::enter_room`].
    pub direction: Option<Direction>,
    pub spawn: Vec2,
}

/// One row of the world map, as a consuming layer would draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct MapEntry<'a> {
    pub id: RoomId,
    pub name: &'a str,
    pub room_type: RoomType,
    pub grid: GridCoord,
    pub status: RoomStatus,
    pub exits: Vec<Direction>,
}

pub struct WorldGraph {
    rooms: SlotMap<RoomId, Room>,
    names: BTreeMap<String, RoomId>,
    current: RoomId,
    generator: RoomGenerator,
    generation_count: usize,
}

impl WorldGraph {
    pub fn build(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let limits = config.envelope()?.reach_limits();
        let layout = builder::build_layout(config)?;
        integrity::check_graph(&layout.rooms)?;

        let mut world = Self {
            rooms: layout.rooms,
            names: layout.names,
            current: layout.start,
            generator: RoomGenerator::new(limits, config.repair),
            generation_count: 0,
        };
        world.ensure_generated(layout.start);
        if let Some(start) = world.rooms.get_mut(layout.start) {
            start.status = RoomStatus::Discovered;
        }
        log::info!(
            "built world of {} rooms from seed {} (reach {:.1}px, rise {:.1}px)",
            world.rooms.len(),
            config.seed,
            limits.max_gap,
            limits.max_rise
        );
        Ok(world)
    }

    pub fn current_room_id(&self) -> RoomId {
        self.current
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.names.get(name).and_then(|&id| self.rooms.get(id))
    }

    /// Rooms in construction order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of times a room generator has run this session.
    pub fn generation_count(&self) -> usize {
        self.generation_count
    }

    /// Per-tick check of the player's room-local position. Leaving the room across a side
    /// with a connection moves the player into the neighbour.
    ///
    /// A corner crossing prefers the diagonal exit, then the horizontal one, then the
    /// vertical one.
    pub fn update(&mut self, player_x: f32, player_y: f32) -> Option<TransitionEvent> {
        let room = self.current_room();
        let dx = side_of(player_x, room.width);
        let dy = side_of(player_y, room.height);
        let direction = [(dx, dy), (dx, 0), (0, dy)]
            .into_iter()
            .filter_map(|(x, y)| Direction::from_offset(x, y))
            .find(|direction| room.connections.contains_key(direction))?;
        self.transition(direction)
    }

    /// Moves through the active room's exit in `direction`. Without such an exit nothing
    /// changes and `None` is returned.
    pub fn transition(&mut self, direction: Direction) -> Option<TransitionEvent> {
        let target = self.current_room().neighbor(direction)?;
        self.activate(target, Some(direction))
    }

    /// Activates `id` directly, e.g. for a checkpoint respawn. A no-op for the active room.
    pub fn enter_room(&mut self, id: RoomId) -> Option<TransitionEvent> {
        self.activate(id, None)
    }

    /// Marks a discovered room completed. Returns whether the status changed.
    pub fn mark_room_completed(&mut self, id: RoomId) -> bool {
        match self.rooms.get_mut(id) {
            Some(room) if room.status == RoomStatus::Discovered => {
                room.status = RoomStatus::Completed;
                log::debug!("room `{}` completed", room.name);
                true
            }
            _ => false,
        }
    }

    /// Every room, ordered by grid row then column.
    pub fn world_map(&self) -> Vec<MapEntry<'_>> {
        let mut entries: Vec<MapEntry<'_>> = self
            .rooms
            .values()
            .map(|room| MapEntry {
                id: room.id,
                name: &room.name,
                room_type: room.room_type,
                grid: room.grid,
                status: room.status,
                exits: room.connections.keys().copied().collect(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.grid);
        entries
    }

    /// Generates every room not yet generated. Returns how many were built.
    pub fn pregenerate_all(&mut self) -> usize {
        let pending: Vec<RoomId> =
            self.rooms.iter().filter(|(_, room)| !room.is_generated()).map(|(id, _)| id).collect();
        for &id in &pending {
            self.ensure_generated(id);
        }
        pending.len()
    }

    fn activate(&mut self, target: RoomId, via: Option<Direction>) -> Option<TransitionEvent> {
        if target == self.current || !self.rooms.contains_key(target) {
            return None;
        }
        self.ensure_generated(target);
        let room = self.rooms.get_mut(target)?;
        if room.status == RoomStatus::Undiscovered {
            room.status = RoomStatus::Discovered;
        }
        let spawn = room.spawn_point(via.map(Direction::opposite));
        let from = mem::replace(&mut self.current, target);
        log::info!(
            "entered `{}` ({:?}) via {}",
            self.rooms[target].name,
            self.rooms[target].room_type,
            via.map_or_else(|| "direct entry".to_owned(), |direction| format!("{direction:?} exit"))
        );
        Some(TransitionEvent { from, to: target, direction: via, spawn })
    }

    fn ensure_generated(&mut self, id: RoomId) {
        let Some(room) = self.rooms.get_mut(id) else {
            return;
        };
        if room.content.is_some() {
            return;
        }
        let content = self.generator.generate(&room.request());
        log::debug!(
            "generated `{}`: {} platforms, {:?}",
            room.name,
            content.platforms.len(),
            content.provenance
        );
        room.content = Some(content);
        self.generation_count += 1;
    }
}

fn side_of(coordinate: f32, extent: f32) -> i32 {
    if coordinate < 0.0 {
        -1
    } else if coordinate > extent {
        1
    } else {
        0
    }
}

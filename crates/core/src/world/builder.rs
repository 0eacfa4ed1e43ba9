//! Authored world layout: start hub, linear main path and the fixed side branches.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::config::WorldConfig;
use crate::mapgen::derive_room_seed;
use crate::mapgen::progression::{main_path_difficulty, main_path_room_type};
use crate::types::{Difficulty, Direction, GridCoord, RoomId, RoomType};

use super::Room;
use super::integrity::GraphIntegrityError;

pub const START_ROOM: &str = "start";
pub const BOSS_ROOM: &str = "boss_chamber";

struct SideBranch {
    anchor: &'static str,
    direction: Direction,
    name: &'static str,
    room_type: RoomType,
}

const SIDE_BRANCHES: [SideBranch; 4] = [
    SideBranch {
        anchor: START_ROOM,
        direction: Direction::West,
        name: "western_alcove",
        room_type: RoomType::SecretArea,
    },
    SideBranch {
        anchor: "main_2",
        direction: Direction::North,
        name: "sky_cache",
        room_type: RoomType::SecretArea,
    },
    SideBranch {
        anchor: "main_4",
        direction: Direction::South,
        name: "quiet_grotto",
        room_type: RoomType::RestArea,
    },
    SideBranch {
        anchor: "main_6",
        direction: Direction::NorthWest,
        name: "hidden_vault",
        room_type: RoomType::SecretArea,
    },
];

pub fn main_path_name(path_index: usize) -> String {
    format!("main_{}", path_index + 1)
}

pub(super) struct WorldLayout {
    pub(super) rooms: SlotMap<RoomId, Room>,
    pub(super) names: BTreeMap<String, RoomId>,
    pub(super) start: RoomId,
}

pub(super) fn build_layout(config: &WorldConfig) -> Result<WorldLayout, GraphIntegrityError> {
    let mut builder = LayoutBuilder::new(config.seed);
    let start = builder.add_room(
        START_ROOM,
        RoomType::TransitionHub,
        GridCoord::new(0, 0),
        Difficulty(config.difficulty_start),
    )?;

    let mut previous = START_ROOM.to_owned();
    for path_index in 0..config.main_path_length {
        let name = main_path_name(path_index);
        let difficulty =
            main_path_difficulty(config.difficulty_start, config.difficulty_step, path_index);
        let room_type = main_path_room_type(path_index);
        builder.attach(&previous, Direction::East, &name, room_type, difficulty)?;
        previous = name;
    }

    for branch in &SIDE_BRANCHES {
        let Some(&anchor) = builder.names.get(branch.anchor) else {
            log::debug!(
                "skipping side branch `{}`: anchor `{}` not built",
                branch.name,
                branch.anchor
            );
            continue;
        };
        let difficulty = builder.rooms[anchor].difficulty;
        builder.attach(branch.anchor, branch.direction, branch.name, branch.room_type, difficulty)?;
    }

    let boss_difficulty = main_path_difficulty(
        config.difficulty_start,
        config.difficulty_step,
        config.main_path_length,
    );
    builder.attach(&previous, Direction::East, BOSS_ROOM, RoomType::BossChamber, boss_difficulty)?;

    Ok(WorldLayout { rooms: builder.rooms, names: builder.names, start })
}

struct LayoutBuilder {
    world_seed: u64,
    rooms: SlotMap<RoomId, Room>,
    names: BTreeMap<String, RoomId>,
    cells: BTreeMap<GridCoord, RoomId>,
}

impl LayoutBuilder {
    fn new(world_seed: u64) -> Self {
        Self {
            world_seed,
            rooms: SlotMap::with_key(),
            names: BTreeMap::new(),
            cells: BTreeMap::new(),
        }
    }

    fn add_room(
        &mut self,
        name: &str,
        room_type: RoomType,
        grid: GridCoord,
        difficulty: Difficulty,
    ) -> Result<RoomId, GraphIntegrityError> {
        if self.names.contains_key(name) {
            return Err(GraphIntegrityError::DuplicateName(name.to_owned()));
        }
        if let Some(&occupant) = self.cells.get(&grid) {
            return Err(GraphIntegrityError::GridCollision {
                first: self.rooms[occupant].name.clone(),
                second: name.to_owned(),
                cell: grid,
            });
        }

        let ordinal = u32::try_from(self.rooms.len()).unwrap_or(u32::MAX);
        let seed = derive_room_seed(self.world_seed, ordinal, room_type);
        let id = self.rooms.insert_with_key(|id| {
            Room::new(id, name.to_owned(), room_type, grid, seed, difficulty)
        });
        self.names.insert(name.to_owned(), id);
        self.cells.insert(grid, id);
        Ok(id)
    }

    /// Adds a room one grid step from `anchor` and links the two both ways.
    fn attach(
        &mut self,
        anchor: &str,
        direction: Direction,
        name: &str,
        room_type: RoomType,
        difficulty: Difficulty,
    ) -> Result<RoomId, GraphIntegrityError> {
        let anchor_id = *self
            .names
            .get(anchor)
            .ok_or_else(|| GraphIntegrityError::UnknownRoom(anchor.to_owned()))?;
        self.ensure_free(anchor_id, direction)?;
        let grid = self.rooms[anchor_id].grid.step(direction);
        let id = self.add_room(name, room_type, grid, difficulty)?;
        self.connect(anchor_id, direction, id)?;
        Ok(id)
    }

    fn connect(
        &mut self,
        from: RoomId,
        direction: Direction,
        to: RoomId,
    ) -> Result<(), GraphIntegrityError> {
        if from == to {
            return Err(GraphIntegrityError::SelfLink(self.rooms[from].name.clone()));
        }
        self.ensure_free(from, direction)?;
        self.ensure_free(to, direction.opposite())?;
        self.rooms[from].connections.insert(direction, to);
        self.rooms[to].connections.insert(direction.opposite(), from);
        Ok(())
    }

    fn ensure_free(&self, room: RoomId, direction: Direction) -> Result<(), GraphIntegrityError> {
        let room = &self.rooms[room];
        if room.connections.contains_key(&direction) {
            let room = room.name.clone();
            return Err(GraphIntegrityError::DirectionOccupied { room, direction });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(main_path_length: usize) -> WorldLayout {
        let config = WorldConfig { main_path_length, ..WorldConfig::with_seed(11) };
        build_layout(&config).expect("authored layout is consistent")
    }

    fn id(layout: &WorldLayout, name: &str) -> RoomId {
        layout.names[name]
    }

    #[test]
    fn main_path_runs_east_from_the_start_hub() {
        let layout = layout(8);
        let start = &layout.rooms[layout.start];
        assert_eq!(start.room_type, RoomType::TransitionHub);
        assert_eq!(start.connections[&Direction::East], id(&layout, "main_1"));

        for path_index in 0..8 {
            let room = &layout.rooms[id(&layout, &main_path_name(path_index))];
            assert_eq!(room.room_type, main_path_room_type(path_index));
            assert_eq!(room.grid, GridCoord::new(path_index as i32 + 1, 0));
        }
        let last = &layout.rooms[id(&layout, "main_8")];
        assert_eq!(last.connections[&Direction::East], id(&layout, BOSS_ROOM));
    }

    #[test]
    fn difficulty_rises_along_the_main_path() {
        let layout = layout(6);
        let difficulties: Vec<f32> = (0..6)
            .map(|index| layout.rooms[id(&layout, &main_path_name(index))].difficulty.value())
            .collect();
        assert!(difficulties.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(layout.rooms[id(&layout, BOSS_ROOM)].difficulty.value() > difficulties[5]);
    }

    #[test]
    fn side_branches_hang_off_their_anchors() {
        let layout = layout(8);
        assert_eq!(layout.rooms.len(), 1 + 8 + 4 + 1);
        let vault = &layout.rooms[id(&layout, "hidden_vault")];
        assert_eq!(vault.room_type, RoomType::SecretArea);
        assert_eq!(vault.connections[&Direction::SouthEast], id(&layout, "main_6"));
        assert_eq!(vault.grid, GridCoord::new(5, -1));
    }

    #[test]
    fn short_main_path_skips_branches_without_anchors() {
        let layout = layout(2);
        assert!(layout.names.contains_key("western_alcove"));
        assert!(layout.names.contains_key("sky_cache"));
        assert!(!layout.names.contains_key("quiet_grotto"));
        assert!(!layout.names.contains_key("hidden_vault"));
        let last = &layout.rooms[id(&layout, "main_2")];
        assert_eq!(last.connections[&Direction::East], id(&layout, BOSS_ROOM));
    }

    #[test]
    fn room_seeds_are_distinct_and_stable() {
        let first = layout(8);
        let second = layout(8);
        let mut seeds: Vec<u64> = first.rooms.values().map(|room| room.seed).collect();
        let again: Vec<u64> = second.rooms.values().map(|room| room.seed).collect();
        assert_eq!(seeds, again);
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), first.rooms.len());
    }

    #[test]
    fn builder_rejects_authoring_mistakes() {
        let mut builder = LayoutBuilder::new(0);
        let base = Difficulty::BASELINE;
        let hub = builder
            .add_room("hub", RoomType::TransitionHub, GridCoord::new(0, 0), base)
            .expect("first room");

        assert_eq!(
            builder.attach("nowhere", Direction::East, "lost", RoomType::RestArea, base),
            Err(GraphIntegrityError::UnknownRoom("nowhere".into()))
        );
        assert_eq!(
            builder.add_room("hub", RoomType::RestArea, GridCoord::new(3, 3), base),
            Err(GraphIntegrityError::DuplicateName("hub".into()))
        );
        assert!(matches!(
            builder.add_room("twin", RoomType::RestArea, GridCoord::new(0, 0), base),
            Err(GraphIntegrityError::GridCollision { .. })
        ));
        assert_eq!(
            builder.connect(hub, Direction::North, hub),
            Err(GraphIntegrityError::SelfLink("hub".into()))
        );

        builder
            .attach("hub", Direction::East, "east", RoomType::RestArea, base)
            .expect("free exit");
        assert_eq!(
            builder.attach("hub", Direction::East, "east_again", RoomType::RestArea, base),
            Err(GraphIntegrityError::DirectionOccupied {
                room: "hub".into(),
                direction: Direction::East
            })
        );
    }
}

use std::collections::BTreeMap;

use slotmap::SlotMap;
use thiserror::Error;

use crate::types::{Direction, GridCoord, RoomId};

use super::Room;

/// Authoring mistakes in the room graph. These are bugs in the world tables, not runtime
/// conditions, so construction stops at the first one found.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphIntegrityError {
    #[error("unknown room `{0}`")]
    UnknownRoom(String),
    #[error("room name `{0}` is used more than once")]
    DuplicateName(String),
    #[error("room `{room}` already has an exit to the {direction:?}")]
    DirectionOccupied { room: String, direction: Direction },
    #[error("room `{0}` links to itself")]
    SelfLink(String),
    #[error("rooms `{first}` and `{second}` share grid cell ({}, {})", .cell.x, .cell.y)]
    GridCollision { first: String, second: String, cell: GridCoord },
    #[error("exit {direction:?} from `{room}` has no matching return link")]
    Asymmetric { room: String, direction: Direction },
}

/// Checks the finished graph: every link resolves and is mirrored, nothing links to
/// itself, and no two rooms occupy one grid cell.
pub(super) fn check_graph(rooms: &SlotMap<RoomId, Room>) -> Result<(), GraphIntegrityError> {
    let mut cells: BTreeMap<GridCoord, &str> = BTreeMap::new();
    for (id, room) in rooms {
        if let Some(first) = cells.insert(room.grid, &room.name) {
            return Err(GraphIntegrityError::GridCollision {
                first: first.to_owned(),
                second: room.name.clone(),
                cell: room.grid,
            });
        }

        for (&direction, &neighbor) in &room.connections {
            if neighbor == id {
                return Err(GraphIntegrityError::SelfLink(room.name.clone()));
            }
            let mirrored = rooms
                .get(neighbor)
                .and_then(|other| other.connections.get(&direction.opposite()))
                .is_some_and(|&back| back == id);
            if !mirrored {
                return Err(GraphIntegrityError::Asymmetric { room: room.name.clone(), direction });
            }
        }
    }
    Ok(())
}

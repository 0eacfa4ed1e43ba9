pub mod config;
pub mod mapgen;
pub mod movement;
pub mod reachability;
pub mod types;
pub mod world;

pub use config::{ConfigError, WorldConfig};
pub use mapgen::{LayoutProvenance, RepairPolicy, RoomContent};
pub use movement::{MovementConstants, MovementEnvelope, ReachLimits};
pub use reachability::{ReachabilityReport, repair, repair_until_connected, validate};
pub use types::*;
pub use world::{
    GraphIntegrityError, MapEntry, Room, RoomStatus, TransitionEvent, WorldError, WorldGraph,
};

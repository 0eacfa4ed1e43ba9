//! Per-room content generation split into coherent submodules.

pub mod model;
pub mod progression;

mod branching;
mod fixed;
mod generator;
mod hub;
mod layout;
mod precision;
mod seed;
mod shaft;

pub use generator::{RepairPolicy, RoomGenerator, RoomRequest, fallback_layout};
pub use model::{
    CollectibleKind, CollectiblePlacement, EnemyKind, EnemyPlacement, LayoutProvenance,
    PlatformPlacement, PlatformType, Rect, RoomContent, first_overlap,
};
pub(crate) use seed::derive_room_seed;

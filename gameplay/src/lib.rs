//! World state that sits between a decoded map and the renderer: the wall
//! boundary segments derived from a `RawMap`, and the player moving through
//! them.

pub mod level;
pub mod play;

pub use gamemaps;
pub use glam;
pub use level::vector_map::{SIDE_SHADE, Segment, VectorMap};
pub use log;
pub use math::Angle;
pub use play::player::{MovementInput, PLAYER_RADIUS, PlayerState, ViewPoint};

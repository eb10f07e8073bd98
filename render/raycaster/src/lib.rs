//! Vector raycasting over a `VectorMap`.
//!
//! Every frame casts a fixed fan of rays from the viewer, finds the nearest
//! wall segment along each and projects it as one screen column. The work is
//! either done on the calling thread or split across a pool of workers, each
//! owning a contiguous run of rays:
//!
//! ```text
//!  rays  0 ............................................. N-1
//!        |  worker 0  |  worker 1  |  ...  | worker T-1 + rest |
//! ```
//!
//! Both paths run the same per-range loop so their output is identical.

mod cast;
mod caster;
mod error;
mod partition;
mod rays;
mod renderer;
mod single;
mod threaded;

pub use cast::{
    FrameView, Hit, MAX_RANGE, MAX_SHADE, MIN_DEPTH, SHADE_STEPS, WallColumn, banded_shade,
    cast_columns, cast_ray, column_for,
};
pub use caster::RayCaster;
pub use error::RaycastError;
pub use partition::RayPartition;
pub use rays::{RayRot, ray_rots};
pub use renderer::{CEILING_COLOUR, ColumnSlot, FLOOR_COLOUR, WolfRenderer, column_layout};
pub use single::SingleThreadCaster;
pub use threaded::ThreadedCaster;

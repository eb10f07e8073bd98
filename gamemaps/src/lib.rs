//! This crate loads the grid maps of the old tile based shooters: the
//! MAPHEAD/GAMEMAPS archive pair, the Carmack and RLEW compression used for
//! every plane, and the decoded `RawMap` grid.
//!
//! The archive is laid out like this:
//!
//! ```text,ignore
//!      MAPHEAD                         GAMEMAPS
//!   ┌────────────────┐            ┌──────────────────────┐
//!   │ rlew tag   u16 │            │ "TED5v1.0"           │
//!   │ ────────────── │            │ ──────────────────── │
//!   │ offset[0]  i32 ─────┐       │ ┌──────────────────┐ │
//!   │ offset[1]  i32 │    │       │ │ plane 0 bytes    │<──┐
//!   │      .         │    │       │ │ plane 1 bytes    │<──┤
//!   │      .         │    │       │ │ plane 2 bytes    │<──┤
//!   │ offset[99] i32 │    │       │ └──────────────────┘ │ │
//!   └────────────────┘    │       │ ┌──────────────────┐ │ │
//!                         └──────>│ │ plane_start[3]   ────┘
//!                                 │ │ plane_length[3]  │ │
//!                                 │ │ width, height    │ │
//!                                 │ │ name[16]         │ │
//!                                 │ └──────────────────┘ │
//!                                 │          .           │
//!                                 └──────────────────────┘
//! ```
//!
//! Each plane is `carmack(rlew(words))` with one word per cell. Plane 0 holds
//! wall codes, plane 1 object codes, and plane 2 is carried through as-is.

pub use glam::*;

pub mod archive;
pub mod ascii;
pub mod builder;
pub mod compression;
pub mod error;
pub mod raw_map;
pub mod tiles;

pub use crate::archive::{MapArchive, MapHeader};
pub use crate::builder::ArchiveBuilder;
pub use crate::compression::{carmack_compress, carmack_expand, rlew_compress, rlew_expand};
pub use crate::error::{FormatError, InvariantError, MapError, MapResult};
pub use crate::raw_map::{BlockType, RawMap, Spawn};
pub use crate::tiles::{DoorKind, Facing, WallKind, wall_colour};

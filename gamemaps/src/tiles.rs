//! Meaning of the raw codes found in the wall and object planes.

use std::f32::consts::{FRAC_PI_2, PI};

/// Highest code (exclusive) that blocks movement. Everything at or above is
/// a floor area marker.
pub const FIRST_FLOOR_CODE: u16 = 107;
pub const AMBUSH_CODE: u16 = 106;

/// Object plane codes for the player start, one per facing
pub const SPAWN_NORTH: u16 = 19;
pub const SPAWN_EAST: u16 = 20;
pub const SPAWN_SOUTH: u16 = 21;
pub const SPAWN_WEST: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorKind {
    Vertical,
    Horizontal,
    GoldKeyVertical,
    GoldKeyHorizontal,
    SilverKeyVertical,
    SilverKeyHorizontal,
    ElevatorVertical,
    ElevatorHorizontal,
}

/// Classification of a wall plane code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallKind {
    Nothing,
    /// A solid wall with its texture code
    Solid(u16),
    Door(DoorKind),
    /// Floor tile that marks deaf guards
    Ambush,
    /// Floor area number, used by the game for sound propagation
    Floor(u16),
}

impl WallKind {
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => WallKind::Nothing,
            90 => WallKind::Door(DoorKind::Vertical),
            91 => WallKind::Door(DoorKind::Horizontal),
            92 => WallKind::Door(DoorKind::GoldKeyVertical),
            93 => WallKind::Door(DoorKind::GoldKeyHorizontal),
            94 => WallKind::Door(DoorKind::SilverKeyVertical),
            95 => WallKind::Door(DoorKind::SilverKeyHorizontal),
            100 => WallKind::Door(DoorKind::ElevatorVertical),
            101 => WallKind::Door(DoorKind::ElevatorHorizontal),
            AMBUSH_CODE => WallKind::Ambush,
            c if c >= FIRST_FLOOR_CODE => WallKind::Floor(c),
            c => WallKind::Solid(c),
        }
    }

    /// Doors are treated as always open and ambush tiles as plain floor, so
    /// both are cleared when a map is built.
    pub fn is_transient(&self) -> bool {
        matches!(self, WallKind::Door(_) | WallKind::Ambush)
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, WallKind::Solid(_))
    }
}

/// Which way the player faces at the start position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn from_object(code: u16) -> Option<Self> {
        match code {
            SPAWN_NORTH => Some(Facing::North),
            SPAWN_EAST => Some(Facing::East),
            SPAWN_SOUTH => Some(Facing::South),
            SPAWN_WEST => Some(Facing::West),
            _ => None,
        }
    }

    pub fn object_code(&self) -> u16 {
        match self {
            Facing::North => SPAWN_NORTH,
            Facing::East => SPAWN_EAST,
            Facing::South => SPAWN_SOUTH,
            Facing::West => SPAWN_WEST,
        }
    }

    /// Radians in a y-down grid, so north points at -y
    pub fn orientation(&self) -> f32 {
        match self {
            Facing::North => 3.0 * FRAC_PI_2,
            Facing::East => 0.0,
            Facing::South => FRAC_PI_2,
            Facing::West => PI,
        }
    }
}

/// Flat base colour used for a wall texture code
pub fn wall_colour(code: u16) -> [u8; 3] {
    match code {
        // grey stone and brick, elevator
        1 | 2 | 3 | 4 | 6 | 21 | 22 | 27 | 28 | 35 | 37 | 39 | 43 | 49 | 53 | 85 => [160, 160, 160],
        // dirty brick
        24 | 26 => [160, 160, 90],
        // cells and blue walls
        5 | 7 | 8 | 9 | 34 | 36 | 40 | 41 => [64, 80, 224],
        10 | 11 | 12 | 23 | 48 => [106, 70, 34],
        13 => [0, 154, 56],
        14 | 15 | 50 | 51 => [24, 148, 148],
        16 => [124, 246, 246],
        17 | 18 | 20 | 38 => [160, 0, 0],
        19 | 25 => [160, 0, 160],
        29 | 30 | 31 | 32 | 42 | 44 | 45 | 46 | 47 => [220, 162, 128],
        33 => [252, 248, 92],
        _ => [255, 255, 255],
    }
}

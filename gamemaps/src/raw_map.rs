use std::fmt;

use glam::{IVec2, Vec2};
use log::{debug, info};

use crate::error::{FormatError, InvariantError, MapError, MapResult};
use crate::tiles::{Facing, WallKind};

/// The three plane values of one grid cell
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockType {
    pub wall: u16,
    pub object: u16,
    /// Third plane, carried through untouched
    pub extra: u16,
}

impl BlockType {
    pub const fn new(wall: u16, object: u16, extra: u16) -> Self {
        Self {
            wall,
            object,
            extra,
        }
    }

    pub fn wall_kind(&self) -> WallKind {
        WallKind::from_code(self.wall)
    }
}

/// Player start cell and the way it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub cell: IVec2,
    pub facing: Facing,
}

/// A decoded map grid. Cells are stored row by row, `y * width + x`, with y
/// growing downward. Doors and ambush tiles are cleared on construction and
/// the grid never changes afterwards.
pub struct RawMap {
    name: String,
    width: usize,
    height: usize,
    cells: Vec<BlockType>,
    spawn: Spawn,
}

impl fmt::Debug for RawMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nRawMap {{\n  name: {},\n  width: {},\n  height: {},\n  spawn: {:?},\n}}",
            self.name, self.width, self.height, self.spawn
        )
    }
}

impl RawMap {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        mut cells: Vec<BlockType>,
    ) -> MapResult<Self> {
        let name = name.into();
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| FormatError::BadHeader(format!("map size {width}x{height} overflows")))?;
        if cells.len() != expected {
            return Err(FormatError::LengthMismatch {
                what: "map cells",
                expected,
                actual: cells.len(),
            }
            .into());
        }

        let mut cleared = 0;
        for cell in cells.iter_mut() {
            if cell.wall_kind().is_transient() {
                cell.wall = 0;
                cleared += 1;
            }
        }
        debug!("{name}: cleared {cleared} door and ambush tiles");

        let spawn = find_spawn(width, &cells)?;
        info!(
            "Map {name} ({width}x{height}), start at {} facing {:?}",
            spawn.cell, spawn.facing
        );

        Ok(Self {
            name,
            width,
            height,
            cells,
            spawn,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[BlockType] {
        &self.cells
    }

    #[inline]
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// The cell at `(x, y)`. Asking outside the grid is a logic error and is
    /// reported rather than clamped.
    pub fn block(&self, x: i32, y: i32) -> MapResult<&BlockType> {
        if !self.is_within_bounds(x, y) {
            return Err(MapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(&self.cells[y as usize * self.width + x as usize])
    }

    /// True for solid walls. Anything outside the grid is not a wall.
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.block(x, y)
            .map(|b| b.wall_kind().is_solid())
            .unwrap_or(false)
    }

    pub fn spawn(&self) -> Spawn {
        self.spawn
    }

    /// Centre of the start cell
    pub fn spawn_pos(&self) -> Vec2 {
        self.spawn.cell.as_vec2() + Vec2::splat(0.5)
    }

    pub fn spawn_orientation(&self) -> f32 {
        self.spawn.facing.orientation()
    }
}

fn find_spawn(width: usize, cells: &[BlockType]) -> MapResult<Spawn> {
    let mut found: Option<Spawn> = None;
    for (i, cell) in cells.iter().enumerate() {
        let Some(facing) = Facing::from_object(cell.object) else {
            continue;
        };
        let (x, y) = (i % width, i / width);
        if let Some(first) = found {
            return Err(InvariantError::MultipleSpawns {
                first_x: first.cell.x as usize,
                first_y: first.cell.y as usize,
                x,
                y,
            }
            .into());
        }
        found = Some(Spawn {
            cell: IVec2::new(x as i32, y as i32),
            facing,
        });
    }
    found.ok_or_else(|| InvariantError::NoSpawn.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{SPAWN_EAST, SPAWN_NORTH};

    fn open_grid(w: usize, h: usize) -> Vec<BlockType> {
        vec![BlockType::default(); w * h]
    }

    #[test]
    fn spawn_east_at_3_4() {
        let mut cells = open_grid(8, 8);
        cells[4 * 8 + 3].object = SPAWN_EAST;
        let map = RawMap::new("test", 8, 8, cells).unwrap();
        assert_eq!(map.spawn().cell, IVec2::new(3, 4));
        assert_eq!(map.spawn().facing, Facing::East);
        assert_eq!(map.spawn_pos(), Vec2::new(3.5, 4.5));
        assert_eq!(map.spawn_orientation(), 0.0);
    }

    #[test]
    fn missing_spawn() {
        let err = RawMap::new("test", 4, 4, open_grid(4, 4)).unwrap_err();
        assert!(matches!(err, MapError::Invariant(InvariantError::NoSpawn)));
    }

    #[test]
    fn two_spawns() {
        let mut cells = open_grid(4, 4);
        cells[1].object = SPAWN_EAST;
        cells[9].object = SPAWN_NORTH;
        let err = RawMap::new("test", 4, 4, cells).unwrap_err();
        assert!(matches!(
            err,
            MapError::Invariant(InvariantError::MultipleSpawns {
                first_x: 1,
                first_y: 0,
                x: 1,
                y: 2
            })
        ));
    }

    #[test]
    fn doors_and_ambush_are_cleared() {
        let mut cells = open_grid(3, 1);
        cells[0] = BlockType::new(90, 0, 0);
        cells[1] = BlockType::new(106, SPAWN_EAST, 7);
        cells[2] = BlockType::new(1, 0, 0);
        let map = RawMap::new("test", 3, 1, cells).unwrap();
        assert_eq!(map.block(0, 0).unwrap().wall, 0);
        assert_eq!(*map.block(1, 0).unwrap(), BlockType::new(0, SPAWN_EAST, 7));
        assert!(map.is_wall(2, 0));
        assert!(!map.is_wall(0, 0));
    }

    #[test]
    fn bounds() {
        let mut cells = open_grid(2, 2);
        cells[0] = BlockType::new(1, SPAWN_EAST, 0);
        let map = RawMap::new("test", 2, 2, cells).unwrap();
        assert!(map.is_within_bounds(1, 1));
        assert!(!map.is_within_bounds(2, 0));
        assert!(!map.is_within_bounds(-1, 0));
        assert!(matches!(
            map.block(0, 2),
            Err(MapError::OutOfBounds { x: 0, y: 2, .. })
        ));
        assert!(!map.is_wall(-1, -1));
        assert!(!map.is_wall(5, 0));
        assert!(map.is_wall(0, 0));
    }

    #[test]
    fn cell_count_must_match() {
        let err = RawMap::new("test", 3, 3, open_grid(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            MapError::Format(FormatError::LengthMismatch { expected: 9, actual: 4, .. })
        ));
    }

    #[test]
    fn overflowing_size() {
        let err = RawMap::new("test", usize::MAX, 2, open_grid(2, 2)).unwrap_err();
        assert!(matches!(err, MapError::Format(FormatError::BadHeader(_))));
    }
}

use gamemaps::{RawMap, wall_colour};
use glam::Vec2;
use log::debug;

/// East and west faces are darkened by this much to fake a light direction
pub const SIDE_SHADE: f32 = 0.625;

/// One exposed face of a wall cell. `colour` already has `shade` applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub colour: [u8; 3],
    pub shade: f32,
}

impl Segment {
    /// `colour` scaled by `factor`, rounded to the nearest channel value
    #[inline]
    pub fn scaled_colour(&self, factor: f32) -> [u8; 3] {
        self.colour
            .map(|c| (c as f32 * factor).round().clamp(0.0, 255.0) as u8)
    }
}

#[derive(Clone, Copy)]
enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    fn neighbour(self, x: i32, y: i32) -> (i32, i32) {
        match self {
            Side::North => (x, y - 1),
            Side::South => (x, y + 1),
            Side::West => (x - 1, y),
            Side::East => (x + 1, y),
        }
    }

    /// Edge endpoints, wound clockwise around the cell in a y-down grid
    fn edge(self, x: f32, y: f32) -> (Vec2, Vec2) {
        match self {
            Side::North => (Vec2::new(x, y), Vec2::new(x + 1.0, y)),
            Side::South => (Vec2::new(x + 1.0, y + 1.0), Vec2::new(x, y + 1.0)),
            Side::West => (Vec2::new(x, y + 1.0), Vec2::new(x, y)),
            Side::East => (Vec2::new(x + 1.0, y), Vec2::new(x + 1.0, y + 1.0)),
        }
    }

    fn shade(self) -> f32 {
        match self {
            Side::North | Side::South => 1.0,
            Side::West | Side::East => SIDE_SHADE,
        }
    }
}

/// Every wall face that borders open floor or the edge of the map. Built once
/// per map and shared read-only by everything that casts rays.
#[derive(Debug, Clone)]
pub struct VectorMap {
    segments: Vec<Segment>,
    width: f32,
    height: f32,
    diagonal_length: f32,
}

impl VectorMap {
    pub fn new(map: &RawMap) -> Self {
        let mut segments = Vec::new();
        for y in 0..map.height() as i32 {
            for x in 0..map.width() as i32 {
                if !map.is_wall(x, y) {
                    continue;
                }
                let Ok(block) = map.block(x, y) else {
                    continue;
                };
                let base = wall_colour(block.wall);

                for side in Side::ALL {
                    let (nx, ny) = side.neighbour(x, y);
                    // is_wall is false past the edge, so border walls get faces
                    if map.is_wall(nx, ny) {
                        continue;
                    }
                    let (a, b) = side.edge(x as f32, y as f32);
                    let shade = side.shade();
                    let colour = base.map(|c| (c as f32 * shade).round() as u8);
                    segments.push(Segment {
                        a,
                        b,
                        colour,
                        shade,
                    });
                }
            }
        }

        let width = map.width() as f32;
        let height = map.height() as f32;
        debug!("{}: {} wall segments", map.name(), segments.len());
        Self {
            segments,
            width,
            height,
            diagonal_length: (width * width + height * height).sqrt(),
        }
    }

    /// Wrap segments that did not come from a grid
    pub fn from_segments(segments: Vec<Segment>, width: f32, height: f32) -> Self {
        Self {
            segments,
            width,
            height,
            diagonal_length: (width * width + height * height).sqrt(),
        }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Colour of segment `index` scaled by `factor`
    pub fn colour(&self, index: usize, factor: f32) -> Option<[u8; 3]> {
        self.segments.get(index).map(|s| s.scaled_colour(factor))
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn diagonal_length(&self) -> f32 {
        self.diagonal_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamemaps::RawMap;

    #[test]
    fn lone_wall_has_four_faces() {
        let map = RawMap::from_ascii("3 3\n...\n.#.\n..e\n").unwrap();
        let vmap = VectorMap::new(&map);
        let segs = vmap.segments();
        assert_eq!(segs.len(), 4);

        let find = |a: Vec2, b: Vec2| segs.iter().find(|s| s.a == a && s.b == b).unwrap();
        let north = find(Vec2::new(1.0, 1.0), Vec2::new(2.0, 1.0));
        let south = find(Vec2::new(2.0, 2.0), Vec2::new(1.0, 2.0));
        let west = find(Vec2::new(1.0, 2.0), Vec2::new(1.0, 1.0));
        let east = find(Vec2::new(2.0, 1.0), Vec2::new(2.0, 2.0));

        assert_eq!(north.colour, [160, 160, 160]);
        assert_eq!(south.shade, 1.0);
        assert_eq!(west.shade, SIDE_SHADE);
        assert_eq!(east.colour, [100, 100, 100]);
    }

    #[test]
    fn buried_wall_has_no_faces() {
        // Centre cell of a solid 3x3 block, open ring around it
        let text = "5 5\n....e\n.###.\n.###.\n.###.\n.....\n";
        let map = RawMap::from_ascii(text).unwrap();
        let vmap = VectorMap::new(&map);
        // Only the 12 outward faces of the block's rim
        assert_eq!(vmap.segments().len(), 12);
        let touches_centre = vmap.segments().iter().any(|s| {
            let mid = (s.a + s.b) / 2.0;
            mid.x > 1.5 && mid.x < 3.5 && mid.y > 1.5 && mid.y < 3.5
        });
        assert!(!touches_centre);
    }

    #[test]
    fn map_edge_counts_as_open() {
        let map = RawMap::from_ascii("2 1\n#e\n").unwrap();
        let vmap = VectorMap::new(&map);
        assert_eq!(vmap.segments().len(), 4);
        assert_eq!(vmap.width(), 2.0);
        assert_eq!(vmap.height(), 1.0);
        assert!((vmap.diagonal_length() - 5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn scaled_colour_rounds() {
        let map = RawMap::from_ascii("2 1\n#e\n").unwrap();
        let vmap = VectorMap::new(&map);
        assert_eq!(vmap.colour(0, 0.5), Some([80, 80, 80]));
        assert_eq!(vmap.colour(0, 1.0 / 3.0), Some([53, 53, 53]));
        assert_eq!(vmap.colour(99, 1.0), None);
    }
}

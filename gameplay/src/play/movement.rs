//! Collision against the wall grid.

use gamemaps::RawMap;
use glam::Vec2;

/// True if the axis aligned box of half size `radius` around `pos` overlaps
/// any wall cell
pub fn box_hits_wall(map: &RawMap, pos: Vec2, radius: f32) -> bool {
    let min = (pos - Vec2::splat(radius)).floor().as_ivec2();
    let max = (pos + Vec2::splat(radius)).floor().as_ivec2();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            if map.is_wall(x, y) {
                return true;
            }
        }
    }
    false
}

/// Apply `step` one axis at a time, dropping whichever axis would end inside
/// a wall. This lets the player slide along walls instead of sticking.
pub fn clip_move(map: &RawMap, pos: Vec2, step: Vec2, radius: f32) -> Vec2 {
    let mut out = pos;
    let try_x = Vec2::new(out.x + step.x, out.y);
    if step.x != 0.0 && !box_hits_wall(map, try_x, radius) {
        out = try_x;
    }
    let try_y = Vec2::new(out.x, out.y + step.y);
    if step.y != 0.0 && !box_hits_wall(map, try_y, radius) {
        out = try_y;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> RawMap {
        RawMap::from_ascii("5 3\n#####\n#e..#\n#####\n").unwrap()
    }

    #[test]
    fn box_overlap() {
        let map = corridor();
        assert!(!box_hits_wall(&map, Vec2::new(1.5, 1.5), 0.25));
        assert!(box_hits_wall(&map, Vec2::new(1.5, 1.1), 0.25));
        assert!(box_hits_wall(&map, Vec2::new(3.9, 1.5), 0.25));
    }

    #[test]
    fn slides_along_wall() {
        let map = corridor();
        // Diagonal push in to the north wall keeps the x part
        let out = clip_move(&map, Vec2::new(1.5, 1.5), Vec2::new(0.5, -0.5), 0.25);
        assert_eq!(out, Vec2::new(2.0, 1.5));
    }

    #[test]
    fn outside_the_grid_is_open() {
        // Nothing past the edge counts as a wall, matching `is_wall`
        let map = RawMap::from_ascii("2 1\ne.\n").unwrap();
        let out = clip_move(&map, Vec2::new(1.5, 0.5), Vec2::new(3.0, 0.0), 0.25);
        assert_eq!(out, Vec2::new(4.5, 0.5));
    }
}

use std::sync::Arc;

use gameplay::VectorMap;

use crate::RaycastError;
use crate::cast::{FrameView, WallColumn, cast_columns};
use crate::partition::RayPartition;
use crate::rays::{RayRot, ray_rots};

/// Casts every ray on the calling thread
pub struct SingleThreadCaster {
    map: Arc<VectorMap>,
    rots: Vec<RayRot>,
    partition: RayPartition,
    columns: Vec<WallColumn>,
}

impl SingleThreadCaster {
    pub fn new(map: Arc<VectorMap>, fov_rad: f32, rays: usize) -> Result<Self, RaycastError> {
        let rots = ray_rots(fov_rad, rays)?;
        Ok(Self {
            map,
            rots,
            partition: RayPartition::new(rays, 1)?,
            columns: vec![WallColumn::default(); rays],
        })
    }

    pub fn rays(&self) -> usize {
        self.rots.len()
    }

    pub fn map(&self) -> &Arc<VectorMap> {
        &self.map
    }

    pub fn cast(&mut self, frame: &FrameView) -> &[WallColumn] {
        let range = self.partition.range(0);
        cast_columns(
            frame,
            &self.rots,
            range.start,
            &self.map,
            &mut self.columns[range],
        );
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamemaps::RawMap;
    use gameplay::ViewPoint;
    use glam::Vec2;

    #[test]
    fn casts_every_ray() {
        let map = RawMap::from_ascii("4 4\n####\n#e.#\n#..#\n####\n").unwrap();
        let vmap = Arc::new(VectorMap::new(&map));
        let mut caster = SingleThreadCaster::new(vmap, 1.0, 32).unwrap();
        assert_eq!(caster.rays(), 32);

        let frame = FrameView::new(
            &ViewPoint {
                pos: map.spawn_pos(),
                dir: Vec2::new(1.0, 0.0),
            },
            200.0,
        );
        let cols = caster.cast(&frame);
        assert_eq!(cols.len(), 32);
        // Enclosed room, every ray ends on a wall
        assert!(cols.iter().all(|c| c.is_hit() && c.height > 0.0));
    }

    #[test]
    fn needs_two_rays() {
        let vmap = Arc::new(VectorMap::from_segments(Vec::new(), 1.0, 1.0));
        assert!(matches!(
            SingleThreadCaster::new(vmap, 1.0, 1),
            Err(RaycastError::TooFewRays(1))
        ));
    }
}

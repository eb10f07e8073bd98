use std::sync::Arc;

use gameplay::VectorMap;
use log::info;

use crate::RaycastError;
use crate::cast::{FrameView, WallColumn};
use crate::single::SingleThreadCaster;
use crate::threaded::ThreadedCaster;

/// The casting strategy, picked once when the scene is built
pub enum RayCaster {
    Single(SingleThreadCaster),
    Threaded(ThreadedCaster),
}

impl RayCaster {
    /// One thread or fewer casts on the caller's thread
    pub fn new(
        map: Arc<VectorMap>,
        fov_rad: f32,
        rays: usize,
        threads: usize,
    ) -> Result<Self, RaycastError> {
        let caster = if threads <= 1 {
            RayCaster::Single(SingleThreadCaster::new(map, fov_rad, rays)?)
        } else {
            RayCaster::Threaded(ThreadedCaster::new(map, fov_rad, rays, threads)?)
        };
        info!(
            "Raycaster: {rays} rays over {:.1}°, {} thread(s)",
            fov_rad.to_degrees(),
            caster.threads()
        );
        Ok(caster)
    }

    pub fn rays(&self) -> usize {
        match self {
            RayCaster::Single(c) => c.rays(),
            RayCaster::Threaded(c) => c.rays(),
        }
    }

    pub fn threads(&self) -> usize {
        match self {
            RayCaster::Single(_) => 1,
            RayCaster::Threaded(c) => c.threads(),
        }
    }

    pub fn map(&self) -> &Arc<VectorMap> {
        match self {
            RayCaster::Single(c) => c.map(),
            RayCaster::Threaded(c) => c.map(),
        }
    }

    pub fn cast(&mut self, frame: &FrameView) -> Result<&[WallColumn], RaycastError> {
        match self {
            RayCaster::Single(c) => Ok(c.cast(frame)),
            RayCaster::Threaded(c) => c.cast(frame),
        }
    }
}

//! The per-ray work shared by every caster: find the nearest wall segment
//! along a ray, then project it on to the camera plane.

use gameplay::{VectorMap, ViewPoint};
use glam::Vec2;
use math::{distance_from_line, rotate, segment_intersection};

use crate::rays::RayRot;

/// Length of the probe segment cast for every ray, in map cells
pub const MAX_RANGE: f32 = 100.0;
/// Depths at or below zero are clamped to this
pub const MIN_DEPTH: f32 = 1.0e-4;
/// Darkest a column can get, as a fraction taken off full brightness
pub const MAX_SHADE: f32 = 0.75;
/// Shade is banded in to this many steps over `MAX_SHADE`
pub const SHADE_STEPS: u32 = 8;

/// A view snapshot plus the camera plane through it. Copied to every worker
/// at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub pos: Vec2,
    pub dir: Vec2,
    /// `pos` plus `dir` turned -90°
    pub cam1: Vec2,
    /// `pos` plus `dir` turned +90°
    pub cam2: Vec2,
    pub screen_height: f32,
}

impl FrameView {
    pub fn new(view: &ViewPoint, screen_height: f32) -> Self {
        Self {
            pos: view.pos,
            dir: view.dir,
            cam1: view.pos + rotate(view.dir, -1.0, 0.0),
            cam2: view.pos + rotate(view.dir, 1.0, 0.0),
            screen_height,
        }
    }
}

/// Nearest wall hit by one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Vec2,
    /// Straight line distance from the viewer
    pub distance: f32,
    pub segment: usize,
}

/// Projection of one ray's hit, ready to hand to a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallColumn {
    pub height: f32,
    pub y_offset: f32,
    /// Index in to `VectorMap::segments`, `None` if the ray hit nothing
    pub segment: Option<usize>,
    pub shade: f32,
    /// Distance from the camera plane, not from the viewer
    pub depth: f32,
}

impl WallColumn {
    pub fn miss(screen_height: f32) -> Self {
        Self {
            height: 0.0,
            y_offset: screen_height / 2.0,
            segment: None,
            shade: 0.0,
            depth: MAX_RANGE,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.segment.is_some()
    }
}

impl Default for WallColumn {
    fn default() -> Self {
        Self::miss(0.0)
    }
}

/// `1 - min(MAX_SHADE, ratio)`, floored to a multiple of `MAX_SHADE / SHADE_STEPS`
#[inline]
pub fn banded_shade(height_ratio: f32) -> f32 {
    let step = MAX_SHADE / SHADE_STEPS as f32;
    let shade = 1.0 - height_ratio.min(MAX_SHADE);
    (shade / step).floor() * step
}

/// Test the ray against every segment and keep the closest crossing. Rays
/// running parallel to a segment never hit it.
pub fn cast_ray(frame: &FrameView, rot: &RayRot, map: &VectorMap) -> Option<Hit> {
    let ray_dir = rotate(frame.dir, rot.sin, rot.cos);
    let end = frame.pos + ray_dir * MAX_RANGE;

    let mut nearest: Option<Hit> = None;
    for (i, seg) in map.segments().iter().enumerate() {
        let Some(point) = segment_intersection(frame.pos, end, seg.a, seg.b) else {
            continue;
        };
        let distance = frame.pos.distance(point);
        if nearest.is_none_or(|n| distance < n.distance) {
            nearest = Some(Hit {
                point,
                distance,
                segment: i,
            });
        }
    }
    nearest
}

/// Project a hit on to the screen. Depth is measured from the camera plane
/// so off-centre rays don't bulge.
pub fn column_for(frame: &FrameView, hit: Option<Hit>) -> WallColumn {
    let Some(hit) = hit else {
        return WallColumn::miss(frame.screen_height);
    };

    let depth = distance_from_line(frame.cam1, frame.cam2, hit.point).max(MIN_DEPTH);
    let height = frame.screen_height / depth;
    WallColumn {
        height,
        y_offset: (frame.screen_height - height) / 2.0,
        segment: Some(hit.segment),
        shade: banded_shade(height / frame.screen_height),
        depth,
    }
}

/// Cast rays `first_ray..first_ray + out.len()` in to `out`. Every caster
/// runs exactly this loop over its range.
pub fn cast_columns(
    frame: &FrameView,
    rots: &[RayRot],
    first_ray: usize,
    map: &VectorMap,
    out: &mut [WallColumn],
) {
    let rots = &rots[first_ray..first_ray + out.len()];
    for (col, rot) in out.iter_mut().zip(rots) {
        *col = column_for(frame, cast_ray(frame, rot, map));
    }
}

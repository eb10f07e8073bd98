use std::sync::Arc;

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use gameplay::{VectorMap, ViewPoint};
use log::trace;
use render_trait::{BufferSize, ColumnRecord, ColumnSink, SceneRenderer};

use crate::RaycastError;
use crate::caster::RayCaster;
use crate::cast::FrameView;

pub const CEILING_COLOUR: [u8; 3] = [57, 57, 57];
pub const FLOOR_COLOUR: [u8; 3] = [115, 115, 115];

/// Where one ray's column lands on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    pub x: u32,
    pub width: u32,
}

/// Spread `rays` columns over `screen_width` pixels. Columns are rounded up in
/// width so neighbours overlap rather than leave gaps.
pub fn column_layout(screen_width: usize, rays: usize) -> Vec<ColumnSlot> {
    if rays == 0 {
        return Vec::new();
    }
    let width = screen_width.div_ceil(rays) as u32;
    (0..rays)
        .map(|i| ColumnSlot {
            x: (i * screen_width / rays) as u32,
            width,
        })
        .collect()
}

/// Flat shaded walls over a two tone floor and ceiling
pub struct WolfRenderer {
    caster: RayCaster,
    map: Arc<VectorMap>,
    size: BufferSize,
    layout: Vec<ColumnSlot>,
}

impl WolfRenderer {
    pub fn new(caster: RayCaster, size: BufferSize) -> Self {
        let map = Arc::clone(caster.map());
        let layout = column_layout(size.width_usize(), caster.rays());
        Self {
            caster,
            map,
            size,
            layout,
        }
    }

    pub fn caster(&self) -> &RayCaster {
        &self.caster
    }

    pub fn size(&self) -> BufferSize {
        self.size
    }

    pub fn layout(&self) -> &[ColumnSlot] {
        &self.layout
    }
}

impl SceneRenderer for WolfRenderer {
    type Error = RaycastError;

    fn resize(&mut self, size: BufferSize) {
        self.size = size;
        self.layout = column_layout(size.width_usize(), self.caster.rays());
    }

    fn redraw(&mut self, view: &ViewPoint, sink: &mut impl ColumnSink) -> Result<(), Self::Error> {
        #[cfg(feature = "hprof")]
        profile!("wolf_redraw");
        let width = self.size.width_f32();
        let half = self.size.half_height_f32();
        sink.fill_band(0.0, half, width, CEILING_COLOUR);
        sink.fill_band(half, self.size.height_f32() - half, width, FLOOR_COLOUR);

        let frame = FrameView::new(view, self.size.height_f32());
        let columns = self.caster.cast(&frame)?;

        let mut drawn = 0;
        for (col, slot) in columns.iter().zip(&self.layout) {
            let Some(segment) = col.segment else {
                continue;
            };
            let Some(colour) = self.map.colour(segment, col.shade) else {
                continue;
            };
            sink.draw_column(&ColumnRecord {
                screen_x: slot.x,
                width: slot.width,
                height: col.height,
                y_offset: col.y_offset,
                colour,
            });
            drawn += 1;
        }
        trace!("redraw: {drawn}/{} columns hit", columns.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamemaps::RawMap;
    use glam::Vec2;
    use render_trait::RecordingSink;

    #[test]
    fn layout_covers_screen() {
        let slots = column_layout(640, 320);
        assert_eq!(slots.len(), 320);
        assert_eq!(slots[0], ColumnSlot { x: 0, width: 2 });
        assert_eq!(slots[319].x, 638);

        let slots = column_layout(100, 3);
        assert_eq!(
            slots,
            vec![
                ColumnSlot { x: 0, width: 34 },
                ColumnSlot { x: 33, width: 34 },
                ColumnSlot { x: 66, width: 34 },
            ]
        );
        let last = slots[2];
        assert!(last.x + last.width >= 100);
    }

    #[test]
    fn redraw_emits_bands_then_columns() {
        let map = RawMap::from_ascii("5 5\n#####\n#...#\n#.n.#\n#...#\n#####\n").unwrap();
        let vmap = Arc::new(VectorMap::new(&map));
        let caster = RayCaster::new(vmap, 1.0, 40, 2).unwrap();
        let mut renderer = WolfRenderer::new(caster, BufferSize::new(320, 200));

        let view = ViewPoint {
            pos: map.spawn_pos(),
            dir: Vec2::new(0.0, -1.0),
        };
        let mut sink = RecordingSink::default();
        renderer.redraw(&view, &mut sink).unwrap();

        assert_eq!(sink.bands.len(), 2);
        assert_eq!(sink.bands[0].colour, CEILING_COLOUR);
        assert_eq!(sink.bands[1].colour, FLOOR_COLOUR);
        assert_eq!(sink.bands[1].y, 100.0);
        assert_eq!(sink.columns.len(), 40);
        assert!(sink.columns.windows(2).all(|w| w[0].screen_x < w[1].screen_x));

        renderer.resize(BufferSize::new(80, 50));
        sink.clear();
        renderer.redraw(&view, &mut sink).unwrap();
        assert_eq!(sink.columns[39].screen_x, 78);
        assert_eq!(sink.columns[0].width, 2);
    }

    #[test]
    fn misses_are_skipped() {
        let vmap = Arc::new(VectorMap::from_segments(Vec::new(), 4.0, 4.0));
        let caster = RayCaster::new(vmap, 1.0, 10, 1).unwrap();
        let mut renderer = WolfRenderer::new(caster, BufferSize::new(100, 100));
        let mut sink = RecordingSink::default();
        renderer
            .redraw(
                &ViewPoint {
                    pos: Vec2::splat(2.0),
                    dir: Vec2::new(1.0, 0.0),
                },
                &mut sink,
            )
            .unwrap();
        assert_eq!(sink.bands.len(), 2);
        assert!(sink.columns.is_empty());
    }
}

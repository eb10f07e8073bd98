use std::sync::Arc;

use gamemaps::{ArchiveBuilder, BlockType, MapArchive, RawMap};
use gameplay::{MovementInput, PlayerState, VectorMap};
use render_raycast::{FrameView, RayCaster, SingleThreadCaster, ThreadedCaster, WolfRenderer};
use render_trait::{BufferSize, RecordingSink, SceneRenderer};

const W: u16 = 24;
const H: u16 = 16;

/// A walled room with a pillar block, a door and a spawn facing north
fn archive() -> MapArchive {
    let mut cells = Vec::with_capacity(W as usize * H as usize);
    for y in 0..H {
        for x in 0..W {
            let wall = if x == 0 || y == 0 || x == W - 1 || y == H - 1 {
                1 + (x % 3)
            } else if (8..11).contains(&x) && (5..8).contains(&y) {
                8
            } else if x == 16 && y == 4 {
                90
            } else {
                108
            };
            let object = if x == 4 && y == 12 { 19 } else { 0 };
            cells.push(BlockType::new(wall, object, 0));
        }
    }
    let (maphead, gamemaps) = ArchiveBuilder::new(0xABCD)
        .add_blocks("Pipeline", W, H, &cells)
        .build()
        .unwrap();
    MapArchive::from_bytes(&maphead, gamemaps).unwrap()
}

/// Walks forward while turning right
struct ForwardRight;

impl MovementInput for ForwardRight {
    fn forward(&self) -> bool {
        true
    }
    fn backward(&self) -> bool {
        false
    }
    fn left(&self) -> bool {
        false
    }
    fn right(&self) -> bool {
        true
    }
}

#[test]
fn archive_to_columns() {
    let archive = archive();
    assert_eq!(archive.map_names(), vec!["Pipeline"]);
    let map: RawMap = archive.load_map(0).unwrap();
    assert_eq!(map.spawn_pos(), glam::Vec2::new(4.5, 12.5));
    // The door cell was cleared
    assert!(!map.is_wall(16, 4));

    let vmap = Arc::new(VectorMap::new(&map));
    assert!(!vmap.segments().is_empty());

    let mut player = PlayerState::new(&map, 60.0, 3.0, 1.5);
    let mut single = SingleThreadCaster::new(vmap.clone(), player.fov_rad(), 120).unwrap();
    let mut threaded = ThreadedCaster::new(vmap.clone(), player.fov_rad(), 120, 3).unwrap();

    for _ in 0..20 {
        player.animate_clipped(28.0, &ForwardRight, &map);
        let frame = FrameView::new(&player.view(), 200.0);
        let a = single.cast(&frame).to_vec();
        let b = threaded.cast(&frame).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x.segment, y.segment);
            assert!((x.depth - y.depth).abs() < 1e-5);
        }
        // Closed room, nothing escapes
        assert!(a.iter().all(|c| c.is_hit()));
    }
}

#[test]
fn renderer_draws_a_full_frame() {
    let map = archive().load_map(0).unwrap();
    let vmap = Arc::new(VectorMap::new(&map));
    let player = PlayerState::new(&map, 66.0, 3.0, 1.5);

    let caster = RayCaster::new(vmap, player.fov_rad(), 160, 4).unwrap();
    let mut renderer = WolfRenderer::new(caster, BufferSize::new(320, 200));
    let mut sink = RecordingSink::default();
    renderer.redraw(&player.view(), &mut sink).unwrap();

    assert_eq!(sink.bands.len(), 2);
    assert_eq!(sink.columns.len(), 160);
    let last = sink.columns[159];
    assert!(last.screen_x + last.width >= 320);
    for col in &sink.columns {
        assert!(col.height > 0.0);
        assert!((col.y_offset - (200.0 - col.height) / 2.0).abs() < 1e-3);
    }
}

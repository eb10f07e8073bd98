use std::sync::Arc;

use gamemaps::RawMap;
use gameplay::log::{debug, info};
use gameplay::{PlayerState, VectorMap};
use input::{Input, ScriptedInput};
use render_raycast::{RayCaster, RaycastError, WolfRenderer};
use render_trait::{BufferSize, ColumnSink, SceneRenderer};

/// Everything fixed when a scene is built
#[derive(Debug, Clone)]
pub struct SceneOptions {
    pub fov_deg: f32,
    pub rays: usize,
    pub threads: usize,
    pub size: BufferSize,
    pub move_speed: f32,
    pub rot_speed: f32,
    pub clip: bool,
}

/// A loaded map with a player walking through it and a renderer looking out
/// of the player's eyes
pub struct Scene {
    map: RawMap,
    player: PlayerState,
    renderer: WolfRenderer,
    input: Input,
    script: Option<ScriptedInput>,
    clip: bool,
}

impl Scene {
    pub fn new(
        map: RawMap,
        options: &SceneOptions,
        input: Input,
        script: Option<ScriptedInput>,
    ) -> Result<Self, RaycastError> {
        let vmap = Arc::new(VectorMap::new(&map));
        info!(
            "{}: {} wall segments over {}x{}",
            map.name(),
            vmap.segments().len(),
            map.width(),
            map.height()
        );
        let player = PlayerState::new(&map, options.fov_deg, options.move_speed, options.rot_speed);
        let caster = RayCaster::new(vmap, player.fov_rad(), options.rays, options.threads)?;
        let renderer = WolfRenderer::new(caster, options.size);
        Ok(Self {
            map,
            player,
            renderer,
            input,
            script,
            clip: options.clip,
        })
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Feed the next scripted frame to the input and move the player
    pub fn update(&mut self, dt_ms: f32) {
        if let Some(script) = self.script.as_mut() {
            self.input.update(script);
        }
        if self.clip {
            self.player.animate_clipped(dt_ms, &self.input, &self.map);
        } else {
            self.player.animate(dt_ms, &self.input);
        }
        debug!(
            "player at {:?} facing {:.3}",
            self.player.pos(),
            self.player.orientation()
        );
    }

    pub fn draw(&mut self, sink: &mut impl ColumnSink) -> Result<(), RaycastError> {
        let view = self.player.view();
        self.renderer.redraw(&view, sink)
    }
}

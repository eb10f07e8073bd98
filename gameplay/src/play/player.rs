use gamemaps::RawMap;
use glam::Vec2;
use math::Angle;

use super::movement::clip_move;

/// Half the side of the box the player occupies when collision is enabled
pub const PLAYER_RADIUS: f32 = 0.25;

/// The four held-key queries the player polls once per `animate`
pub trait MovementInput {
    fn forward(&self) -> bool;
    fn backward(&self) -> bool;
    fn left(&self) -> bool;
    fn right(&self) -> bool;
}

/// Per frame snapshot of where the player stands and looks. Taken before ray
/// casting starts so the casters never see the player mid-update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    pub pos: Vec2,
    /// Unit length
    pub dir: Vec2,
}

/// `1.0`, `-1.0`, or `0.0` when both or neither are held
#[inline]
fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pos: Vec2,
    orientation: Angle,
    /// Always `orientation.unit()`
    dir: Vec2,
    /// Map cells per second
    move_speed: f32,
    /// Radians per second
    rot_speed: f32,
    fov_rad: f32,
}

impl PlayerState {
    /// Stand in the middle of the map's start cell, facing its direction
    pub fn new(map: &RawMap, fov_deg: f32, move_speed: f32, rot_speed: f32) -> Self {
        let orientation = Angle::new(map.spawn_orientation());
        Self {
            pos: map.spawn_pos(),
            orientation,
            dir: orientation.unit(),
            move_speed,
            rot_speed,
            fov_rad: fov_deg.to_radians(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    /// Radians in `[0, 2π)`
    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation.rad()
    }

    pub fn fov_rad(&self) -> f32 {
        self.fov_rad
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn rot_speed(&self) -> f32 {
        self.rot_speed
    }

    pub fn set_orientation(&mut self, radians: f32) {
        self.orientation = Angle::new(radians);
        self.dir = self.orientation.unit();
    }

    pub fn view(&self) -> ViewPoint {
        ViewPoint {
            pos: self.pos,
            dir: self.dir,
        }
    }

    /// Translation this frame would apply along the current direction
    fn step(&self, dt_ms: f32, input: &impl MovementInput) -> Vec2 {
        let sign = axis(input.forward(), input.backward());
        self.dir * self.move_speed * (dt_ms / 1000.0) * sign
    }

    fn turn(&mut self, dt_ms: f32, input: &impl MovementInput) {
        let sign = axis(input.right(), input.left());
        if sign != 0.0 {
            self.orientation += self.rot_speed * (dt_ms / 1000.0) * sign;
            self.dir = self.orientation.unit();
        }
    }

    /// Move then turn with no regard for walls
    pub fn animate(&mut self, dt_ms: f32, input: &impl MovementInput) {
        self.pos += self.step(dt_ms, input);
        self.turn(dt_ms, input);
    }

    /// As `animate`, but each axis of the move is dropped if it would put
    /// the player's box inside a wall
    pub fn animate_clipped(&mut self, dt_ms: f32, input: &impl MovementInput, map: &RawMap) {
        let step = self.step(dt_ms, input);
        self.pos = clip_move(map, self.pos, step, PLAYER_RADIUS);
        self.turn(dt_ms, input);
    }
}

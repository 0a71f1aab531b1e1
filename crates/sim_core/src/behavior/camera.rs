//! Camera behaviors: target tracking and keyboard rotation

use super::Behavior;
use crate::entity::Camera;
use crate::foundation::math::Vec2;
use crate::input::KeyCode;
use crate::state::GameState;

/// Scale applied to the elapsed seconds before tweening
pub const TRACKING_TIME_SCALE: f64 = 100.0;

/// Eases the camera toward centering its target.
///
/// Each tick moves the camera by `delta * tween * dt * 100`, rounded away
/// from zero to a whole unit and never past the target. The rounding makes
/// small residual offsets close in whole steps instead of creeping forever;
/// with a tiny tween the camera still advances one unit per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraUpdateBehavior;

impl CameraUpdateBehavior {
    /// Create the tracking behavior
    pub fn new() -> Self {
        Self
    }

    /// Displacement applied for one tick given the centering offset
    pub fn step(delta: Vec2, tween: f64, dt: f64) -> Vec2 {
        let factor = (tween * dt * TRACKING_TIME_SCALE).clamp(0.0, 1.0);
        Vec2::new(axis_step(delta.x, factor), axis_step(delta.y, factor))
    }
}

fn axis_step(delta: f64, factor: f64) -> f64 {
    if delta == 0.0 || factor == 0.0 || !delta.is_finite() {
        return 0.0;
    }
    let magnitude = (delta.abs() * factor).ceil().min(delta.abs());
    magnitude.copysign(delta)
}

impl Behavior<Camera> for CameraUpdateBehavior {
    fn update(&mut self, state: &mut GameState, camera: &mut Camera, dt: f64) {
        let Some(target) = camera.target().and_then(|name| state.entities.get(name)) else {
            log::trace!("Camera '{}' has no resolvable target this tick", camera.name());
            return;
        };
        let step = Self::step(camera.tracking_delta(target), camera.tween(), dt);
        camera.position += step;
    }
}

/// Rotates the camera from the keyboard during the input phase
#[derive(Debug, Clone, Copy)]
pub struct CameraInputBehavior {
    step: f64,
    rotate_left: KeyCode,
    rotate_right: KeyCode,
    reset: KeyCode,
}

impl CameraInputBehavior {
    /// `1` and `2` rotate by 0.01 rad per tick, `0` resets
    pub fn new() -> Self {
        Self {
            step: 0.01,
            rotate_left: KeyCode::Num1,
            rotate_right: KeyCode::Num2,
            reset: KeyCode::Num0,
        }
    }

    /// Change the rotation step in radians
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

impl Default for CameraInputBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior<Camera> for CameraInputBehavior {
    fn input(&mut self, state: &mut GameState, camera: &mut Camera) {
        if state.is_key_held(self.rotate_left) {
            camera.rotation += self.step;
        }
        if state.is_key_held(self.rotate_right) {
            camera.rotation -= self.step;
        }
        if state.is_key_held(self.reset) {
            camera.set_rotation(0.0);
        }
    }
}

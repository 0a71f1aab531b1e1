//! Behavior dispatch
//!
//! A [`Behavior`] is a unit of per-entity logic with three phase entry points.
//! Entities hold an ordered list of boxed behaviors; the engine runs them
//! through [`dispatch`], which lends each behavior the entity it belongs to
//! together with the rest of the game state.
//!
//! Behaviors are infallible. Optional attributes are read through defaulted
//! accessors and a missing named entity turns the call into a no-op.

pub mod camera;
pub mod enemy;
pub mod player;
pub mod score;

pub use camera::{CameraInputBehavior, CameraUpdateBehavior};
pub use enemy::EnemyFollowerBehavior;
pub use player::PlayerInputBehavior;
pub use score::ScoreUpdateBehavior;

use crate::entity::GameEntity;
use crate::render::Surface;
use crate::state::GameState;

/// Per-entity logic invoked once per phase per tick
///
/// `T` is the host type: [`GameEntity`] for ordinary entities,
/// [`Camera`](crate::entity::Camera) for camera behaviors.
pub trait Behavior<T = GameEntity> {
    /// Name used in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Input phase: read held keys, queue forces, request exit
    fn input(&mut self, _state: &mut GameState, _entity: &mut T) {}

    /// Update phase, run by the integrator after the entity has moved
    fn update(&mut self, _state: &mut GameState, _entity: &mut T, _dt: f64) {}

    /// Draw phase, run by the renderer before the entity's plugin
    fn draw(&mut self, _state: &GameState, _entity: &T, _surface: &mut dyn Surface) {}
}

/// Type that owns an ordered list of behaviors
pub trait BehaviorHost: Sized {
    /// Behaviors in dispatch order
    fn behaviors_mut(&mut self) -> &mut Vec<Box<dyn Behavior<Self>>>;
}

/// Run `call` for every behavior of `host`, in order.
///
/// The list is detached from the host for the duration of the walk so each
/// behavior can borrow the host mutably. Behaviors added by a call are kept
/// and run from the next dispatch on.
pub fn dispatch<T: BehaviorHost>(host: &mut T, mut call: impl FnMut(&mut dyn Behavior<T>, &mut T)) {
    let mut behaviors = std::mem::take(host.behaviors_mut());
    for behavior in &mut behaviors {
        call(behavior.as_mut(), host);
    }
    let added = std::mem::replace(host.behaviors_mut(), behaviors);
    host.behaviors_mut().extend(added);
}

/// Input phase for every live entity, children after parents, then the camera
pub fn run_input_phase(state: &mut GameState) {
    for key in state.entities.keys() {
        state.with_entity(key, input_recursive);
    }
    state.with_camera(|state, camera| dispatch(camera, |b, c| b.input(state, c)));
}

fn input_recursive(state: &mut GameState, entity: &mut GameEntity) {
    dispatch(entity, |b, e| b.input(state, e));
    for child in entity.children_mut() {
        input_recursive(state, child);
    }
}

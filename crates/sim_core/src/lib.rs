//! # Sim Core
//!
//! A real-time 2D simulation core: named entities driven by pluggable
//! behaviors, Newtonian integration inside a bounded world, influence zones
//! that add forces and swap materials, and a camera that smoothly tracks a
//! target.
//!
//! ## Features
//!
//! - **Entities**: named game entities with free-form attributes and children
//! - **Behaviors**: input, update and draw hooks attached per entity or camera
//! - **Physics**: gravity, influence zones, material friction and bouncing
//! - **Camera**: tweened target tracking with rotation
//! - **Rendering**: plugin-dispatched drawing on any [`render::Surface`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sim_core::prelude::*;
//!
//! struct Bouncing;
//!
//! impl Scene for Bouncing {
//!     fn name(&self) -> &str {
//!         "bouncing"
//!     }
//!
//!     fn create(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let ball = GameEntity::new("ball")
//!             .with_position(Vec2::new(160.0, 20.0))
//!             .with_material(Material::new("rubber", 1.0, 0.9, 1.0));
//!         engine.add_entity(ball)?;
//!         engine.set_camera(Camera::new("camera").with_target("ball"));
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(Configuration::new());
//!     engine.load_scene(&mut Bouncing)?;
//!     let mut surface = RecordingSurface::new(320.0, 200.0);
//!     while !engine.is_exit_requested() {
//!         engine.frame(std::time::Duration::from_millis(16), &mut surface)?;
//!         surface.reset();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod error;
pub mod config;
pub mod input;
pub mod entity;
pub mod behavior;
pub mod physics;
pub mod render;
pub mod state;
pub mod i18n;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Scene};
pub use engine::Engine;
pub use error::SimError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Engine, Scene, SimError,
        behavior::{
            Behavior, CameraInputBehavior, CameraUpdateBehavior, EnemyFollowerBehavior, PlayerInputBehavior,
            ScoreUpdateBehavior,
        },
        config::Configuration,
        entity::{Camera, EntityKey, GameEntity, ShapeKind},
        foundation::{
            math::{Vec2, Vec2Ext},
            time::Timer,
        },
        i18n::Messages,
        input::KeyCode,
        physics::{InfluenceZone, Material, World},
        render::{Color, RecordingSurface, Surface},
        state::GameState,
    };
}

#[cfg(test)]
mod tests;

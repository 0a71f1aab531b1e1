//! Physics module: materials, bounds, world, influence zones and the integrator

pub mod bounds;
pub mod engine;
pub mod influencer;
pub mod material;
pub mod world;

pub use bounds::Bounds;
pub use engine::PhysicEngine;
pub use influencer::{Influence, InfluenceZone};
pub use material::Material;
pub use world::World;

//! Play area, gravity, ambient material and influence zone registry

use super::{Bounds, Influence, Material};
use crate::config::Configuration;
use crate::entity::{EntityRegistry, GameEntity};
use crate::foundation::math::Vec2;

/// Default play-area extent on both axes
pub const DEFAULT_PLAY_AREA: f64 = 800.0;

/// Bounded world with its origin fixed at `(0, 0)`
#[derive(Debug, Clone)]
pub struct World {
    play_area: Vec2,
    /// Global gravity, read fresh every tick
    pub gravity: Vec2,
    /// Ambient material; its friction damps entities that stay in bounds
    pub material: Material,
    influencers: Vec<String>,
}

impl World {
    /// Create a world with the default ambient material
    pub fn new(play_area: Vec2, gravity: Vec2) -> Self {
        Self {
            play_area,
            gravity,
            material: Material::new("defaultWorldMaterial", 1.0, 1.0, 1.0),
            influencers: Vec::new(),
        }
    }

    /// Build a world from `game.world.*` keys
    pub fn from_config(config: &Configuration) -> Self {
        let width = config.get_double("game.world.width", DEFAULT_PLAY_AREA);
        let height = config.get_double("game.world.height", DEFAULT_PLAY_AREA);
        let gravity = config.get_vector2d("game.world.gravity", Vec2::zeros());
        let world = Self::new(Vec2::new(width, height), gravity);
        let material = config.get_material("game.world.material", world.material.clone());
        log::info!(
            "World {}x{} gravity ({}, {}) material {}",
            width,
            height,
            gravity.x,
            gravity.y,
            material
        );
        world.with_material(material)
    }

    /// Builder: ambient material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Play-area extents
    pub fn play_area(&self) -> Vec2 {
        self.play_area
    }

    /// Play-area width
    pub fn width(&self) -> f64 {
        self.play_area.x
    }

    /// Play-area height
    pub fn height(&self) -> f64 {
        self.play_area.y
    }

    /// Reverse the vertical gravity component
    pub fn flip_gravity(&mut self) {
        self.gravity.y = -self.gravity.y;
    }

    /// Whether any part of the entity box lies outside the play area
    pub fn is_not_containing(&self, entity: &GameEntity) -> bool {
        entity.position.x < 0.0
            || entity.position.x + entity.size.x > self.play_area.x
            || entity.position.y < 0.0
            || entity.position.y + entity.size.y > self.play_area.y
    }

    /// Register an influence zone by entity name; order defines the material tie-break
    pub fn register_influencer(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.influencers.contains(&name) {
            log::debug!("Registered influencer '{}'", name);
            self.influencers.push(name);
        }
    }

    /// Forget an influence zone
    pub fn unregister_influencer(&mut self, name: &str) {
        self.influencers.retain(|n| n != name);
    }

    /// Registered influencer names in registration order
    pub fn influencers(&self) -> &[String] {
        &self.influencers
    }

    /// Live influencers overlapping `bounds`, in registration order
    pub fn overlapping<'a>(
        &'a self,
        registry: &'a EntityRegistry,
        bounds: &'a Bounds,
    ) -> impl Iterator<Item = &'a GameEntity> + 'a {
        self.influencers
            .iter()
            .filter_map(|name| registry.get(name))
            .filter(move |zone| zone.bounds().intersects(bounds))
    }

    /// Forces and overriding material from every zone overlapping `bounds`
    pub fn influence_on(&self, registry: &EntityRegistry, bounds: &Bounds) -> Influence {
        let mut influence = Influence::default();
        for zone in self.overlapping(registry, bounds).filter_map(GameEntity::influence_zone) {
            influence.absorb(zone);
        }
        influence
    }
}

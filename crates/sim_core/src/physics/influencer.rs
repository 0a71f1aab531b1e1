//! Influence zones
//!
//! An influencer is a [`GameEntity`](crate::entity::GameEntity) whose variant
//! carries an [`InfluenceZone`]. Every tick, each physical entity whose bounds
//! overlap the zone receives the zone's forces, and the zone's material (if
//! any) overrides the entity's effective friction and density for that tick.

use crate::foundation::math::Vec2;
use crate::physics::Material;

/// Forces and optional material injected into overlapping entities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfluenceZone {
    /// Forces appended to every overlapping entity, in order
    pub forces: Vec<Vec2>,
    /// Overriding material for overlapping entities
    pub material: Option<Material>,
}

impl InfluenceZone {
    /// Empty zone: no forces, no material
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a force to the zone
    pub fn with_force(mut self, force: Vec2) -> Self {
        self.forces.push(force);
        self
    }

    /// Set the overriding material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
}

/// Accumulated influence on one entity for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Influence {
    /// Forces from every overlapping zone, in registry order
    pub forces: Vec<Vec2>,
    /// Material of the last overlapping zone that carries one
    pub material: Option<Material>,
}

impl Influence {
    /// Fold one overlapping zone into the accumulated influence
    pub fn absorb(&mut self, zone: &InfluenceZone) {
        self.forces.extend_from_slice(&zone.forces);
        if let Some(material) = &zone.material {
            self.material = Some(material.clone());
        }
    }

    /// Friction and density after applying the overriding material to `base`
    pub fn effective_coefficients(&self, base: &Material) -> (f64, f64) {
        let friction = base.friction * self.material.as_ref().map_or(1.0, |m| m.friction);
        let density = base.density * self.material.as_ref().map_or(1.0, |m| m.density);
        (friction, density)
    }
}

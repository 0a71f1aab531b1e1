//! Physical materials
//!
//! A material is the density/elasticity/friction triple that governs how an
//! entity reacts to forces and to the play-area boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named physical coefficients shared by entities and the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Material name, used in diagnostics
    pub name: String,

    /// Scales the effective mass during acceleration computation
    pub density: f64,

    /// Bounce-back factor on boundary collision (`speed *= -elasticity`)
    pub elasticity: f64,

    /// Per-tick damping multiplier applied to speed (`speed *= friction`)
    pub friction: f64,
}

impl Material {
    /// Create a new material
    pub fn new(name: impl Into<String>, density: f64, elasticity: f64, friction: f64) -> Self {
        Self {
            name: name.into(),
            density,
            elasticity,
            friction,
        }
    }

    /// Copy of this material with a different friction
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Copy of this material with a different elasticity
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Copy of this material with a different density
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default", 1.0, 1.0, 1.0)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{{{:4.2},{:4.2},{:4.2}}}",
            self.name, self.density, self.elasticity, self.friction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let m = Material::new("playerMat", 1.0, 0.21, 1.0);
        assert_eq!(m.to_string(), "playerMat:{1.00,0.21,1.00}");
    }

    #[test]
    fn test_builders_leave_other_fields() {
        let m = Material::default().with_friction(0.5).with_elasticity(0.7);
        assert_eq!(m.name, "default");
        assert_eq!(m.density, 1.0);
        assert_eq!(m.elasticity, 0.7);
        assert_eq!(m.friction, 0.5);
    }
}

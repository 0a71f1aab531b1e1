//! Enemies that chase a named target when it comes close

use super::Behavior;
use crate::entity::GameEntity;
use crate::foundation::math::Vec2Ext;
use crate::state::GameState;

/// Attribute: radius within which the target attracts the entity
pub const ATTRACTION_DISTANCE: &str = "attraction.distance";
/// Attribute: magnitude of the attraction force
pub const ATTRACTION_FORCE: &str = "attraction.force";

/// Pulls the entity toward its target while the target is within range.
///
/// Distance and force come from the entity's attributes and default to zero,
/// which disables the behavior.
#[derive(Debug, Clone)]
pub struct EnemyFollowerBehavior {
    target: String,
}

impl EnemyFollowerBehavior {
    /// Follow the entity named `target`
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }
}

impl Default for EnemyFollowerBehavior {
    fn default() -> Self {
        Self::new("player")
    }
}

impl Behavior for EnemyFollowerBehavior {
    fn update(&mut self, state: &mut GameState, entity: &mut GameEntity, _dt: f64) {
        let Some(target) = state.entities.get(&self.target) else {
            log::trace!("'{}' has no target '{}' this tick", entity.name(), self.target);
            return;
        };
        let distance = entity.attributes().f64_or(ATTRACTION_DISTANCE, 0.0);
        let force = entity.attributes().f64_or(ATTRACTION_FORCE, 0.0);

        if target.position.distance_to(&(entity.position + target.size * 0.5)) < distance {
            let pull = (target.position - entity.position).normalize_or_zero() * force;
            entity.add_force(pull);
        }
    }
}

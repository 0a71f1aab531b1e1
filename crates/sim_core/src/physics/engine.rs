//! Newtonian integrator
//!
//! One call to [`PhysicEngine::update`] advances every live entity by one
//! tick: forces are accumulated, blended with overlapping influence zones,
//! turned into clamped acceleration and speed, and integrated into position.
//! Entity update behaviors run inline, then every entity is kept inside the
//! play area and finally the camera behaviors track their target.

use super::{Influence, World};
use crate::behavior::dispatch;
use crate::config::Configuration;
use crate::entity::game_entity::{MAX_ACCELERATION, MAX_SPEED};
use crate::entity::GameEntity;
use crate::error::SimError;
use crate::foundation::math::{Vec2, Vec2Ext};
use crate::state::GameState;

/// Multiplier applied to world gravity when none is configured
pub const DEFAULT_GRAVITY_SCALE: f64 = 1.0;

/// Stateless integrator; all mutable state lives in [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicEngine {
    gravity_scale: f64,
}

impl PhysicEngine {
    /// Integrator with unscaled gravity
    pub fn new() -> Self {
        Self {
            gravity_scale: DEFAULT_GRAVITY_SCALE,
        }
    }

    /// Read `game.physic.gravity.scale`
    pub fn from_config(config: &Configuration) -> Self {
        Self::new().with_gravity_scale(config.get_double("game.physic.gravity.scale", DEFAULT_GRAVITY_SCALE))
    }

    /// Builder: gravity multiplier
    pub fn with_gravity_scale(mut self, scale: f64) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Gravity multiplier
    pub fn gravity_scale(&self) -> f64 {
        self.gravity_scale
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// A contract violation on any entity aborts the tick and is returned;
    /// entities already processed keep their new state.
    pub fn update(&self, state: &mut GameState, dt: f64) -> Result<(), SimError> {
        let keys = state.entities.keys();
        for key in &keys {
            state
                .with_entity(*key, |state, entity| self.update_entity(state, entity, dt))
                .transpose()?;
        }
        for key in &keys {
            if let Some(entity) = state.entities.get_by_key_mut(*key) {
                Self::constrain_to_world(&state.world, entity)?;
            }
        }
        state.with_camera(|state, camera| dispatch(camera, |b, c| b.update(state, c, dt)));
        Ok(())
    }

    /// Integrate one entity and its children, then run its update behaviors
    pub fn update_entity(&self, state: &mut GameState, entity: &mut GameEntity, dt: f64) -> Result<(), SimError> {
        if entity.is_integrated() {
            self.integrate(state, entity, dt)?;
        } else {
            entity.forces.clear();
        }

        dispatch(entity, |b, e| b.update(state, e, dt));
        entity.update_bounds();

        for child in entity.children_mut() {
            self.update_entity(state, child, dt)?;
        }
        Ok(())
    }

    fn integrate(&self, state: &GameState, entity: &mut GameEntity, dt: f64) -> Result<(), SimError> {
        let material = entity.required_material()?.clone();
        let max_speed = entity.required_f64(MAX_SPEED)?;
        let max_acceleration = entity.required_f64(MAX_ACCELERATION)?;

        entity.add_force(state.world.gravity * self.gravity_scale);
        let influence = self.influence(state, entity);
        entity.add_forces(&influence.forces);

        let (friction, density) = influence.effective_coefficients(&material);

        entity.acceleration = (Vec2::zeros().add_all(&entity.forces) * (entity.mass * density))
            .clamp_magnitude(max_acceleration);
        entity.speed = ((entity.speed + entity.acceleration * dt) * friction).clamp_magnitude(max_speed);
        entity.position += entity.speed * dt;
        entity.forces.clear();

        log::trace!(
            "{}: acc=({:.3},{:.3}) spd=({:.3},{:.3}) pos=({:.3},{:.3}) friction={:.3}",
            entity.name(),
            entity.acceleration.x,
            entity.acceleration.y,
            entity.speed.x,
            entity.speed.y,
            entity.position.x,
            entity.position.y,
            friction
        );
        Ok(())
    }

    /// Influence zones acting on `entity` at its current bounds
    pub fn influence(&self, state: &GameState, entity: &GameEntity) -> Influence {
        state.world.influence_on(&state.entities, entity.bounds())
    }

    /// Keep an entity inside the play area.
    ///
    /// An entity found outside is clamped back on each offending axis and its
    /// speed on that axis is reflected once by its own elasticity. An entity
    /// larger than the play area is pinned to the origin side. An entity that
    /// stayed inside is damped by the world's ambient friction instead.
    pub fn constrain_to_world(world: &World, entity: &mut GameEntity) -> Result<(), SimError> {
        if !entity.is_integrated() {
            return Ok(());
        }
        let elasticity = entity.required_material()?.elasticity;
        let area = world.play_area();

        if world.is_not_containing(entity) {
            let size = entity.size;
            contain_axis(&mut entity.position.x, &mut entity.speed.x, size.x, area.x, elasticity);
            contain_axis(&mut entity.position.y, &mut entity.speed.y, size.y, area.y, elasticity);
            entity.update_bounds();
        } else {
            entity.speed *= world.material.friction;
        }
        Ok(())
    }
}

fn contain_axis(position: &mut f64, speed: &mut f64, size: f64, extent: f64, elasticity: f64) {
    let clamped = position.min(extent - size).max(0.0);
    if clamped != *position {
        *position = clamped;
        *speed *= -elasticity;
    }
}

impl Default for PhysicEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{InfluenceZone, Material};
    use approx::assert_relative_eq;

    fn unit() -> Material {
        Material::new("unit", 1.0, 1.0, 1.0)
    }

    fn mover(name: &str) -> GameEntity {
        GameEntity::new(name)
            .with_position(Vec2::new(100.0, 100.0))
            .with_size(Vec2::new(10.0, 10.0))
            .with_material(unit())
            .with_attribute(MAX_SPEED, 1000.0)
            .with_attribute(MAX_ACCELERATION, 1000.0)
    }

    fn state(gravity: Vec2) -> GameState {
        GameState::new(World::new(Vec2::new(400.0, 400.0), gravity))
    }

    #[test]
    fn test_fixed_force_integration() {
        let mut state = state(Vec2::zeros());
        let mut e = mover("e").with_mass(2.0);
        e.add_force(Vec2::new(3.0, -1.0));
        state.add(e).unwrap();

        PhysicEngine::new().update(&mut state, 0.5).unwrap();

        let e = state.entities.get("e").unwrap();
        assert_relative_eq!(e.acceleration, Vec2::new(6.0, -2.0));
        assert_relative_eq!(e.speed, Vec2::new(3.0, -1.0));
        assert_relative_eq!(e.position, Vec2::new(101.5, 99.5));
        assert!(e.forces.is_empty());
    }

    #[test]
    fn test_clamping_preserves_direction() {
        let mut state = state(Vec2::zeros());
        let mut e = mover("e")
            .with_attribute(MAX_ACCELERATION, 5.0)
            .with_attribute(MAX_SPEED, 2.0);
        e.add_force(Vec2::new(30.0, 40.0));
        state.add(e).unwrap();

        PhysicEngine::new().update(&mut state, 1.0).unwrap();

        let e = state.entities.get("e").unwrap();
        assert_relative_eq!(e.acceleration, Vec2::new(3.0, 4.0));
        assert_relative_eq!(e.speed, Vec2::new(1.2, 1.6));
    }

    #[test]
    fn test_speed_at_limit_is_untouched() {
        let mut state = state(Vec2::zeros());
        state.add(mover("e").with_speed(Vec2::new(0.0, 5.0)).with_attribute(MAX_SPEED, 5.0)).unwrap();

        PhysicEngine::new().update(&mut state, 1.0).unwrap();
        assert_relative_eq!(state.entities.get("e").unwrap().speed, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_gravity_scale_applies() {
        let mut state = state(Vec2::new(0.0, 1.0));
        state.add(mover("e")).unwrap();

        PhysicEngine::new().with_gravity_scale(2.0).update(&mut state, 1.0).unwrap();
        assert_relative_eq!(state.entities.get("e").unwrap().acceleration, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut state = state(Vec2::new(0.0, -9.81));
        state.add(mover("e")).unwrap();

        PhysicEngine::new().update(&mut state, 0.0).unwrap();
        let e = state.entities.get("e").unwrap();
        assert_relative_eq!(e.position, Vec2::new(100.0, 100.0));
        assert_relative_eq!(e.speed, Vec2::zeros());
    }

    #[test]
    fn test_density_scales_acceleration() {
        let mut state = state(Vec2::new(0.0, 1.0));
        state.add(mover("e").with_material(unit().with_density(3.0))).unwrap();

        PhysicEngine::new().update(&mut state, 1.0).unwrap();
        assert_relative_eq!(state.entities.get("e").unwrap().acceleration, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_stick_to_camera_is_exempt() {
        let mut state = state(Vec2::new(0.0, -9.81));
        let hud = GameEntity::text("hud", "0")
            .with_position(Vec2::new(-50.0, 10.0))
            .stick_to_camera(true);
        state.add(hud).unwrap();

        PhysicEngine::new().update(&mut state, 1.0).unwrap();
        let hud = state.entities.get("hud").unwrap();
        assert_eq!(hud.position, Vec2::new(-50.0, 10.0));
        assert_eq!(hud.speed, Vec2::zeros());
        assert!(hud.forces.is_empty());
    }

    #[test]
    fn test_influencer_is_not_moved_or_contained() {
        let mut state = state(Vec2::new(0.0, -9.81));
        let zone = GameEntity::influencer("zone", InfluenceZone::new().with_force(Vec2::new(1.0, 0.0)))
            .with_position(Vec2::new(390.0, 0.0))
            .with_size(Vec2::new(100.0, 100.0));
        state.add(zone).unwrap();

        PhysicEngine::new().update(&mut state, 1.0).unwrap();
        assert_eq!(state.entities.get("zone").unwrap().position, Vec2::new(390.0, 0.0));
    }

    #[test]
    fn test_missing_material_aborts() {
        let mut state = state(Vec2::zeros());
        let mut e = mover("bare");
        e.material = None;
        state.add(e).unwrap();

        let err = PhysicEngine::new().update(&mut state, 1.0).unwrap_err();
        assert!(matches!(err, SimError::MissingMaterial { entity } if entity == "bare"));
        assert!(state.entities.get("bare").is_some());
    }

    #[test]
    fn test_missing_max_speed_aborts() {
        let mut state = state(Vec2::zeros());
        let mut e = mover("fast");
        e.remove_attribute(MAX_SPEED);
        state.add(e).unwrap();

        let err = PhysicEngine::new().update(&mut state, 1.0).unwrap_err();
        assert!(matches!(err, SimError::MissingAttribute { key, .. } if key == MAX_SPEED));
    }

    #[test]
    fn test_children_are_integrated_independently() {
        let mut state = state(Vec2::new(0.0, 1.0));
        let parent = mover("parent").with_child(mover("child").with_position(Vec2::new(10.0, 10.0)));
        state.add(parent).unwrap();

        PhysicEngine::new().update(&mut state, 1.0).unwrap();
        let parent = state.entities.get("parent").unwrap();
        assert_relative_eq!(parent.position, Vec2::new(100.0, 101.0));
        assert_relative_eq!(parent.children()[0].position, Vec2::new(10.0, 11.0));
    }

    #[test]
    fn test_oversized_entity_reflects_once() {
        let world = World::new(Vec2::new(100.0, 100.0), Vec2::zeros());
        let mut e = mover("wide")
            .with_size(Vec2::new(120.0, 10.0))
            .with_position(Vec2::new(-5.0, 50.0))
            .with_speed(Vec2::new(3.0, 0.0))
            .with_material(Material::new("rubber", 1.0, 0.5, 1.0));

        PhysicEngine::constrain_to_world(&world, &mut e).unwrap();
        assert_relative_eq!(e.position, Vec2::new(0.0, 50.0));
        assert_relative_eq!(e.speed, Vec2::new(-1.5, 0.0));
    }

    #[test]
    fn test_contained_entity_gets_world_friction() {
        let mut world = World::new(Vec2::new(400.0, 400.0), Vec2::zeros());
        world.material = world.material.clone().with_friction(0.5);
        let mut e = mover("e").with_speed(Vec2::new(4.0, 2.0));

        PhysicEngine::constrain_to_world(&world, &mut e).unwrap();
        assert_relative_eq!(e.speed, Vec2::new(2.0, 1.0));
    }
}

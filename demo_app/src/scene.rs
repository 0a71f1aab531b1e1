//! Demo scene: a player, a HUD score, two influence zones, a pack of enemy
//! followers and a tracking camera

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_core::behavior::enemy::{ATTRACTION_DISTANCE, ATTRACTION_FORCE};
use sim_core::behavior::player::SPEED_STEP;
use sim_core::behavior::score::SCORE;
use sim_core::entity::game_entity::{MAX_ACCELERATION, MAX_SPEED};
use sim_core::prelude::*;

/// Name of the entity the camera and the enemies follow
pub const PLAYER: &str = "player";

/// Scene built from `game.*` configuration keys
pub struct DemoScene {
    rng: StdRng,
    enemies: usize,
}

impl DemoScene {
    /// Scene with `enemies` followers placed from a seeded generator
    pub fn new(seed: u64, enemies: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            enemies,
        }
    }

    fn player(world: Vec2) -> GameEntity {
        let size = Vec2::new(24.0, 32.0);
        GameEntity::new(PLAYER)
            .with_size(size)
            .with_position((world - size) * 0.5)
            .with_color(Color::BLUE)
            .with_mass(80.0)
            .with_material(Material::new("playerMat", 1.0, 0.21, 1.0))
            .with_attribute(MAX_SPEED, 800.0)
            .with_attribute(MAX_ACCELERATION, 800.0)
            .with_attribute(SPEED_STEP, 300.0)
            .with_attribute(SCORE, 0_i64)
            .with_behavior(PlayerInputBehavior::new())
    }

    fn enemy(&mut self, index: usize, world: Vec2) -> GameEntity {
        let diameter = self.rng.gen_range(8.0..16.0);
        let position = Vec2::new(
            self.rng.gen_range(0.0..=(world.x - diameter).max(0.0)),
            self.rng.gen_range(0.0..=(world.y - diameter).max(0.0)),
        );
        let color = Color::rgb(
            self.rng.gen_range(0.5..1.0),
            self.rng.gen_range(0.0..0.5),
            self.rng.gen_range(0.0..0.5),
        );
        GameEntity::new(format!("en_{index}"))
            .with_shape(ShapeKind::Circle)
            .with_size(Vec2::new(diameter, diameter))
            .with_position(position)
            .with_color(color)
            .with_mass(self.rng.gen_range(5.0..20.0))
            .with_material(Material::new("enemyMat", 1.1, 0.7, 1.0))
            .with_attribute(ATTRACTION_DISTANCE, 200.0)
            .with_attribute(ATTRACTION_FORCE, self.rng.gen_range(1.0_f64..4.0))
            .with_behavior(EnemyFollowerBehavior::new(PLAYER))
    }
}

impl Scene for DemoScene {
    fn name(&self) -> &str {
        "demo"
    }

    fn create(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let world = engine.state().world.play_area();
        if world.x <= 0.0 || world.y <= 0.0 {
            return Err(AppError::Scene(format!("empty play area {}x{}", world.x, world.y)));
        }
        let screen = Vec2::new(
            engine.config().get_double("game.screen.width", 320.0),
            engine.config().get_double("game.screen.height", 200.0),
        );
        let tween = engine.config().get_double("game.camera.tween", 0.02);

        engine.add_entity(Self::player(world))?;

        let score = GameEntity::text("score", "00000")
            .with_position(Vec2::new(screen.x * 0.8, 10.0))
            .stick_to_camera(true)
            .with_behavior(ScoreUpdateBehavior::new(PLAYER));
        engine.add_entity(score)?;

        let magnet = GameEntity::influencer("magnet", InfluenceZone::new().with_force(Vec2::new(10.0, 0.0)))
            .with_position(Vec2::new(0.0, world.y * 0.5))
            .with_size(Vec2::new(100.0, world.y * 0.5))
            .with_color(Color::rgba(0.6, 0.5, 0.0, 0.5));
        engine.add_entity(magnet)?;

        let water = InfluenceZone::new()
            .with_force(Vec2::new(0.0, -9.81))
            .with_material(Material::new("water", 1.0, 1.2, 0.75));
        let water = GameEntity::influencer("water", water)
            .with_position(Vec2::new(0.0, world.y * 0.8))
            .with_size(Vec2::new(world.x, world.y * 0.2))
            .with_color(Color::rgba(0.0, 0.3, 0.8, 0.5));
        engine.add_entity(water)?;

        for index in 0..self.enemies {
            let enemy = self.enemy(index, world);
            engine.add_entity(enemy)?;
        }

        let camera = Camera::new("camera")
            .with_viewport(screen.x, screen.y)
            .with_tween(tween)
            .with_target(PLAYER)
            .with_behavior(CameraInputBehavior::new())
            .with_behavior(CameraUpdateBehavior::new());
        engine.set_camera(camera);
        engine.center_camera()?;
        Ok(())
    }

    fn dispose(&mut self, engine: &mut Engine) {
        log::info!(
            "Final score {}",
            engine
                .state()
                .entities
                .get(PLAYER)
                .map_or(0, |p| p.attributes().i64_or(SCORE, 0))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(width: f64, height: f64) -> Engine {
        let mut config = Configuration::new();
        config.set("game.world.width", width);
        config.set("game.world.height", height);
        Engine::new(config)
    }

    #[test]
    fn test_scene_populates_engine() {
        let mut engine = engine(800.0, 600.0);
        engine.load_scene(&mut DemoScene::new(7, 10)).unwrap();

        let state = engine.state();
        assert_eq!(state.entities.len(), 14);
        assert_eq!(state.world.influencers(), ["magnet".to_string(), "water".to_string()]);
        let camera = state.camera().unwrap();
        assert_eq!(camera.target(), Some(PLAYER));
        let player = state.entities.get(PLAYER).unwrap();
        assert_eq!(camera.tracking_delta(player), Vec2::zeros());
    }

    #[test]
    fn test_world_smaller_than_an_enemy() {
        let mut engine = engine(6.0, 4.0);
        engine.load_scene(&mut DemoScene::new(7, 5)).unwrap();
        for index in 0..5 {
            let enemy = engine.state().entities.get(&format!("en_{index}")).unwrap();
            assert_eq!(enemy.position, Vec2::zeros());
        }
    }

    #[test]
    fn test_empty_world_is_rejected() {
        let mut engine = engine(0.0, 600.0);
        let err = engine.load_scene(&mut DemoScene::new(7, 1)).unwrap_err();
        assert!(matches!(err, AppError::Scene(_)));
    }
}

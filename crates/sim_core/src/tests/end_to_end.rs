//! Full-tick scenarios through the integrator and the camera tracker

use crate::behavior::{CameraUpdateBehavior, PlayerInputBehavior};
use crate::entity::game_entity::{MAX_ACCELERATION, MAX_SPEED};
use crate::entity::{Camera, GameEntity};
use crate::error::SimError;
use crate::foundation::math::Vec2;
use crate::input::KeyCode;
use crate::physics::{InfluenceZone, Material, PhysicEngine, World};
use crate::state::GameState;
use approx::assert_relative_eq;

fn state(width: f64, height: f64, gravity: Vec2) -> GameState {
    GameState::new(World::new(Vec2::new(width, height), gravity))
}

fn body(name: &str, position: Vec2) -> GameEntity {
    GameEntity::new(name)
        .with_position(position)
        .with_mass(10.0)
        .with_material(Material::new("unit", 1.0, 1.0, 1.0))
        .with_attribute(MAX_SPEED, 100.0)
        .with_attribute(MAX_ACCELERATION, 100.0)
}

fn entity<'a>(state: &'a GameState, name: &str) -> &'a GameEntity {
    state.entities.get(name).unwrap()
}

#[test]
fn test_falling_body_single_tick() {
    let mut state = state(320.0, 200.0, Vec2::new(0.0, -0.981));
    state.add(body("ball", Vec2::new(160.0, 100.0))).unwrap();

    PhysicEngine::new().update(&mut state, 1.0).unwrap();

    let ball = entity(&state, "ball");
    assert_relative_eq!(ball.acceleration, Vec2::new(0.0, -9.81), epsilon = 1e-9);
    assert_relative_eq!(ball.speed, Vec2::new(0.0, -9.81), epsilon = 1e-9);
    assert_relative_eq!(ball.position, Vec2::new(160.0, 90.19), epsilon = 1e-9);
    assert!(ball.forces.is_empty());
}

#[test]
fn test_influence_zone_adds_force_and_friction() {
    let mut state = state(320.0, 200.0, Vec2::zeros());
    let zone = InfluenceZone::new()
        .with_force(Vec2::new(10.0, 0.0))
        .with_material(Material::new("mud", 1.0, 1.0, 0.5));
    state
        .add(
            GameEntity::influencer("magnet", zone)
                .with_position(Vec2::new(0.0, 0.0))
                .with_size(Vec2::new(320.0, 200.0)),
        )
        .unwrap();
    state
        .add(body("ball", Vec2::new(100.0, 100.0)).with_mass(1.0).with_speed(Vec2::new(4.0, 0.0)))
        .unwrap();

    PhysicEngine::new().update(&mut state, 1.0).unwrap();

    let ball = entity(&state, "ball");
    assert_relative_eq!(ball.acceleration, Vec2::new(10.0, 0.0), epsilon = 1e-9);
    // (4 + 10) * 1.0 * 0.5
    assert_relative_eq!(ball.speed, Vec2::new(7.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(ball.position, Vec2::new(107.0, 100.0), epsilon = 1e-9);

    let zone = entity(&state, "magnet");
    assert_eq!(zone.position, Vec2::zeros());
}

#[test]
fn test_force_order_does_not_matter() {
    let zone = InfluenceZone::new().with_force(Vec2::new(3.0, 0.0));
    let run = |pre_force: Vec2| {
        let mut state = state(320.0, 200.0, Vec2::new(0.0, 2.0));
        state
            .add(
                GameEntity::influencer("zone", zone.clone())
                    .with_position(Vec2::zeros())
                    .with_size(Vec2::new(320.0, 200.0)),
            )
            .unwrap();
        let mut ball = body("ball", Vec2::new(50.0, 50.0)).with_mass(1.0);
        ball.add_force(pre_force);
        state.add(ball).unwrap();
        PhysicEngine::new().update(&mut state, 0.5).unwrap();
        entity(&state, "ball").acceleration
    };
    assert_relative_eq!(run(Vec2::new(-1.0, 1.0)), Vec2::new(2.0, 3.0), epsilon = 1e-9);
    assert_relative_eq!(run(Vec2::new(1.0, -1.0)), Vec2::new(4.0, 1.0), epsilon = 1e-9);
}

#[test]
fn test_last_registered_zone_material_wins() {
    let mut state = state(320.0, 200.0, Vec2::zeros());
    for (name, friction) in [("mud", 0.5), ("ice", 0.25)] {
        let zone = InfluenceZone::new().with_material(Material::new(name, 1.0, 1.0, friction));
        state
            .add(
                GameEntity::influencer(name, zone)
                    .with_position(Vec2::zeros())
                    .with_size(Vec2::new(200.0, 200.0)),
            )
            .unwrap();
    }
    state
        .add(body("ball", Vec2::new(50.0, 50.0)).with_speed(Vec2::new(10.0, 0.0)))
        .unwrap();

    PhysicEngine::new().update(&mut state, 1.0).unwrap();
    assert_relative_eq!(entity(&state, "ball").speed, Vec2::new(2.5, 0.0), epsilon = 1e-9);
}

#[test]
fn test_containment_on_every_edge() {
    let cases = [
        (Vec2::new(330.0, 100.0), Vec2::new(10.0, 0.0), Vec2::new(304.0, 100.0), Vec2::new(-5.0, 0.0)),
        (Vec2::new(-12.0, 100.0), Vec2::new(-10.0, 0.0), Vec2::new(0.0, 100.0), Vec2::new(5.0, 0.0)),
        (Vec2::new(100.0, 250.0), Vec2::new(0.0, 8.0), Vec2::new(100.0, 184.0), Vec2::new(0.0, -4.0)),
        (Vec2::new(100.0, -3.0), Vec2::new(0.0, -8.0), Vec2::new(100.0, 0.0), Vec2::new(0.0, 4.0)),
    ];
    for (start, speed, expected_position, expected_speed) in cases {
        let mut state = state(320.0, 200.0, Vec2::zeros());
        state
            .add(
                body("ball", start)
                    .with_speed(speed)
                    .with_material(Material::new("rubber", 1.0, 0.5, 1.0)),
            )
            .unwrap();

        // Zero dt: the entity does not move before containment
        PhysicEngine::new().update(&mut state, 0.0).unwrap();

        let ball = entity(&state, "ball");
        assert_relative_eq!(ball.position, expected_position, epsilon = 1e-9);
        assert_relative_eq!(ball.speed, expected_speed, epsilon = 1e-9);
    }
}

#[test]
fn test_world_friction_damps_contained_entities() {
    let mut state = state(320.0, 200.0, Vec2::zeros());
    state.world.material = Material::new("air", 1.0, 1.0, 0.9);
    state
        .add(body("ball", Vec2::new(100.0, 100.0)).with_speed(Vec2::new(10.0, 0.0)))
        .unwrap();

    PhysicEngine::new().update(&mut state, 0.0).unwrap();
    assert_relative_eq!(entity(&state, "ball").speed, Vec2::new(9.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_zero_dt_keeps_position() {
    let mut state = state(320.0, 200.0, Vec2::new(0.0, 5.0));
    state.add(body("ball", Vec2::new(10.0, 20.0))).unwrap();

    PhysicEngine::new().update(&mut state, 0.0).unwrap();
    let ball = entity(&state, "ball");
    assert_eq!(ball.position, Vec2::new(10.0, 20.0));
    assert_eq!(ball.speed, Vec2::zeros());
}

#[test]
fn test_screen_space_entities_are_not_integrated() {
    let mut state = state(320.0, 200.0, Vec2::new(0.0, 9.81));
    let mut hud = GameEntity::text("hud", "00000").with_position(Vec2::new(400.0, 10.0)).stick_to_camera(true);
    hud.add_force(Vec2::new(1.0, 1.0));
    state.add(hud).unwrap();

    PhysicEngine::new().update(&mut state, 1.0).unwrap();
    let hud = entity(&state, "hud");
    assert_eq!(hud.position, Vec2::new(400.0, 10.0));
    assert!(hud.forces.is_empty());
}

#[test]
fn test_contract_violations_surface_as_errors() {
    let mut state = state(320.0, 200.0, Vec2::zeros());
    state.add(GameEntity::new("bare")).unwrap();
    let err = PhysicEngine::new().update(&mut state, 1.0).unwrap_err();
    assert!(matches!(err, SimError::MissingMaterial { .. }));

    let mut state = self::state(320.0, 200.0, Vec2::zeros());
    let mut ball = body("ball", Vec2::new(10.0, 10.0));
    ball.remove_attribute(MAX_SPEED);
    state.add(ball).unwrap();
    let err = PhysicEngine::new().update(&mut state, 1.0).unwrap_err();
    assert!(matches!(err, SimError::MissingAttribute { ref key, .. } if key == MAX_SPEED));
    assert_eq!(entity(&state, "ball").position, Vec2::new(10.0, 10.0));
}

#[test]
fn test_player_input_moves_player() {
    let mut state = state(320.0, 200.0, Vec2::zeros());
    state
        .add(
            body("player", Vec2::new(100.0, 100.0))
                .with_mass(1.0)
                .with_attribute("speedStep", 4.0)
                .with_behavior(PlayerInputBehavior::new()),
        )
        .unwrap();
    state.input.handle_key_input(KeyCode::Right, true);

    crate::behavior::run_input_phase(&mut state);
    PhysicEngine::new().update(&mut state, 1.0).unwrap();

    let player = entity(&state, "player");
    assert_relative_eq!(player.speed, Vec2::new(4.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(player.position, Vec2::new(104.0, 100.0), epsilon = 1e-9);
}

#[test]
fn test_camera_converges_on_target() {
    let mut state = state(800.0, 600.0, Vec2::zeros());
    state.add(body("player", Vec2::new(500.0, 300.0))).unwrap();
    state.set_camera(
        Camera::new("camera")
            .with_viewport(320.0, 200.0)
            .with_tween(0.02)
            .with_target("player")
            .with_behavior(CameraUpdateBehavior::new()),
    );

    let engine = PhysicEngine::new();
    let distance = |state: &GameState| {
        let camera = state.camera().unwrap();
        camera.tracking_delta(entity(state, "player")).norm()
    };

    let mut previous = distance(&state);
    assert!(previous > 0.0);
    for _ in 0..600 {
        engine.update(&mut state, 1.0 / 60.0).unwrap();
        let current = distance(&state);
        assert!(current <= previous);
        previous = current;
    }
    assert_relative_eq!(previous, 0.0);
    assert_relative_eq!(state.camera().unwrap().position, Vec2::new(348.0, 208.0));
}

#[test]
fn test_camera_without_target_stays_put() {
    let mut state = state(800.0, 600.0, Vec2::zeros());
    state.set_camera(
        Camera::new("camera")
            .with_position(Vec2::new(5.0, 5.0))
            .with_target("ghost")
            .with_behavior(CameraUpdateBehavior::new()),
    );
    PhysicEngine::new().update(&mut state, 1.0).unwrap();
    assert_eq!(state.camera().unwrap().position, Vec2::new(5.0, 5.0));
}

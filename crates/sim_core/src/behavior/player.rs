//! Keyboard control of the player entity

use super::Behavior;
use crate::entity::GameEntity;
use crate::foundation::math::Vec2;
use crate::input::KeyCode;
use crate::state::GameState;

/// Attribute holding the force magnitude applied per held arrow key
pub const SPEED_STEP: &str = "speedStep";

/// Arrow keys push the entity, Escape requests exit
#[derive(Debug, Clone, Copy)]
pub struct PlayerInputBehavior {
    up: KeyCode,
    down: KeyCode,
    left: KeyCode,
    right: KeyCode,
    exit: KeyCode,
}

impl PlayerInputBehavior {
    /// Arrow keys and Escape
    pub fn new() -> Self {
        Self {
            up: KeyCode::Up,
            down: KeyCode::Down,
            left: KeyCode::Left,
            right: KeyCode::Right,
            exit: KeyCode::Escape,
        }
    }
}

impl Default for PlayerInputBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for PlayerInputBehavior {
    fn input(&mut self, state: &mut GameState, entity: &mut GameEntity) {
        let step = entity.attributes().f64_or(SPEED_STEP, 1.0);

        if state.is_key_held(self.exit) {
            state.request_exit();
        }
        if state.is_key_held(self.up) {
            entity.add_force(Vec2::new(0.0, -step));
        }
        if state.is_key_held(self.down) {
            entity.add_force(Vec2::new(0.0, step));
        }
        if state.is_key_held(self.right) {
            entity.add_force(Vec2::new(step, 0.0));
        }
        if state.is_key_held(self.left) {
            entity.add_force(Vec2::new(-step, 0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::run_input_phase;
    use crate::physics::World;

    fn state_with_player() -> GameState {
        let mut state = GameState::new(World::new(Vec2::new(320.0, 200.0), Vec2::zeros()));
        state
            .add(
                GameEntity::new("player")
                    .with_attribute(SPEED_STEP, 300.0)
                    .with_behavior(PlayerInputBehavior::new()),
            )
            .unwrap();
        state
    }

    #[test]
    fn test_arrow_keys_queue_forces() {
        let mut state = state_with_player();
        state.input.handle_key_input(KeyCode::Up, true);
        state.input.handle_key_input(KeyCode::Right, true);

        run_input_phase(&mut state);
        let player = state.entities.get("player").unwrap();
        assert_eq!(player.forces, vec![Vec2::new(0.0, -300.0), Vec2::new(300.0, 0.0)]);
        assert!(!state.is_exit_requested());
    }

    #[test]
    fn test_default_step_and_escape() {
        let mut state = state_with_player();
        state.entities.get_mut("player").unwrap().remove_attribute(SPEED_STEP);
        state.input.handle_key_input(KeyCode::Left, true);
        state.input.handle_key_input(KeyCode::Escape, true);

        run_input_phase(&mut state);
        assert_eq!(state.entities.get("player").unwrap().forces, vec![Vec2::new(-1.0, 0.0)]);
        assert!(state.is_exit_requested());
    }
}

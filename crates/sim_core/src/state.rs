//! Simulation state passed to every phase

use crate::entity::{Camera, EntityKey, EntityRegistry, GameEntity};
use crate::error::SimError;
use crate::i18n::Messages;
use crate::input::{InputManager, InputSource, KeyCode};
use crate::physics::World;

/// Highest debug level; cycling past it wraps to zero
pub const MAX_DEBUG_LEVEL: u8 = 5;

/// Everything a behavior can reach: live entities, world, camera, input,
/// localized messages and the loop control flags
#[derive(Debug)]
pub struct GameState {
    /// Live game entities
    pub entities: EntityRegistry,
    /// Play area, gravity and influence zones
    pub world: World,
    /// Held keys
    pub input: InputManager,
    /// Localized strings
    pub messages: Messages,
    camera: Option<Camera>,
    exit_requested: bool,
    paused: bool,
    debug: u8,
}

impl GameState {
    /// Empty state around a world
    pub fn new(world: World) -> Self {
        Self {
            entities: EntityRegistry::new(),
            world,
            input: InputManager::new(),
            messages: Messages::new(),
            camera: None,
            exit_requested: false,
            paused: false,
            debug: 0,
        }
    }

    /// Register an entity; influence zones are also registered with the world
    pub fn add(&mut self, entity: GameEntity) -> Result<EntityKey, SimError> {
        let influencer = entity.is_influencer().then(|| entity.name().to_string());
        let key = self.entities.add(entity)?;
        if let Some(name) = influencer {
            self.world.register_influencer(name);
        }
        Ok(key)
    }

    /// Remove an entity and, if it is an influence zone, its world registration
    pub fn remove(&mut self, name: &str) -> Option<GameEntity> {
        self.world.unregister_influencer(name);
        self.entities.remove(name)
    }

    /// Run `f` with the entity taken out of the registry.
    ///
    /// Returns `None` if the key is stale or the entity is already checked out.
    pub fn with_entity<R>(&mut self, key: EntityKey, f: impl FnOnce(&mut GameState, &mut GameEntity) -> R) -> Option<R> {
        let mut entity = self.entities.checkout(key)?;
        let result = f(self, &mut entity);
        self.entities.checkin(key, entity);
        Some(result)
    }

    /// Run `f` with the current camera taken out of the state.
    ///
    /// A camera installed by `f` replaces the one that was lent out.
    pub fn with_camera<R>(&mut self, f: impl FnOnce(&mut GameState, &mut Camera) -> R) -> Option<R> {
        let mut camera = self.camera.take()?;
        let result = f(self, &mut camera);
        if self.camera.is_none() {
            self.camera = Some(camera);
        }
        Some(result)
    }

    /// Install the current camera, returning the previous one
    pub fn set_camera(&mut self, camera: Camera) -> Option<Camera> {
        log::debug!("Current camera set to '{}'", camera.name());
        self.camera.replace(camera)
    }

    /// Remove the current camera
    pub fn take_camera(&mut self) -> Option<Camera> {
        self.camera.take()
    }

    /// Current camera
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Mutable current camera
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    /// Whether `key` is held
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.input.is_key_held(key)
    }

    /// Ask the loop to stop at the next tick boundary
    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::info!("Exit requested");
        }
        self.exit_requested = true;
    }

    /// Whether exit was requested
    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Pause flag
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the pause flag
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Toggle pause, returning the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::debug!("Pause {}", if self.paused { "on" } else { "off" });
        self.paused
    }

    /// Debug overlay level
    pub fn debug_level(&self) -> u8 {
        self.debug
    }

    /// Set the debug level, clamped to [`MAX_DEBUG_LEVEL`]
    pub fn set_debug_level(&mut self, level: u8) {
        self.debug = level.min(MAX_DEBUG_LEVEL);
    }

    /// Advance the debug level, wrapping after [`MAX_DEBUG_LEVEL`]
    pub fn cycle_debug_level(&mut self) -> u8 {
        self.debug = if self.debug >= MAX_DEBUG_LEVEL { 0 } else { self.debug + 1 };
        log::debug!("Debug level {}", self.debug);
        self.debug
    }
}

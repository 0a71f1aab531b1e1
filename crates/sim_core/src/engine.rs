//! Core engine implementation
//!
//! The engine owns the simulation state, the integrator, the renderer and the
//! frame timer. The driver owns the loop and the pacing: each frame it feeds
//! events, then calls [`Engine::frame`] (or the individual phases) once.

use crate::{
    application::{AppError, AppEvent, Scene},
    behavior,
    config::Configuration,
    entity::{Camera, EntityKey, GameEntity},
    error::SimError,
    foundation::time::Timer,
    i18n::Messages,
    input::KeyCode,
    physics::{PhysicEngine, World},
    render::{Renderer, Surface},
    state::GameState,
};
use std::time::Duration;

/// Main engine struct
pub struct Engine {
    state: GameState,
    physics: PhysicEngine,
    renderer: Renderer,
    timer: Timer,
    config: Configuration,
    scene: Option<String>,
}

impl Engine {
    /// Create an engine from configuration.
    ///
    /// Reads the `game.world.*`, `game.physic.*` and `game.debug` keys.
    pub fn new(config: Configuration) -> Self {
        log::info!("Initializing engine...");
        let mut state = GameState::new(World::from_config(&config));
        let debug = config.get_int("game.debug", 0).clamp(0, i64::from(u8::MAX));
        state.set_debug_level(u8::try_from(debug).unwrap_or(0));
        let physics = PhysicEngine::from_config(&config);
        log::debug!("Gravity scale {}", physics.gravity_scale());

        Self {
            state,
            physics,
            renderer: Renderer::new(),
            timer: Timer::new(),
            config,
            scene: None,
        }
    }

    /// Builder: localized messages
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.state.messages = messages;
        self
    }

    /// Register an entity
    pub fn add_entity(&mut self, entity: GameEntity) -> Result<EntityKey, SimError> {
        self.state.add(entity)
    }

    /// Install the current camera
    pub fn set_camera(&mut self, camera: Camera) {
        self.state.set_camera(camera);
    }

    /// Build a scene on top of the live state.
    ///
    /// The previous scene is not disposed; call
    /// [`unload_scene`](Self::unload_scene) first to start from an empty
    /// registry.
    pub fn load_scene(&mut self, scene: &mut dyn Scene) -> Result<(), AppError> {
        if let Some(previous) = self.scene.take() {
            log::warn!("Scene '{}' still loaded, keeping its entities", previous);
        }
        log::info!("Loading scene '{}'", scene.name());
        scene.create(self)?;
        self.scene = Some(scene.name().to_string());
        log::info!(
            "Scene '{}' ready with {} entities",
            scene.name(),
            self.state.entities.len()
        );
        Ok(())
    }

    /// Dispose a scene and drop every entity and the camera
    pub fn unload_scene(&mut self, scene: &mut dyn Scene) {
        scene.dispose(self);
        let names: Vec<String> = self.state.entities.iter().map(|e| e.name().to_string()).collect();
        for name in &names {
            self.state.remove(name);
        }
        self.state.take_camera();
        self.scene = None;
        log::info!("Scene '{}' disposed", scene.name());
    }

    /// Jump the current camera onto its target
    pub fn center_camera(&mut self) -> Result<(), SimError> {
        self.state
            .with_camera(|state, camera| camera.center_on(&state.entities))
            .unwrap_or(Err(SimError::NoCamera))
    }

    /// Name of the loaded scene
    pub fn scene_name(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    /// Input phase for every entity and the camera
    pub fn run_input_phase(&mut self) {
        behavior::run_input_phase(&mut self.state);
    }

    /// One integration tick; skipped while paused
    pub fn run_integration_tick(&mut self, dt: f64) -> Result<(), SimError> {
        if self.state.is_paused() {
            return Ok(());
        }
        self.physics.update(&mut self.state, dt)
    }

    /// Draw the current state
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let fps = self.timer.average_fps();
        self.renderer.draw(&mut self.state, surface, fps);
    }

    /// Run one full frame: input, integration and rendering
    pub fn frame(&mut self, elapsed: Duration, surface: &mut dyn Surface) -> Result<(), SimError> {
        self.timer.advance(elapsed);
        let dt = self.timer.delta_time();
        self.run_input_phase();
        self.run_integration_tick(dt)?;
        self.render(surface);
        Ok(())
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => self.state.request_exit(),
            AppEvent::WindowUnfocused => self.state.input.release_all(),
            AppEvent::KeyPressed(key) => self.state.input.handle_key_input(key, true),
            AppEvent::KeyReleased(key) => self.state.input.handle_key_input(key, false),
            AppEvent::KeyTyped(key) => self.handle_typed_key(key),
        }
    }

    fn handle_typed_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::P | KeyCode::Pause => {
                self.state.toggle_pause();
            }
            KeyCode::Q => self.state.request_exit(),
            KeyCode::D => {
                self.state.cycle_debug_level();
            }
            KeyCode::G => {
                self.state.world.flip_gravity();
                log::debug!("Gravity now {:?}", self.state.world.gravity);
            }
            _ => {}
        }
    }

    /// Whether the loop should stop
    pub fn is_exit_requested(&self) -> bool {
        self.state.is_exit_requested()
    }

    /// Ask the loop to stop
    pub fn request_exit(&mut self) {
        self.state.request_exit();
    }

    /// Simulation state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable simulation state
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Renderer, e.g. to register plugins
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

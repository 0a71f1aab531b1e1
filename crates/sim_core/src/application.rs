//! Scene trait, application errors and events

use crate::config::ConfigError;
use crate::engine::Engine;
use crate::error::SimError;
use crate::input::KeyCode;
use thiserror::Error;

/// A set of entities and a camera installed into the engine together
///
/// Implement this trait to describe a level or a demo. The engine calls
/// [`create`](Scene::create) when the scene is loaded and
/// [`dispose`](Scene::dispose) before its entities are dropped.
pub trait Scene {
    /// Scene name, used in logs
    fn name(&self) -> &str;

    /// Build entities, influence zones and the camera
    fn create(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Per-frame hook; drivers call it before [`Engine::frame`]
    fn update(&mut self, _engine: &mut Engine, _dt: f64) -> Result<(), AppError> {
        Ok(())
    }

    /// Release scene resources
    ///
    /// Called before the engine clears its entities and camera.
    fn dispose(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Simulation error propagated to application level
    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scene construction error
    #[error("Scene error: {0}")]
    Scene(String),
}

/// Application events fed by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Window close requested
    WindowCloseRequested,

    /// Window lost focus; every held key is released
    WindowUnfocused,

    /// Key was pressed
    KeyPressed(KeyCode),

    /// Key was released
    KeyReleased(KeyCode),

    /// Key was typed (pressed and released); drives the engine shortcuts
    KeyTyped(KeyCode),
}

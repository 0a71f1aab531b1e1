//! # 2D Camera
//!
//! A camera is a viewport window onto the world. Its position is the top-left
//! corner of the viewport in world space; its rotation turns the view about
//! the viewport center. The renderer brackets every world-space entity with
//! [`CameraView::pre_draw`] and [`CameraView::post_draw`].
//!
//! The camera does not hold a reference to its target: it stores the target's
//! name and resolves it through the registry whenever it needs it, so the
//! target can be replaced or removed at runtime.

use super::{AttributeValue, Attributes, Entity, EntityId, EntityRegistry, GameEntity};
use crate::behavior::{Behavior, BehaviorHost};
use crate::error::SimError;
use crate::foundation::math::{transform, Mat3, Vec2};
use crate::render::Surface;
use std::fmt;

/// Snapshot of the camera state the renderer needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Top-left corner of the viewport in world space
    pub position: Vec2,
    /// Rotation in radians about the viewport center
    pub rotation: f64,
    /// Viewport extents
    pub viewport: Vec2,
}

impl CameraView {
    /// Switch the surface from screen space to world space
    pub fn pre_draw(&self, surface: &mut dyn Surface) {
        if self.rotation != 0.0 {
            surface.rotate(-self.rotation, self.viewport.x * 0.5, self.viewport.y * 0.5);
        }
        surface.translate(-self.position.x, -self.position.y);
    }

    /// Undo [`pre_draw`](Self::pre_draw), in reverse order
    pub fn post_draw(&self, surface: &mut dyn Surface) {
        surface.translate(self.position.x, self.position.y);
        if self.rotation != 0.0 {
            surface.rotate(self.rotation, self.viewport.x * 0.5, self.viewport.y * 0.5);
        }
    }

    /// World-to-screen matrix, equal to the transform applied by `pre_draw`
    pub fn transform(&self) -> Mat3 {
        let center = self.viewport * 0.5;
        transform::rotation_about(-self.rotation, center.x, center.y) * transform::translation(-self.position)
    }

    /// Screen-to-world matrix, equal to the transform applied by `post_draw`
    pub fn inverse_transform(&self) -> Mat3 {
        let center = self.viewport * 0.5;
        transform::translation(self.position) * transform::rotation_about(self.rotation, center.x, center.y)
    }

    /// Map a world-space point to screen space
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        transform::apply(&self.transform(), point)
    }

    /// Map a screen-space point to world space
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        transform::apply(&self.inverse_transform(), point)
    }
}

/// Viewport that follows a named target entity
pub struct Camera {
    entity: Entity,
    /// Top-left corner of the viewport in world space
    pub position: Vec2,
    /// Rotation in radians about the viewport center
    pub rotation: f64,
    viewport: Vec2,
    tween: f64,
    target: Option<String>,
    behaviors: Vec<Box<dyn Behavior<Camera>>>,
}

impl Camera {
    /// Create a camera at the origin with a 320x200 viewport and no target
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(name),
            position: Vec2::zeros(),
            rotation: 0.0,
            viewport: Vec2::new(320.0, 200.0),
            tween: 0.0,
            target: None,
            behaviors: Vec::new(),
        }
    }

    /// Unique id
    pub fn id(&self) -> EntityId {
        self.entity.id()
    }

    /// Camera name
    pub fn name(&self) -> &str {
        self.entity.name()
    }

    /// Attribute bag
    pub fn attributes(&self) -> &Attributes {
        self.entity.attributes()
    }

    /// Insert or replace an attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> &mut Self {
        self.entity.set_attribute(key, value);
        self
    }

    /// Track the entity with this name
    pub fn set_target(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        log::trace!("Camera '{}' target updated to: {}", self.name(), name);
        self.target = Some(name);
        self
    }

    /// Stop tracking
    pub fn clear_target(&mut self) -> &mut Self {
        self.target = None;
        self
    }

    /// Name of the tracked entity
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Set the viewport extents
    pub fn set_viewport(&mut self, width: f64, height: f64) -> &mut Self {
        self.viewport = Vec2::new(width, height);
        self
    }

    /// Viewport extents
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Set the tracking factor; clamped to `[0, 1]`, zero freezes the camera
    pub fn set_tween(&mut self, tween: f64) -> &mut Self {
        self.tween = if tween.is_finite() { tween.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    /// Tracking factor
    pub fn tween(&self) -> f64 {
        self.tween
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, rotation: f64) -> &mut Self {
        log::trace!("Camera '{}' rotation updated to: {}", self.name(), rotation);
        self.rotation = rotation;
        self
    }

    /// Builder: target
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.set_target(name);
        self
    }

    /// Builder: viewport
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.set_viewport(width, height);
        self
    }

    /// Builder: tween
    pub fn with_tween(mut self, tween: f64) -> Self {
        self.set_tween(tween);
        self
    }

    /// Builder: position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder: behavior
    pub fn with_behavior(mut self, behavior: impl Behavior<Camera> + 'static) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Append a behavior
    pub fn add_behavior(&mut self, behavior: Box<dyn Behavior<Camera>>) -> &mut Self {
        self.behaviors.push(behavior);
        self
    }

    /// Current transform state
    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            rotation: self.rotation,
            viewport: self.viewport,
        }
    }

    /// Offset that would center the viewport on `target`
    pub fn tracking_delta(&self, target: &GameEntity) -> Vec2 {
        target.center() - (self.position + self.viewport * 0.5)
    }

    /// Jump so the viewport is centered on the target
    pub fn center_on(&mut self, registry: &EntityRegistry) -> Result<(), SimError> {
        let target = self
            .target
            .as_deref()
            .and_then(|name| registry.get(name))
            .ok_or_else(|| SimError::UnresolvedCameraTarget {
                camera: self.name().to_string(),
                target: self.target.clone().unwrap_or_default(),
            })?;
        self.position += self.tracking_delta(target);
        Ok(())
    }

    /// Lines for the camera debug overlay
    pub fn debug_info(&self) -> Vec<String> {
        vec![
            format!("cam: {}", self.name()),
            format!("pos: {:04.2},{:04.2}", self.position.x, self.position.y),
            format!("rot: {:04.2}", self.rotation.to_degrees()),
            format!("targ: {}", self.target().unwrap_or("none")),
        ]
    }
}

impl BehaviorHost for Camera {
    fn behaviors_mut(&mut self) -> &mut Vec<Box<dyn Behavior<Self>>> {
        &mut self.behaviors
    }
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("name", &self.name())
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("viewport", &self.viewport)
            .field("tween", &self.tween)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

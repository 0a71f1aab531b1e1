//! Frame renderer
//!
//! Walks the live entities in registry order and draws each through the
//! plugin registered for its kind, bracketed by the camera transform unless
//! the entity lives in screen space. Overlays (debug layers, pause banner)
//! are drawn last.

use super::plugins::{GameEntityDrawPlugin, InfluencerDrawPlugin, RendererPlugin, TextDrawPlugin};
use super::{Color, Surface};
use crate::behavior::dispatch;
use crate::entity::{CameraView, EntityKind, GameEntity};
use crate::state::GameState;
use bitflags::bitflags;
use std::collections::HashMap;

/// Message key of the pause banner text
pub const PAUSE_MESSAGE_KEY: &str = "game.state.pause.message";

bitflags! {
    /// Debug overlays drawn on top of the scene
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DebugLayers: u8 {
        /// World grid and play-area outline
        const GRID = 1 << 0;
        /// Entity boxes and debug-info text
        const ENTITIES = 1 << 1;
        /// Camera name, position, rotation and target
        const CAMERA = 1 << 2;
        /// Frame rate
        const FPS = 1 << 3;
    }
}

impl DebugLayers {
    /// Layers shown at a given debug level
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::empty(),
            1 => Self::GRID | Self::ENTITIES | Self::CAMERA,
            _ => Self::all(),
        }
    }
}

/// Plugin-dispatching renderer
pub struct Renderer {
    plugins: HashMap<EntityKind, Box<dyn RendererPlugin>>,
    clear_color: Color,
    grid_step: f64,
}

impl Renderer {
    /// Renderer with the built-in plugins for every entity kind
    pub fn new() -> Self {
        let mut renderer = Self {
            plugins: HashMap::new(),
            clear_color: Color::BLACK,
            grid_step: 32.0,
        };
        renderer.register_plugin(Box::new(GameEntityDrawPlugin));
        renderer.register_plugin(Box::new(TextDrawPlugin));
        renderer.register_plugin(Box::new(InfluencerDrawPlugin));
        renderer
    }

    /// Register a plugin, returning the one it replaces for the same kind
    pub fn register_plugin(&mut self, plugin: Box<dyn RendererPlugin>) -> Option<Box<dyn RendererPlugin>> {
        log::debug!("Registering renderer plugin for {:?}", plugin.kind());
        self.plugins.insert(plugin.kind(), plugin)
    }

    /// Whether a plugin handles `kind`
    pub fn has_plugin(&self, kind: EntityKind) -> bool {
        self.plugins.contains_key(&kind)
    }

    /// Draw one frame
    pub fn draw(&self, state: &mut GameState, surface: &mut dyn Surface, fps: f64) {
        surface.clear(self.clear_color);
        let view = state.camera().map(|c| c.view());

        for key in state.entities.keys() {
            state.with_entity(key, |state, entity| self.draw_entity(state, entity, view, &mut *surface));
        }

        let layers = DebugLayers::from_level(state.debug_level());
        if layers.contains(DebugLayers::GRID) {
            self.draw_world_grid(state, view, surface);
        }
        if layers.contains(DebugLayers::ENTITIES) {
            Self::draw_entity_debug(state, view, surface);
        }
        if layers.contains(DebugLayers::CAMERA) {
            Self::draw_camera_debug(state, surface);
        }
        if layers.contains(DebugLayers::FPS) {
            surface.set_color(Color::ORANGE);
            surface.draw_text(&format!("FPS:{fps:.0}"), 40.0, 50.0);
        }
        if state.is_paused() {
            Self::draw_pause_banner(state, view, surface);
        }
    }

    /// Draw an entity and then its children
    fn draw_entity(&self, state: &GameState, entity: &mut GameEntity, view: Option<CameraView>, surface: &mut dyn Surface) {
        let bracket = view.filter(|_| !entity.stick_to_camera);
        if let Some(v) = bracket {
            v.pre_draw(surface);
        }

        dispatch(entity, |b, e| b.draw(state, e, &mut *surface));
        match self.plugins.get(&entity.kind()) {
            Some(plugin) => plugin.draw(surface, entity),
            None => log::trace!("No renderer plugin for {:?} '{}'", entity.kind(), entity.name()),
        }

        if let Some(v) = bracket {
            v.post_draw(surface);
        }
        for child in entity.children_mut() {
            self.draw_entity(state, child, view, surface);
        }
    }

    fn draw_world_grid(&self, state: &GameState, view: Option<CameraView>, surface: &mut dyn Surface) {
        let area = state.world.play_area();
        if let Some(v) = view {
            v.pre_draw(surface);
        }
        surface.set_color(Color::LIGHT_GRAY);
        if self.grid_step > 0.0 {
            let mut x = 0.0;
            while x < area.x {
                surface.draw_line(x, 0.0, x, area.y);
                x += self.grid_step;
            }
            let mut y = 0.0;
            while y < area.y {
                surface.draw_line(0.0, y, area.x, y);
                y += self.grid_step;
            }
        }
        surface.set_color(Color::CYAN);
        surface.draw_rect(0.0, 0.0, area.x, area.y);
        if let Some(v) = view {
            v.post_draw(surface);
        }
    }

    fn draw_entity_debug(state: &GameState, view: Option<CameraView>, surface: &mut dyn Surface) {
        surface.set_color(Color::ORANGE);
        for entity in state.entities.iter() {
            let bracket = view.filter(|_| !entity.stick_to_camera);
            if let Some(v) = bracket {
                v.pre_draw(surface);
            }
            let origin = entity.bounds().origin();
            let size = entity.bounds().size();
            surface.draw_rect(origin.x, origin.y, size.x, size.y);
            let mut line_y = entity.position.y;
            for line in entity.debug_info() {
                surface.draw_text(&line, entity.position.x + entity.size.x + 4.0, line_y);
                line_y += 10.0;
            }
            if let Some(v) = bracket {
                v.post_draw(surface);
            }
        }
    }

    fn draw_camera_debug(state: &GameState, surface: &mut dyn Surface) {
        let Some(camera) = state.camera() else {
            return;
        };
        let viewport = camera.viewport();
        surface.set_color(Color::ORANGE);
        surface.draw_rect(10.0, 10.0, viewport.x - 20.0, viewport.y - 20.0);
        let mut line_y = 20.0;
        for line in camera.debug_info() {
            surface.draw_text(&line, 20.0, line_y);
            line_y += 12.0;
        }
    }

    fn draw_pause_banner(state: &GameState, view: Option<CameraView>, surface: &mut dyn Surface) {
        let viewport = view.map_or_else(|| surface.size(), |v| v.viewport);
        surface.set_color(Color::rgba(0.3, 0.6, 0.4, 0.9));
        surface.fill_rect(0.0, (viewport.y - 24.0) * 0.5, viewport.x, 24.0);

        let text = state.messages.get(PAUSE_MESSAGE_KEY);
        let width = surface.text_width(&text);
        surface.set_color(Color::WHITE);
        surface.draw_text(&text, (viewport.x - width) * 0.5, (viewport.y + 12.0) * 0.5);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::entity::Camera;
    use crate::foundation::math::Vec2;
    use crate::physics::World;
    use crate::render::{DrawOp, RecordingSurface};
    use approx::assert_relative_eq;

    fn state() -> GameState {
        let mut state = GameState::new(World::new(Vec2::new(640.0, 400.0), Vec2::zeros()));
        state.set_camera(Camera::new("cam").with_viewport(320.0, 200.0).with_position(Vec2::new(100.0, 50.0)));
        state
    }

    fn origins(surface: &RecordingSurface) -> Vec<Vec2> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c.op {
                DrawOp::Clear => None,
                _ => c.screen_origin(),
            })
            .collect()
    }

    #[test]
    fn test_world_entities_are_camera_relative() {
        let mut state = state();
        state.add(GameEntity::new("box").with_position(Vec2::new(120.0, 80.0))).unwrap();
        state
            .add(GameEntity::text("hud", "00000").with_position(Vec2::new(250.0, 10.0)).stick_to_camera(true))
            .unwrap();

        let mut surface = RecordingSurface::new(320.0, 200.0);
        Renderer::new().draw(&mut state, &mut surface, 60.0);

        let origins = origins(&surface);
        assert_eq!(origins.len(), 2);
        assert_relative_eq!(origins[0], Vec2::new(20.0, 30.0));
        assert_relative_eq!(origins[1], Vec2::new(250.0, 22.0));
        assert_relative_eq!(surface.current_transform(), crate::foundation::math::Mat3::identity(), epsilon = 1e-9);
    }

    #[test]
    fn test_children_drawn_after_parent() {
        let mut state = state();
        let parent = GameEntity::new("parent").with_child(GameEntity::text("label", "child"));
        state.add(parent).unwrap();

        let mut surface = RecordingSurface::new(320.0, 200.0);
        Renderer::new().draw(&mut state, &mut surface, 60.0);
        let ops: Vec<_> = surface.commands().iter().map(|c| &c.op).collect();
        assert!(matches!(ops[1], DrawOp::FillRect { .. }));
        assert!(matches!(ops[2], DrawOp::Text { text, .. } if text == "child"));
    }

    #[test]
    fn test_behavior_draw_runs_before_plugin() {
        struct Marker;
        impl Behavior for Marker {
            fn draw(&mut self, _state: &GameState, entity: &GameEntity, surface: &mut dyn Surface) {
                surface.draw_text(entity.name(), 0.0, 0.0);
            }
        }
        let mut state = state();
        state.add(GameEntity::new("marked").with_behavior(Marker)).unwrap();

        let mut surface = RecordingSurface::new(320.0, 200.0);
        Renderer::new().draw(&mut state, &mut surface, 60.0);
        assert!(matches!(&surface.commands()[1].op, DrawOp::Text { text, .. } if text == "marked"));
        assert!(matches!(surface.commands()[2].op, DrawOp::FillRect { .. }));
    }

    #[test]
    fn test_pause_banner_uses_messages() {
        let mut state = state();
        state.messages.insert(PAUSE_MESSAGE_KEY, "Paused");
        state.toggle_pause();

        let mut surface = RecordingSurface::new(320.0, 200.0);
        Renderer::new().draw(&mut state, &mut surface, 60.0);
        assert_eq!(surface.texts(), vec!["Paused"]);
    }

    #[test]
    fn test_debug_layers_by_level() {
        assert!(DebugLayers::from_level(0).is_empty());
        assert!(!DebugLayers::from_level(1).contains(DebugLayers::FPS));
        assert!(DebugLayers::from_level(3).contains(DebugLayers::FPS | DebugLayers::CAMERA));

        let mut state = state();
        state.set_debug_level(2);
        let mut surface = RecordingSurface::new(320.0, 200.0);
        Renderer::new().draw(&mut state, &mut surface, 59.6);
        let texts = surface.texts();
        assert!(texts.contains(&"cam: cam"));
        assert!(texts.contains(&"FPS:60"));
    }

    #[test]
    fn test_replacing_a_plugin() {
        let mut renderer = Renderer::new();
        assert!(renderer.has_plugin(EntityKind::Influencer));
        assert!(renderer.register_plugin(Box::new(InfluencerDrawPlugin)).is_some());
    }
}

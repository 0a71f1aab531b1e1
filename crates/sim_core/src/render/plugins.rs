//! Draw routines keyed by entity kind

use super::Surface;
use crate::entity::{EntityKind, GameEntity, ShapeKind};

/// Draw routine for one entity kind
pub trait RendererPlugin {
    /// Kind this plugin draws
    fn kind(&self) -> EntityKind;

    /// Draw `entity` in the coordinate space the renderer has set up
    fn draw(&self, surface: &mut dyn Surface, entity: &GameEntity);
}

/// Run `draw` with the surface rotated by the entity rotation about its center
fn with_entity_rotation(surface: &mut dyn Surface, entity: &GameEntity, draw: impl FnOnce(&mut dyn Surface)) {
    if entity.rotation == 0.0 {
        draw(&mut *surface);
        return;
    }
    let center = entity.center();
    surface.rotate(entity.rotation, center.x, center.y);
    draw(&mut *surface);
    surface.rotate(-entity.rotation, center.x, center.y);
}

/// Rectangles, circles and images
#[derive(Debug, Default, Clone, Copy)]
pub struct GameEntityDrawPlugin;

impl RendererPlugin for GameEntityDrawPlugin {
    fn kind(&self) -> EntityKind {
        EntityKind::Game
    }

    fn draw(&self, surface: &mut dyn Surface, e: &GameEntity) {
        with_entity_rotation(surface, e, |surface| match e.shape() {
            ShapeKind::Image => {
                let Some(image) = e.image else {
                    return;
                };
                // Face the direction of travel
                if e.speed.x > 0.0 {
                    surface.draw_image(image, e.position.x, e.position.y, e.size.x, e.size.y);
                } else {
                    surface.draw_image(image, e.position.x + e.size.x, e.position.y, -e.size.x, e.size.y);
                }
            }
            ShapeKind::Rectangle => {
                surface.set_color(e.color);
                surface.fill_rect(e.position.x, e.position.y, e.size.x, e.size.y);
            }
            ShapeKind::Circle => {
                surface.set_color(e.color);
                surface.fill_ellipse(e.position.x, e.position.y, e.size.x, e.size.y);
            }
        });
    }
}

/// Text labels
#[derive(Debug, Default, Clone, Copy)]
pub struct TextDrawPlugin;

impl RendererPlugin for TextDrawPlugin {
    fn kind(&self) -> EntityKind {
        EntityKind::Text
    }

    fn draw(&self, surface: &mut dyn Surface, e: &GameEntity) {
        let Some(content) = e.text_content() else {
            return;
        };
        with_entity_rotation(surface, e, |surface| {
            surface.set_color(e.color);
            surface.set_font(content.font);
            let baseline = e.position.y + surface.line_height();
            surface.draw_text(&content.text, e.position.x, baseline);
        });
    }
}

/// Translucent influence zones
#[derive(Debug, Default, Clone, Copy)]
pub struct InfluencerDrawPlugin;

impl RendererPlugin for InfluencerDrawPlugin {
    fn kind(&self) -> EntityKind {
        EntityKind::Influencer
    }

    fn draw(&self, surface: &mut dyn Surface, e: &GameEntity) {
        with_entity_rotation(surface, e, |surface| {
            surface.set_color(e.color);
            surface.fill_rect(e.position.x, e.position.y, e.size.x, e.size.y);
        });
    }
}

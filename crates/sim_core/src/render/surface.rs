//! Drawing surface interface
//!
//! The core never touches pixels. It drives a [`Surface`] the windowing layer
//! implements: a 2D canvas with an affine transform stack in the style of
//! immediate-mode APIs, where every `translate`/`rotate` call is composed
//! onto the current transform and applies to subsequent drawing.

use super::Color;
use crate::foundation::math::Vec2;

/// Opaque image handle owned by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Opaque font handle owned by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontHandle {
    /// Font id
    pub id: u32,
    /// Point size
    pub size: f32,
}

/// 2D canvas driven by the renderer
pub trait Surface {
    /// Extents in pixels
    fn size(&self) -> Vec2;

    /// Fill the whole surface, ignoring the current transform
    fn clear(&mut self, color: Color);

    /// Compose a translation onto the current transform
    fn translate(&mut self, dx: f64, dy: f64);

    /// Compose a rotation of `angle` radians about `(cx, cy)` onto the current transform
    fn rotate(&mut self, angle: f64, cx: f64, cy: f64);

    /// Color for subsequent primitives
    fn set_color(&mut self, color: Color);

    /// Font for subsequent text; `None` selects the surface default
    fn set_font(&mut self, font: Option<FontHandle>);

    /// Filled rectangle
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Rectangle outline
    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Filled ellipse inscribed in the rectangle
    fn fill_ellipse(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Line segment
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Image stretched over the rectangle; a negative width mirrors it horizontally
    fn draw_image(&mut self, image: ImageHandle, x: f64, y: f64, width: f64, height: f64);

    /// Text with its baseline at `y`
    fn draw_text(&mut self, text: &str, x: f64, y: f64);

    /// Width of `text` in the current font
    fn text_width(&self, text: &str) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let chars = text.chars().count() as f64;
        chars * self.line_height() * 0.5
    }

    /// Line height of the current font
    fn line_height(&self) -> f64 {
        12.0
    }
}

//! In-memory surface that records every call
//!
//! Used by the headless driver and by tests to observe what the renderer drew
//! and under which transform.

use super::{Color, FontHandle, ImageHandle, Surface};
use crate::foundation::math::{transform, Mat3, Vec2};

/// Primitive recorded by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Whole-surface fill
    Clear,
    /// Filled rectangle
    FillRect {
        /// Top-left corner
        origin: Vec2,
        /// Extents
        size: Vec2,
    },
    /// Rectangle outline
    DrawRect {
        /// Top-left corner
        origin: Vec2,
        /// Extents
        size: Vec2,
    },
    /// Filled ellipse
    FillEllipse {
        /// Top-left corner of the enclosing rectangle
        origin: Vec2,
        /// Extents of the enclosing rectangle
        size: Vec2,
    },
    /// Line segment
    Line {
        /// Start point
        from: Vec2,
        /// End point
        to: Vec2,
    },
    /// Image blit
    Image {
        /// Image handle
        image: ImageHandle,
        /// Top-left corner
        origin: Vec2,
        /// Extents; negative width means mirrored
        size: Vec2,
    },
    /// Text
    Text {
        /// Text drawn
        text: String,
        /// Baseline start
        origin: Vec2,
    },
}

/// One recorded call with the state active at that time
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Primitive
    pub op: DrawOp,
    /// Current color
    pub color: Color,
    /// Current transform, local to surface coordinates
    pub transform: Mat3,
}

impl DrawCommand {
    /// Anchor point of the primitive mapped to surface coordinates
    pub fn screen_origin(&self) -> Option<Vec2> {
        let local = match &self.op {
            DrawOp::Clear => return None,
            DrawOp::FillRect { origin, .. }
            | DrawOp::DrawRect { origin, .. }
            | DrawOp::FillEllipse { origin, .. }
            | DrawOp::Image { origin, .. }
            | DrawOp::Text { origin, .. } => *origin,
            DrawOp::Line { from, .. } => *from,
        };
        Some(transform::apply(&self.transform, local))
    }
}

/// Surface that stores draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    transform: Mat3,
    color: Color,
    font: Option<FontHandle>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Empty recording of the given extents
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Vec2::new(width, height),
            transform: Mat3::identity(),
            color: Color::WHITE,
            font: None,
            commands: Vec::new(),
        }
    }

    /// Transform applied to the next primitive
    pub fn current_transform(&self) -> Mat3 {
        self.transform
    }

    /// Current font
    pub fn font(&self) -> Option<FontHandle> {
        self.font
    }

    /// Recorded calls in order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded text strings in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match &c.op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Drop recorded calls and reset the transform for the next frame
    pub fn reset(&mut self) {
        self.commands.clear();
        self.transform = Mat3::identity();
    }

    fn record(&mut self, op: DrawOp) {
        self.commands.push(DrawCommand {
            op,
            color: self.color,
            transform: self.transform,
        });
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand {
            op: DrawOp::Clear,
            color,
            transform: Mat3::identity(),
        });
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform *= transform::translation(Vec2::new(dx, dy));
    }

    fn rotate(&mut self, angle: f64, cx: f64, cy: f64) {
        self.transform *= transform::rotation_about(angle, cx, cy);
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_font(&mut self, font: Option<FontHandle>) {
        self.font = font;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(DrawOp::FillRect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        });
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(DrawOp::DrawRect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        });
    }

    fn fill_ellipse(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(DrawOp::FillEllipse {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.record(DrawOp::Line {
            from: Vec2::new(x1, y1),
            to: Vec2::new(x2, y2),
        });
    }

    fn draw_image(&mut self, image: ImageHandle, x: f64, y: f64, width: f64, height: f64) {
        self.record(DrawOp::Image {
            image,
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        self.record(DrawOp::Text {
            text: text.to_string(),
            origin: Vec2::new(x, y),
        });
    }

    fn line_height(&self) -> f64 {
        self.font.map_or(12.0, |f| f64::from(f.size))
    }
}

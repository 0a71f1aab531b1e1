//! Rendering: surface interface, draw plugins and the frame renderer
//!
//! Pixel work is delegated to a [`Surface`] implementation. The renderer only
//! decides what to draw, in which order and under which transform.

pub mod color;
pub mod plugins;
pub mod recording;
pub mod renderer;
pub mod surface;

pub use color::Color;
pub use plugins::{GameEntityDrawPlugin, InfluencerDrawPlugin, RendererPlugin, TextDrawPlugin};
pub use recording::{DrawCommand, DrawOp, RecordingSurface};
pub use renderer::{DebugLayers, Renderer};
pub use surface::{FontHandle, ImageHandle, Surface};

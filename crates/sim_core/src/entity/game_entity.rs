//! Physical entities

use super::{AttributeValue, Attributes, Entity, EntityId};
use crate::behavior::{Behavior, BehaviorHost};
use crate::error::SimError;
use crate::foundation::math::Vec2;
use crate::physics::{Bounds, InfluenceZone, Material};
use crate::render::{Color, FontHandle, ImageHandle};
use std::fmt;

/// Attribute key of the speed clamp required by the integrator
pub const MAX_SPEED: &str = "maxSpeed";
/// Attribute key of the acceleration clamp required by the integrator
pub const MAX_ACCELERATION: &str = "maxAcceleration";

const DEFAULT_MAX_SPEED: f64 = 500.0;
const DEFAULT_MAX_ACCELERATION: f64 = 300.0;

/// Geometric shape used for drawing and for the bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    /// Filled rectangle
    #[default]
    Rectangle,
    /// Filled ellipse inscribed in the entity box
    Circle,
    /// Image stretched over the entity box
    Image,
}

/// Visual kind tag, the key of the renderer plugin registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Plain physical entity
    Game,
    /// Text label
    Text,
    /// Influence zone
    Influencer,
}

/// Text carried by a text entity
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextContent {
    /// Displayed text
    pub text: String,
    /// Font, or the surface default
    pub font: Option<FontHandle>,
}

/// Kind-specific data of a game entity
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// No extra data
    Plain,
    /// Text label
    Text(TextContent),
    /// Influence zone
    Influencer(InfluenceZone),
}

impl Variant {
    /// Kind tag of this variant
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Plain => EntityKind::Game,
            Self::Text(_) => EntityKind::Text,
            Self::Influencer(_) => EntityKind::Influencer,
        }
    }
}

/// Entity with physical state, behaviors and children
pub struct GameEntity {
    entity: Entity,
    /// Top-left corner in world space
    pub position: Vec2,
    /// Velocity
    pub speed: Vec2,
    /// Acceleration computed by the last integration step
    pub acceleration: Vec2,
    /// Extents of the bounding box
    pub size: Vec2,
    /// Rotation in radians about the entity center
    pub rotation: f64,
    /// Pending forces for the current tick
    pub forces: Vec<Vec2>,
    /// Fill color
    pub color: Color,
    /// Image drawn for [`ShapeKind::Image`]
    pub image: Option<ImageHandle>,
    /// Mass scalar
    pub mass: f64,
    /// Physical material; required by the integrator
    pub material: Option<Material>,
    /// Screen-space entity: no camera transform, no integration, no containment
    pub stick_to_camera: bool,
    shape: ShapeKind,
    bounds: Bounds,
    variant: Variant,
    behaviors: Vec<Box<dyn Behavior>>,
    children: Vec<GameEntity>,
}

impl GameEntity {
    /// Create a plain 16x16 red rectangle at the origin
    pub fn new(name: impl Into<String>) -> Self {
        let mut entity = Entity::new(name);
        entity
            .set_attribute(MAX_SPEED, DEFAULT_MAX_SPEED)
            .set_attribute(MAX_ACCELERATION, DEFAULT_MAX_ACCELERATION);
        let position = Vec2::zeros();
        let size = Vec2::new(16.0, 16.0);
        Self {
            entity,
            position,
            speed: Vec2::zeros(),
            acceleration: Vec2::zeros(),
            size,
            rotation: 0.0,
            forces: Vec::new(),
            color: Color::RED,
            image: None,
            mass: 1.0,
            material: None,
            stick_to_camera: false,
            shape: ShapeKind::Rectangle,
            bounds: Bounds::for_shape(ShapeKind::Rectangle, position, size),
            variant: Variant::Plain,
            behaviors: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text entity
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut e = Self::new(name);
        e.color = Color::WHITE;
        e.variant = Variant::Text(TextContent { text: text.into(), font: None });
        e
    }

    /// Create an influence zone entity
    pub fn influencer(name: impl Into<String>, zone: InfluenceZone) -> Self {
        let mut e = Self::new(name);
        e.variant = Variant::Influencer(zone);
        e
    }

    /// Unique id
    pub fn id(&self) -> EntityId {
        self.entity.id()
    }

    /// Registry name
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

    /// Attribute value or `default`; never fails
    pub fn get_attribute(&self, key: &str, default: impl Into<AttributeValue>) -> AttributeValue {
        self.entity.get_attribute(key, default)
    }

    /// Remove an attribute
    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.entity.attributes_mut().remove(key)
    }

    /// Numeric attribute the caller cannot work without
    pub fn required_f64(&self, key: &str) -> Result<f64, SimError> {
        let value = self.attributes().get(key).ok_or_else(|| SimError::MissingAttribute {
            entity: self.name().to_string(),
            key: key.to_string(),
        })?;
        value.as_f64().ok_or_else(|| SimError::AttributeType {
            entity: self.name().to_string(),
            key: key.to_string(),
            expected: "number",
        })
    }

    /// Material, or the contract error the integrator reports
    pub fn required_material(&self) -> Result<&Material, SimError> {
        self.material.as_ref().ok_or_else(|| SimError::MissingMaterial {
            entity: self.name().to_string(),
        })
    }

    /// Builder: position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    /// Builder: size
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.set_size(size);
        self
    }

    /// Builder: speed
    pub fn with_speed(mut self, speed: Vec2) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: shape kind
    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self.update_bounds();
        self
    }

    /// Builder: image; switches the shape to [`ShapeKind::Image`]
    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self.with_shape(ShapeKind::Image)
    }

    /// Builder: color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder: mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Builder: material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder: rotation in radians
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: screen-space flag
    pub fn stick_to_camera(mut self, flag: bool) -> Self {
        self.stick_to_camera = flag;
        self
    }

    /// Builder: font of a text entity; ignored for other kinds
    pub fn with_font(mut self, font: FontHandle) -> Self {
        if let Variant::Text(content) = &mut self.variant {
            content.font = Some(font);
        }
        self
    }

    /// Builder: attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.entity.set_attribute(key, value);
        self
    }

    /// Builder: behavior, appended after existing ones
    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Builder: child entity
    pub fn with_child(mut self, child: GameEntity) -> Self {
        self.children.push(child);
        self
    }

    /// Append a behavior; it runs after the existing ones
    pub fn add_behavior(&mut self, behavior: Box<dyn Behavior>) -> &mut Self {
        self.behaviors.push(behavior);
        self
    }

    /// Append a child entity
    pub fn add_child(&mut self, child: GameEntity) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Queue a force for the next integration step
    pub fn add_force(&mut self, force: Vec2) -> &mut Self {
        self.forces.push(force);
        self
    }

    /// Queue several forces for the next integration step
    pub fn add_forces(&mut self, forces: &[Vec2]) -> &mut Self {
        self.forces.extend_from_slice(forces);
        self
    }

    /// Move the entity and refresh its bounds
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_bounds();
    }

    /// Resize the entity and refresh its bounds
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.update_bounds();
    }

    /// Recompute the bounding shape from position, size and shape kind
    pub fn update_bounds(&mut self) {
        self.bounds = Bounds::for_shape(self.shape, self.position, self.size);
    }

    /// Bounding shape as of the last refresh
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Shape kind
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Center of the entity box
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Visual kind tag
    pub fn kind(&self) -> EntityKind {
        self.variant.kind()
    }

    /// Kind-specific data
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Zone data if this entity is an influencer
    pub fn influence_zone(&self) -> Option<&InfluenceZone> {
        match &self.variant {
            Variant::Influencer(zone) => Some(zone),
            _ => None,
        }
    }

    /// Whether this entity is an influence zone
    pub fn is_influencer(&self) -> bool {
        matches!(self.variant, Variant::Influencer(_))
    }

    /// Text of a text entity
    pub fn text_content(&self) -> Option<&TextContent> {
        match &self.variant {
            Variant::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Replace the text of a text entity; returns false for other kinds
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.variant {
            Variant::Text(content) => {
                content.text = text.into();
                true
            }
            _ => false,
        }
    }

    /// Attached behaviors in dispatch order
    pub fn behaviors(&self) -> &[Box<dyn Behavior>] {
        &self.behaviors
    }

    /// Child entities
    pub fn children(&self) -> &[GameEntity] {
        &self.children
    }

    /// Mutable child entities
    pub fn children_mut(&mut self) -> &mut [GameEntity] {
        &mut self.children
    }

    /// Whether the integrator moves this entity
    pub fn is_integrated(&self) -> bool {
        !self.stick_to_camera && !self.is_influencer()
    }

    /// Lines for the debug overlay
    pub fn debug_info(&self) -> Vec<String> {
        let mut lines = vec![
            format!("id:{}", self.id()),
            format!("name:{}", self.name()),
            format!("type:{:?}/{:?}", self.kind(), self.shape),
            format!("pos: {:04.2},{:04.2}", self.position.x, self.position.y),
            format!("spd: {:04.2},{:04.2}", self.speed.x, self.speed.y),
            format!("acc: {:04.2},{:04.2}", self.acceleration.x, self.acceleration.y),
            format!("rot: {:04.2}", self.rotation),
            format!("mass: {:04.2}", self.mass),
            match &self.material {
                Some(m) => format!("mat: {m}"),
                None => "mat: none".to_string(),
            },
        ];
        if let Some(content) = self.text_content() {
            lines.push(format!("txt:{}", content.text));
        }
        lines
    }
}

impl BehaviorHost for GameEntity {
    fn behaviors_mut(&mut self) -> &mut Vec<Box<dyn Behavior<Self>>> {
        &mut self.behaviors
    }
}

impl fmt::Debug for GameEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEntity")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("position", &self.position)
            .field("speed", &self.speed)
            .field("size", &self.size)
            .field("material", &self.material)
            .field("behaviors", &self.behaviors.iter().map(|b| b.name()).collect::<Vec<_>>())
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

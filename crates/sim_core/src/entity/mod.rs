//! Entity data model
//!
//! A named [`Entity`] carries identity and an attribute bag. [`GameEntity`]
//! adds physical state and owns its behaviors and children; [`Camera`] shares
//! the identity part but has its own motion model. Live game entities are
//! stored in the [`EntityRegistry`] and referenced across the crate by name.

pub mod attributes;
pub mod camera;
pub mod game_entity;
pub mod registry;

pub use attributes::{AttributeValue, Attributes};
pub use camera::{Camera, CameraView};
pub use game_entity::{EntityKind, GameEntity, ShapeKind, TextContent, Variant};
pub use registry::{EntityKey, EntityRegistry};

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide entity identifier
pub type EntityId = u64;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> EntityId {
    NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity and attribute bag shared by every entity type
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    name: String,
    attributes: Attributes,
}

impl Entity {
    /// Create a new entity with a fresh monotonic id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// Unique id, assigned at construction
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Name, the lookup key in the registry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only attribute bag
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable attribute bag
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Insert or replace an attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    /// Attribute value or `default` when absent
    pub fn get_attribute(&self, key: &str, default: impl Into<AttributeValue>) -> AttributeValue {
        self.attributes.get_or(key, default)
    }
}

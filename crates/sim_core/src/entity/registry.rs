//! Live entity registry
//!
//! Entities are stored in a slot map and indexed by name. During a phase
//! dispatch an entity is checked out of its slot so that its behaviors can
//! receive both the entity and the rest of the game state mutably; while
//! checked out it is invisible to lookups.

use super::GameEntity;
use crate::error::SimError;
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

new_key_type! {
    /// Stable handle to a registry slot
    pub struct EntityKey;
}

/// Name-indexed store of live game entities
#[derive(Debug, Default)]
pub struct EntityRegistry {
    slots: SlotMap<EntityKey, Option<GameEntity>>,
    names: HashMap<String, EntityKey>,
    order: Vec<EntityKey>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity; names must be unique among live entities
    pub fn add(&mut self, entity: GameEntity) -> Result<EntityKey, SimError> {
        if self.names.contains_key(entity.name()) {
            return Err(SimError::DuplicateEntity(entity.name().to_string()));
        }
        let name = entity.name().to_string();
        log::debug!("Registering entity '{}' (id {})", name, entity.id());
        let key = self.slots.insert(Some(entity));
        self.names.insert(name, key);
        self.order.push(key);
        Ok(key)
    }

    /// Remove an entity by name
    pub fn remove(&mut self, name: &str) -> Option<GameEntity> {
        let key = self.names.remove(name)?;
        self.order.retain(|k| *k != key);
        self.slots.remove(key).flatten()
    }

    /// Key of a live entity
    pub fn key_of(&self, name: &str) -> Option<EntityKey> {
        self.names.get(name).copied()
    }

    /// Whether an entity with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Look up an entity by name
    pub fn get(&self, name: &str) -> Option<&GameEntity> {
        self.key_of(name).and_then(|key| self.get_by_key(key))
    }

    /// Mutable lookup by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut GameEntity> {
        let key = self.key_of(name)?;
        self.get_by_key_mut(key)
    }

    /// Look up an entity by key
    pub fn get_by_key(&self, key: EntityKey) -> Option<&GameEntity> {
        self.slots.get(key).and_then(Option::as_ref)
    }

    /// Mutable lookup by key
    pub fn get_by_key_mut(&mut self, key: EntityKey) -> Option<&mut GameEntity> {
        self.slots.get_mut(key).and_then(Option::as_mut)
    }

    /// Keys of all registered entities in insertion order
    pub fn keys(&self) -> Vec<EntityKey> {
        self.order.clone()
    }

    /// All entities currently in their slots, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GameEntity> {
        self.order.iter().filter_map(|key| self.get_by_key(*key))
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Take an entity out of its slot for the duration of a dispatch
    pub(crate) fn checkout(&mut self, key: EntityKey) -> Option<GameEntity> {
        self.slots.get_mut(key).and_then(Option::take)
    }

    /// Return a checked-out entity to its slot
    pub(crate) fn checkin(&mut self, key: EntityKey, entity: GameEntity) {
        if let Some(slot) = self.slots.get_mut(key) {
            *slot = Some(entity);
        } else {
            log::warn!("Dropping entity '{}': its slot was removed during dispatch", entity.name());
        }
    }
}

//! Entity identity and storage
//!
//! Entities are an id, a world position, and a set of optional components.
//! Ids are handed out from a monotonic counter and are never reused while
//! the store lives, so a held id can never silently alias a newer entity.

use std::fmt;

use super::components::{ComponentSet, Position};

/// Unique handle for an entity
///
/// Plain integer identity: lookups go through the store and absence is a
/// normal answer, not an error. There is no generation tag because ids are
/// never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A game entity: identity, position, and its components
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    pub position: Position,
    pub components: ComponentSet,
}

impl Entity {
    fn new(id: EntityId, position: Position) -> Self {
        Self {
            id,
            position,
            components: ComponentSet::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

/// Owning store for all live entities
///
/// Entities iterate in insertion order, which keeps system processing
/// deterministic. Lookup is a linear scan; at this scale that beats
/// maintaining a side index across removals.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a new entity at a position
    ///
    /// Never fails. The returned id is unique for the lifetime of the
    /// store, even after the entity is despawned.
    pub fn spawn(&mut self, position: Position) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity::new(id, position));
        log::debug!("Spawned entity {} at {:?}", id, position);
        id
    }

    /// Look up an entity by id
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up an entity by id, mutably
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Move an entity to a new position
    ///
    /// A no-op when the id is not present: the store stays untouched and
    /// `false` comes back so the caller can notice.
    pub fn set_position(&mut self, id: EntityId, position: Position) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove an entity immediately
    ///
    /// The removal is visible to every query from this call onward.
    /// Returns `false` when the id was not present.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        let removed = self.entities.len() < before;
        if removed {
            log::debug!("Despawned entity {}", id);
        }
        removed
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// All live entities, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// The live entities as a shared batch, in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The live entities as a mutable batch, in insertion order
    ///
    /// This is what systems run over. Handing out a slice rather than the
    /// store itself means a system can rewrite entities but can never add
    /// or remove them mid-update.
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

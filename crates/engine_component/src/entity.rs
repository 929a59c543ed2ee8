//! Entity type and the entity manager.
//!
//! An [`Entity`] is a small `u32` identifier with no inherent data. The
//! [`EntityManager`] hands ids out of a bounded pool, recycles destroyed ids,
//! and owns each live entity's [`Signature`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EcsError, EcsResult};
use crate::signature::Signature;

/// Default size of the entity universe.
pub const MAX_ENTITIES: usize = 5000;

/// A unique entity identifier.
///
/// Entities are pure identifiers; components attached to them give them
/// meaning. An id is unique among live entities but may be reused after the
/// entity holding it is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(pub u32);

impl Entity {
    /// Create an entity from a raw `u32` identifier.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the identifier as an index into per-entity tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocates entity ids from a fixed-size pool and stores their signatures.
///
/// Free ids are kept in a FIFO queue, so the id that has been free the
/// longest is handed out first.
#[derive(Debug)]
pub struct EntityManager {
    /// Ids not currently in use, oldest first.
    available: VecDeque<Entity>,
    /// Signature of every id in the universe; all-zero while free.
    signatures: Vec<Signature>,
    /// Liveness flag of every id in the universe.
    alive: Vec<bool>,
    /// Bumped every time an id is handed out.
    generations: Vec<u32>,
    living_count: usize,
}

impl EntityManager {
    /// Create a manager for ids `0..capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` does not fit in the `u32` id space.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(
            u32::try_from(capacity).is_ok(),
            "entity capacity {capacity} does not fit in the u32 id space"
        );
        Self {
            available: (0..capacity).map(|index| Entity(index as u32)).collect(),
            signatures: vec![Signature::EMPTY; capacity],
            alive: vec![false; capacity],
            generations: vec![0; capacity],
            living_count: 0,
        }
    }

    /// Hand out the next free id with a cleared signature.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] when every id is live.
    pub fn create_entity(&mut self) -> EcsResult<Entity> {
        let entity = self.available.pop_front().ok_or(EcsError::CapacityExceeded {
            capacity: self.capacity(),
        })?;
        self.alive[entity.index()] = true;
        self.signatures[entity.index()] = Signature::EMPTY;
        self.generations[entity.index()] = self.generations[entity.index()].wrapping_add(1);
        self.living_count += 1;
        debug!(entity = %entity, living = self.living_count, "entity created");
        Ok(entity)
    }

    /// Clear the entity's signature and return its id to the pool.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the id is out of range or
    /// already free.
    pub fn destroy_entity(&mut self, entity: Entity) -> EcsResult<()> {
        self.check_alive(entity)?;
        self.alive[entity.index()] = false;
        self.signatures[entity.index()] = Signature::EMPTY;
        self.available.push_back(entity);
        self.living_count -= 1;
        debug!(entity = %entity, living = self.living_count, "entity destroyed");
        Ok(())
    }

    /// Overwrite a live entity's signature.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> EcsResult<()> {
        self.check_alive(entity)?;
        self.signatures[entity.index()] = signature;
        Ok(())
    }

    /// Returns a live entity's signature.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn signature(&self, entity: Entity) -> EcsResult<Signature> {
        self.check_alive(entity)?;
        Ok(self.signatures[entity.index()])
    }

    /// Returns how many times the id has been handed out, including the
    /// current holder. Two holders of the same id never share a generation
    /// until the counter wraps.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn generation(&self, entity: Entity) -> EcsResult<u32> {
        self.check_alive(entity)?;
        Ok(self.generations[entity.index()])
    }

    /// Returns `true` if the id is in range and currently live.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.index()).copied().unwrap_or(false)
    }

    /// Returns an iterator over live entities in id order.
    pub fn living(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| Entity(index as u32))
    }

    /// Returns live entities paired with their signatures.
    pub fn living_signatures(&self) -> impl Iterator<Item = (Entity, Signature)> + '_ {
        self.living()
            .map(|entity| (entity, self.signatures[entity.index()]))
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn living_count(&self) -> usize {
        self.living_count
    }

    /// Returns the size of the entity universe.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.alive.len()
    }

    fn check_alive(&self, entity: Entity) -> EcsResult<()> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::InvalidEntity(entity))
        }
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new(MAX_ENTITIES)
    }
}

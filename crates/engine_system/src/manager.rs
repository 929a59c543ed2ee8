//! System registry. Tracks registered systems and the entities each one
//! currently matches.
//!
//! Membership is derived from signatures: entity `e` belongs to system `s`
//! exactly when `signature(e)` contains every bit of `required(s)`. The
//! manager keeps that true by re-testing an entity against every system
//! whenever its signature changes.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};

use engine_component::{EcsError, EcsResult, Entity, Signature};
use tracing::{info, trace};

use crate::system::{System, SystemHandle};

/// Bookkeeping for one registered system.
#[derive(Debug, Clone)]
pub struct SystemRecord {
    /// The system's human-readable name.
    pub name: &'static str,
    /// Components an entity must hold to belong to this system.
    pub signature: Signature,
    /// Entities currently matching `signature`.
    pub entities: BTreeSet<Entity>,
}

impl SystemRecord {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            signature: Signature::EMPTY,
            entities: BTreeSet::new(),
        }
    }

    /// Insert or remove `entity` so membership agrees with `signature`.
    /// Returns `true` if membership changed.
    fn reconcile(&mut self, entity: Entity, signature: Signature) -> bool {
        if signature.matches(self.signature) {
            self.entities.insert(entity)
        } else {
            self.entities.remove(&entity)
        }
    }
}

/// Registry of all systems and their entity sets.
#[derive(Debug, Default)]
pub struct SystemManager {
    /// Maps a system type to its index in `records`.
    types: HashMap<TypeId, usize>,
    /// Records in registration order.
    records: Vec<SystemRecord>,
}

impl SystemManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Create an empty record for `S`.
    ///
    /// The new system's required signature is empty until
    /// [`set_signature`](Self::set_signature) is called.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemAlreadyRegistered`] if `S` is already
    /// registered.
    pub fn register_system<S: System>(&mut self) -> EcsResult<SystemHandle<S>> {
        if self.types.contains_key(&TypeId::of::<S>()) {
            return Err(EcsError::SystemAlreadyRegistered(S::type_name()));
        }
        let index = self.records.len();
        self.types.insert(TypeId::of::<S>(), index);
        self.records.push(SystemRecord::new(S::type_name()));
        info!(system = S::type_name(), "registered system");
        Ok(SystemHandle::new(index))
    }

    /// Returns the handle issued when `S` was registered.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemNotRegistered`] if `S` was never registered.
    pub fn handle<S: System>(&self) -> EcsResult<SystemHandle<S>> {
        self.types
            .get(&TypeId::of::<S>())
            .map(|&index| SystemHandle::new(index))
            .ok_or(EcsError::SystemNotRegistered(S::type_name()))
    }

    /// Store `S`'s required signature and rebuild its entity set from
    /// `living`, the signatures of every live entity.
    ///
    /// Rebuilding makes it safe to change a signature after entities exist.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemNotRegistered`] if `S` was never registered.
    pub fn set_signature<S, I>(&mut self, signature: Signature, living: I) -> EcsResult<()>
    where
        S: System,
        I: IntoIterator<Item = (Entity, Signature)>,
    {
        let handle = self.handle::<S>()?;
        let record = &mut self.records[handle.index()];
        record.signature = signature;
        record.entities = living
            .into_iter()
            .filter(|(_, entity_signature)| entity_signature.matches(signature))
            .map(|(entity, _)| entity)
            .collect();
        info!(
            system = S::type_name(),
            signature = %signature,
            members = record.entities.len(),
            "set system signature"
        );
        Ok(())
    }

    /// Returns `S`'s required signature.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemNotRegistered`] if `S` was never registered.
    pub fn signature<S: System>(&self) -> EcsResult<Signature> {
        Ok(self.records[self.handle::<S>()?.index()].signature)
    }

    /// Returns the entities currently matching `S`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemNotRegistered`] if `S` was never registered.
    pub fn entities<S: System>(&self) -> EcsResult<&BTreeSet<Entity>> {
        Ok(&self.records[self.handle::<S>()?.index()].entities)
    }

    /// Returns the record behind a handle, or `None` if the handle was issued
    /// by a different manager.
    #[must_use]
    pub fn get<S: System>(&self, handle: SystemHandle<S>) -> Option<&SystemRecord> {
        self.records
            .get(handle.index())
            .filter(|record| record.name == S::type_name())
    }

    /// Re-test `entity` against every system after its signature changed.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: Signature) {
        for record in &mut self.records {
            if record.reconcile(entity, signature) {
                trace!(
                    entity = %entity,
                    system = record.name,
                    member = record.entities.contains(&entity),
                    "system membership changed"
                );
            }
        }
    }

    /// Remove `entity` from every system.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for record in &mut self.records {
            record.entities.remove(&entity);
        }
    }

    /// Returns every record in registration order.
    pub fn records(&self) -> impl Iterator<Item = &SystemRecord> {
        self.records.iter()
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.records.len()
    }
}

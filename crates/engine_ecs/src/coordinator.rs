//! The [`Coordinator`], the single entry point to an ECS world.
//!
//! The coordinator owns the entity, component, and system managers and keeps
//! them consistent: every component add or remove updates the entity's
//! signature and re-evaluates system membership, and every destroy is fanned
//! out to all component arrays and all systems.
//!
//! There is no global instance. Whoever runs the simulation owns a
//! `Coordinator` and lends it to the subsystems that need it.

use std::collections::{BTreeSet, HashMap};

use engine_component::{
    Component, ComponentArray, ComponentManager, ComponentType, EcsError, EcsResult, Entity,
    EntityManager, Signature,
};
use engine_system::{System, SystemHandle, SystemManager, SystemRecord};
use tracing::debug;

use crate::config::{ConfigError, WorldConfig};

/// Facade over the entity, component, and system managers.
///
/// Besides the ECS proper, the coordinator keeps a display name for every
/// live entity and the editor's current selection.
#[derive(Debug)]
pub struct Coordinator {
    config: WorldConfig,
    entities: EntityManager,
    components: ComponentManager,
    systems: SystemManager,
    /// Display names keyed by entity.
    names: HashMap<Entity, String>,
    /// Entity selected in the editor, if any.
    current: Option<Entity>,
}

impl Coordinator {
    /// Create an empty world with the given limits.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the limits are out of range.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: WorldConfig) -> Self {
        Self {
            config,
            entities: EntityManager::new(config.max_entities),
            components: ComponentManager::new(config.max_components),
            systems: SystemManager::new(),
            names: HashMap::new(),
            current: None,
        }
    }

    /// Returns the limits this world was created with.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // -- Entity lifecycle --

    /// Create an entity with an empty signature and a default name of
    /// `"Entity <id>"`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] when every id is live.
    pub fn create_entity(&mut self) -> EcsResult<Entity> {
        let entity = self.entities.create_entity()?;
        self.on_entity_created(entity, format!("Entity {}", entity.id()));
        Ok(entity)
    }

    /// Create an entity with the given display name.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] when every id is live.
    pub fn create_named_entity(&mut self, name: impl Into<String>) -> EcsResult<Entity> {
        let entity = self.entities.create_entity()?;
        self.on_entity_created(entity, name.into());
        Ok(entity)
    }

    /// A fresh entity has an empty signature, which still satisfies any
    /// system whose required signature is empty.
    fn on_entity_created(&mut self, entity: Entity, name: String) {
        self.systems.entity_signature_changed(entity, Signature::EMPTY);
        self.names.insert(entity, name);
    }

    /// Destroy an entity: drop all of its components, remove it from every
    /// system, forget its name, and release its id for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> EcsResult<()> {
        self.entities.destroy_entity(entity)?;
        self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        self.names.remove(&entity);
        if self.current == Some(entity) {
            self.current = None;
        }
        Ok(())
    }

    /// Returns `true` if the entity is alive.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn living_count(&self) -> usize {
        self.entities.living_count()
    }

    /// Iterate over live entities in id order.
    pub fn living_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.living()
    }

    /// Returns the entity's signature.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn entity_signature(&self, entity: Entity) -> EcsResult<Signature> {
        self.entities.signature(entity)
    }

    /// Returns the entity's creation generation. Holders that keep an entity
    /// across frames store it alongside the id to detect reuse.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn entity_generation(&self, entity: Entity) -> EcsResult<u32> {
        self.entities.generation(entity)
    }

    // -- Entity metadata --

    /// Returns the entity's display name.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn entity_name(&self, entity: Entity) -> EcsResult<&str> {
        self.names
            .get(&entity)
            .map(String::as_str)
            .ok_or(EcsError::InvalidEntity(entity))
    }

    /// Rename an entity.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn set_entity_name(&mut self, entity: Entity, name: impl Into<String>) -> EcsResult<()> {
        let slot = self
            .names
            .get_mut(&entity)
            .ok_or(EcsError::InvalidEntity(entity))?;
        *slot = name.into();
        Ok(())
    }

    /// Returns the entity selected in the editor, if any.
    #[must_use]
    pub fn current_entity(&self) -> Option<Entity> {
        self.current
    }

    /// Select an entity, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn set_current_entity(&mut self, entity: Option<Entity>) -> EcsResult<()> {
        if let Some(entity) = entity
            && !self.entities.is_alive(entity)
        {
            return Err(EcsError::InvalidEntity(entity));
        }
        self.current = entity;
        Ok(())
    }

    // -- Components --

    /// Register component type `T`. Must happen once per type, before any
    /// entity uses it.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentAlreadyRegistered`] or
    /// [`EcsError::TooManyComponents`].
    pub fn register_component<T: Component>(&mut self) -> EcsResult<ComponentType> {
        self.components.register::<T>()
    }

    /// Returns the id `T` was registered under.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`].
    pub fn component_type<T: Component>(&self) -> EcsResult<ComponentType> {
        self.components.component_type::<T>()
    }

    /// Attach `value` to `entity`, set the entity's signature bit for `T`, and
    /// update system membership.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`], [`EcsError::ComponentNotRegistered`]
    /// or [`EcsError::DuplicateComponent`]. Nothing is modified on error.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> EcsResult<()> {
        let mut signature = self.entities.signature(entity)?;
        let component_type = self.components.component_type::<T>()?;
        self.components.add_component(entity, value)?;

        signature.set(component_type, true);
        self.entities.set_signature(entity, signature)?;
        self.systems.entity_signature_changed(entity, signature);
        debug!(entity = %entity, component = T::type_name(), "component added");
        Ok(())
    }

    /// Detach and return the entity's `T` value, clear its signature bit, and
    /// update system membership.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`], [`EcsError::ComponentNotRegistered`]
    /// or [`EcsError::ComponentMissing`]. Nothing is modified on error.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> EcsResult<T> {
        let mut signature = self.entities.signature(entity)?;
        let component_type = self.components.component_type::<T>()?;
        let value = self.components.remove_component::<T>(entity)?;

        signature.set(component_type, false);
        self.entities.set_signature(entity, signature)?;
        self.systems.entity_signature_changed(entity, signature);
        debug!(entity = %entity, component = T::type_name(), "component removed");
        Ok(value)
    }

    /// Returns the entity's `T` value.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`] or
    /// [`EcsError::ComponentMissing`].
    pub fn get_component<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
        self.components.get_component::<T>(entity)
    }

    /// Returns the entity's `T` value mutably.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`] or
    /// [`EcsError::ComponentMissing`].
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        self.components.get_component_mut::<T>(entity)
    }

    /// Returns `true` if the entity currently holds a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] or
    /// [`EcsError::ComponentNotRegistered`].
    pub fn has_component<T: Component>(&self, entity: Entity) -> EcsResult<bool> {
        let signature = self.entities.signature(entity)?;
        Ok(signature.contains(self.components.component_type::<T>()?))
    }

    /// Returns the dense array holding every `T`, for bulk iteration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`].
    pub fn component_array<T: Component>(&self) -> EcsResult<&ComponentArray<T>> {
        self.components.array::<T>()
    }

    /// Returns the dense array holding every `T` mutably. Values may be
    /// edited in place; adding or removing must go through the coordinator.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`].
    pub fn component_values_mut<T: Component>(
        &mut self,
    ) -> EcsResult<impl Iterator<Item = (Entity, &mut T)>> {
        Ok(self.components.array_mut::<T>()?.iter_mut())
    }

    /// Returns the component manager for read-only inspection.
    #[must_use]
    pub fn components(&self) -> &ComponentManager {
        &self.components
    }

    // -- Systems --

    /// Register system type `S` with an empty entity set.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemAlreadyRegistered`].
    pub fn register_system<S: System>(&mut self) -> EcsResult<SystemHandle<S>> {
        self.systems.register_system::<S>()
    }

    /// Set the components `S` requires and rebuild its entity set from every
    /// live entity.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemNotRegistered`].
    pub fn set_system_signature<S: System>(&mut self, signature: Signature) -> EcsResult<()> {
        self.systems
            .set_signature::<S, _>(signature, self.entities.living_signatures())
    }

    /// Returns the components `S` requires.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemNotRegistered`].
    pub fn system_signature<S: System>(&self) -> EcsResult<Signature> {
        self.systems.signature::<S>()
    }

    /// Returns the entities `S` currently processes.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemNotRegistered`].
    pub fn system_entities<S: System>(&self) -> EcsResult<&BTreeSet<Entity>> {
        self.systems.entities::<S>()
    }

    /// Returns the record behind a system handle.
    #[must_use]
    pub fn system<S: System>(&self, handle: SystemHandle<S>) -> Option<&SystemRecord> {
        self.systems.get(handle)
    }

    /// Returns the system manager for read-only inspection.
    #[must_use]
    pub fn systems(&self) -> &SystemManager {
        &self.systems
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::with_valid_config(WorldConfig::default())
    }
}

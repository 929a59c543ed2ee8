//! Component type registry.
//!
//! The [`ComponentManager`] assigns each registered component type a
//! [`ComponentType`] id and owns that type's [`ComponentArray`]. All typed
//! component operations are forwarded to the matching array.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::array::{ComponentArray, ErasedComponentArray};
use crate::component::Component;
use crate::entity::Entity;
use crate::error::{EcsError, EcsResult};
use crate::signature::{ComponentType, MAX_COMPONENTS};

/// Owns one [`ComponentArray`] per registered component type.
pub struct ComponentManager {
    /// Largest number of types that may be registered.
    max_components: usize,
    /// Maps a Rust type to the id it was registered under.
    types: HashMap<TypeId, ComponentType>,
    /// Arrays indexed by [`ComponentType::index`].
    arrays: Vec<Box<dyn ErasedComponentArray>>,
}

impl ComponentManager {
    /// Create a manager that accepts up to `max_components` types.
    ///
    /// Values above [`MAX_COMPONENTS`] are clamped to the signature width.
    #[must_use]
    pub fn new(max_components: usize) -> Self {
        Self {
            max_components: max_components.min(MAX_COMPONENTS),
            types: HashMap::new(),
            arrays: Vec::new(),
        }
    }

    /// Assign the next unused id to `T` and create its array.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentAlreadyRegistered`] if `T` is already
    /// registered, or [`EcsError::TooManyComponents`] if every id is taken.
    pub fn register<T: Component>(&mut self) -> EcsResult<ComponentType> {
        if self.types.contains_key(&TypeId::of::<T>()) {
            return Err(EcsError::ComponentAlreadyRegistered(T::type_name()));
        }
        if self.arrays.len() >= self.max_components {
            return Err(EcsError::TooManyComponents {
                max: self.max_components,
            });
        }

        let component_type = ComponentType(self.arrays.len() as u8);
        self.types.insert(TypeId::of::<T>(), component_type);
        self.arrays.push(Box::new(ComponentArray::<T>::new()));
        info!(
            component = T::type_name(),
            id = component_type.0,
            "registered component type"
        );
        Ok(component_type)
    }

    /// Returns the id `T` was registered under.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`] if `T` was never registered.
    pub fn component_type<T: Component>(&self) -> EcsResult<ComponentType> {
        self.types
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or(EcsError::ComponentNotRegistered(T::type_name()))
    }

    /// Returns `true` if `T` has been registered.
    #[must_use]
    pub fn is_registered<T: Component>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered component types.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.arrays.len()
    }

    /// Returns the name of the component type registered under `component_type`.
    #[must_use]
    pub fn component_name(&self, component_type: ComponentType) -> Option<&'static str> {
        self.arrays
            .get(component_type.index())
            .map(|array| array.component_name())
    }

    /// Returns the array storing `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`] if `T` was never registered.
    pub fn array<T: Component>(&self) -> EcsResult<&ComponentArray<T>> {
        let component_type = self.component_type::<T>()?;
        self.arrays[component_type.index()]
            .as_any()
            .downcast_ref::<ComponentArray<T>>()
            .ok_or(EcsError::ComponentNotRegistered(T::type_name()))
    }

    /// Returns the array storing `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentNotRegistered`] if `T` was never registered.
    pub fn array_mut<T: Component>(&mut self) -> EcsResult<&mut ComponentArray<T>> {
        let component_type = self.component_type::<T>()?;
        self.arrays[component_type.index()]
            .as_any_mut()
            .downcast_mut::<ComponentArray<T>>()
            .ok_or(EcsError::ComponentNotRegistered(T::type_name()))
    }

    /// Store `value` for `entity` in `T`'s array.
    ///
    /// # Errors
    ///
    /// Propagates [`ComponentArray::insert`] errors, or
    /// [`EcsError::ComponentNotRegistered`].
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> EcsResult<()> {
        self.array_mut::<T>()?.insert(entity, value)
    }

    /// Remove and return the entity's `T` value.
    ///
    /// # Errors
    ///
    /// Propagates [`ComponentArray::remove`] errors, or
    /// [`EcsError::ComponentNotRegistered`].
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> EcsResult<T> {
        self.array_mut::<T>()?.remove(entity)
    }

    /// Returns the entity's `T` value.
    ///
    /// # Errors
    ///
    /// Propagates [`ComponentArray::get`] errors, or
    /// [`EcsError::ComponentNotRegistered`].
    pub fn get_component<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
        self.array::<T>()?.get(entity)
    }

    /// Returns the entity's `T` value mutably.
    ///
    /// # Errors
    ///
    /// Propagates [`ComponentArray::get_mut`] errors, or
    /// [`EcsError::ComponentNotRegistered`].
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        self.array_mut::<T>()?.get_mut(entity)
    }

    /// Drop the entity's value from every array that holds one.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for array in &mut self.arrays {
            if array.on_entity_destroyed(entity) {
                debug!(
                    entity = %entity,
                    component = array.component_name(),
                    "dropped component of destroyed entity"
                );
            }
        }
    }

    /// Returns `(type, stored count)` for every registered type, in id order.
    pub fn array_sizes(&self) -> impl Iterator<Item = (ComponentType, usize)> + '_ {
        self.arrays
            .iter()
            .enumerate()
            .map(|(index, array)| (ComponentType(index as u8), array.len()))
    }
}

impl Default for ComponentManager {
    fn default() -> Self {
        Self::new(MAX_COMPONENTS)
    }
}

impl std::fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.arrays.iter().map(|a| a.component_name()).collect();
        f.debug_struct("ComponentManager")
            .field("max_components", &self.max_components)
            .field("registered", &names)
            .finish()
    }
}

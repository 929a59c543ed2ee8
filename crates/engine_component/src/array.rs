//! Packed per-type component storage.
//!
//! A [`ComponentArray`] keeps every value of one component type in a single
//! gap-free `Vec`, with a two-way mapping between entities and slots. Removal
//! moves the last value into the hole, so insert and remove are both O(1) and
//! iteration only ever touches live values.

use std::any::Any;
use std::collections::HashMap;

use crate::component::Component;
use crate::entity::Entity;
use crate::error::{EcsError, EcsResult};

/// Dense storage for all components of type `T`.
///
/// Invariants, for every slot `i` in `0..len()`:
///
/// ```text
/// entity_to_slot[slot_to_entity[i]] == i
/// ```
///
/// and `entity_to_slot` has exactly `len()` entries.
#[derive(Debug)]
pub struct ComponentArray<T> {
    /// Component values. Length equals the number of entities holding `T`.
    components: Vec<T>,
    /// Maps an entity to the slot holding its value.
    entity_to_slot: HashMap<Entity, usize>,
    /// Maps a slot back to the entity that owns it. Parallel to `components`.
    slot_to_entity: Vec<Entity>,
}

impl<T: Component> ComponentArray<T> {
    /// Create an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entity_to_slot: HashMap::new(),
            slot_to_entity: Vec::new(),
        }
    }

    /// Append `value` for `entity` at the end of the dense array.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateComponent`] if the entity already holds a
    /// value here.
    pub fn insert(&mut self, entity: Entity, value: T) -> EcsResult<()> {
        if self.entity_to_slot.contains_key(&entity) {
            return Err(EcsError::DuplicateComponent {
                entity,
                component: T::type_name(),
            });
        }
        let slot = self.components.len();
        self.entity_to_slot.insert(entity, slot);
        self.slot_to_entity.push(entity);
        self.components.push(value);
        Ok(())
    }

    /// Remove and return the entity's value.
    ///
    /// The last value in the array moves into the vacated slot, so the
    /// relative order of the remaining values is not preserved.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentMissing`] if the entity holds no value.
    pub fn remove(&mut self, entity: Entity) -> EcsResult<T> {
        let removed = self
            .entity_to_slot
            .remove(&entity)
            .ok_or(EcsError::ComponentMissing {
                entity,
                component: T::type_name(),
            })?;

        let value = self.components.swap_remove(removed);
        self.slot_to_entity.swap_remove(removed);

        // If a value was moved into the hole, point its entity at the new slot.
        if let Some(&moved) = self.slot_to_entity.get(removed) {
            self.entity_to_slot.insert(moved, removed);
        }
        Ok(value)
    }

    /// Returns the entity's value.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentMissing`] if the entity holds no value.
    pub fn get(&self, entity: Entity) -> EcsResult<&T> {
        let slot = self.slot_of(entity).ok_or(EcsError::ComponentMissing {
            entity,
            component: T::type_name(),
        })?;
        Ok(&self.components[slot])
    }

    /// Returns the entity's value mutably. Writes land directly in the dense
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentMissing`] if the entity holds no value.
    pub fn get_mut(&mut self, entity: Entity) -> EcsResult<&mut T> {
        let slot = self.slot_of(entity).ok_or(EcsError::ComponentMissing {
            entity,
            component: T::type_name(),
        })?;
        Ok(&mut self.components[slot])
    }

    /// Returns `true` if the entity holds a value here.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_slot.contains_key(&entity)
    }

    /// Returns the dense slot holding the entity's value.
    #[must_use]
    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.entity_to_slot.get(&entity).copied()
    }

    /// Returns the entity owning `slot`.
    #[must_use]
    pub fn entity_at(&self, slot: usize) -> Option<Entity> {
        self.slot_to_entity.get(slot).copied()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the values in dense order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.components
    }

    /// Returns the owning entities in dense order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.slot_to_entity
    }

    /// Iterate over `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.slot_to_entity.iter().copied().zip(self.components.iter())
    }

    /// Iterate mutably over `(entity, value)` pairs in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.slot_to_entity
            .iter()
            .copied()
            .zip(self.components.iter_mut())
    }
}

impl<T: Component> Default for ComponentArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentArray`], so arrays of different component
/// types can live in one table and be notified together.
pub trait ErasedComponentArray: Any {
    /// Drop the entity's value if it holds one. Returns `true` if a value was
    /// removed.
    fn on_entity_destroyed(&mut self, entity: Entity) -> bool;

    /// Returns `true` if the entity holds a value here.
    fn contains(&self, entity: Entity) -> bool;

    /// Returns the number of stored values.
    fn len(&self) -> usize;

    /// Returns `true` if no values are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the component type's name.
    fn component_name(&self) -> &'static str;

    /// Upcast for downcasting to the concrete array type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete array type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedComponentArray for ComponentArray<T> {
    fn on_entity_destroyed(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_ok()
    }

    fn contains(&self, entity: Entity) -> bool {
        ComponentArray::contains(self, entity)
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn component_name(&self) -> &'static str {
        T::type_name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    fn pos(x: f32) -> Position {
        Position { x, y: -x }
    }

    fn assert_mappings_inverse(array: &ComponentArray<Position>) {
        for slot in 0..array.len() {
            let entity = array.entity_at(slot).unwrap();
            assert_eq!(array.slot_of(entity), Some(slot));
        }
        assert_eq!(array.entities().len(), array.len());
    }

    #[test]
    fn test_insert_and_get() {
        let mut array = ComponentArray::new();
        array.insert(Entity(4), pos(1.0)).unwrap();
        assert_eq!(array.get(Entity(4)), Ok(&pos(1.0)));
        assert_eq!(array.len(), 1);
        assert_eq!(array.slot_of(Entity(4)), Some(0));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut array = ComponentArray::new();
        array.insert(Entity(1), pos(1.0)).unwrap();
        assert_eq!(
            array.insert(Entity(1), pos(2.0)),
            Err(EcsError::DuplicateComponent {
                entity: Entity(1),
                component: "Position",
            })
        );
        assert_eq!(array.get(Entity(1)), Ok(&pos(1.0)));
    }

    #[test]
    fn test_remove_moves_last_into_hole() {
        let mut array = ComponentArray::new();
        for id in 0..4 {
            array.insert(Entity(id), pos(id as f32)).unwrap();
        }

        assert_eq!(array.remove(Entity(1)), Ok(pos(1.0)));
        assert_eq!(array.len(), 3);
        // Entity 3 was last and now fills slot 1.
        assert_eq!(array.slot_of(Entity(3)), Some(1));
        assert_eq!(array.entities(), &[Entity(0), Entity(3), Entity(2)]);
        for id in [0, 2, 3] {
            assert_eq!(array.get(Entity(id)), Ok(&pos(id as f32)));
        }
        assert_mappings_inverse(&array);
    }

    #[test]
    fn test_remove_last_slot() {
        let mut array = ComponentArray::new();
        array.insert(Entity(0), pos(0.0)).unwrap();
        array.insert(Entity(1), pos(1.0)).unwrap();
        array.remove(Entity(1)).unwrap();
        assert_eq!(array.entities(), &[Entity(0)]);
        assert_mappings_inverse(&array);

        array.remove(Entity(0)).unwrap();
        assert!(array.is_empty());
    }

    #[test]
    fn test_remove_missing() {
        let mut array: ComponentArray<Position> = ComponentArray::new();
        assert!(matches!(
            array.remove(Entity(2)),
            Err(EcsError::ComponentMissing { entity: Entity(2), .. })
        ));
        assert!(array.get(Entity(2)).is_err());
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut array = ComponentArray::new();
        array.insert(Entity(0), pos(0.0)).unwrap();
        array.insert(Entity(1), pos(1.0)).unwrap();

        array.get_mut(Entity(1)).unwrap().x = 10.0;
        assert_eq!(array.as_slice()[1].x, 10.0);
        let xs: Vec<f32> = array.iter().map(|(_, p)| p.x).collect();
        assert_eq!(xs, vec![0.0, 10.0]);
    }

    #[test]
    fn test_iter_mut_pairs_entities_with_values() {
        let mut array = ComponentArray::new();
        array.insert(Entity(7), pos(7.0)).unwrap();
        array.insert(Entity(3), pos(3.0)).unwrap();
        for (entity, value) in array.iter_mut() {
            value.y = entity.id() as f32;
        }
        assert_eq!(array.get(Entity(7)).unwrap().y, 7.0);
        assert_eq!(array.get(Entity(3)).unwrap().y, 3.0);
    }

    #[test]
    fn test_on_entity_destroyed_is_idempotent() {
        let mut array = ComponentArray::new();
        array.insert(Entity(0), pos(0.0)).unwrap();
        array.insert(Entity(1), pos(1.0)).unwrap();

        let erased: &mut dyn ErasedComponentArray = &mut array;
        assert!(erased.on_entity_destroyed(Entity(0)));
        assert!(!erased.on_entity_destroyed(Entity(0)));
        assert!(!erased.on_entity_destroyed(Entity(9)));
        assert_eq!(erased.len(), 1);
        assert_eq!(erased.component_name(), "Position");
        assert_mappings_inverse(&array);
    }
}

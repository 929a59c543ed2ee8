//! In-memory scene: the set of entities the editor placed, by preset.

use std::fmt;

use engine_ecs::{Coordinator, EcsError, EcsResult, Entity};
use engine_math::Transform;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::components::{Color, MeshComponent, MeshHandle};

/// Presets offered by the "add entity" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A transform and nothing else.
    Empty,
    /// A grey unit cube.
    Cube,
    /// A grey unit sphere.
    Sphere,
}

impl EntityType {
    fn mesh(self) -> Option<MeshHandle> {
        match self {
            Self::Empty => None,
            Self::Cube => Some(MeshHandle::CUBE),
            Self::Sphere => Some(MeshHandle::SPHERE),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "Empty",
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
        };
        f.write_str(name)
    }
}

/// A named group of entities living in one coordinator.
///
/// The scene remembers the creation generation of each entity it placed, so
/// an id that was destroyed elsewhere and handed to someone else is never
/// mistaken for one of the scene's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    name: String,
    entities: Vec<Entity>,
    /// Creation generation of each entry in `entities`.
    generations: Vec<u32>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            generations: Vec::new(),
        }
    }

    /// Returns the scene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scene's entities in insertion order. Entities destroyed
    /// directly through the coordinator stay listed until
    /// [`retain_live`](Self::retain_live) runs.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns `true` if the entity was placed by this scene and is still the
    /// same live entity.
    #[must_use]
    pub fn contains(&self, coord: &Coordinator, entity: Entity) -> bool {
        self.position(coord, entity).is_some()
    }

    /// Drop entries whose entity has been destroyed, even if the id now
    /// belongs to another entity. Returns the number dropped.
    pub fn retain_live(&mut self, coord: &Coordinator) -> usize {
        let before = self.entities.len();
        let mut kept = 0;
        for i in 0..before {
            if is_current(coord, self.entities[i], self.generations[i]) {
                self.entities.swap(kept, i);
                self.generations.swap(kept, i);
                kept += 1;
            }
        }
        self.entities.truncate(kept);
        self.generations.truncate(kept);
        let dropped = before - kept;
        if dropped > 0 {
            debug!(scene = %self.name, dropped, "dropped stale entities");
        }
        dropped
    }

    fn position(&self, coord: &Coordinator, entity: Entity) -> Option<usize> {
        self.entities
            .iter()
            .zip(&self.generations)
            .position(|(&e, &generation)| e == entity && is_current(coord, e, generation))
    }

    /// Create an entity from a preset and add it to the scene. The entity is
    /// named `"<preset> <id>"`.
    ///
    /// The default components must already be registered.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] when the world is full, or a
    /// registration error if the default components are missing. Nothing is
    /// left behind on failure.
    pub fn add_entity(&mut self, coord: &mut Coordinator, kind: EntityType) -> EcsResult<Entity> {
        let entity = coord.create_entity()?;
        if let Err(err) = Self::attach_preset(coord, entity, kind) {
            if let Err(cleanup) = coord.destroy_entity(entity) {
                warn!(%entity, %kind, error = %cleanup, "failed to roll back partial entity");
            }
            return Err(err);
        }
        coord.set_entity_name(entity, format!("{kind} {}", entity.id()))?;
        let generation = coord.entity_generation(entity)?;
        self.entities.push(entity);
        self.generations.push(generation);
        debug!(scene = %self.name, %entity, %kind, "added entity");
        Ok(entity)
    }

    fn attach_preset(coord: &mut Coordinator, entity: Entity, kind: EntityType) -> EcsResult<()> {
        coord.add_component(entity, Transform::IDENTITY)?;
        if let Some(mesh) = kind.mesh() {
            coord.add_component(entity, Color::DEFAULT_GREY)?;
            coord.add_component(entity, MeshComponent { mesh })?;
        }
        Ok(())
    }

    /// Remove an entity from the scene and destroy it. Clears the editor
    /// selection if it pointed at this entity.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidEntity`] if the entity is not part of this
    /// scene, or was destroyed since the scene placed it. A stale entry is
    /// dropped from the scene; whatever entity now holds the id is untouched.
    pub fn remove_entity(&mut self, coord: &mut Coordinator, entity: Entity) -> EcsResult<()> {
        let Some(pos) = self.position(coord, entity) else {
            self.retain_live(coord);
            return Err(EcsError::InvalidEntity(entity));
        };
        coord.destroy_entity(entity)?;
        self.entities.remove(pos);
        self.generations.remove(pos);
        debug!(scene = %self.name, %entity, "removed entity");
        Ok(())
    }
}

fn is_current(coord: &Coordinator, entity: Entity, generation: u32) -> bool {
    coord.entity_generation(entity) == Ok(generation)
}

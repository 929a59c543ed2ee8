//! # engine_defaults
//!
//! The components and systems every scene starts with, plus the scene
//! container and the by-name component catalogue the editor panels use.
//!
//! Call [`register_defaults`] once on a fresh [`Coordinator`](engine_ecs::Coordinator)
//! before creating any scene entities.

pub mod catalogue;
pub mod components;
pub mod scene;
pub mod systems;

pub use catalogue::{COMPONENT_NAMES, CatalogueError, add_component_by_name};
pub use components::{Color, MeshComponent, MeshHandle, RigidBody, SceneCamera};
pub use scene::{EntityType, Scene};
pub use systems::{
    DefaultSystems, DrawItem, EntityTrackSystem, PhysicsSystem, RendererSystem, TrackedEntity,
    register_defaults,
};
